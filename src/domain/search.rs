use serde::{Deserialize, Serialize};

use crate::domain::wishlist::CorpCode;

pub const MSG_SEARCHING: &str = "검색 중...";
pub const MSG_SEARCH_FAILED: &str = "검색 실패";
pub const MSG_NO_RESULTS: &str = "검색 결과가 없습니다.";
pub const MSG_ADD_NETWORK: &str = "네트워크 오류로 추가하지 못했습니다.";

/// One row of `/api/corps/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpSummary {
    pub corp_code: CorpCode,
    #[serde(default)]
    pub corp_name: String,
}

impl CorpSummary {
    pub fn new(corp_code: impl Into<CorpCode>, corp_name: &str) -> Self {
        Self {
            corp_code: corp_code.into(),
            corp_name: corp_name.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        if self.corp_name.is_empty() {
            self.corp_code.value()
        } else {
            &self.corp_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub query: String,
    pub rows: Vec<CorpSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SearchState {
    /// Empty query: no rows, no error, not loading.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.loading = false;
        self.error = None;
    }

    pub fn status_line(&self) -> Option<String> {
        if self.loading {
            Some(MSG_SEARCHING.to_string())
        } else if let Some(err) = &self.error {
            Some(err.clone())
        } else if self.query.trim().is_empty() {
            None
        } else {
            Some(format!("결과 {}건", self.rows.len()))
        }
    }

    pub fn shows_no_results(&self) -> bool {
        !self.loading && self.error.is_none() && !self.query.trim().is_empty() && self.rows.is_empty()
    }
}

pub fn added_message(name: &str) -> String {
    format!("{}이(가) 위시리스트에 추가되었습니다.", name)
}

pub fn add_failed_message(reason: Option<&str>) -> String {
    format!("추가 실패: {}", reason.filter(|r| !r.is_empty()).unwrap_or("오류"))
}
