//! Wishlist entries and the per-tab view state built around them.

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// localStorage key holding the auto-sync toggle (`"1"` / `"0"`)
pub const AUTO_SYNC_KEY: &str = "dartlens:autoSync";

pub const MSG_LOAD_FAILED: &str = "목록을 불러올 수 없습니다";
pub const MSG_LOGIN_REQUIRED: &str = "로그인이 필요한 서비스입니다.";
pub const MSG_EMPTY: &str = "등록된 기업이 없습니다.";

/// DART corporation code, the unique key of a wishlist entry
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CorpCode(String);

impl CorpCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CorpCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CorpCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub corp_code: CorpCode,
    #[serde(default)]
    pub corp_name: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub stock_code: Option<String>,
}

impl WishlistEntry {
    pub fn new(corp_code: impl Into<CorpCode>) -> Self {
        Self {
            corp_code: corp_code.into(),
            corp_name: None,
            alias: None,
            stock_code: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.corp_name = Some(name.to_string());
        self
    }

    pub fn display_name(&self) -> &str {
        self.corp_name
            .as_deref()
            .or(self.alias.as_deref())
            .unwrap_or(self.corp_code.value())
    }

    /// `corp_code` plus ` · stock_code` when listed
    pub fn subtitle(&self) -> String {
        match self.stock_code.as_deref().filter(|s| !s.is_empty()) {
            Some(stock) => format!("{} · {}", self.corp_code, stock),
            None => self.corp_code.to_string(),
        }
    }
}

/// Aggregate progress shown next to the auto-sync toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Running,
    Done,
}

impl SyncPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SyncPhase::Idle => "자동 동기화 대기",
            SyncPhase::Running => "자동 동기화 진행 중",
            SyncPhase::Done => "자동 동기화 완료",
        }
    }
}

/// Counts returned by a finished backend sync
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub added: usize,
    pub missing: usize,
    pub found: Option<u32>,
    pub expected: Option<u32>,
}

impl SyncReport {
    pub fn summary(&self) -> String {
        let show = |v: Option<u32>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
        format!(
            "동기화 완료: 추가 {}건, 미제공 {}건, 확보 {}/{}",
            self.added,
            self.missing,
            show(self.found),
            show(self.expected)
        )
    }
}

pub fn sync_failure_message(reason: &str) -> String {
    format!("동기화 실패: {}", reason)
}

/// Everything a wishlist view renders. Lives only in the current tab.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WishlistState {
    pub rows: Vec<WishlistEntry>,
    pub loading: bool,
    pub error: Option<String>,
    pub syncing: BTreeSet<CorpCode>,
    pub phase: SyncPhase,
    pub auto_sync: bool,
    pub active: bool,
}

impl WishlistState {
    pub fn with_auto_sync(auto_sync: bool) -> Self {
        Self {
            auto_sync,
            ..Self::default()
        }
    }

    /// Drops the entry locally; returns whether it was present.
    pub fn remove(&mut self, corp_code: &CorpCode) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| &row.corp_code != corp_code);
        self.rows.len() != before
    }

    pub fn contains(&self, corp_code: &CorpCode) -> bool {
        self.rows.iter().any(|row| &row.corp_code == corp_code)
    }

    pub fn begin_sync(&mut self, corp_code: &CorpCode) {
        self.syncing.insert(corp_code.clone());
        self.phase = SyncPhase::Running;
    }

    pub fn finish_sync(&mut self, corp_code: &CorpCode) {
        self.syncing.remove(corp_code);
        self.phase = if self.syncing.is_empty() {
            SyncPhase::Done
        } else {
            SyncPhase::Running
        };
    }

    pub fn is_syncing(&self, corp_code: &CorpCode) -> bool {
        self.syncing.contains(corp_code)
    }

    pub fn any_busy(&self) -> bool {
        !self.syncing.is_empty()
    }

    pub fn apply_rows(&mut self, rows: Vec<WishlistEntry>) {
        self.rows = rows;
        self.loading = false;
        self.error = None;
    }

    pub fn apply_failure(&mut self) {
        self.rows.clear();
        self.loading = false;
        self.error = Some(MSG_LOAD_FAILED.to_string());
    }

    /// Logged out or unmounted: nothing from the old session stays visible.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.loading = false;
        self.error = None;
        self.syncing.clear();
        self.phase = SyncPhase::Idle;
        self.active = false;
    }

    pub fn is_empty_view(&self) -> bool {
        self.rows.is_empty() && !self.loading
    }
}

pub fn parse_auto_sync(raw: Option<&str>) -> bool {
    raw == Some("1")
}

pub fn encode_auto_sync(enabled: bool) -> &'static str {
    if enabled { "1" } else { "0" }
}
