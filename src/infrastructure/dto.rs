//! Wire shapes of the DART:Lens REST API and their conversion into domain
//! values. Decoding is tolerant: absent arrays and counters default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::repositories::Ack;
use crate::domain::search::CorpSummary;
use crate::domain::session::User;
use crate::domain::wishlist::{CorpCode, SyncReport, WishlistEntry};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MeResponse {
    pub user: Option<User>,
}

/// `{ ok, message }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AckResponse {
    pub ok: bool,
    pub message: Option<String>,
}

impl AckResponse {
    /// Success requires both a 2xx status and `ok: true`.
    pub fn into_result(self, http_ok: bool, status: u16) -> ApiResult<Ack> {
        if http_ok && self.ok {
            Ok(Ack {
                message: self.message,
            })
        } else {
            Err(ApiError::Rejected {
                status,
                message: self.message,
            })
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub rows: Vec<CorpSummary>,
}

/// The list endpoint has answered with either key over time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WishlistResponse {
    pub items: Option<Vec<WishlistEntry>>,
    pub rows: Option<Vec<WishlistEntry>>,
}

impl WishlistResponse {
    pub fn into_entries(self) -> Vec<WishlistEntry> {
        self.items.or(self.rows).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CorpCodeBody<'a> {
    pub corp_code: &'a CorpCode,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncResponse {
    pub ok: bool,
    /// Counted when an array; `null` or any other shape counts as zero
    pub added: Option<Value>,
    pub missing: Option<Value>,
    pub found: Option<u32>,
    pub expected: Option<u32>,
    pub message: Option<String>,
}

fn array_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}

impl SyncResponse {
    pub fn into_result(self, http_ok: bool, status: u16) -> ApiResult<SyncReport> {
        if !http_ok || !self.ok {
            return Err(ApiError::Rejected {
                status,
                message: self.message,
            });
        }
        Ok(SyncReport {
            added: array_len(self.added.as_ref()),
            missing: array_len(self.missing.as_ref()),
            found: self.found,
            expected: self.expected,
        })
    }
}
