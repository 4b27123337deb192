//! Ports to the backend and to browser storage.
//!
//! View-models are generic over these traits so they can run against the
//! HTTP client in the browser and against in-memory fakes on the host.

#![allow(async_fn_in_trait)]

use crate::domain::errors::{ApiResult, StorageError};
use crate::domain::insights::{InsightQuery, InsightSnapshot};
use crate::domain::search::CorpSummary;
use crate::domain::session::User;
use crate::domain::validation::{LoginForm, SignupForm};
use crate::domain::wishlist::{CorpCode, SyncReport, WishlistEntry};

/// Server acknowledgement carried by `{ ok, message }` responses
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ack {
    pub message: Option<String>,
}

pub trait AuthApi {
    /// `Ok(None)` when there is no session
    async fn me(&self) -> ApiResult<Option<User>>;
    async fn login(&self, form: &LoginForm) -> ApiResult<Ack>;
    async fn logout(&self) -> ApiResult<()>;
    async fn signup(&self, form: &SignupForm) -> ApiResult<Ack>;
}

pub trait CorpSearchApi {
    async fn search_corps(&self, query: &str, limit: u32) -> ApiResult<Vec<CorpSummary>>;
}

pub trait WishlistApi {
    async fn list_wishlist(&self) -> ApiResult<Vec<WishlistEntry>>;
    async fn add_to_wishlist(&self, corp_code: &CorpCode) -> ApiResult<Ack>;
    async fn remove_from_wishlist(&self, corp_code: &CorpCode) -> ApiResult<()>;
}

pub trait InsightsApi {
    async fn sync_insights(&self, corp_code: &CorpCode) -> ApiResult<SyncReport>;
    async fn fetch_insights(
        &self,
        corp_code: &CorpCode,
        query: &InsightQuery,
    ) -> ApiResult<InsightSnapshot>;
}

/// Small string preferences (localStorage / sessionStorage)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
