//! Runtime constants, resolved once at startup and provided through context.

use std::time::Duration;

use crate::domain::insights::InsightQuery;

/// Same origin unless overridden at build time
const API_BASE: Option<&str> = option_env!("DARTLENS_API_BASE");

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub search_limit: u32,
    pub search_debounce: Duration,
    pub insight_query: InsightQuery,
    pub broadcast_channel: &'static str,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.unwrap_or_default().to_string(),
            search_limit: 20,
            search_debounce: Duration::from_millis(200),
            insight_query: InsightQuery::default(),
            broadcast_channel: "wishlist",
        }
    }
}

impl AppConfig {
    pub fn debounce_millis(&self) -> u32 {
        u32::try_from(self.search_debounce.as_millis()).unwrap_or(u32::MAX)
    }
}
