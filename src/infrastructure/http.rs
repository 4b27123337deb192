//! Cookie-authenticated client for the DART:Lens backend.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::rc::Rc;
use web_sys::RequestCredentials;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::insights::{InsightQuery, InsightSnapshot};
use crate::domain::logging::LogComponent;
use crate::domain::repositories::{Ack, AuthApi, CorpSearchApi, InsightsApi, WishlistApi};
use crate::domain::search::CorpSummary;
use crate::domain::session::User;
use crate::domain::validation::{LoginForm, SignupForm};
use crate::domain::wishlist::{CorpCode, SyncReport, WishlistEntry};
use crate::infrastructure::dto::{
    AckResponse, CorpCodeBody, MeResponse, SearchResponse, SyncResponse, WishlistResponse,
};
use crate::log_debug;

const COMPONENT: LogComponent = LogComponent::Infrastructure("ApiClient");

#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
}

fn encode(component: &str) -> String {
    js_sys::encode_uri_component(component).into()
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn http_error(response: &Response) -> ApiError {
    ApiError::Http {
        status: response.status(),
        status_text: response.status_text(),
    }
}

impl ApiClient {
    /// `base_url` is prepended to every path; empty means same origin.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        builder
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(network)
    }

    async fn send_json<B: serde::Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> ApiResult<Response> {
        builder
            .credentials(RequestCredentials::Include)
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(network)
    }

    /// Body of a 2xx response; anything else is an HTTP error.
    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        if !response.ok() {
            return Err(http_error(&response));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `{ ok, message }` bodies are read whatever the status, so the
    /// backend's refusal text reaches the user.
    async fn read_ack(response: Response) -> ApiResult<Ack> {
        let (ok, status) = (response.ok(), response.status());
        match response.json::<AckResponse>().await {
            Ok(body) => body.into_result(ok, status),
            Err(_) if !ok => Err(http_error(&response)),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }
}

impl AuthApi for ApiClient {
    async fn me(&self) -> ApiResult<Option<User>> {
        let response = self.send(Request::get(&self.url("/api/auth/me"))).await?;
        if !response.ok() {
            return Ok(None);
        }
        let body: MeResponse = Self::read_json(response).await?;
        Ok(body.user)
    }

    async fn login(&self, form: &LoginForm) -> ApiResult<Ack> {
        let response = self
            .send_json(Request::post(&self.url("/api/auth/login")), form)
            .await?;
        Self::read_ack(response).await
    }

    /// Any answer counts; only a transport failure is an error.
    async fn logout(&self) -> ApiResult<()> {
        self.send(Request::post(&self.url("/api/auth/logout")))
            .await
            .map(|_| ())
    }

    async fn signup(&self, form: &SignupForm) -> ApiResult<Ack> {
        let response = self
            .send_json(Request::post(&self.url("/api/auth/signup")), form)
            .await?;
        Self::read_ack(response).await
    }
}

impl CorpSearchApi for ApiClient {
    async fn search_corps(&self, query: &str, limit: u32) -> ApiResult<Vec<CorpSummary>> {
        let url = self.url(&format!(
            "/api/corps/search?q={}&limit={}",
            encode(query),
            limit
        ));
        log_debug!(COMPONENT, "GET {}", url);
        let response = self.send(Request::get(&url)).await?;
        let body: SearchResponse = Self::read_json(response).await?;
        Ok(body.rows)
    }
}

impl WishlistApi for ApiClient {
    async fn list_wishlist(&self) -> ApiResult<Vec<WishlistEntry>> {
        let response = self.send(Request::get(&self.url("/api/wishlist"))).await?;
        let body: WishlistResponse = Self::read_json(response).await?;
        Ok(body.into_entries())
    }

    async fn add_to_wishlist(&self, corp_code: &CorpCode) -> ApiResult<Ack> {
        let response = self
            .send_json(
                Request::post(&self.url("/api/wishlist")),
                &CorpCodeBody { corp_code },
            )
            .await?;
        Self::read_ack(response).await
    }

    async fn remove_from_wishlist(&self, corp_code: &CorpCode) -> ApiResult<()> {
        let url = self.url(&format!("/api/wishlist/{}", encode(corp_code.value())));
        let response = self.send(Request::delete(&url)).await?;
        if response.ok() {
            Ok(())
        } else {
            Err(http_error(&response))
        }
    }
}

impl InsightsApi for ApiClient {
    async fn sync_insights(&self, corp_code: &CorpCode) -> ApiResult<SyncReport> {
        let response = self
            .send_json(
                Request::post(&self.url("/api/insights/sync")),
                &CorpCodeBody { corp_code },
            )
            .await?;
        let (ok, status) = (response.ok(), response.status());
        match response.json::<SyncResponse>().await {
            Ok(body) => body.into_result(ok, status),
            Err(_) if !ok => Err(http_error(&response)),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }

    async fn fetch_insights(
        &self,
        corp_code: &CorpCode,
        query: &InsightQuery,
    ) -> ApiResult<InsightSnapshot> {
        let url = self.url(&format!(
            "/api/insights/{}?years={}&reprt={}&fs={}",
            encode(corp_code.value()),
            query.years,
            encode(&query.reprt),
            encode(&query.fs)
        ));
        log_debug!(COMPONENT, "GET {}", url);
        let response = self.send(Request::get(&url)).await?;
        Self::read_json(response).await
    }
}
