use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MSG_LOGGED_OUT: &str = "로그아웃 되었습니다.";

/// Signed-in user as reported by `/api/auth/me`. Fields beyond name and
/// email are kept verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<User>,
    /// Set once the first session probe finished, successfully or not
    pub ready: bool,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// What a protected route should do for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Session probe still running, render nothing
    Pending,
    Redirect(&'static str),
    Render,
}

pub const LOGIN_PATH: &str = "/login";

pub fn route_access(session: &SessionState) -> RouteAccess {
    if !session.ready {
        RouteAccess::Pending
    } else if !session.is_logged_in() {
        RouteAccess::Redirect(LOGIN_PATH)
    } else {
        RouteAccess::Render
    }
}
