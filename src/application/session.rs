//! Cookie session: who is signed in, and the login/signup/logout actions.

use std::rc::Rc;

use crate::application::listeners::Subscription;
use crate::application::notifications::Notifier;
use crate::application::store::Store;
use crate::domain::errors::{ApiError, SubmitError};
use crate::domain::logging::LogComponent;
use crate::domain::repositories::AuthApi;
use crate::domain::session::{MSG_LOGGED_OUT, SessionState};
use crate::domain::validation::{
    LoginForm, MSG_LOGIN_FAILED, MSG_SIGNUP_FAILED, MSG_SUBMIT_FALLBACK, SignupForm,
};
use crate::{log_info, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("Session");

pub struct SessionStore<A> {
    inner: Rc<SessionInner<A>>,
}

impl<A> Clone for SessionStore<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct SessionInner<A> {
    api: A,
    notifier: Rc<dyn Notifier>,
    store: Store<SessionState>,
}

/// Backend refusal text, or `fallback` when it sent none
fn refusal(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Rejected {
            message: Some(message),
            ..
        } if !message.is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}

fn transport_failure(error: &ApiError) -> String {
    let text = error.user_message();
    if text.is_empty() {
        MSG_SUBMIT_FALLBACK.to_string()
    } else {
        text
    }
}

impl<A: AuthApi + 'static> SessionStore<A> {
    pub fn new(api: A, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                api,
                notifier,
                store: Store::new(SessionState::default()),
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.store.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) -> Subscription {
        self.inner.store.subscribe(observer)
    }

    /// Probes `/api/auth/me`. Any failure means "signed out"; `ready` is set
    /// in every case.
    pub async fn refresh(&self) {
        let user = match self.inner.api.me().await {
            Ok(user) => user,
            Err(e) => {
                log_warn!(COMPONENT, "session probe failed: {}", e);
                None
            }
        };
        self.inner.store.update(|s| {
            s.user = user;
            s.ready = true;
        });
    }

    pub async fn after_login(&self) {
        self.inner.store.update(|s| s.ready = false);
        self.refresh().await;
    }

    /// Clears the user whether or not the request went through; the notice
    /// is only shown when it did.
    pub async fn logout(&self) {
        match self.inner.api.logout().await {
            Ok(()) => {
                log_info!(COMPONENT, "logged out");
                self.inner.notifier.info(MSG_LOGGED_OUT);
            }
            Err(e) => {
                log_warn!(COMPONENT, "logout request failed: {}", e);
            }
        }
        self.inner.store.update(|s| s.user = None);
    }

    /// Validates, then authenticates. Invalid input never reaches the
    /// backend.
    pub async fn login(&self, form: &LoginForm) -> Result<(), SubmitError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        match self.inner.api.login(form).await {
            Ok(ack) => {
                if let Some(message) = ack.message.as_deref().filter(|m| !m.is_empty()) {
                    self.inner.notifier.success(message);
                }
                self.after_login().await;
                Ok(())
            }
            Err(e) if !e.is_transport() => {
                let text = refusal(&e, MSG_LOGIN_FAILED);
                log_warn!(COMPONENT, "login refused: {}", e);
                self.inner.notifier.error(&text);
                Err(SubmitError::Rejected(text))
            }
            Err(e) => {
                log_warn!(COMPONENT, "login failed: {}", e);
                Err(SubmitError::Failed(transport_failure(&e)))
            }
        }
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<(), SubmitError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        match self.inner.api.signup(form).await {
            Ok(ack) => {
                if let Some(message) = ack.message.as_deref().filter(|m| !m.is_empty()) {
                    self.inner.notifier.success(message);
                }
                Ok(())
            }
            Err(e) if !e.is_transport() => {
                log_warn!(COMPONENT, "signup refused: {}", e);
                Err(SubmitError::Rejected(refusal(&e, MSG_SIGNUP_FAILED)))
            }
            Err(e) => {
                log_warn!(COMPONENT, "signup failed: {}", e);
                Err(SubmitError::Failed(transport_failure(&e)))
            }
        }
    }
}
