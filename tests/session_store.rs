mod common;

use std::rc::Rc;

use common::{FakeBackend, RecordingNotifier, network, rejected};
use dart_lens::application::notifications::NoticeKind;
use dart_lens::application::session::SessionStore;
use dart_lens::domain::errors::{ApiError, SubmitError};
use dart_lens::domain::repositories::Ack;
use dart_lens::domain::session::{MSG_LOGGED_OUT, RouteAccess, User, route_access};
use dart_lens::domain::validation::{LoginForm, MSG_LOGIN_FAILED, MSG_SIGNUP_FAILED, SignupForm};
use futures::executor::block_on;

fn user() -> User {
    User {
        name: Some("홍길동".to_string()),
        email: Some("hong@example.com".to_string()),
        ..User::default()
    }
}

fn store(backend: &FakeBackend) -> (SessionStore<FakeBackend>, Rc<RecordingNotifier>) {
    let notifier = Rc::new(RecordingNotifier::default());
    (SessionStore::new(backend.clone(), notifier.clone()), notifier)
}

fn valid_login() -> LoginForm {
    LoginForm {
        email: "hong@example.com".to_string(),
        password: "secret123".to_string(),
        remember: true,
    }
}

fn valid_signup() -> SignupForm {
    SignupForm {
        name: "홍길동".to_string(),
        email: "hong@example.com".to_string(),
        password: "secret123".to_string(),
        confirm: "secret123".to_string(),
        agree_terms: true,
        agree_marketing: false,
    }
}

#[test]
fn guard_waits_for_the_first_probe() {
    let backend = FakeBackend::default();
    *backend.state.me_result.borrow_mut() = Some(Ok(Some(user())));
    let (session, _) = store(&backend);

    assert_eq!(route_access(&session.state()), RouteAccess::Pending);
    block_on(session.refresh());
    assert_eq!(route_access(&session.state()), RouteAccess::Render);
    assert_eq!(session.state().user.map(|u| u.label().to_string()), Some("홍길동".to_string()));
}

#[test]
fn failed_probe_means_signed_out_but_ready() {
    let backend = FakeBackend::default();
    *backend.state.me_result.borrow_mut() = Some(Err(network()));
    let (session, _) = store(&backend);

    block_on(session.refresh());

    let state = session.state();
    assert!(state.ready);
    assert!(!state.is_logged_in());
    assert_eq!(route_access(&state), RouteAccess::Redirect("/login"));
}

#[test]
fn invalid_login_never_reaches_the_backend() {
    let backend = FakeBackend::default();
    let (session, notifier) = store(&backend);
    let form = LoginForm {
        email: "abc".to_string(),
        password: String::new(),
        remember: false,
    };

    let result = block_on(session.login(&form));

    match result {
        Err(SubmitError::Invalid(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected field errors, got {:?}", other),
    }
    assert_eq!(backend.state.login_calls.get(), 0);
    assert_eq!(notifier.count(), 0);
}

#[test]
fn successful_login_notifies_and_reprobes() {
    let backend = FakeBackend::default();
    *backend.state.login_result.borrow_mut() = Some(Ok(Ack {
        message: Some("환영합니다".to_string()),
    }));
    *backend.state.me_result.borrow_mut() = Some(Ok(Some(user())));
    let (session, notifier) = store(&backend);

    let result = block_on(session.login(&valid_login()));

    assert_eq!(result, Ok(()));
    assert_eq!(notifier.last(), Some((NoticeKind::Success, "환영합니다".to_string())));
    assert_eq!(backend.state.me_calls.get(), 1);
    assert!(session.state().is_logged_in());
    assert!(session.state().ready);
}

#[test]
fn refused_login_uses_server_message_or_fallback() {
    let backend = FakeBackend::default();
    *backend.state.login_result.borrow_mut() = Some(Err(rejected("비밀번호가 틀렸습니다.")));
    let (session, notifier) = store(&backend);

    let result = block_on(session.login(&valid_login()));
    assert_eq!(result, Err(SubmitError::Rejected("비밀번호가 틀렸습니다.".to_string())));

    *backend.state.login_result.borrow_mut() = Some(Err(ApiError::Http {
        status: 401,
        status_text: "Unauthorized".to_string(),
    }));
    let result = block_on(session.login(&valid_login()));
    assert_eq!(result, Err(SubmitError::Rejected(MSG_LOGIN_FAILED.to_string())));
    assert_eq!(notifier.count(), 2);
    assert!(!session.state().is_logged_in());
}

#[test]
fn transport_failure_on_login_becomes_a_form_error() {
    let backend = FakeBackend::default();
    *backend.state.login_result.borrow_mut() = Some(Err(network()));
    let (session, notifier) = store(&backend);

    let result = block_on(session.login(&valid_login()));

    assert!(matches!(result, Err(SubmitError::Failed(_))));
    assert_eq!(notifier.count(), 0);
}

#[test]
fn logout_clears_the_user_even_when_the_request_fails() {
    let backend = FakeBackend::default();
    *backend.state.me_result.borrow_mut() = Some(Ok(Some(user())));
    let (session, notifier) = store(&backend);
    block_on(session.refresh());

    block_on(session.logout());
    assert!(!session.state().is_logged_in());
    assert_eq!(notifier.messages(), vec![MSG_LOGGED_OUT.to_string()]);

    block_on(session.refresh());
    *backend.state.logout_result.borrow_mut() = Some(Err(network()));
    block_on(session.logout());
    assert!(!session.state().is_logged_in());
    assert_eq!(notifier.count(), 1);
}

#[test]
fn signup_sends_only_the_public_fields() {
    let backend = FakeBackend::default();
    let (session, _) = store(&backend);

    let result = block_on(session.signup(&valid_signup()));

    assert_eq!(result, Ok(()));
    let sent = backend.state.signup_calls.borrow()[0].clone();
    let body = serde_json::to_value(&sent).unwrap_or_default();
    assert_eq!(
        body,
        serde_json::json!({
            "name": "홍길동",
            "email": "hong@example.com",
            "password": "secret123",
            "agreeMarketing": false
        })
    );
}

#[test]
fn refused_signup_falls_back_to_generic_text() {
    let backend = FakeBackend::default();
    *backend.state.signup_result.borrow_mut() = Some(Err(ApiError::Rejected {
        status: 409,
        message: None,
    }));
    let (session, _) = store(&backend);

    let result = block_on(session.signup(&valid_signup()));

    assert_eq!(result, Err(SubmitError::Rejected(MSG_SIGNUP_FAILED.to_string())));
}

#[test]
fn signup_with_mismatched_confirmation_is_blocked() {
    let backend = FakeBackend::default();
    let (session, _) = store(&backend);
    let form = SignupForm {
        confirm: "secret124".to_string(),
        ..valid_signup()
    };

    let result = block_on(session.signup(&form));

    assert!(matches!(result, Err(SubmitError::Invalid(_))));
    assert!(backend.state.signup_calls.borrow().is_empty());
}
