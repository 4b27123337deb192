use dart_lens::domain::validation::{
    Field, FieldErrors, LoginForm, MSG_CONFIRM_MISMATCH, MSG_EMAIL_FORMAT, MSG_EMAIL_REQUIRED,
    MSG_NAME_CHARSET, MSG_NAME_LEFTOVER, MSG_NAME_TOO_LONG, MSG_PASSWORD_REQUIRED,
    MSG_PASSWORD_RULE, MSG_TERMS_REQUIRED, SignupForm, is_email, is_strong_password,
};

fn valid_signup() -> SignupForm {
    SignupForm {
        name: "홍길동".to_string(),
        email: "hong@example.com".to_string(),
        password: "abcd1234".to_string(),
        confirm: "abcd1234".to_string(),
        agree_terms: true,
        agree_marketing: false,
    }
}

#[test]
fn email_shape() {
    assert!(is_email("a@b.co"));
    assert!(!is_email("a@b.c"));
    assert!(!is_email("a b@c.com"));
    assert!(!is_email("no-at.example.com"));
}

#[test]
fn password_needs_length_letter_and_digit() {
    assert!(is_strong_password("abcdefg1"));
    assert!(!is_strong_password("abcdef1"));
    assert!(!is_strong_password("12345678"));
    assert!(!is_strong_password("abcdefgh"));
}

#[test]
fn login_requires_both_fields() {
    let errors = LoginForm::default().validate();
    assert_eq!(errors.get(Field::Email), Some(MSG_EMAIL_REQUIRED));
    assert_eq!(errors.get(Field::Password), Some(MSG_PASSWORD_REQUIRED));

    let form = LoginForm {
        email: "user@".to_string(),
        password: "x".to_string(),
        remember: false,
    };
    let errors = form.validate();
    assert_eq!(errors.get(Field::Email), Some(MSG_EMAIL_FORMAT));
    assert_eq!(errors.len(), 1);
    assert!(!form.is_submittable());
}

#[test]
fn complete_signup_has_no_errors() {
    let form = valid_signup();
    assert!(form.validate().is_empty());
    assert!(form.is_submittable());
}

#[test]
fn signup_reports_every_broken_field() {
    let form = SignupForm {
        name: "홍길동1".to_string(),
        password: "short".to_string(),
        confirm: "other".to_string(),
        ..SignupForm::default()
    };
    let errors = form.validate();

    assert_eq!(errors.get(Field::Name), Some(MSG_NAME_CHARSET));
    assert_eq!(errors.get(Field::Email), Some(MSG_EMAIL_REQUIRED));
    assert_eq!(errors.get(Field::Password), Some(MSG_PASSWORD_RULE));
    assert_eq!(errors.get(Field::Confirm), Some(MSG_CONFIRM_MISMATCH));
    assert_eq!(errors.get(Field::AgreeTerms), Some(MSG_TERMS_REQUIRED));
}

#[test]
fn names_are_capped_at_forty_characters() {
    let form = SignupForm {
        name: "가".repeat(41),
        ..valid_signup()
    };
    assert_eq!(form.validate().get(Field::Name), Some(MSG_NAME_TOO_LONG));

    let form = SignupForm {
        name: "가".repeat(40),
        ..valid_signup()
    };
    assert!(form.validate().is_empty());
}

#[test]
fn half_typed_hangul_passes_while_typing_but_not_on_submit() {
    let form = SignupForm {
        name: "홍길ㄷ".to_string(),
        ..valid_signup()
    };
    assert!(form.validate_field(Field::Name).is_valid());
    assert_eq!(form.validate().get(Field::Name), Some(MSG_NAME_LEFTOVER));
}

#[test]
fn editing_the_password_rechecks_the_confirmation() {
    let mut form = valid_signup();
    let mut errors = FieldErrors::default();

    form.password = "abcd12345".to_string();
    form.revalidate(Field::Password, &mut errors);
    assert_eq!(errors.get(Field::Confirm), Some(MSG_CONFIRM_MISMATCH));

    form.confirm = "abcd12345".to_string();
    form.revalidate(Field::Confirm, &mut errors);
    assert!(errors.is_empty());
}

#[test]
fn signup_body_omits_confirmation_and_terms() {
    let body = serde_json::to_value(valid_signup()).expect("serializable form");
    assert_eq!(
        body,
        serde_json::json!({
            "name": "홍길동",
            "email": "hong@example.com",
            "password": "abcd1234",
            "agreeMarketing": false
        })
    );
}

#[test]
fn name_rules_compile_and_apply() {
    assert!(dart_lens::domain::validation::validate_name("Kim 민수").is_valid());
    assert_eq!(
        dart_lens::domain::validation::validate_name("kim_01").error_message(),
        Some(MSG_NAME_CHARSET)
    );
    let form = SignupForm {
        name: "민ㅅ".to_string(),
        ..valid_signup()
    };
    assert_eq!(form.validate().get(Field::Name), Some(MSG_NAME_LEFTOVER));
}
