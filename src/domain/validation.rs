//! Form validation for the login and signup pages.
//!
//! Field errors are recomputed on every change and again on submit; a form
//! with any error never reaches the backend.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MSG_EMAIL_REQUIRED: &str = "이메일을 입력하세요.";
pub const MSG_EMAIL_FORMAT: &str = "이메일 형식을 확인하세요.";
pub const MSG_PASSWORD_REQUIRED: &str = "비밀번호를 입력하세요.";
pub const MSG_PASSWORD_RULE: &str = "비밀번호는 8자 이상이며 영문과 숫자를 포함해야 합니다.";
pub const MSG_NAME_REQUIRED: &str = "이름을 입력하세요.";
pub const MSG_NAME_TOO_LONG: &str = "이름은 40자 이내로 입력하세요.";
pub const MSG_NAME_CHARSET: &str = "이름에는 특수문자나 숫자를 포함할 수 없습니다.";
pub const MSG_NAME_LEFTOVER: &str = "이름에 허용되지 않는 문자가 남아 있습니다.";
pub const MSG_CONFIRM_REQUIRED: &str = "비밀번호 확인을 입력하세요.";
pub const MSG_CONFIRM_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";
pub const MSG_TERMS_REQUIRED: &str = "약관에 동의해야 가입할 수 있습니다.";
pub const MSG_LOGIN_FAILED: &str = "로그인 실패";
pub const MSG_SIGNUP_FAILED: &str = "회원가입 실패";
pub const MSG_SUBMIT_FALLBACK: &str = "일시적인 오류가 발생했습니다. 다시 시도하세요.";

pub const NAME_MAX_CHARS: usize = 40;
pub const PASSWORD_MIN_CHARS: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("valid email regex"));

/// While typing, half-composed Hangul (isolated jamo) is tolerated.
static NAME_TYPING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^가-힣ㄱ-ㅎㅏ-ㅣa-zA-Z\s]").expect("valid name regex"));

static NAME_FINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^가-힣a-zA-Z\s]").expect("valid final name regex"));

/// Result of checking a single value
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid(&'static str),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(msg) => Some(msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Password,
    Confirm,
    AgreeTerms,
}

/// Per-field messages; an empty map means the form may be submitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Replaces the entry for `field`, removing it when the result is valid.
    pub fn apply(&mut self, field: Field, result: ValidationResult) {
        match result.error_message() {
            Some(msg) => {
                self.0.insert(field, msg);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn validate_email(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::Invalid(MSG_EMAIL_REQUIRED)
    } else if !is_email(value) {
        ValidationResult::Invalid(MSG_EMAIL_FORMAT)
    } else {
        ValidationResult::Valid
    }
}

/// At least eight characters with one Latin letter and one digit.
pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= PASSWORD_MIN_CHARS
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}

pub fn validate_name(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::Invalid(MSG_NAME_REQUIRED)
    } else if value.chars().count() > NAME_MAX_CHARS {
        ValidationResult::Invalid(MSG_NAME_TOO_LONG)
    } else if NAME_TYPING_RE.is_match(value) {
        ValidationResult::Invalid(MSG_NAME_CHARSET)
    } else {
        ValidationResult::Valid
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

impl LoginForm {
    pub fn validate_field(&self, field: Field) -> ValidationResult {
        match field {
            Field::Email => validate_email(&self.email),
            Field::Password if self.password.is_empty() => {
                ValidationResult::Invalid(MSG_PASSWORD_REQUIRED)
            }
            _ => ValidationResult::Valid,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in [Field::Email, Field::Password] {
            errors.apply(field, self.validate_field(field));
        }
        errors
    }

    /// Enables the submit button
    pub fn is_submittable(&self) -> bool {
        is_email(&self.email) && !self.password.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm: String,
    #[serde(skip)]
    pub agree_terms: bool,
    pub agree_marketing: bool,
}

impl SignupForm {
    pub fn validate_field(&self, field: Field) -> ValidationResult {
        match field {
            Field::Name => validate_name(&self.name),
            Field::Email => validate_email(&self.email),
            Field::Password => {
                if self.password.is_empty() {
                    ValidationResult::Invalid(MSG_PASSWORD_REQUIRED)
                } else if !is_strong_password(&self.password) {
                    ValidationResult::Invalid(MSG_PASSWORD_RULE)
                } else {
                    ValidationResult::Valid
                }
            }
            Field::Confirm => {
                if self.confirm.is_empty() {
                    ValidationResult::Invalid(MSG_CONFIRM_REQUIRED)
                } else if self.confirm != self.password {
                    ValidationResult::Invalid(MSG_CONFIRM_MISMATCH)
                } else {
                    ValidationResult::Valid
                }
            }
            Field::AgreeTerms if !self.agree_terms => ValidationResult::Invalid(MSG_TERMS_REQUIRED),
            Field::AgreeTerms => ValidationResult::Valid,
        }
    }

    /// Updates `errors` after `field` changed. A password edit re-checks a
    /// confirmation that has already been typed.
    pub fn revalidate(&self, field: Field, errors: &mut FieldErrors) {
        errors.apply(field, self.validate_field(field));
        if field == Field::Password && !self.confirm.is_empty() {
            errors.apply(Field::Confirm, self.validate_field(Field::Confirm));
        }
    }

    /// Full check run on submit; stricter than the per-keystroke name rule.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in [
            Field::Name,
            Field::Email,
            Field::Password,
            Field::Confirm,
            Field::AgreeTerms,
        ] {
            errors.apply(field, self.validate_field(field));
        }
        if errors.get(Field::Name).is_none() && NAME_FINAL_RE.is_match(&self.name) {
            errors.apply(Field::Name, ValidationResult::Invalid(MSG_NAME_LEFTOVER));
        }
        errors
    }

    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty()
            && is_email(&self.email)
            && is_strong_password(&self.password)
            && self.password == self.confirm
            && self.agree_terms
    }
}
