use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::validation::FieldErrors;

/// Root error type for the whole client
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Api(ApiError),
    Storage(StorageError),
    Browser(String),
}

/// Failures talking to the DART:Lens backend.
///
/// Cancellation is not represented here: an aborted request surfaces as
/// `futures::future::Aborted` and is dropped by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure before any HTTP status was received
    Network(String),
    /// Non-2xx status with no usable body
    Http { status: u16, status_text: String },
    /// The backend answered with `ok: false`
    Rejected { status: u16, message: Option<String> },
    /// Body could not be decoded into the expected shape
    Decode(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    Unavailable(&'static str),
    WriteFailed { key: String, reason: String },
}

/// Outcome of a form submission that did not go through.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Client-side validation blocked the request; nothing was sent
    Invalid(FieldErrors),
    /// The backend refused the request
    Rejected(String),
    /// Transport or decoding failure
    Failed(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } | ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }

    /// Short text shown to the user after a failed call.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(msg) | ApiError::Decode(msg) => msg.clone(),
            ApiError::Http { status, .. } => format!("HTTP {}", status),
            ApiError::Rejected { status, message } => message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status)),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Decode(_))
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AppError::Api(e) => write!(f, "API Error: {}", e),
            AppError::Storage(e) => write!(f, "Storage Error: {}", e),
            AppError::Browser(msg) => write!(f, "Browser Error: {}", msg),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ApiError::Network(msg) => write!(f, "network failure: {}", msg),
            ApiError::Http { status, status_text } => write!(f, "HTTP {} {}", status, status_text),
            ApiError::Rejected { status, message } => write!(
                f,
                "rejected with HTTP {}: {}",
                status,
                message.as_deref().unwrap_or("no message")
            ),
            ApiError::Decode(msg) => write!(f, "decode failure: {}", msg),
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageError::Unavailable(kind) => write!(f, "{} is not available", kind),
            StorageError::WriteFailed { key, reason } => {
                write!(f, "failed to write '{}': {}", key, reason)
            }
        }
    }
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubmitError::Invalid(errors) => write!(f, "{} invalid field(s)", errors.len()),
            SubmitError::Rejected(msg) => write!(f, "rejected: {}", msg),
            SubmitError::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for ApiError {}
impl std::error::Error for StorageError {}
impl std::error::Error for SubmitError {}

impl From<ApiError> for AppError {
    fn from(error: ApiError) -> Self {
        AppError::Api(error)
    }
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        AppError::Storage(error)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
