// src/error.rs
//! Error types with structured error handling.
//!
//! Three families of failure reach callers: validation of builder input
//! (`ValidationError`), responses whose shape the codec cannot read
//! (`DecodeError`), and non-2xx answers from the API (`HttpError`).
//! `ClientError` is the umbrella the client operations return.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::types::ValidationError;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient. The client never retries on its own;
    /// this is for callers that want to.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound | Self::HttpStatus(404))
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// A non-2xx answer from the API, passed through to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Notion API returned an error ({status} {code}): {message}")]
pub struct HttpError {
    pub status: u16,
    pub code: NotionErrorCode,
    pub message: String,
    /// The raw response body
    pub body: String,
}

impl HttpError {
    /// Builds the error from a status and raw body, reading the API's
    /// `{"object":"error","code":..,"message":..}` envelope when present.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let envelope = serde_json::from_str::<Value>(&body).ok();
        let field = |name: &str| {
            envelope
                .as_ref()
                .and_then(|json| json.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        match (field("code"), field("message")) {
            (Some(code), message) => Self {
                status,
                code: NotionErrorCode::from_api_response(&code),
                message: message.unwrap_or_default(),
                body,
            },
            (None, _) => Self {
                status,
                code: NotionErrorCode::from_http_status(status),
                message: format!("HTTP {}: {}", status, preview(&body)),
                body,
            },
        }
    }
}

/// A response fragment whose shape matches no known or fallback variant.
///
/// Names what was being decoded and which field failed, and carries the
/// offending raw JSON so mismatches against the live schema can be traced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to decode {kind}: field '{field}' {reason} (in {fragment})")]
pub struct DecodeError {
    pub kind: &'static str,
    pub field: String,
    pub reason: String,
    pub fragment: String,
}

impl DecodeError {
    pub fn new(
        kind: &'static str,
        field: impl Into<String>,
        reason: impl Into<String>,
        raw: &Value,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            reason: reason.into(),
            fragment: preview(&raw.to_string()),
        }
    }

    pub fn missing(kind: &'static str, field: impl Into<String>, raw: &Value) -> Self {
        Self::new(kind, field, "is missing", raw)
    }
}

/// Umbrella error for client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// The HTTP status when the API answered with an error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(error) => Some(error.status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(err.to_string())
    }
}

/// Truncates a body for display.
fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Result type alias for convenience
pub type Result<T, E = ClientError> = std::result::Result<T, E>;
