//! API Gateway error types and the error-kind to HTTP status mapping.
//!
//! | Kind       | Status | Message                 |
//! |------------|--------|-------------------------|
//! | Validation | 400    | precise reason(s)       |
//! | Conflict   | 409    | precise reason          |
//! | NotFound   | 404    | precise reason          |
//! | Auth       | 401    | generic                 |
//! | Transient  | 503    | generic, `Retry-After`  |
//! | Fatal      | 500    | generic                 |

use crate::domain::config::ConfigError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bf_01_validator::{FieldViolation, ValidationReport};
use bf_02_identity_store::IdentityError;
use bf_03_session_authority::SessionError;
use bf_04_request_ledger::LedgerError;
use bf_05_lookup_catalog::CatalogError;
use serde::Serialize;
use shared_store::KVStoreError;
use shared_types::{Classify, ErrorKind};
use std::fmt;

/// Generic user-facing messages for kinds whose details stay server-side.
pub mod messages {
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const UNAVAILABLE: &str = "Service temporarily unavailable, please retry";
    pub const INTERNAL: &str = "Internal server error";
}

/// Seconds a client should wait before retrying a transient failure.
pub const RETRY_AFTER_SECS: u64 = 1;

/// API error carried to the failure envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    /// User-facing message
    pub message: String,
    /// Per-field detail for validation failures
    pub fields: Option<Vec<FieldViolation>>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: None,
        }
    }

    pub fn validation(report: ValidationReport) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: report.to_string(),
            fields: Some(report.violations),
        }
    }

    pub fn field(field: &str, reason: impl Into<String>) -> Self {
        Self::validation(FieldViolation::new(field, reason).into())
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Auth, messages::UNAUTHORIZED)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// HTTP status for this error's kind.
    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }

    /// Log `err` at the level its kind deserves and build the user-facing
    /// error. Auth, transient and fatal causes never reach the client.
    fn classified<E: Classify + fmt::Display>(err: &E) -> Self {
        let kind = err.kind();
        match kind {
            ErrorKind::Validation | ErrorKind::NotFound => {
                tracing::debug!(kind = %kind, error = %err, "Request rejected");
                Self::new(kind, err.to_string())
            }
            ErrorKind::Conflict => {
                tracing::info!(kind = %kind, error = %err, "Request conflicted");
                Self::new(kind, err.to_string())
            }
            ErrorKind::Auth => {
                tracing::warn!(kind = %kind, cause = %err, "Authentication failed");
                Self::new(kind, messages::UNAUTHORIZED)
            }
            ErrorKind::Transient => {
                tracing::warn!(kind = %kind, error = %err, "Transient backend failure");
                Self::new(kind, messages::UNAVAILABLE)
            }
            ErrorKind::Fatal => {
                tracing::error!(kind = %kind, error = %err, "Backend failure");
                Self::new(kind, messages::INTERNAL)
            }
        }
    }
}

/// The single place where an error kind becomes a status code.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Auth => StatusCode::UNAUTHORIZED,
        ErrorKind::Transient => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Fatal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

/// `{ statusCode, success: false, message, error, fields? }`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    success: bool,
    message: &'a str,
    error: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldViolation]>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            status_code: status.as_u16(),
            success: false,
            message: &self.message,
            error: self.kind,
            fields: self.fields.as_deref(),
        };
        let mut response = (status, Json(body)).into_response();
        if self.kind == ErrorKind::Transient {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(RETRY_AFTER_SECS));
        }
        response
    }
}

// =============================================================================
// Subsystem error conversions
// =============================================================================

impl From<ValidationReport> for ApiError {
    fn from(report: ValidationReport) -> Self {
        tracing::debug!(violations = report.len(), "Validation failed");
        Self::validation(report)
    }
}

impl From<FieldViolation> for ApiError {
    fn from(violation: FieldViolation) -> Self {
        ValidationReport::from(violation).into()
    }
}

impl From<KVStoreError> for ApiError {
    fn from(err: KVStoreError) -> Self {
        Self::classified(&err)
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match &err {
            IdentityError::DuplicateField(field) => {
                let mut api = Self::classified(&err);
                api.fields = Some(vec![FieldViolation::new(
                    field.as_str(),
                    "is already registered",
                )]);
                api
            }
            _ => Self::classified(&err),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let mut api = Self::classified(&err);
        if matches!(err, SessionError::InvalidCredentials) {
            api.message = messages::INVALID_CREDENTIALS.to_string();
        }
        api
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let field = match &err {
            LedgerError::EmptyReason | LedgerError::ReasonTooLong { .. } => Some("reason"),
            LedgerError::MissingDocumentRef => Some("documentRef"),
            _ => None,
        };
        match field {
            Some(field) => FieldViolation::new(field, err.to_string()).into(),
            None => Self::classified(&err),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Invalid(violation) => violation.into(),
            other => Self::classified(&other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Malformed JSON body");
        Self::new(ErrorKind::Validation, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Malformed query string");
        Self::new(ErrorKind::Validation, rejection.body_text())
    }
}

/// API Gateway service errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server terminated abnormally
    #[error("server error: {0}")]
    Serve(String),
}
