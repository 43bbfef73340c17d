//! HTTP mapping of `TodoError`.
//!
//! Handlers return `Result<_, ApiError>`. An `ApiError` is a `TodoError`
//! plus an optional operation message ("Failed to fetch todos"). With a
//! message, the body's `message` is that text and `error` carries the
//! underlying error; without one, `message` is the error text itself.

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use todo_core::{ErrorBody, ErrorKind, TodoError};
use tracing::{error, warn};

#[derive(Debug)]
pub struct ApiError {
    context: Option<&'static str>,
    source: TodoError,
}

impl ApiError {
    pub fn new(source: TodoError) -> Self {
        Self {
            context: None,
            source,
        }
    }

    pub fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        status_for(self.source.kind())
    }

    fn body(&self) -> ErrorBody {
        let (message, detail) = match self.context {
            Some(context) => (context.to_string(), Some(self.source.to_string())),
            None => (self.source.to_string(), None),
        };
        ErrorBody {
            kind: self.source.kind(),
            message,
            error: detail,
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::DecodeError => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::ValidationError | ErrorKind::InvalidId => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::ConnectionError => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl From<TodoError> for ApiError {
    fn from(source: TodoError) -> Self {
        Self::new(source)
    }
}

// Ids that never reach `TodoId::parse`, such as percent-encoded bytes that
// are not UTF-8.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(TodoError::InvalidId(rejection.body_text())).with_context("The id is invalid")
    }
}

/// Decode a JSON request body. The `Content-Type` header is not checked.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        ApiError::new(TodoError::Decode(err.to_string())).with_context("Invalid request body")
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(kind = ?self.source.kind(), error = %self.source, "request failed");
        } else {
            warn!(kind = ?self.source.kind(), error = %self.source, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

/// Attach an operation message to a store result.
pub trait ResultExt<T> {
    fn context(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for Result<T, TodoError> {
    fn context(self, context: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e).with_context(context))
    }
}
