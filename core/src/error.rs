//! Error taxonomy for the todo service.
//!
//! # Design
//! Every failure a request can hit is one `TodoError` variant, and each
//! variant maps to a stable `ErrorKind` tag. The server turns errors into a
//! uniform `ErrorBody` so clients see the same shape from every endpoint.
//! Only `Connection` is fatal, and only at startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::TodoId;

/// Errors produced while handling a todo request or opening the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// The document store could not be reached.
    #[error("could not connect to the document store: {0}")]
    Connection(String),

    /// The request body was not valid JSON for the expected payload.
    #[error("request body could not be decoded: {0}")]
    Decode(String),

    /// A required field was missing or empty.
    #[error("the {0} is required")]
    Validation(&'static str),

    /// A path identifier was not a valid store identifier.
    #[error("the id {0:?} is invalid")]
    InvalidId(String),

    /// No record matched the identifier.
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// The store rejected the operation.
    #[error("store operation failed: {0}")]
    Storage(String),
}

/// Machine-readable tag carried in every error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ConnectionError,
    DecodeError,
    ValidationError,
    InvalidId,
    NotFound,
    StorageError,
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Connection(_) => ErrorKind::ConnectionError,
            TodoError::Decode(_) => ErrorKind::DecodeError,
            TodoError::Validation(_) => ErrorKind::ValidationError,
            TodoError::InvalidId(_) => ErrorKind::InvalidId,
            TodoError::NotFound(_) => ErrorKind::NotFound,
            TodoError::Storage(_) => ErrorKind::StorageError,
        }
    }
}

/// JSON body of every error response.
///
/// `message` is meant for humans. `error` holds the underlying decoder or
/// store text when there is any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_as_snake_case_tags() {
        let tag = serde_json::to_value(ErrorKind::ValidationError).unwrap();
        assert_eq!(tag, "validation_error");
        let tag = serde_json::to_value(ErrorKind::InvalidId).unwrap();
        assert_eq!(tag, "invalid_id");
    }

    #[test]
    fn every_variant_has_its_own_kind() {
        let errors = [
            TodoError::Connection("refused".into()),
            TodoError::Decode("eof".into()),
            TodoError::Validation("title"),
            TodoError::InvalidId("x".into()),
            TodoError::NotFound(TodoId::new()),
            TodoError::Storage("rejected".into()),
        ];
        let mut kinds: Vec<_> = errors.iter().map(|e| format!("{:?}", e.kind())).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn validation_message_names_the_field() {
        assert_eq!(TodoError::Validation("title").to_string(), "the title is required");
    }

    #[test]
    fn error_body_omits_missing_detail() {
        let body = ErrorBody {
            kind: ErrorKind::InvalidId,
            message: "the id \"x\" is invalid".into(),
            error: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["kind"], "invalid_id");
        assert!(json.get("error").is_none());
    }
}
