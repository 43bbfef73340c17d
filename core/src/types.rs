//! Storage records, wire DTOs and request/response payloads.
//!
//! # Design
//! `TodoRecord` is the document as the store keeps it: an `ObjectId` under
//! `_id` and a BSON datetime under `createAt`. `TodoDto` is what clients
//! see: a hex string id and an RFC 3339 timestamp, still under `createAt`.
//! The two never share a serde representation; `crate::mapper` converts
//! between them.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;
use crate::id::TodoId;

/// A todo as persisted in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRecord {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl TodoRecord {
    /// A new, not yet completed record stamped with the current time.
    pub fn new(title: String) -> Self {
        Self {
            id: TodoId::new(),
            title,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// A todo as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoDto {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createAt")]
    pub created_at: DateTime<Utc>,
}

/// Request payload for `POST /todo/`.
///
/// An absent or `null` title counts as empty. `completed` is accepted so
/// DTO-shaped bodies decode, but new todos always start incomplete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl CreateTodo {
    /// Validate the payload and build the record to insert.
    pub fn into_record(self) -> Result<TodoRecord, TodoError> {
        let title = self.title.unwrap_or_default();
        require_title(&title)?;
        Ok(TodoRecord::new(title))
    }
}

/// Request payload for `PUT /todo/{id}`. Both mutable fields are replaced;
/// an absent or `null` `completed` means `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn into_changes(self) -> Result<TodoChanges, TodoError> {
        let title = self.title.unwrap_or_default();
        require_title(&title)?;
        Ok(TodoChanges {
            title,
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// Validated field values for an update. Identifier and creation time are
/// never part of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: String,
    pub completed: bool,
}

/// Titles must be non-empty. Whitespace is not trimmed.
pub fn require_title(title: &str) -> Result<(), TodoError> {
    if title.is_empty() {
        return Err(TodoError::Validation("title"));
    }
    Ok(())
}

/// Body of `GET /todo/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    pub data: Vec<TodoDto>,
}

/// Body of `POST /todo/` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub message: String,
    pub todo_id: String,
}

/// Body of successful update and delete responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;

    #[test]
    fn new_record_starts_incomplete() {
        let record = TodoRecord::new("buy milk".to_string());
        assert_eq!(record.title, "buy milk");
        assert!(!record.completed);
        assert!(record.created_at <= Utc::now());
    }

    #[test]
    fn record_document_uses_store_field_names() {
        let record = TodoRecord::new("buy milk".to_string());
        let doc = bson::to_document(&record).unwrap();
        assert_eq!(doc.get_object_id("_id").unwrap(), record.id.as_object_id());
        assert_eq!(doc.get_str("title").unwrap(), "buy milk");
        assert!(!doc.get_bool("completed").unwrap());
        assert!(matches!(doc.get("createAt"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn record_reads_back_from_document() {
        let record = TodoRecord::new("walk dog".to_string());
        let doc = bson::to_document(&record).unwrap();
        let back: TodoRecord = bson::from_document(doc).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.title, record.title);
        // BSON datetimes keep millisecond precision.
        assert_eq!(
            back.created_at.timestamp_millis(),
            record.created_at.timestamp_millis()
        );
    }

    #[test]
    fn create_ignores_client_completed() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"title":"Done already","completed":true}"#).unwrap();
        let record = input.into_record().unwrap();
        assert!(!record.completed);
    }

    #[test]
    fn create_with_absent_title_fails_validation() {
        let input: CreateTodo = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(input.into_record().unwrap_err(), TodoError::Validation("title"));
    }

    #[test]
    fn create_with_null_title_fails_validation() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(input.into_record().unwrap_err(), TodoError::Validation("title"));
    }

    #[test]
    fn create_does_not_trim_title() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"   "}"#).unwrap();
        let record = input.into_record().unwrap();
        assert_eq!(record.title, "   ");
    }

    #[test]
    fn create_rejects_wrongly_typed_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"title":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_defaults_completed_to_false() {
        let input: UpdateTodo = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        let changes = input.into_changes().unwrap();
        assert_eq!(
            changes,
            TodoChanges {
                title: "x".to_string(),
                completed: false
            }
        );
    }

    #[test]
    fn update_treats_null_completed_as_false() {
        let input: UpdateTodo =
            serde_json::from_str(r#"{"title":"x","completed":null}"#).unwrap();
        assert!(!input.into_changes().unwrap().completed);
    }

    #[test]
    fn update_with_empty_title_fails_validation() {
        let input: UpdateTodo = serde_json::from_str(r#"{"title":"","completed":true}"#).unwrap();
        assert!(matches!(input.into_changes(), Err(TodoError::Validation("title"))));
    }
}
