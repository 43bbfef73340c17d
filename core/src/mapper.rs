//! Conversion from storage records to wire DTOs.

use crate::types::{TodoDto, TodoList, TodoRecord};

impl From<TodoRecord> for TodoDto {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            title: record.title,
            completed: record.completed,
            created_at: record.created_at,
        }
    }
}

impl From<Vec<TodoRecord>> for TodoList {
    /// Keeps the order the store returned.
    fn from(records: Vec<TodoRecord>) -> Self {
        Self {
            data: records.into_iter().map(TodoDto::from).collect(),
        }
    }
}
