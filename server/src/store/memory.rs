use async_trait::async_trait;
use todo_core::{TodoChanges, TodoError, TodoId, TodoRecord};
use tokio::sync::RwLock;

use super::TodoStore;

/// In-process store keeping records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<TodoRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, record: TodoRecord) -> Result<(), TodoError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(TodoError::Storage(format!("duplicate key: {}", record.id)));
        }
        records.push(record);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoRecord>, TodoError> {
        Ok(self.records.read().await.clone())
    }

    async fn update_by_id(&self, id: TodoId, changes: TodoChanges) -> Result<(), TodoError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(TodoError::NotFound(id))?;
        record.title = changes.title;
        record.completed = changes.completed;
        Ok(())
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<(), TodoError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(TodoError::NotFound(id));
        }
        Ok(())
    }
}
