//! Persistence adapter for the todo collection.
//!
//! # Design
//! Handlers only see `TodoStore`, shared as `Arc<dyn TodoStore>` in the
//! router state. Every call is attempted once; no operation is transactional
//! with another. `MongoStore` is the production backend, `MemoryStore` backs
//! tests and local runs without a database.

mod memory;
mod mongo;

use async_trait::async_trait;
use todo_core::{TodoChanges, TodoError, TodoId, TodoRecord};

pub use memory::MemoryStore;
pub use mongo::{MongoStore, StoreConfig};

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    async fn insert(&self, record: TodoRecord) -> Result<(), TodoError>;

    /// All records, in the order the backend yields them.
    async fn find_all(&self) -> Result<Vec<TodoRecord>, TodoError>;

    /// Replace title and completion state. Fails with `NotFound` when no
    /// record has this id.
    async fn update_by_id(&self, id: TodoId, changes: TodoChanges) -> Result<(), TodoError>;

    /// Fails with `NotFound` when nothing was removed.
    async fn delete_by_id(&self, id: TodoId) -> Result<(), TodoError>;
}
