use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use todo_core::{TodoChanges, TodoError, TodoId, TodoRecord};
use tracing::{debug, info};

use super::TodoStore;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the todo collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// `TodoStore` backed by one MongoDB collection.
///
/// The driver's client pools connections internally, so one `MongoStore`
/// is shared by every request.
#[derive(Debug)]
pub struct MongoStore {
    collection: Collection<TodoRecord>,
}

impl MongoStore {
    /// Open a client and ping the database.
    ///
    /// The ping makes an unreachable store fail here, at startup, rather
    /// than on the first request.
    pub async fn connect(config: &StoreConfig) -> Result<Self, TodoError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(connection_error)?;
        options.app_name = Some("todo-server".to_string());
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options).map_err(connection_error)?;
        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_error)?;

        info!(
            database = %config.database,
            collection = %config.collection,
            "connected to document store"
        );
        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn insert(&self, record: TodoRecord) -> Result<(), TodoError> {
        self.collection
            .insert_one(&record)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoRecord>, TodoError> {
        let cursor = self.collection.find(doc! {}).await.map_err(storage_error)?;
        cursor.try_collect().await.map_err(storage_error)
    }

    async fn update_by_id(&self, id: TodoId, changes: TodoChanges) -> Result<(), TodoError> {
        let result = self
            .collection
            .update_one(id_filter(id), set_changes(&changes))
            .await
            .map_err(storage_error)?;
        debug!(todo_id = %id, matched = result.matched_count, "update_one");
        if result.matched_count == 0 {
            return Err(TodoError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<(), TodoError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(storage_error)?;
        if result.deleted_count == 0 {
            return Err(TodoError::NotFound(id));
        }
        Ok(())
    }
}

fn id_filter(id: TodoId) -> Document {
    doc! { "_id": id.as_object_id() }
}

// `$set` leaves `_id` and `createAt` untouched.
fn set_changes(changes: &TodoChanges) -> Document {
    doc! {
        "$set": {
            "title": changes.title.as_str(),
            "completed": changes.completed,
        }
    }
}

fn connection_error(err: mongodb::error::Error) -> TodoError {
    TodoError::Connection(err.to_string())
}

fn storage_error(err: mongodb::error::Error) -> TodoError {
    TodoError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_filter_matches_on_object_id() {
        let id = TodoId::new();
        let filter = id_filter(id);
        assert_eq!(filter.get_object_id("_id").unwrap(), id.as_object_id());
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn update_sets_only_mutable_fields() {
        let update = set_changes(&TodoChanges {
            title: "renamed".to_string(),
            completed: true,
        });
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("title").unwrap(), "renamed");
        assert!(set.get_bool("completed").unwrap());
        assert_eq!(set.len(), 2);
        assert!(!set.contains_key("createAt"));
    }

    #[tokio::test]
    async fn connect_rejects_malformed_uri() {
        let config = StoreConfig {
            uri: "not-a-mongo-uri".to_string(),
            database: "demo_todo".to_string(),
            collection: "todo".to_string(),
        };
        let err = MongoStore::connect(&config).await.unwrap_err();
        assert!(matches!(err, TodoError::Connection(_)));
    }
}
