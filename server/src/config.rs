//! Command-line and environment configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::store::StoreConfig;

/// Which `TodoStore` backend to open at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "CRUD HTTP service for todo items")]
pub struct Config {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "TODO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 9000)]
    pub port: u16,

    /// MongoDB connection string.
    #[arg(long, env = "TODO_MONGO_URI", default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    #[arg(long, env = "TODO_DATABASE", default_value = "demo_todo")]
    pub database: String,

    #[arg(long, env = "TODO_COLLECTION", default_value = "todo")]
    pub collection: String,

    #[arg(long, env = "TODO_STORE", value_enum, default_value = "mongo")]
    pub store: StoreKind,

    /// Seconds in-flight requests get to finish after a shutdown signal.
    #[arg(long, env = "TODO_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,

    /// Emit logs as JSON lines.
    #[arg(long, env = "TODO_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            uri: self.mongo_uri.clone(),
            database: self.database.clone(),
            collection: self.collection.clone(),
        }
    }
}
