use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use todo_server::config::{Config, StoreKind};
use todo_server::store::{MemoryStore, MongoStore, TodoStore};
use todo_server::{app, run, shutdown_signal, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    telemetry::init_tracing(config.log_json);

    let store: Arc<dyn TodoStore> = match config.store {
        StoreKind::Mongo => Arc::new(
            MongoStore::connect(&config.store_config())
                .await
                .context("failed to open the document store")?,
        ),
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    };

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, store = ?config.store, "listening");

    run(
        listener,
        app(AppState::from_shared(store)),
        config.shutdown_timeout(),
        shutdown_signal(),
    )
    .await
    .context("server failed")?;

    info!("server stopped");
    Ok(())
}
