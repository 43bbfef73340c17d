//! HTTP service exposing CRUD over the todo collection.
//!
//! # Overview
//! `app` binds the handlers to their routes, `run` serves them until a
//! shutdown signal arrives and then drains in-flight requests for a bounded
//! time. The store handle is created once by the caller and injected through
//! `AppState`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;
pub mod telemetry;

use std::future::{Future, IntoFuture};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, put};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::store::TodoStore;

/// Per-request timeout, matching the listener's read/write budget.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared handler context.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: impl TodoStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/todo", get(handlers::list_todos).post(handlers::create_todo))
        .route("/todo/", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todo/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `router` on `listener` until `signal` resolves.
///
/// Once the signal fires no new connections are accepted. In-flight
/// requests get up to `drain_timeout` to finish; after that the server
/// future is dropped and this returns.
pub async fn run<F>(
    listener: TcpListener,
    router: Router,
    drain_timeout: Duration,
    signal: F,
) -> Result<(), io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (drain_tx, mut drain_rx) = oneshot::channel::<()>();
    let signal = async move {
        signal.await;
        let _ = drain_tx.send(());
    };

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        Ok(()) = &mut drain_rx => {}
    }

    info!(timeout_ms = drain_timeout.as_millis() as u64, "shutting down, draining requests");
    match tokio::time::timeout(drain_timeout, server).await {
        Ok(result) => result,
        Err(_) => {
            warn!("drain timeout elapsed, dropping remaining connections");
            Ok(())
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
