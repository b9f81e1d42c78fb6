//! HTTP server: routing, shared state and the serve loop.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::db::PlantStore;
use crate::error::Result;
use crate::handlers;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
}

/// State shared by every handler.
pub struct AppState {
    pub store: Arc<dyn PlantStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PlantStore>) -> Self {
        Self { store }
    }
}

/// Builds the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::plants_list))
        .route("/about", get(handlers::about))
        .route("/create", get(handlers::create_form).post(handlers::create))
        .route("/plant/:plant_id", get(handlers::detail))
        .route("/harvest/:plant_id", post(handlers::record_harvest))
        .route("/edit/:plant_id", get(handlers::edit_form).post(handlers::edit))
        .route("/delete/:plant_id", post(handlers::delete))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    pub fn new(config: ServerConfig, store: Arc<dyn PlantStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(store)),
        }
    }

    /// Serves until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn run(self) -> Result<()> {
        let app = router(self.state);

        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        tracing::info!(addr = %self.config.addr, "Garden log listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

