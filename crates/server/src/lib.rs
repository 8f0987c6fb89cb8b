//! HTTP service that enhances uploaded photos
//!
//! # Endpoints
//!
//! - `POST /enhance`: multipart upload (field `image`), returns the original
//!   and enhanced JPEGs as data URIs plus an id
//! - `GET /download/{id}`: the stored enhanced JPEG as an attachment
//! - `GET /health`: liveness, storage check and request counters
//!
//! # Example
//!
//! ```rust,no_run
//! use photoboost_core::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     photoboost_server::serve(config.schema).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod state;
pub mod storage;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use photoboost_core::config::ConfigSchema;
use photoboost_core::{Error, ResultExt};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;
pub use storage::ImageStore;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.config.server.max_upload_bytes;
    let cors = state.config.server.cors;

    let mut router = Router::new()
        .route("/enhance", post(handlers::enhance))
        .route("/download/:id", get(handlers::download))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    if cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: ConfigSchema) -> photoboost_core::Result<()> {
    let addr = config.server.socket_addr()?;

    let store = ImageStore::open(&config.storage.dir)
        .await
        .map_err(Error::from)
        .context(format!(
            "While preparing storage directory {}",
            config.storage.dir.display()
        ))?;
    let state = AppState::new(config, store);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(Error::from)
        .context(format!("While binding {addr}"))
        .with_suggestion("Choose another address with --host/--port or PHOTOBOOST_PORT")?;

    tracing::info!(
        %addr,
        storage = %state.store.root().display(),
        "Photoboost listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl-C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
