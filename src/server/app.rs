//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware,
//! and binds the listener when the clip server is enabled.

use crate::{config::Settings, error::Error, store::ClipStore};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Clip store shared with the pipeline
    pub store: ClipStore,
    /// Application settings
    pub settings: Arc<Settings>,
}

/// Create the main Axum application with routes and middleware
pub fn create_app(store: ClipStore, settings: Arc<Settings>) -> Router {
    let state = AppState { store, settings };

    Router::new()
        .route("/", get(super::handlers::index))
        .route("/clip", get(super::handlers::random_clip))
        .route(
            "/get_blacklisted_clips",
            get(super::handlers::get_blacklisted_clips),
        )
        .route("/add_to_blacklist", post(super::handlers::add_to_blacklist))
        .route(
            "/remove_from_blacklist",
            post(super::handlers::remove_from_blacklist),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Bind the configured address and serve the app until shutdown
pub async fn serve(store: ClipStore, settings: Arc<Settings>) -> crate::Result<()> {
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| Error::server(format!("failed to bind {address}: {e}")))?;

    tracing::info!("Clip server listening on {address}");

    let app = create_app(store, settings);
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::server(format!("clip server failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app() {
        let store = ClipStore::open_in_memory().unwrap();
        let app = create_app(store, Arc::new(Settings::default()));

        // Routers are cheap to clone and get cloned per connection.
        let _clone = app.clone();
    }

    #[tokio::test]
    async fn test_serve_rejects_unbindable_address() {
        let store = ClipStore::open_in_memory().unwrap();
        let mut settings = Settings::default();
        settings.server.host = "256.256.256.256".to_string();

        let err = serve(store, Arc::new(settings)).await.unwrap_err();
        assert!(matches!(err, Error::Server(_)));
    }
}
