//! Main webserver implementation
//!
//! Builds the axum router over an injected orchestrator and runs the HTTP
//! server with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use orchestrator::{AppealStore, Orchestrator};

use crate::error::{WebServerError, WebServerResult};
use crate::web::handlers::api;

/// HTTP front end over the appeals orchestrator
pub struct WebServer<S>
where
    S: AppealStore,
{
    bind_address: SocketAddr,
    orchestrator: Arc<Orchestrator<S>>,
}

impl<S> WebServer<S>
where
    S: AppealStore + Send + Sync + 'static,
{
    /// Create a new webserver over an injected orchestrator
    pub fn new(bind_address: SocketAddr, orchestrator: Orchestrator<S>) -> Self {
        Self {
            bind_address,
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Build the axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/appeals", get(api::get_started_appeals::<S>))
            .route("/appeals", post(api::create_appeal::<S>))
            .route("/appeals/all", get(api::get_all_appeals::<S>))
            .route("/appeals/by-dates", get(api::get_appeals_by_dates::<S>))
            .route(
                "/appeals/cancel-all-in-progress",
                post(api::cancel_all_in_progress::<S>),
            )
            .route("/appeals/:id", get(api::get_appeal_by_id::<S>))
            .route("/appeals/:id/start", patch(api::start_processing::<S>))
            .route("/appeals/:id/complete", patch(api::complete_appeal::<S>))
            .route("/appeals/:id/cancel", patch(api::cancel_appeal::<S>))
            .route("/health", get(api::health_check))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
            .with_state(self.orchestrator.clone())
    }

    /// Start the webserver and block until shutdown
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .map_err(|e| {
                WebServerError::ServerStartup(format!(
                    "Failed to bind to {}: {e}",
                    self.bind_address
                ))
            })?;

        tracing::info!("Appeals server listening on http://{}", self.bind_address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {e}")))?;

        shared::logging::log_shutdown("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => shared::logging::log_shutdown("received ctrl-c"),
        Err(err) => shared::logging::log_error("signal handling", &err),
    }
}
