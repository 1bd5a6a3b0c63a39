//! # HTTP Server
//!
//! Axum-based server assembly: the prestador collection routes under
//! /api/prestadores, the liveness payload at /api, static assets from the
//! configured public directory, and the structured 404 for everything else.
//! CORS is permissive unless origins are configured; every request runs
//! under the configured timeout.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::handler::HandlerWithoutStateExt;
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::config::AppConfig;
use crate::observability::Logger;
use crate::prestador::validation::FieldError;
use crate::store::DocumentStore;

use super::errors::ErrorEnvelope;
use super::handlers::{prestador_routes, ApiState};
use super::response::ApiInfo;

/// The assembled API server
pub struct ApiServer {
    config: AppConfig,
    router: Router,
}

impl ApiServer {
    /// Build a server over the given store
    pub fn new<S: DocumentStore + 'static>(config: AppConfig, store: Arc<S>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router
    fn build_router<S: DocumentStore + 'static>(config: &AppConfig, store: Arc<S>) -> Router {
        let state = Arc::new(ApiState::new(store));

        let cors = if config.cors_origins.is_empty() {
            // No origins configured: permissive
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        // Static content at the root; unmatched paths end in the
        // structured 404
        let static_files =
            ServeDir::new(&config.public_dir).not_found_service(route_not_found.into_service());

        Router::new()
            .route("/api", get(api_info_handler))
            .nest("/api/prestadores", prestador_routes(state))
            .fallback_service(static_files)
            .layer(cors)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )))
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until shutdown
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;

        let addr_str = addr.to_string();
        Logger::info(
            "SERVER_START",
            &[
                ("addr", addr_str.as_str()),
                ("public_dir", self.config.public_dir.as_str()),
            ],
        );

        axum::serve(listener, self.router).await
    }
}

/// Liveness/version payload
async fn api_info_handler() -> Json<ApiInfo> {
    Json(ApiInfo::current())
}

/// Structured 404 naming the attempted path
async fn route_not_found(uri: Uri) -> (StatusCode, Json<ErrorEnvelope>) {
    let envelope = ErrorEnvelope::new(vec![FieldError {
        value: Some(Value::String(uri.to_string())),
        msg: format!("route {} does not exist in this API", uri),
        param: Some("invalid route".to_string()),
    }]);

    (StatusCode::NOT_FOUND, Json(envelope))
}
