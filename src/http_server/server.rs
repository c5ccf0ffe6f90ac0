//! HTTP server
//!
//! Assembles the bag routes, service routes, and CORS into one router and
//! serves it. The store is injected by the caller, so tests run against an
//! in-memory instance and the CLI against the durable one.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::observability::{Logger, Severity};
use crate::store::BagStore;

use super::bag_routes::{bag_routes, BagState};
use super::config::HttpServerConfig;

/// HTTP server for the baggage dashboard API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given store with default configuration
    pub fn new<S: BagStore + 'static>(store: Arc<S>) -> Self {
        Self::with_config(store, HttpServerConfig::default())
    }

    /// Create a server over the given store with custom configuration
    pub fn with_config<S: BagStore + 'static>(store: Arc<S>, config: HttpServerConfig) -> Self {
        let router = Self::build_router(store, &config);
        Self { config, router }
    }

    /// Build the combined router
    fn build_router<S: BagStore + 'static>(store: Arc<S>, config: &HttpServerConfig) -> Router {
        let state = Arc::new(BagState::new(store));

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // If no origins configured, use permissive for development
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

        Router::new()
            .merge(service_routes())
            .nest("/api", bag_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .expect("Invalid socket address");

        let listener = TcpListener::bind(addr).await?;
        Logger::log(
            Severity::Info,
            "server_listening",
            &[("addr", &addr.to_string())],
        );

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Root banner and health check
fn service_routes() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

async fn root_handler() -> impl IntoResponse {
    "Baggage Tracker API Running"
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
