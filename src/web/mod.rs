//! Web layer module
//!
//! HTTP interface for the channel directory. Handlers stay thin and delegate
//! to [`CatalogService`] for channel resolution and to [`crate::proxy`] for
//! stream relaying; errors are mapped to wire responses in one place.

use anyhow::Result;
use axum::{routing::get, Router};
use reqwest::Client;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

use crate::{config::Config, services::CatalogService};

pub mod api;
pub mod middleware;
pub mod responses;

pub use responses::handle_error;

/// Shared state available to all request handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogService,
    pub http_client: Client,
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    /// Create a new web server bound to the configured address
    pub fn new(config: Config, catalog: CatalogService, http_client: Client) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = Self::create_router(AppState {
            config,
            catalog,
            http_client,
        });

        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(api::health_check))
            .route("/api/channels-by-category", get(api::channels_by_category))
            .route("/api/channels-by-country", get(api::channels_by_country))
            .route("/api/countries", get(api::countries))
            .route("/api/proxy", get(api::proxy_stream))
            .layer(CorsLayer::permissive())
            .layer(axum::middleware::from_fn(
                middleware::request_logging_middleware,
            ))
            .with_state(state)
    }

    /// Start serving requests
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}
