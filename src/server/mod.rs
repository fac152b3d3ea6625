pub mod config;

pub use config::parse_server_address;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers;
use crate::data::StationService;

pub struct Server {
    addr: SocketAddr,
    service: StationService,
}

impl Server {
    pub fn new(addr: SocketAddr, service: StationService) -> Self {
        Self { addr, service }
    }

    pub fn router(&self) -> Router {
        // The presentation layer is a browser app on another origin, so
        // CORS is answered here instead of through a proxy.
        Router::new()
            .route("/health", get(handlers::health_check))
            .route("/stations", get(handlers::list_stations))
            .route("/stations/refresh", post(handlers::refresh_stations))
            .route("/stations/nearby", get(handlers::nearby_stations))
            .route(
                "/rebalance/recommendation",
                get(handlers::rebalancing_recommendation),
            )
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.service.clone())
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        info!("Starting server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
