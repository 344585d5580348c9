//! R4C robot factory back-office
//!
//! Robot registration with serial code allocation, customer notifications and
//! weekly production reports.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;

pub use config::Config;

use repositories::{OrderRepository, RobotRepository};
use services::{Mailer, SharedSerialPool};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub robots: Arc<dyn RobotRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub serial_pool: SharedSerialPool,
    pub mailer: Arc<dyn Mailer>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "R4C Robot Factory API v1.0"
}
