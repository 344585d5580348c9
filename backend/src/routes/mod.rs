//! Route definitions for the R4C robot factory

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Robot registration and reporting
        .nest("/robots", robot_routes())
}

/// Robot routes
fn robot_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(handlers::add_robot))
        .route("/weekly_report", get(handlers::weekly_report))
}
