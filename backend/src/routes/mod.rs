//! Route definitions for the farm planner

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/planning", planning_routes())
}

/// Planting recommendation routes
fn planning_routes() -> Router<AppState> {
    Router::new()
        .route("/opportunities", get(handlers::list_opportunities))
        .route("/campaign", post(handlers::plan_campaign))
        .route("/dashboard", get(handlers::get_dashboard))
}
