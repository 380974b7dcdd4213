// Health domain routes
use axum::{routing::get, Router};

use crate::domains::health::handlers;
use crate::shared::services::AppState;

/// Create health router
pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/", get(handlers::health_check))
}
