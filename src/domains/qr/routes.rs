// QR domain routes
// QR 도메인 라우터
use axum::{
    routing::{get, post},
    Router,
};

use crate::domains::qr::handlers::qr_handler;
use crate::shared::services::AppState;

/// Create QR router
/// QR 라우터 생성
pub fn create_qr_router() -> Router<AppState> {
    Router::new()
        .route("/generate", get(qr_handler::generate_qr))
        .route("/verify", post(qr_handler::verify_slip))
}
