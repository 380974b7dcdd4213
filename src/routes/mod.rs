// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::Router;

use crate::shared::errors::AppError;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::auth::routes::create_auth_router;
use crate::domains::health::routes::create_health_router;
use crate::domains::qr::routes::create_qr_router;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest("/api/qr", create_qr_router())
        .nest("/api/health", create_health_router())
}

/// 등록되지 않은 경로 → 404 실패 Envelope
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Resource not found")
}
