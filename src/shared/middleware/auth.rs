use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use crate::shared::errors::AppError;
use crate::shared::services::AppState;

/// 인증된 사용자 정보 (JWT 토큰에서 추출)
/// Authenticated user information (extracted from JWT token)
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: String,
}

/// AuthenticatedUser를 Axum Extractor로 구현
///
/// 사용법:
/// ```rust,ignore
/// pub async fn generate_qr(
///     State(app_state): State<AppState>,
///     authenticated_user: AuthenticatedUser,  // <- 이렇게 사용!
/// ) -> Result<...> {
///     // ...
/// }
/// ```
#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::business(
                    "Missing or invalid Authorization header",
                    StatusCode::UNAUTHORIZED,
                )
            })?;

        // 2. "Bearer <token>" 형식 파싱
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::business(
                "Missing or invalid Authorization header",
                StatusCode::UNAUTHORIZED,
            )
        })?;

        // 3. JWT Service로 토큰 검증 (AppState에서 가져옴)
        let claims = state
            .auth_state
            .jwt_service
            .verify_token(token)
            .map_err(|_| AppError::business("Invalid Token", StatusCode::UNAUTHORIZED))?;

        // 4. AuthenticatedUser 반환
        Ok(AuthenticatedUser {
            username: claims.username,
            role: claims.role,
        })
    }
}
