use axum::{extract::State, Json};
use serde_json::json;

use crate::domains::auth::models::{LoginRequest, LoginResponse};
use crate::shared::errors::AppError;
use crate::shared::services::AppState;
use crate::shared::utils::response::Envelope;

// 로그인 핸들러
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = Envelope),
        (status = 401, description = "Invalid credentials", body = Envelope)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Envelope, AppError> {
    // Service 호출 (비즈니스 로직)
    let token = app_state
        .auth_state
        .auth_service
        .login(&request.username, &request.password)?;

    Ok(Envelope::success(
        json!(LoginResponse { token }),
        200,
        "Login successful",
    ))
}
