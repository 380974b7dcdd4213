use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::shared::utils::response::Envelope;

// 헬스 체크 핸들러
// 맨 값을 반환하고, 전역 훅이 Envelope로 자동 래핑
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = Envelope)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
