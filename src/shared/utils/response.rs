use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 모든 엔드포인트가 공유하는 단일 응답 래퍼
/// Uniform success/failure wrapper returned by every endpoint
///
/// 필드 구조는 고정: success / code / message / data / timestamp
/// The `success` flag disambiguates the variant; `data` carries the
/// payload on success and the error details (or null) on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    pub success: bool,

    /// HTTP 상태 코드
    /// HTTP status code
    #[schema(example = 200)]
    pub code: u16,

    pub message: String,

    /// 성공 시 페이로드, 실패 시 에러 상세 (없으면 null)
    #[schema(value_type = Object)]
    pub data: Value,

    /// 응답 생성 시각 (UTC, ISO-8601)
    /// Generated at construction time, not supplied by the caller
    #[schema(example = "2025-01-01T00:00:00.000Z")]
    pub timestamp: String,
}

impl Envelope {
    /// 성공 응답 생성
    /// Build a success envelope
    pub fn success(data: Value, code: u16, message: &str) -> Self {
        Self {
            success: true,
            code,
            message: message.to_string(),
            data,
            timestamp: now_iso8601(),
        }
    }

    /// 실패 응답 생성
    /// Build a failure envelope (business logic failures, non-system errors)
    pub fn fail(message: &str, code: u16, details: Option<Value>) -> Self {
        Self {
            success: false,
            code,
            message: message.to_string(),
            data: details.unwrap_or(Value::Null),
            timestamp: now_iso8601(),
        }
    }

    /// JSON 값이 이미 Envelope 형태인지 검사
    /// Probe used by the completion hook: success + code + timestamp
    pub fn is_envelope_value(value: &Value) -> bool {
        match value.as_object() {
            Some(map) => {
                map.get("success").map(Value::is_boolean).unwrap_or(false)
                    && map.get("code").map(Value::is_number).unwrap_or(false)
                    && map.get("timestamp").map(Value::is_string).unwrap_or(false)
            }
            None => false,
        }
    }
}

/// 현재 시각을 ISO-8601 문자열로 (밀리초 정밀도)
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
