use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::shared::services::config;
use crate::shared::utils::response::Envelope;

/// 응답 본문 버퍼링 상한
const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// 전역 응답 정규화 훅
/// Global completion hook: every outgoing payload passes through here
///
/// 검사 순서:
/// 1. 이미 Envelope 형태인 응답은 바이트 그대로 통과 (이중 래핑 방지)
/// 2. Envelope가 아닌 에러 응답(라우트 없음, extractor 거절 등)은 fail로 변환
/// 3. 핸들러가 맨 값을 반환하면 success로 자동 래핑
/// 4. 빈 본문은 success(null)로 래핑
pub async fn envelope_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    normalize(response).await
}

async fn normalize(response: Response) -> Response {
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let is_json = content_type
        .as_deref()
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false);

    // 래핑 대상: JSON 응답, 에러 응답, 그리고 본문 타입 없는 2xx 응답
    // (핸들러가 아무것도 반환하지 않은 경우 → success(null))
    // 그 외(정적 리소스, 리다이렉트 등)는 손대지 않음
    let wrappable = is_json || is_error || (status.is_success() && content_type.is_none());
    if !wrappable {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "failed to buffer response body");
            return Envelope::fail("Internal Server Error", 500, None).into_response();
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        // 이미 포맷된 응답: 원본 바이트 그대로 재조립
        Ok(value) if Envelope::is_envelope_value(&value) => {
            Response::from_parts(parts, Body::from(bytes))
        }
        Ok(value) => wrap_json(status, value),
        Err(_) => wrap_raw(status, &bytes),
    }
}

/// JSON이지만 Envelope가 아닌 응답 래핑
fn wrap_json(status: StatusCode, value: Value) -> Response {
    if status.is_client_error() || status.is_server_error() {
        if status.is_server_error() && config::is_production() {
            // 프로덕션에서는 내부 오류 내용을 숨김
            return Envelope::fail("Internal Server Error", status.as_u16(), None)
                .into_response();
        }

        let message = value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| reason_for(status));

        return Envelope::fail(&message, status.as_u16(), Some(value)).into_response();
    }

    // 핸들러가 반환한 맨 값 자동 래핑 (null 포함)
    Envelope::success(value, status.as_u16(), "Success").into_response()
}

/// JSON으로 파싱되지 않는 본문 래핑 (빈 본문, 텍스트 거절 응답 등)
fn wrap_raw(status: StatusCode, bytes: &[u8]) -> Response {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();

    if status.is_server_error() {
        if config::is_production() {
            return Envelope::fail("Internal Server Error", status.as_u16(), None)
                .into_response();
        }

        let message = if text.is_empty() {
            "Internal Server Error".to_string()
        } else {
            text.to_string()
        };
        let details = (!text.is_empty()).then(|| Value::String(text.to_string()));
        return Envelope::fail(&message, status.as_u16(), details).into_response();
    }

    if status.is_client_error() {
        let message = if text.is_empty() {
            reason_for(status)
        } else {
            text.to_string()
        };
        return Envelope::fail(&message, status.as_u16(), None).into_response();
    }

    if text.is_empty() {
        return Envelope::success(Value::Null, status.as_u16(), "Success").into_response();
    }

    Envelope::success(Value::String(text.to_string()), status.as_u16(), "Success")
        .into_response()
}

fn reason_for(status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => "Resource not found".to_string(),
        other => other
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use serde_json::json;

    async fn body_value(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bare_value_is_auto_wrapped() {
        let response = Json(json!({"status": "ok"})).into_response();
        let (status, value) = body_value(normalize(response).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["code"], json!(200));
        assert_eq!(value["data"], json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_envelope_passes_through_unchanged() {
        let envelope = Envelope::success(json!({"id": 7}), 200, "Success");
        let expected = serde_json::to_value(&envelope).unwrap();

        // 훅을 두 번 통과해도 결과는 동일해야 함
        let once = normalize(envelope.into_response()).await;
        let twice = normalize(once).await;
        let (status, value) = body_value(twice).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, expected);
    }

    #[tokio::test]
    async fn test_empty_404_becomes_resource_not_found() {
        let response = StatusCode::NOT_FOUND.into_response();
        let (status, value) = body_value(normalize(response).await).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["message"], json!("Resource not found"));
    }

    #[tokio::test]
    async fn test_plain_text_rejection_is_wrapped() {
        // axum extractor 거절 형태 (text/plain + 4xx)
        let response = (StatusCode::BAD_REQUEST, "Failed to deserialize query string")
            .into_response();
        let (status, value) = body_value(normalize(response).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["message"], json!("Failed to deserialize query string"));
    }

    #[tokio::test]
    async fn test_empty_success_body_wraps_null() {
        let response = StatusCode::OK.into_response();
        let (status, value) = body_value(normalize(response).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"], json!(null));
    }
}
