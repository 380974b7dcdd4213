// =====================================================
// 응답 Envelope 계약 통합 테스트
// =====================================================
// 모든 응답이 단일 래퍼 형태를 지키는지 라우터 전체를 통해 확인

mod common;
use common::*;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};

fn test_app() -> axum::Router {
    let (scanner, _) = MockScanner::returning(None);
    let (client, _) = MockVerifyApi::succeeding(json!({}));
    build_app(Arc::new(scanner), Arc::new(client))
}

fn assert_envelope_shape(body: &Value) {
    let map = body.as_object().expect("envelope must be an object");
    assert!(map["success"].is_boolean());
    assert!(map["code"].is_number());
    assert!(map["message"].is_string());
    assert!(map.contains_key("data"));
    assert!(map["timestamp"].is_string());
}

/// 테스트: 맨 값을 반환하는 핸들러도 Envelope로 래핑됨
#[tokio::test]
async fn test_bare_value_handler_is_auto_wrapped() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope_shape(&body);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["code"], json!(200));
    assert_eq!(body["data"]["status"], json!("ok"));
}

/// 테스트: 존재하지 않는 라우트 → 404 실패 Envelope
#[tokio::test]
async fn test_unknown_route_wrapped_as_not_found() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/nothing-here")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope_shape(&body);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Resource not found"));
}

/// 테스트: 핸들러가 만든 Envelope는 훅을 거쳐도 그대로
#[tokio::test]
async fn test_handler_envelope_not_double_wrapped() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({"username": "admin", "password": "password"}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope_shape(&body);
    // 이중 래핑이면 data 안에 또 envelope가 있게 됨
    assert!(body["data"]["token"].is_string());
    assert!(body["data"].get("success").is_none());
}

/// 테스트: 성공/실패 모두 동일한 필드 집합 (shape 불변식)
#[tokio::test]
async fn test_failure_and_success_share_one_shape() {
    // 실패 응답
    let request = Request::builder()
        .method("GET")
        .uri("/api/qr/generate?amount=100&target=0812345678&type=MSISDN")
        .body(Body::empty())
        .unwrap();
    let (_, failure) = send(test_app(), request).await;
    assert_envelope_shape(&failure);
    assert_eq!(failure["success"], json!(false));

    // 성공 응답
    let request = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (_, success) = send(test_app(), request).await;
    assert_envelope_shape(&success);
    assert_eq!(success["success"], json!(true));
}
