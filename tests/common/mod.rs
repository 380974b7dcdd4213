// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 모든 통합 테스트에서 공통으로 사용하는 앱 조립, mock
// collaborator, 요청/응답 헬퍼 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let (scanner, _) = MockScanner::returning(None);
//     let (client, _) = MockVerifyApi::succeeding(json!({}));
//     let app = build_app(Arc::new(scanner), Arc::new(client));
//     // 테스트 코드...
// }
// ```
// =====================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{middleware, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use slip_api_server::domains::auth::services::state::AuthState;
use slip_api_server::domains::auth::services::JwtService;
use slip_api_server::domains::qr::services::scanner::QrScanner;
use slip_api_server::domains::qr::services::state::QrState;
use slip_api_server::routes::create_router;
use slip_api_server::shared::clients::SlipVerifyApi;
use slip_api_server::shared::errors::AppError;
use slip_api_server::shared::middleware::response::envelope_middleware;
use slip_api_server::shared::services::{AppConfig, AppState};

// 테스트용 상수
pub const TEST_JWT_SECRET: &str = "test-secret";

/// 테스트용 설정 (SlipOK 미설정)
pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        slipok_url: None,
        slipok_api_key: None,
        app_env: "test".to_string(),
    }
}

/// mock collaborator를 주입한 테스트 앱 조립
/// 전역 완료 훅까지 실제 구성 그대로 레이어링
pub fn build_app(
    scanner: Arc<dyn QrScanner>,
    verify_client: Arc<dyn SlipVerifyApi>,
) -> Router {
    let jwt_service = JwtService::new(TEST_JWT_SECRET.to_string());
    let state = AppState {
        config: test_config(),
        auth_state: AuthState::new(jwt_service),
        qr_state: QrState::with_components(scanner, verify_client),
    };

    Router::new()
        .merge(create_router())
        .layer(middleware::from_fn(envelope_middleware))
        .with_state(state)
}

/// 유효한 Bearer 헤더 값 생성
pub fn auth_header() -> String {
    let jwt_service = JwtService::new(TEST_JWT_SECRET.to_string());
    let token = jwt_service
        .generate_token("admin", "admin")
        .expect("Failed to generate test token");
    format!("Bearer {token}")
}

/// 요청 전송 후 (상태 코드, JSON 본문) 반환
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    let value = serde_json::from_slice(&bytes).expect("body is not JSON");
    (status, value)
}

/// multipart 슬립 업로드 요청 생성
pub fn multipart_image_request(
    uri: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let boundary = "test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; \
             filename=\"slip.png\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", auth_header())
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// 고정 결과를 반환하는 스캐너 mock (호출 횟수 기록)
pub struct MockScanner {
    result: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockScanner {
    pub fn returning(result: Option<&str>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let scanner = Self {
            result: result.map(str::to_string),
            calls: calls.clone(),
        };
        (scanner, calls)
    }
}

#[async_trait]
impl QrScanner for MockScanner {
    async fn scan(&self, _image: &[u8]) -> Result<Option<String>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

/// 외부 검증 API mock (호출 횟수 기록)
pub struct MockVerifyApi {
    verdict: Result<Value, (String, Option<Value>)>,
    calls: Arc<AtomicUsize>,
}

impl MockVerifyApi {
    pub fn succeeding(value: Value) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let api = Self {
            verdict: Ok(value),
            calls: calls.clone(),
        };
        (api, calls)
    }

    pub fn failing(message: &str, details: Option<Value>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let api = Self {
            verdict: Err((message.to_string(), details)),
            calls: calls.clone(),
        };
        (api, calls)
    }
}

#[async_trait]
impl SlipVerifyApi for MockVerifyApi {
    async fn verify(&self, _qr_data: &str) -> Result<Value, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.verdict {
            Ok(value) => Ok(value.clone()),
            Err((message, details)) => Err(AppError::upstream(
                message,
                StatusCode::BAD_REQUEST,
                details.clone(),
            )),
        }
    }
}
