use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use slip_api_server::routes::{create_router, not_found_handler};
use slip_api_server::shared::middleware::response::envelope_middleware;
use slip_api_server::shared::services::{AppConfig, AppState};

// Import models for OpenAPI schema
use slip_api_server::domains::auth::models::*;
use slip_api_server::domains::qr::models::*;
use slip_api_server::shared::utils::response::Envelope;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        slip_api_server::domains::auth::handlers::auth_handler::login,
        slip_api_server::domains::qr::handlers::qr_handler::generate_qr,
        slip_api_server::domains::qr::handlers::qr_handler::verify_slip,
        slip_api_server::domains::health::handlers::health_check
    ),
    components(schemas(
        Envelope,
        LoginRequest,
        LoginResponse,
        PromptPayType,
        GenerateQrResponse,
        VerifySlipData,
        SlipVerifyData
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Authentication API endpoints"),
        (name = "QR", description = "PromptPay QR generation and slip verification endpoints"),
        (name = "Health", description = "Health check endpoint")
    ),
    info(
        title = "Slip Verification API Server",
        description = "API server for PromptPay QR generation and bank slip verification",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() {
    // 로깅 초기화
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // 설정 로드 (환경 변수, 프로세스 시작 시 1회)
    let config = AppConfig::from_env();
    let port = config.port;

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(config).expect("Failed to initialize AppState");

    // CORS 설정 (원본 API와 동일하게 모든 출처 허용)
    let cors = CorsLayer::permissive();

    // Router 생성
    // 전역 완료 훅이 모든 API 응답을 Envelope 계약으로 정규화
    // (Swagger 문서 라우트는 네이티브 응답 그대로 서빙)
    let app = Router::new()
        .merge(create_router().layer(middleware::from_fn(envelope_middleware)))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .fallback(not_found_handler)
        .layer(cors)
        .with_state(app_state);

    // 서버 시작
    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind server port");

    println!("Server running on http://localhost:{port}");
    println!("Swagger UI available at http://localhost:{port}/swagger-ui");

    // 서버 실행
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
