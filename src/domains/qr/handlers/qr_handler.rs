use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use crate::domains::qr::models::{GenerateQrQuery, VerifySlipData, VerifySlipQuery};
use crate::shared::errors::AppError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use crate::shared::utils::response::Envelope;

// QR 생성 핸들러
#[utoipa::path(
    get,
    path = "/api/qr/generate",
    params(GenerateQrQuery),
    responses(
        (status = 200, description = "QR Code generated successfully", body = Envelope),
        (status = 400, description = "Validation error", body = Envelope),
        (status = 401, description = "Unauthorized", body = Envelope)
    ),
    security(("BearerAuth" = [])),
    tag = "QR"
)]
pub async fn generate_qr(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<GenerateQrQuery>,
) -> Result<Envelope, AppError> {
    // Service 호출 (비즈니스 로직)
    app_state
        .qr_state
        .qr_service
        .generate_qr(query.amount, &query.target, query.qr_type)
}

/// 슬립 검증 핸들러
/// Verify slip handler
///
/// multipart 업로드(image 필드)는 이미지 파이프라인으로,
/// JSON 본문({amount?, transRef})은 구조화된 데모 변형으로 분기
#[utoipa::path(
    post,
    path = "/api/qr/verify",
    params(VerifySlipQuery),
    request_body = VerifySlipData,
    responses(
        (status = 200, description = "Slip verification successful", body = Envelope),
        (status = 400, description = "Invalid slip or decode failure", body = Envelope),
        (status = 401, description = "Unauthorized", body = Envelope)
    ),
    security(("BearerAuth" = [])),
    tag = "QR"
)]
pub async fn verify_slip(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<VerifySlipQuery>,
    request: Request,
) -> Result<Envelope, AppError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        let multipart = Multipart::from_request(request, &app_state)
            .await
            .map_err(|e| {
                AppError::validation("Invalid multipart form data", None)
                    .with_details(Value::String(e.to_string()))
            })?;

        return verify_slip_image(&app_state, multipart, query.amount).await;
    }

    // JSON 본문: 구조화된 슬립 데이터 (데모 변형)
    let Json(body) = Json::<VerifySlipData>::from_request(request, &app_state)
        .await
        .map_err(|e| {
            AppError::validation("Validation Error", Some(json!([e.body_text()])))
        })?;

    app_state
        .qr_state
        .slip_service
        .verify_data(body.amount.or(query.amount), &body.trans_ref)
}

/// multipart 본문에서 image 필드를 찾아 이미지 파이프라인 실행
async fn verify_slip_image(
    app_state: &AppState,
    mut multipart: Multipart,
    expected_amount: Option<f64>,
) -> Result<Envelope, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::validation("Invalid multipart form data", None)
            .with_details(Value::String(e.to_string()))
    })? {
        if field.name() != Some("image") {
            continue;
        }

        // 이미지 타입이 아닌 업로드는 디코딩 전에 거절
        let is_image = field
            .content_type()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Err(AppError::business(
                "File must be an image",
                StatusCode::BAD_REQUEST,
            ));
        }

        let bytes = field.bytes().await.map_err(|e| {
            AppError::validation("Failed to read image upload", None)
                .with_details(Value::String(e.to_string()))
        })?;

        return app_state
            .qr_state
            .slip_service
            .verify_image(&bytes, expected_amount)
            .await;
    }

    Err(AppError::validation("No image file provided", None))
}
