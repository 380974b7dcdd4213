use std::io::Cursor;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qrcode::QrCode;
use serde_json::{json, Value};

use crate::domains::qr::models::{GenerateQrResponse, PromptPayType};
use crate::domains::qr::services::promptpay;
use crate::shared::errors::AppError;
use crate::shared::utils::masking::format_secure_string;
use crate::shared::utils::response::Envelope;

// QR 생성 서비스
// Generates PromptPay payment payloads and their rendered QR images
#[derive(Clone)]
pub struct QrService;

impl QrService {
    pub fn new() -> Self {
        Self
    }

    /// PromptPay QR 생성
    /// Generate a PromptPay QR payload plus its base64 PNG rendering
    pub fn generate_qr(
        &self,
        amount: f64,
        target: &str,
        qr_type: PromptPayType,
    ) -> Result<Envelope, AppError> {
        // 필드 검증: 잘못된 필드를 모두 모아 한 번에 보고
        let mut field_errors = Vec::new();
        if !amount.is_finite() || amount <= 0.0 {
            field_errors.push(json!({
                "field": "amount",
                "reason": "must be a positive number",
            }));
        }
        if target.trim().is_empty() {
            field_errors.push(json!({
                "field": "target",
                "reason": "must not be empty",
            }));
        }
        if !field_errors.is_empty() {
            return Err(AppError::validation(
                "Validation Error",
                Some(Value::Array(field_errors)),
            ));
        }

        let masked_target = format_secure_string(target);
        tracing::info!(amount, target = %masked_target, "generating PromptPay QR");

        let payload = promptpay::generate_any_id(qr_type, target, Some(amount));
        let qr_code = render_qr_data_uri(&payload).map_err(|e| {
            AppError::business("Failed to generate QR Code", StatusCode::BAD_REQUEST)
                .with_details(Value::String(format!("{e:#}")))
        })?;

        let response = GenerateQrResponse {
            qr_type,
            target: masked_target,
            amount,
            payload,
            qr_code,
        };

        Ok(Envelope::success(
            json!(response),
            200,
            "QR Code generated successfully",
        ))
    }
}

impl Default for QrService {
    fn default() -> Self {
        Self::new()
    }
}

/// 모듈당 픽셀 수
const MODULE_SCALE: u32 = 8;
/// 여백 (quiet zone) 모듈 수
const QUIET_ZONE: u32 = 4;

/// 페이로드를 PNG로 래스터화하여 data URI로 인코딩
fn render_qr_data_uri(payload: &str) -> Result<String> {
    let code = QrCode::new(payload.as_bytes()).context("Failed to build QR code")?;
    let width = code.width();
    let colors = code.to_colors();

    let size = (width as u32 + QUIET_ZONE * 2) * MODULE_SCALE;
    let mut img = image::GrayImage::from_pixel(size, size, image::Luma([255u8]));

    for y in 0..width {
        for x in 0..width {
            if colors[y * width + x] == qrcode::Color::Dark {
                for dy in 0..MODULE_SCALE {
                    for dx in 0..MODULE_SCALE {
                        img.put_pixel(
                            (x as u32 + QUIET_ZONE) * MODULE_SCALE + dx,
                            (y as u32 + QUIET_ZONE) * MODULE_SCALE + dy,
                            image::Luma([0u8]),
                        );
                    }
                }
            }
        }
    }

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("Failed to encode QR image")?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}
