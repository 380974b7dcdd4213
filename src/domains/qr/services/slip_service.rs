use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use crate::domains::qr::services::promptpay;
use crate::domains::qr::services::scanner::QrScanner;
use crate::shared::clients::SlipVerifyApi;
use crate::shared::errors::AppError;
use crate::shared::utils::response::Envelope;

// 슬립 검증 오케스트레이터
// Sequences decode → validate → external verify, early-exit on the first
// failure. Stage outcomes are composed as Result values; no stage retries
// and the machine never backtracks.
#[derive(Clone)]
pub struct SlipService {
    scanner: Arc<dyn QrScanner>,
    verify_client: Arc<dyn SlipVerifyApi>,
}

impl SlipService {
    pub fn new(scanner: Arc<dyn QrScanner>, verify_client: Arc<dyn SlipVerifyApi>) -> Self {
        Self {
            scanner,
            verify_client,
        }
    }

    /// 슬립 이미지 검증 (프로덕션 경로)
    /// Verify a slip from an uploaded image
    pub async fn verify_image(
        &self,
        image: &[u8],
        expected_amount: Option<f64>,
    ) -> Result<Envelope, AppError> {
        // 빈 버퍼는 디코딩 전에 거절
        if image.is_empty() {
            return Err(AppError::validation("Invalid image file", None));
        }

        if let Some(amount) = expected_amount {
            tracing::info!(amount, "expected slip amount supplied by caller");
        }

        // DECODE: 광학 디코딩은 collaborator에 위임
        let qr_data = self.scanner.scan(image).await?.ok_or_else(|| {
            AppError::business(
                "No QR code found or unable to decode data",
                StatusCode::BAD_REQUEST,
            )
        })?;

        tracing::info!("QR payload decoded from slip image");

        self.verify_payload(&qr_data).await
    }

    /// 디코딩된 원문 검증 (VALIDATE → EXTERNAL_VERIFY)
    /// Validate the raw payload, then reconcile with the external authority
    pub async fn verify_payload(&self, qr_data: &str) -> Result<Envelope, AppError> {
        let slip = promptpay::validate_slip(qr_data)?;
        tracing::info!(
            sending_bank = %slip.sending_bank,
            trans_ref = %slip.trans_ref,
            "slip payload validated"
        );

        let result = self.verify_client.verify(qr_data).await?;

        Ok(Envelope::success(
            result,
            200,
            "Slip verification successful",
        ))
    }

    /// 구조화된 슬립 데이터 검증 (데모 변형)
    /// Degraded variant: the caller already holds machine-readable slip
    /// data, no decode runs and no external authority is consulted
    pub fn verify_data(
        &self,
        amount: Option<f64>,
        trans_ref: &str,
    ) -> Result<Envelope, AppError> {
        if trans_ref.trim().is_empty() {
            return Err(AppError::validation(
                "Validation Error",
                Some(json!([{"field": "transRef", "reason": "must not be empty"}])),
            ));
        }

        tracing::info!(trans_ref, "structured slip data accepted without external check");

        Ok(Envelope::success(
            json!({
                "transRef": trans_ref,
                "amount": amount,
                "verified": true,
            }),
            200,
            "Slip verification successful",
        ))
    }
}
