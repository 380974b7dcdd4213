use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// PromptPay 타겟 종류
/// PromptPay target kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PromptPayType {
    /// 휴대폰 번호
    Msisdn,
    /// 주민등록번호/세금 ID
    Natid,
    /// e-Wallet ID
    Ewalletid,
    // Reserved for future use
    // Bankacc,
}

// QR 생성 요청 (쿼리 파라미터)
#[derive(Debug, Deserialize, IntoParams)]
pub struct GenerateQrQuery {
    /// 수취 금액
    pub amount: f64,

    /// 휴대폰 번호 / Tax ID / e-Wallet ID
    pub target: String,

    /// PromptPay 타겟 종류
    #[serde(rename = "type")]
    pub qr_type: PromptPayType,
}

// QR 생성 응답 페이로드 (Envelope의 data 부분)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = GenerateQrResponse)]
pub struct GenerateQrResponse {
    /// PromptPay 타겟 종류
    #[serde(rename = "type")]
    pub qr_type: PromptPayType,

    /// 마스킹된 타겟 (마지막 4자리만 노출)
    /// Masked target, only the last 4 characters visible
    #[schema(example = "******5678")]
    pub target: String,

    /// 수취 금액
    pub amount: f64,

    /// PromptPay EMV 페이로드
    pub payload: String,

    /// QR 이미지 (base64 PNG data URI)
    #[schema(example = "data:image/png;base64,...")]
    pub qr_code: String,
}

// 슬립 검증 쿼리 파라미터
#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifySlipQuery {
    /// 기대 금액 (선택)
    pub amount: Option<f64>,
}

// 구조화된 슬립 데이터 (JSON 본문 변형)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = VerifySlipData)]
pub struct VerifySlipData {
    /// 기대 금액 (선택)
    pub amount: Option<f64>,

    /// 거래 참조 번호
    #[schema(example = "0141234567890123")]
    pub trans_ref: String,
}
