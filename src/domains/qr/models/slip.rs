use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 검증된 슬립 참조
/// Slip reference extracted from a validated slip mini-QR payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = SlipVerifyData)]
pub struct SlipVerifyData {
    /// 송금 은행 코드
    #[schema(example = "014")]
    pub sending_bank: String,

    /// 거래 참조 번호
    #[schema(example = "0141234567890123")]
    pub trans_ref: String,
}
