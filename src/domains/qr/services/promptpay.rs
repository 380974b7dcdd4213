use axum::http::StatusCode;

use crate::domains::qr::models::{PromptPayType, SlipVerifyData};
use crate::shared::errors::AppError;

/// EMV 결제 요청 QR의 선행 태그 시퀀스 (tag 00, len 02, value 01)
/// Payment-request payloads always open with this sequence
pub const PAYMENT_QR_PREFIX: &str = "000201";

/// PromptPay AID (any id)
const ANY_ID_AID: &str = "A000000677010111";

/// 슬립 검증 mini-QR의 API ID
const SLIP_VERIFY_API_ID: &str = "000001";

/// TLV 태그 (2자리 ID + 2자리 길이 + 값)
#[derive(Debug, Clone, PartialEq)]
pub struct TlvTag {
    pub id: String,
    pub value: String,
}

/// 태그 인코딩: ID + 2자리 길이 + 값
fn tag(id: &str, value: &str) -> String {
    debug_assert!(value.chars().count() <= 99);
    format!("{id}{:02}{value}", value.chars().count())
}

/// TLV 페이로드 디코딩 (문법 오류 시 None)
pub fn decode_tlv(payload: &str) -> Option<Vec<TlvTag>> {
    let chars: Vec<char> = payload.chars().collect();
    let mut tags = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if pos + 4 > chars.len() {
            return None;
        }

        let id: String = chars[pos..pos + 2].iter().collect();
        let len_text: String = chars[pos + 2..pos + 4].iter().collect();
        if !id.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let len: usize = len_text.parse().ok()?;
        if pos + 4 + len > chars.len() {
            return None;
        }

        let value: String = chars[pos + 4..pos + 4 + len].iter().collect();
        tags.push(TlvTag { id, value });
        pos += 4 + len;
    }

    Some(tags)
}

/// 태그 값 조회
pub fn get_tag_value<'a>(tags: &'a [TlvTag], id: &str) -> Option<&'a str> {
    tags.iter()
        .find(|t| t.id == id)
        .map(|t| t.value.as_str())
}

/// CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF)
pub fn crc16_ccitt(data: &str) -> u16 {
    let mut crc: u16 = 0xFFFF;

    for byte in data.as_bytes() {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

/// 체크섬 태그를 붙여 페이로드 완성 (결제 QR은 63, 슬립 QR은 91)
fn with_crc_tag(payload: &str, checksum_tag_id: &str) -> String {
    let base = format!("{payload}{checksum_tag_id}04");
    format!("{base}{:04X}", crc16_ccitt(&base))
}

/// 마지막 4자리가 앞부분 전체의 유효한 체크섬인지 확인
fn verify_trailing_checksum(payload: &str) -> bool {
    if payload.len() < 8 || !payload.is_ascii() {
        return false;
    }

    let (head, given) = payload.split_at(payload.len() - 4);
    let expected = format!("{:04X}", crc16_ccitt(head));
    expected.eq_ignore_ascii_case(given)
}

/// TLV 파싱
/// strict=true면 마지막 태그가 유효한 체크섬 태그(63 또는 91)여야 함
pub fn parse(payload: &str, strict: bool) -> Option<Vec<TlvTag>> {
    let tags = decode_tlv(payload)?;

    if strict {
        let last = tags.last()?;
        if last.id != "63" && last.id != "91" {
            return None;
        }
        if last.value.len() != 4 || !verify_trailing_checksum(payload) {
            return None;
        }
    }

    Some(tags)
}

/// PromptPay any id 결제 페이로드 생성
/// Generate a PromptPay payment payload for MSISDN / NATID / EWALLETID targets
pub fn generate_any_id(ty: PromptPayType, target: &str, amount: Option<f64>) -> String {
    let formatted_target = format_target(ty, target);
    let target_tag_id = match ty {
        PromptPayType::Msisdn => "01",
        PromptPayType::Natid => "02",
        PromptPayType::Ewalletid => "03",
    };

    let merchant_info = format!("{}{}", tag("00", ANY_ID_AID), tag(target_tag_id, &formatted_target));

    let mut payload = String::new();
    payload.push_str(&tag("00", "01"));
    // 금액이 있으면 동적(12), 없으면 정적(11) QR
    payload.push_str(&tag("01", if amount.is_some() { "12" } else { "11" }));
    payload.push_str(&tag("29", &merchant_info));
    payload.push_str(&tag("53", "764")); // THB
    if let Some(amount) = amount {
        payload.push_str(&tag("54", &format!("{amount:.2}")));
    }
    payload.push_str(&tag("58", "TH"));

    with_crc_tag(&payload, "63")
}

/// 타겟 포맷팅
/// MSISDN은 국가 코드(66)로 바꿔 13자리로 패딩, 나머지는 숫자만 추출
fn format_target(ty: PromptPayType, target: &str) -> String {
    let digits: String = target.chars().filter(char::is_ascii_digit).collect();

    match ty {
        PromptPayType::Msisdn => {
            let msisdn = match digits.strip_prefix('0') {
                Some(rest) => format!("66{rest}"),
                None => digits,
            };
            format!("{msisdn:0>13}")
        }
        PromptPayType::Natid | PromptPayType::Ewalletid => digits,
    }
}

/// 슬립 검증 mini-QR 페이로드 생성 (은행 Open API용)
pub fn generate_slip_verify(sending_bank: &str, trans_ref: &str) -> String {
    let inner = format!(
        "{}{}{}",
        tag("00", SLIP_VERIFY_API_ID),
        tag("01", sending_bank),
        tag("02", trans_ref)
    );

    let payload = format!("{}{}", tag("00", &inner), tag("51", "TH"));
    with_crc_tag(&payload, "91")
}

/// 슬립 검증 mini-QR 페이로드 파싱
/// 문법 또는 필수 필드가 어긋나면 None
pub fn parse_slip_verify(payload: &str) -> Option<SlipVerifyData> {
    let tags = parse(payload, true)?;

    let inner = decode_tlv(get_tag_value(&tags, "00")?)?;
    if get_tag_value(&inner, "00")? != SLIP_VERIFY_API_ID {
        return None;
    }

    let sending_bank = get_tag_value(&inner, "01")?;
    let trans_ref = get_tag_value(&inner, "02")?;
    if sending_bank.is_empty() || trans_ref.is_empty() {
        return None;
    }

    if get_tag_value(&tags, "51")? != "TH" {
        return None;
    }

    Some(SlipVerifyData {
        sending_bank: sending_bank.to_string(),
        trans_ref: trans_ref.to_string(),
    })
}

/// 슬립 검증기
/// Validate raw decoded text as a bank slip reference
///
/// 규칙 순서가 중요: 결제 요청 QR 판별이 슬립 문법 파싱보다 먼저
/// (두 형식은 겉보기 구조를 공유할 수 있음)
pub fn validate_slip(raw: &str) -> Result<SlipVerifyData, AppError> {
    if raw.starts_with(PAYMENT_QR_PREFIX) {
        return Err(AppError::business(
            "This is a Payment QR (PromptPay), not a Bank Transfer Slip.",
            StatusCode::BAD_REQUEST,
        ));
    }

    parse_slip_verify(raw).ok_or_else(|| {
        AppError::business(
            "The QR code is not a valid Bank Slip.",
            StatusCode::BAD_REQUEST,
        )
    })
}
