use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use thiserror::Error;

use crate::shared::services::config;
use crate::shared::utils::response::Envelope;

/// 에러 분류 (닫힌 집합)
/// Closed set of error kinds, carried as data and pattern-matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 예상된 도메인 거절 (잘못된 자격 증명, 유효하지 않은 슬립 등)
    /// Expected domain rejection
    Business,

    /// 입력 필드 검증 실패
    /// Input failed schema constraints
    Validation,

    /// 요청과 일치하는 리소스 없음
    /// No resource matches the request
    NotFound,

    /// 외부 검증 API 실패 (설정 누락, 호출 실패, 비정상 응답)
    /// External verification call failed or returned malformed data
    Upstream,

    /// 분류되지 않은 내부 오류
    /// Any uncaught error; the message is preserved but treated as opaque
    Unexpected,
}

/// 분류된 에러
/// Classified error propagated as a value through the pipeline
///
/// 상태 코드는 raise 지점에서 명시적으로 지정 (kind에 하드코딩하지 않음)
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: StatusCode,
    pub details: Option<Value>,
}

impl AppError {
    fn new(kind: ErrorKind, message: &str, status: StatusCode) -> Self {
        // 4xx/5xx 외의 상태 코드로 에러를 만들 수 없음
        debug_assert!(status.is_client_error() || status.is_server_error());

        Self {
            kind,
            message: message.to_string(),
            status,
            details: None,
        }
    }

    /// 비즈니스 실패 (상태 코드는 호출 지점마다 지정: 400, 401, 422 등)
    pub fn business(message: &str, status: StatusCode) -> Self {
        Self::new(ErrorKind::Business, message, status)
    }

    /// 검증 실패 (400 고정, details에 필드별 사유 목록)
    pub fn validation(message: &str, details: Option<Value>) -> Self {
        let mut err = Self::new(ErrorKind::Validation, message, StatusCode::BAD_REQUEST);
        err.details = details;
        err
    }

    /// 리소스 없음 (404 고정)
    pub fn not_found(message: &str) -> Self {
        Self::new(ErrorKind::NotFound, message, StatusCode::NOT_FOUND)
    }

    /// 외부 검증 실패
    pub fn upstream(message: &str, status: StatusCode, details: Option<Value>) -> Self {
        let mut err = Self::new(ErrorKind::Upstream, message, status);
        err.details = details;
        err
    }

    /// 분류되지 않은 내부 오류 (500 고정)
    pub fn unexpected(message: &str) -> Self {
        Self::new(
            ErrorKind::Unexpected,
            message,
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }

    /// raise 지점에서 구조화된 상세 첨부
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Envelope 실패 응답으로 변환
    pub fn to_envelope(&self) -> Envelope {
        Envelope::fail(&self.message, self.status.as_u16(), self.details.clone())
    }
}

/// 분류되지 않은 오류는 Unexpected로 수렴
/// 메시지는 보존하되 내용은 불투명하게 취급; 원본 체인은 개발 환경에서만 노출
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        let mut converted = Self::unexpected(&err.to_string());
        if !config::is_production() {
            converted.details = Some(json!(format!("{err:#}")));
        }
        converted
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_envelope().into_response()
    }
}
