use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::shared::errors::AppError;

/// 외부 슬립 검증 기관 인터페이스
/// External verification authority: confirms a decoded slip payload is a
/// real, unconsumed bank transfer. Each call is independent; freshness and
/// duplicate detection are entirely the authority's responsibility.
#[async_trait]
pub trait SlipVerifyApi: Send + Sync {
    async fn verify(&self, qr_data: &str) -> Result<Value, AppError>;
}

// SlipOK API 클라이언트
// 역할: 외부 슬립 검증 API 호출
// SlipOK client for external slip verification calls
pub struct SlipOkClient {
    http_client: reqwest::Client,
    url: Option<String>,
    api_key: Option<String>,
}

impl SlipOkClient {
    // 클라이언트 생성
    // Create new SlipOK client instance
    pub fn new(url: Option<String>, api_key: Option<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(false)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl SlipVerifyApi for SlipOkClient {
    async fn verify(&self, qr_data: &str) -> Result<Value, AppError> {
        // 설정 선행 조건: 네트워크 호출 전에 검사
        // Configuration precondition, checked before any network I/O
        let (url, api_key) = match (self.url.as_deref(), self.api_key.as_deref()) {
            (Some(url), Some(key)) => (url, key),
            _ => {
                return Err(AppError::upstream(
                    "SlipOK URL or API key not found",
                    StatusCode::BAD_REQUEST,
                    None,
                ));
            }
        };

        // 디코딩된 원문을 그대로 전달, API 키는 헤더 자격 증명
        // POST the raw decoded text; the API key rides in a header
        let response = self
            .http_client
            .post(url)
            .header("x-authorization", api_key)
            .json(&json!({ "data": qr_data }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "slip verification transport failure");
                AppError::upstream(
                    "Error calling slip verification API",
                    StatusCode::BAD_REQUEST,
                    Some(Value::String(e.to_string())),
                )
            })?;

        // HTTP 상태 코드 확인
        // Check HTTP status code; the raw body becomes the error details
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body, "slip verification API returned error");

            return Err(AppError::upstream(
                "Error calling slip verification API",
                StatusCode::BAD_REQUEST,
                Some(Value::String(body)),
            ));
        }

        // JSON 파싱
        let body: Value = response.json().await.map_err(|e| {
            AppError::upstream(
                "Error calling slip verification API",
                StatusCode::BAD_REQUEST,
                Some(Value::String(format!("Failed to parse response: {e}"))),
            )
        })?;

        // 응답이 data 필드로 한 겹 감싸져 있으면 풀어서 반환
        // Unwrap one level of `data` nesting if present, else pass through
        let payload = match body {
            Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        };

        Ok(payload)
    }
}
