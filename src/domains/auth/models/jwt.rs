use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// JWT Claims
/// 토큰에 담기는 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자명
    pub username: String,

    /// 역할
    pub role: String,

    /// 발급 시각 (Unix timestamp)
    pub iat: i64,

    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Claims 생성
    /// Create claims with expiration in hours
    pub fn new(username: String, role: String, expires_in_hours: i64) -> Self {
        let now = Utc::now();
        let expires_at = now + Duration::hours(expires_in_hours);

        Self {
            username,
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}
