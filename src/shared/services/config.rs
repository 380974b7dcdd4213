use std::env;

/// 애플리케이션 설정
/// Application configuration, read from the environment once at startup
///
/// 요청 처리 중에는 읽기 전용으로만 공유됨
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 서버 리스닝 포트
    pub port: u16,

    /// JWT 서명 시크릿
    pub jwt_secret: String,

    /// SlipOK 검증 API 엔드포인트
    /// External slip verification endpoint (None when unconfigured)
    pub slipok_url: Option<String>,

    /// SlipOK API 키
    pub slipok_api_key: Option<String>,

    /// 실행 환경 ("production" 외에는 개발 환경으로 취급)
    pub app_env: String,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "super-secret-key".to_string());

        Self {
            port,
            jwt_secret,
            slipok_url: env::var("SLIPOK_URL").ok(),
            slipok_api_key: env::var("SLIPOK_API_KEY").ok(),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

/// 프로덕션 환경 여부 (설정 객체가 없는 지점용)
/// Used where no AppConfig is threaded (error conversion, completion hook)
pub fn is_production() -> bool {
    env::var("APP_ENV").map(|v| v == "production").unwrap_or(false)
}
