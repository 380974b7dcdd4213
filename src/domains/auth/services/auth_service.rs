use axum::http::StatusCode;

use crate::domains::auth::services::JwtService;
use crate::shared::errors::AppError;

// 데모 자격 증명 (영속 저장소 없음)
// Demo credentials; the system carries no user store
const DEMO_USERNAME: &str = "admin";
const DEMO_PASSWORD: &str = "password";
const DEMO_ROLE: &str = "admin";

// 인증 서비스
// AuthService: handles authentication business logic
#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
}

impl AuthService {
    // 생성자
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }

    // 로그인 (비즈니스 로직)
    // Returns a signed access token on success
    pub fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        // 자격 증명 확인
        if username != DEMO_USERNAME || password != DEMO_PASSWORD {
            tracing::warn!(username, "login rejected");
            return Err(AppError::business(
                "Invalid credentials",
                StatusCode::UNAUTHORIZED,
            ));
        }

        let token = self.jwt_service.generate_token(username, DEMO_ROLE)?;
        tracing::info!(username, "login succeeded");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::ErrorKind;

    fn service() -> AuthService {
        AuthService::new(JwtService::new("test-secret".to_string()))
    }

    #[test]
    fn test_valid_credentials_issue_token() {
        let token = service().login("admin", "password").unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_invalid_credentials_rejected_as_business_401() {
        let err = service().login("admin", "wrong").unwrap_err();

        assert_eq!(err.kind, ErrorKind::Business);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid credentials");
    }
}
