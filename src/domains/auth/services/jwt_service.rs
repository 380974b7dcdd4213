// src/domains/auth/services/jwt_service.rs
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domains::auth::models::jwt::Claims;
use crate::shared::errors::AppError;

/// JWT 서비스
/// JWT Service for token generation and verification
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(secret: String) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        Self {
            encoding_key,
            decoding_key,
        }
    }

    /// Access Token 발급
    /// Generate access token (1 hour lifetime)
    pub fn generate_token(&self, username: &str, role: &str) -> Result<String, AppError> {
        let claims = Claims::new(username.to_string(), role.to_string(), 1); // 1시간 만료

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::unexpected(&format!("Failed to generate token: {e}")))
    }

    /// Access Token 검증
    /// Verify access token (signature + expiration)
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| {
                // 만료/위조 모두 동일하게 처리
                AppError::business("Invalid Token", axum::http::StatusCode::UNAUTHORIZED)
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = JwtService::new("test-secret".to_string());

        let token = service.generate_token("admin", "admin").unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new("secret-a".to_string());
        let verifier = JwtService::new("secret-b".to_string());

        let token = issuer.generate_token("admin", "admin").unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = JwtService::new("test-secret".to_string());
        let err = service.verify_token("not-a-jwt").unwrap_err();

        assert_eq!(err.message, "Invalid Token");
    }
}
