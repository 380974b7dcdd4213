use crate::domains::auth::services::{AuthService, JwtService};

/// Auth 도메인 상태
/// Auth domain state: services shared across auth handlers
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub jwt_service: JwtService,
}

impl AuthState {
    pub fn new(jwt_service: JwtService) -> Self {
        let auth_service = AuthService::new(jwt_service.clone());

        Self {
            auth_service,
            jwt_service,
        }
    }
}
