use anyhow::Result;

use crate::domains::auth::services::state::AuthState;
use crate::domains::auth::services::JwtService;
use crate::domains::qr::services::state::QrState;
use crate::shared::services::config::AppConfig;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 요청 간 공유되는 것은 읽기 전용 설정과 Clone 가능한 서비스뿐
#[derive(Clone)]
pub struct AppState {
    /// 환경 설정 (시작 시 1회 로드)
    /// Configuration (loaded once at process start)
    pub config: AppConfig,
    pub auth_state: AuthState,
    pub qr_state: QrState,
}

impl AppState {
    /// Create AppState with configuration
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(config: AppConfig) -> Result<Self> {
        // 1. 공유 서비스 생성 (JWT)
        let jwt_service = JwtService::new(config.jwt_secret.clone());

        // 2. 각 도메인 State 생성
        let auth_state = AuthState::new(jwt_service);
        let qr_state = QrState::new(&config)?;

        // 3. AppState 조합
        Ok(Self {
            config,
            auth_state,
            qr_state,
        })
    }
}
