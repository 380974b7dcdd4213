use std::sync::Arc;

use anyhow::Result;

use crate::domains::qr::services::scanner::{QrScanner, RqrrScanner};
use crate::domains::qr::services::{QrService, SlipService};
use crate::shared::clients::{SlipOkClient, SlipVerifyApi};
use crate::shared::services::config::AppConfig;

/// QR 도메인 상태
/// QR domain state: services shared across QR handlers
#[derive(Clone)]
pub struct QrState {
    pub qr_service: QrService,
    pub slip_service: SlipService,
}

impl QrState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let scanner: Arc<dyn QrScanner> = Arc::new(RqrrScanner::new());
        let verify_client: Arc<dyn SlipVerifyApi> = Arc::new(SlipOkClient::new(
            config.slipok_url.clone(),
            config.slipok_api_key.clone(),
        )?);

        Ok(Self::with_components(scanner, verify_client))
    }

    /// collaborator 주입 생성자 (테스트에서 mock 사용)
    pub fn with_components(
        scanner: Arc<dyn QrScanner>,
        verify_client: Arc<dyn SlipVerifyApi>,
    ) -> Self {
        Self {
            qr_service: QrService::new(),
            slip_service: SlipService::new(scanner, verify_client),
        }
    }
}
