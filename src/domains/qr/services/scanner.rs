use async_trait::async_trait;
use image::GrayImage;

use crate::shared::errors::AppError;

/// 이미지에서 QR 페이로드를 추출하는 collaborator
/// Barcode-in-image decoder: returns the decoded text or None when no
/// code is found. Implementations must never panic on hostile input.
#[async_trait]
pub trait QrScanner: Send + Sync {
    async fn scan(&self, image: &[u8]) -> Result<Option<String>, AppError>;
}

/// rqrr 기반 2패스 스캐너
/// Two-pass optical scanner
///
/// 촬영된 슬립은 주변 배경 노이즈 때문에 단일 패스 검출이 불안정함.
/// 1차 검출 영역(바운딩 박스)만 잘라 한 번 더 디코딩하고, 성공하면
/// 그 결과가 1차 결과를 대체함.
pub struct RqrrScanner;

impl RqrrScanner {
    pub fn new() -> Self {
        Self
    }

    /// 단일 패스 검출: 텍스트 + 검출 영역 꼭짓점
    fn detect(luma: &GrayImage) -> Option<(String, [rqrr::Point; 4])> {
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            luma.width() as usize,
            luma.height() as usize,
            |x, y| luma.get_pixel(x as u32, y as u32).0[0],
        );

        let grids = prepared.detect_grids();
        let grid = grids.first()?;
        let bounds = grid.bounds;

        match grid.decode() {
            Ok((_, text)) if !text.is_empty() => Some((text, bounds)),
            _ => None,
        }
    }

    /// 검출 꼭짓점의 바운딩 박스로 잘라내기
    fn crop_to_bounds(luma: &GrayImage, bounds: &[rqrr::Point; 4]) -> Option<GrayImage> {
        let min_x = bounds.iter().map(|p| p.x).min()?.max(0) as u32;
        let min_y = bounds.iter().map(|p| p.y).min()?.max(0) as u32;
        let max_x = (bounds.iter().map(|p| p.x).max()?.max(0) as u32).min(luma.width());
        let max_y = (bounds.iter().map(|p| p.y).max()?.max(0) as u32).min(luma.height());

        if max_x <= min_x || max_y <= min_y {
            return None;
        }

        let region =
            image::imageops::crop_imm(luma, min_x, min_y, max_x - min_x, max_y - min_y);
        Some(region.to_image())
    }
}

#[async_trait]
impl QrScanner for RqrrScanner {
    async fn scan(&self, image_bytes: &[u8]) -> Result<Option<String>, AppError> {
        // 디코딩 불가능한 바이트는 "코드 없음"으로 취급
        let img = match image::load_from_memory(image_bytes) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load slip image");
                return Ok(None);
            }
        };
        let luma = img.to_luma8();

        let Some((text, bounds)) = Self::detect(&luma) else {
            return Ok(None);
        };

        // 2차 패스: 1차 검출 영역만 재디코딩
        if let Some(region) = Self::crop_to_bounds(&luma, &bounds) {
            if let Some((refined, _)) = Self::detect(&region) {
                return Ok(Some(refined));
            }
        }

        // 재디코딩이 실패하면 1차 결과 사용
        Ok(Some(text))
    }
}

impl Default for RqrrScanner {
    fn default() -> Self {
        Self::new()
    }
}
