/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - 응답 Envelope 빌더
/// - 민감 문자열 마스킹
pub mod masking;
pub mod response;

pub use masking::*;
pub use response::*;
