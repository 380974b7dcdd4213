use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// 로그인 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    /// Username
    /// 사용자명
    #[schema(example = "admin")]
    pub username: String,

    /// Password
    /// 비밀번호
    #[schema(example = "password")]
    pub password: String,
}

// 로그인 응답 페이로드 (Envelope의 data 부분)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginResponse)]
pub struct LoginResponse {
    /// JWT Access Token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}
