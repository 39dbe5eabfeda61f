//! Bankcards 토큰 인증 API.
//!
//! RS256 JWT 기반 인증 서브시스템과 이를 노출하는 Axum REST API.
//!
//! - 로그인: `Authorization: Basic` → Access/Refresh 토큰 쌍
//! - 요청 인증: `Authorization: Bearer` → 요청 단위 보안 컨텍스트
//! - 갱신: Refresh Token → 새 토큰 쌍 (회전)

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use auth::{AuthError, KeyError, TokenCodec, TokenPair};
pub use error::ErrorResponse;
pub use routes::create_api_router;
pub use state::AppState;
