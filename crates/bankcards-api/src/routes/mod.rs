//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `POST /api/v1/login` - Basic 자격 증명 → 토큰 쌍
//! - `POST /api/v1/auth/refresh` - Refresh Token 회전
//! - `GET /api/v1/users/me` - 현재 신원 (인증 필요)
//! - `GET /api/v1/admin/users/{id}` - 신원 조회 (`ADMIN` 필요)

pub mod admin;
pub mod auth;
pub mod health;
pub mod users;

pub use admin::admin_router;
pub use auth::{auth_router, RefreshQuery};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use users::{users_router, IdentityResponse};

use std::sync::Arc;

use axum::{middleware, Router};

use crate::auth::authenticate;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 토큰 검증 미들웨어는 여기서 모든 라우트에 적용되며, 공개 경로 여부는
/// [`crate::auth::SecurityChain`]이 판단합니다.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/health", health_router())
        .merge(auth_router())
        .nest("/api/v1/users", users_router())
        .nest("/api/v1/admin", admin_router())
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.authenticator),
            authenticate,
        ))
        .with_state(state)
}
