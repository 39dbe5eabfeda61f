//! 현재 사용자 endpoint.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bankcards_core::Identity;

use crate::auth::Authenticated;
use crate::state::AppState;

/// 신원 응답 (비밀번호 해시 제외).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub active: bool,
    pub blocked: bool,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            roles: identity.role_names(),
            active: identity.active,
            blocked: identity.blocked,
        }
    }
}

/// 인증된 현재 신원.
///
/// GET /api/v1/users/me
pub async fn me(Authenticated(ctx): Authenticated) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(&ctx.identity))
}

pub fn users_router() -> Router<Arc<AppState>> {
    Router::new().route("/me", get(me))
}
