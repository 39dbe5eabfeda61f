//! 관리자 endpoint.
//!
//! 이 라우터의 모든 경로는 `ADMIN` 역할을 요구합니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::auth::{require_admin, AdminAuth, AuthError};
use crate::error::ErrorResponse;
use crate::routes::users::IdentityResponse;
use crate::state::AppState;

/// ID로 신원 조회.
///
/// GET /api/v1/admin/users/{id}
pub async fn get_identity(
    State(state): State<Arc<AppState>>,
    AdminAuth(ctx): AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Response, AuthError> {
    tracing::debug!(admin = %ctx.identity.username, target_id = %id, "Admin identity lookup");

    match state.lookup.by_id(id).await? {
        Some(identity) => Ok(Json(IdentityResponse::from(&identity)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(StatusCode::NOT_FOUND, "identity not found")),
        )
            .into_response()),
    }
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{id}", get(get_identity))
        .route_layer(middleware::from_fn(require_admin))
}
