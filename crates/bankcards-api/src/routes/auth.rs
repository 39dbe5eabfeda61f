//! 로그인 및 토큰 갱신 endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::warn;

use crate::auth::{AuthError, TokenPair, LOGIN_PATH, REFRESH_PATH};
use crate::state::AppState;

/// 갱신 요청 쿼리 파라미터.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// 로그인.
///
/// POST /api/v1/login (`Authorization: Basic base64(login:password)`)
///
/// 성공하면 토큰 쌍을 본문으로, Access Token을 `Authorization: Bearer` 응답 헤더로 반환합니다.
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthError> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let pair = state.exchange.exchange(authorization).await?;

    let bearer = HeaderValue::from_str(&format!("Bearer {}", pair.access_token))
        .map_err(|_| AuthError::Internal)?;
    Ok(([(AUTHORIZATION, bearer)], Json(pair)))
}

/// 토큰 갱신.
///
/// POST /api/v1/auth/refresh?refreshToken=...
///
/// 쿼리를 해석할 수 없으면 토큰이 없는 것과 같이 처리합니다.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RefreshQuery>, QueryRejection>,
) -> Result<Json<TokenPair>, AuthError> {
    let refresh_token = match query {
        Ok(Query(query)) => query.refresh_token,
        Err(rejection) => {
            warn!(error = %rejection, "Malformed refresh query");
            None
        }
    };

    state
        .refresher
        .refresh(refresh_token.as_deref())
        .await
        .map(Json)
}

/// 인증 라우터 생성 (경로는 절대 경로로 등록).
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(LOGIN_PATH, post(login))
        .route(REFRESH_PATH, post(refresh))
}
