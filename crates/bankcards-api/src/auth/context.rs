//! 요청 단위 보안 컨텍스트와 추출기.
//!
//! 검증 미들웨어가 유효한 Access Token을 확인하면 [`SecurityContext`]를
//! 요청 extensions에 넣습니다. 핸들러는 [`Authenticated`] 추출기로 이를 꺼냅니다.
//! 컨텍스트는 요청과 함께 사라지며 요청 간에 공유되지 않습니다.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use bankcards_core::{Identity, Role};

use super::AuthError;

/// 인증된 요청의 보안 정보.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    /// 디렉토리에서 읽은 현재 신원
    pub identity: Identity,
    /// 요청에 사용된 Access Token의 `jti`
    pub token_id: String,
    /// Access Token 만료 시각
    pub expires_at: DateTime<Utc>,
}

impl SecurityContext {
    pub fn has_role(&self, role: Role) -> bool {
        self.identity.has_role(role)
    }
}

/// 인증 필수 추출기.
///
/// ```rust,ignore
/// async fn me(Authenticated(ctx): Authenticated) -> impl IntoResponse {
///     ctx.identity.username
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticated(pub SecurityContext);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .map(Authenticated)
            .ok_or(AuthError::Unauthorized)
    }
}

/// `ADMIN` 역할을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub SecurityContext);

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Authenticated(ctx) = Authenticated::from_request_parts(parts, state).await?;
        require_role(Role::Admin, Some(&ctx))?;
        Ok(AdminAuth(ctx))
    }
}

/// 역할 검사.
///
/// 컨텍스트가 없으면 [`AuthError::Unauthorized`], 역할이 없으면 [`AuthError::Forbidden`].
pub fn require_role(required: Role, context: Option<&SecurityContext>) -> Result<(), AuthError> {
    match context {
        None => Err(AuthError::Unauthorized),
        Some(ctx) if ctx.has_role(required) => Ok(()),
        Some(_) => Err(AuthError::Forbidden),
    }
}

/// `ADMIN` 역할을 요구하는 라우트 레이어.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AuthError> {
    require_role(Role::Admin, request.extensions().get::<SecurityContext>())?;
    Ok(next.run(request).await)
}
