//! Axum용 토큰 검증 미들웨어.
//!
//! `Authorization: Bearer <token>` 헤더의 Access Token을 검증하고, 성공하면
//! [`SecurityContext`]를 요청 extensions에 넣습니다.
//!
//! - 공개 경로는 검사하지 않고 통과시킵니다.
//! - Bearer 헤더가 없으면 컨텍스트 없이 통과시킵니다 (인가 단계에서 401).
//! - 헤더가 있는데 검증에 실패하면 핸들러를 호출하지 않고 바로 응답합니다.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use super::{AuthError, DirectoryLookup, SecurityChain, SecurityContext, TokenKind, TokenVerifier};

const BEARER_PREFIX: &str = "Bearer ";

/// `Authorization` 헤더에서 Bearer 토큰 추출.
///
/// 헤더가 없거나 Bearer 방식이 아니면 `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
}

/// Access Token → 보안 컨텍스트 변환기.
#[derive(Clone)]
pub struct TokenAuthenticator {
    verifier: TokenVerifier,
    lookup: DirectoryLookup,
    chain: SecurityChain,
}

impl TokenAuthenticator {
    pub fn new(verifier: TokenVerifier, lookup: DirectoryLookup, chain: SecurityChain) -> Self {
        Self {
            verifier,
            lookup,
            chain,
        }
    }

    pub fn chain(&self) -> &SecurityChain {
        &self.chain
    }

    /// 토큰을 검증하고 디렉토리에서 현재 신원을 읽어 컨텍스트를 만듭니다.
    pub async fn authenticate(&self, token: &str) -> Result<SecurityContext, AuthError> {
        let claims = self.verifier.verify_access_token(token)?;

        let Some(identity) = self.lookup.by_username(&claims.sub).await? else {
            warn!(username = %claims.sub, "Access token subject not found in directory");
            return Err(AuthError::Unauthorized);
        };

        // 같은 이름으로 다시 만들어진 신원에는 이전 토큰을 적용하지 않음
        if identity.id != claims.user_id {
            warn!(
                token_identity = %claims.user_id,
                directory_identity = %identity.id,
                "Access token identity does not match directory"
            );
            return Err(AuthError::TokenInvalid(TokenKind::Access));
        }

        if !identity.is_enabled() {
            warn!(identity_id = %identity.id, "Access token presented by disabled identity");
            return Err(AuthError::Unauthorized);
        }

        Ok(SecurityContext {
            expires_at: claims.expiry(),
            token_id: claims.jti,
            identity,
        })
    }
}

/// 토큰 검증 미들웨어.
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/v1/users/me", get(me))
///     .layer(middleware::from_fn_with_state(authenticator, authenticate));
/// ```
pub async fn authenticate(
    State(authenticator): State<Arc<TokenAuthenticator>>,
    mut request: Request,
    next: Next,
) -> Response {
    if authenticator
        .chain()
        .is_public(request.method(), request.uri().path())
    {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        return next.run(request).await;
    };

    match authenticator.authenticate(&token).await {
        Ok(context) => {
            debug!(
                identity_id = %context.identity.id,
                path = %request.uri().path(),
                "Request authenticated"
            );
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(e) => {
            debug!(code = e.code(), path = %request.uri().path(), "Request authentication failed");
            e.into_response()
        }
    }
}
