//! 토큰 갱신 오케스트레이션.
//!
//! 유효한 Refresh Token을 새 Access/Refresh 토큰 쌍으로 교환합니다 (회전).
//! 이전 Refresh Token은 만료 전까지 계속 유효합니다. 폐기 목록은 두지 않습니다.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::{AuthError, DirectoryLookup, TokenCodec, TokenKind, TokenPair};
use crate::metrics::record_refresh;

/// 갱신 경로.
pub const REFRESH_PATH: &str = "/api/v1/auth/refresh";

#[derive(Clone)]
pub struct RefreshOrchestrator {
    codec: Arc<TokenCodec>,
    lookup: DirectoryLookup,
}

impl RefreshOrchestrator {
    pub fn new(codec: Arc<TokenCodec>, lookup: DirectoryLookup) -> Self {
        Self { codec, lookup }
    }

    /// Refresh Token을 새 토큰 쌍으로 교환합니다.
    ///
    /// 새 토큰의 역할과 이메일은 토큰이 아니라 디렉토리의 현재 값에서 가져옵니다.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenPair, AuthError> {
        let result = self.try_refresh(refresh_token).await;
        match &result {
            Ok(_) => record_refresh("success"),
            Err(e) => record_refresh(e.code()),
        }
        result
    }

    async fn try_refresh(&self, refresh_token: Option<&str>) -> Result<TokenPair, AuthError> {
        let token = refresh_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::TokenInvalid(TokenKind::Refresh))?;

        let claims = self.codec.verify_refresh_token(token)?;

        let Some(identity) = self.lookup.by_id(claims.user_id).await? else {
            warn!(identity_id = %claims.user_id, "Refresh for identity no longer in directory");
            return Err(AuthError::IdentityNotFound);
        };

        if identity.id != claims.user_id {
            error!(
                token_identity = %claims.user_id,
                directory_identity = %identity.id,
                "Directory returned a different identity for refresh"
            );
            return Err(AuthError::IdentityMismatch);
        }

        if !identity.is_enabled() {
            warn!(identity_id = %identity.id, "Refresh rejected for disabled identity");
            return Err(AuthError::TokenInvalid(TokenKind::Refresh));
        }

        let pair = self.codec.issue_token_pair(&identity)?;
        info!(identity_id = %identity.id, "Token pair rotated");
        Ok(pair)
    }
}
