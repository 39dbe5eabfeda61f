//! 자격 증명 교환 (로그인).
//!
//! 한 요청 안에서 다음 순서로 진행됩니다.
//!
//! 1. 자격 증명 대기: `Authorization: Basic` 헤더가 없으면 거부
//! 2. 검증: [`IdentityVerifier`]로 로그인/비밀번호 확인
//! 3. 인증 완료: Access/Refresh 토큰 쌍 발급
//!
//! 어느 단계에서든 실패하면 [`AuthError::AuthenticationFailed`]로 끝나며
//! 토큰은 하나도 발급되지 않습니다.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::MISSING_BASIC_MESSAGE;
use super::{AuthError, BasicCredentials, IdentityVerifier, TokenCodec, TokenPair};
use crate::metrics::record_login;

/// 로그인 경로.
pub const LOGIN_PATH: &str = "/api/v1/login";

#[derive(Clone)]
pub struct CredentialExchange {
    verifier: Arc<dyn IdentityVerifier>,
    codec: Arc<TokenCodec>,
}

impl CredentialExchange {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, codec: Arc<TokenCodec>) -> Self {
        Self { verifier, codec }
    }

    /// `Authorization` 헤더 값을 토큰 쌍으로 교환합니다.
    pub async fn exchange(&self, authorization: Option<&str>) -> Result<TokenPair, AuthError> {
        let result = self.try_exchange(authorization).await;
        match &result {
            Ok(_) => record_login("success"),
            Err(e) => {
                warn!(code = e.code(), "Login rejected");
                record_login(e.code());
            }
        }
        result
    }

    async fn try_exchange(&self, authorization: Option<&str>) -> Result<TokenPair, AuthError> {
        let header = authorization.ok_or(AuthError::AuthenticationFailed(MISSING_BASIC_MESSAGE))?;
        let credentials = BasicCredentials::from_header(header)?;

        let identity = self.verifier.verify(&credentials).await?;
        let pair = self.codec.issue_token_pair(&identity)?;

        info!(identity_id = %identity.id, username = %identity.username, "Login succeeded");
        Ok(pair)
    }
}
