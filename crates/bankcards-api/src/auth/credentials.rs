//! Basic 자격 증명 파싱과 신원 검증.

use std::fmt;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use bankcards_core::Identity;

use super::error::{BAD_CREDENTIALS_MESSAGE, DISABLED_ACCOUNT_MESSAGE, MALFORMED_BASIC_MESSAGE};
use super::password::{verify_password, PasswordError};
use super::{AuthError, DirectoryLookup};

const BASIC_PREFIX: &str = "Basic ";

/// 존재하지 않는 로그인에 대해 검증할 Argon2id 해시 (기본 파라미터).
///
/// 없는 계정도 같은 해시 비용을 치르게 해서 응답 시간으로 계정 존재를 알 수 없게 합니다.
const DECOY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$010Q1KKOBqdLcodEz7TQkg$Q/7qGQBRo8jTmA0G8UQF1xmpfew0B1WVNoI5cdRCasQ";

/// `Authorization: Basic ...` 헤더에서 추출한 로그인/비밀번호.
///
/// 비밀번호는 [`SecretString`]으로 보관되어 로그에 노출되지 않습니다.
pub struct BasicCredentials {
    /// 사용자 이름 또는 이메일
    pub login: String,
    pub password: SecretString,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl BasicCredentials {
    /// 헤더 값 파싱.
    ///
    /// 디코딩된 문자열을 첫 번째 `:`에서 나누므로 비밀번호에는 `:`가 들어갈 수 있습니다.
    pub fn from_header(value: &str) -> Result<Self, AuthError> {
        let malformed = AuthError::AuthenticationFailed(MALFORMED_BASIC_MESSAGE);

        let encoded = value
            .strip_prefix(BASIC_PREFIX)
            .ok_or_else(|| malformed.clone())?
            .trim();
        let decoded = STANDARD.decode(encoded).map_err(|_| malformed.clone())?;
        let decoded = String::from_utf8(decoded).map_err(|_| malformed.clone())?;

        let (login, password) = decoded.split_once(':').ok_or_else(|| malformed.clone())?;
        if login.is_empty() {
            return Err(malformed);
        }

        Ok(Self {
            login: login.to_string(),
            password: SecretString::from(password.to_string()),
        })
    }
}

/// 자격 증명을 신원으로 바꾸는 검증기.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credentials: &BasicCredentials) -> Result<Identity, AuthError>;
}

/// 디렉토리 + Argon2 해시 기반 검증기.
///
/// 로그인 문자열을 사용자 이름으로, 없으면 이메일로 조회합니다.
/// 비활성/차단 신원은 비밀번호가 맞아도 거부합니다.
#[derive(Clone)]
pub struct DirectoryIdentityVerifier {
    lookup: DirectoryLookup,
}

impl DirectoryIdentityVerifier {
    pub fn new(lookup: DirectoryLookup) -> Self {
        Self { lookup }
    }

    /// Argon2 검증은 CPU 집약적이므로 블로킹 스레드에서 실행
    async fn check_password(
        password: &SecretString,
        hash: String,
    ) -> Result<Result<(), PasswordError>, AuthError> {
        let password = SecretString::from(password.expose_secret().to_owned());
        tokio::task::spawn_blocking(move || verify_password(password.expose_secret(), &hash))
            .await
            .map_err(|e| {
                warn!(error = %e, "Password verification task failed");
                AuthError::Internal
            })
    }
}

#[async_trait]
impl IdentityVerifier for DirectoryIdentityVerifier {
    async fn verify(&self, credentials: &BasicCredentials) -> Result<Identity, AuthError> {
        let bad_credentials = AuthError::AuthenticationFailed(BAD_CREDENTIALS_MESSAGE);

        let Some(identity) = self.lookup.by_login(&credentials.login).await? else {
            Self::check_password(&credentials.password, DECOY_PASSWORD_HASH.to_string()).await?;
            debug!(login = %credentials.login, "Login for unknown identity");
            return Err(bad_credentials);
        };

        let outcome =
            Self::check_password(&credentials.password, identity.password_hash.clone()).await?;

        match outcome {
            Ok(()) => {}
            Err(PasswordError::InvalidHashFormat) => {
                warn!(identity_id = %identity.id, "Stored password hash is malformed");
                return Err(bad_credentials);
            }
            Err(_) => {
                debug!(identity_id = %identity.id, "Password mismatch");
                return Err(bad_credentials);
            }
        }

        if !identity.is_enabled() {
            warn!(
                identity_id = %identity.id,
                active = identity.active,
                blocked = identity.blocked,
                "Login rejected for disabled identity"
            );
            return Err(AuthError::AuthenticationFailed(DISABLED_ACCOUNT_MESSAGE));
        }

        Ok(identity)
    }
}
