//! 인증 및 인가 모듈.
//!
//! RS256 JWT 기반 인증 서브시스템.
//!
//! - [`keys`]: RSA 키 자료 로딩
//! - [`jwt`]: 토큰 발급/검증
//! - [`login`]: Basic 자격 증명 → 토큰 쌍 교환
//! - [`refresh`]: Refresh Token 회전
//! - [`middleware`]: Bearer 토큰 검증 미들웨어
//! - [`context`]: 요청 단위 보안 컨텍스트와 역할 검사

pub mod chain;
pub mod clock;
pub mod context;
pub mod credentials;
pub mod error;
pub mod jwt;
pub mod keys;
pub mod login;
pub mod lookup;
pub mod middleware;
pub mod password;
pub mod refresh;

#[cfg(test)]
pub(crate) mod testing;

pub use chain::{SecurityChain, SecurityStage};
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{require_admin, require_role, AdminAuth, Authenticated, SecurityContext};
pub use credentials::{BasicCredentials, DirectoryIdentityVerifier, IdentityVerifier};
pub use error::AuthError;
pub use jwt::{
    AccessClaims, RefreshClaims, TokenCodec, TokenIssuer, TokenKind, TokenPair, TokenVerifier,
};
pub use keys::{
    load_private_key, load_public_key, KeyError, KeyMaterial, KeyPair, SigningKeys, VerifyingKeys,
};
pub use login::{CredentialExchange, LOGIN_PATH};
pub use lookup::DirectoryLookup;
pub use middleware::{authenticate, bearer_token, TokenAuthenticator};
pub use password::{hash_password, verify_password, PasswordError};
pub use refresh::{RefreshOrchestrator, REFRESH_PATH};
