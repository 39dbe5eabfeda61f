//! JWT 토큰 처리.
//!
//! Access Token 및 Refresh Token 발급/검증 로직.
//!
//! - 발급은 [`TokenIssuer`]가 개인키([`SigningKeys`])로 수행합니다.
//! - 검증은 [`TokenVerifier`]가 공개키([`VerifyingKeys`])만으로 수행합니다.
//! - [`TokenCodec`]은 둘을 묶은 파사드입니다.
//!
//! 만료 판정은 주입된 [`Clock`] 기준이며 허용 오차(leeway)는 없습니다.
//! `exp`는 밀리초 정밀도를 잃지 않도록 소수 NumericDate(RFC 7519 §2)로 기록합니다.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use bankcards_core::{Identity, JwtConfig};

use super::{AuthError, Clock, KeyMaterial, SigningKeys, VerifyingKeys};
use crate::metrics::record_token_verification;

/// 토큰 종류 (`tokenType` 클레임).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 밀리초 값을 NumericDate(초, 소수 허용)로 직렬화.
///
/// 초 단위로 떨어지면 정수로 기록합니다.
mod numeric_date_ms {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(millis: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        if millis % 1000 == 0 {
            serializer.serialize_i64(millis / 1000)
        } else {
            serializer.serialize_f64(*millis as f64 / 1000.0)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        if !seconds.is_finite() {
            return Err(serde::de::Error::custom("exp is not a finite number"));
        }
        Ok((seconds * 1000.0).round() as i64)
    }
}

/// Access Token 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Subject - 사용자 이름
    pub sub: String,
    /// 신원 ID
    pub user_id: Uuid,
    pub email: String,
    /// 항상 [`TokenKind::Access`]
    pub token_type: TokenKind,
    /// 권한 문자열 목록 (`USER`, `ADMIN`)
    pub roles: Vec<String>,
    /// Issued At (Unix timestamp, 초)
    pub iat: i64,
    /// Expiration (Unix timestamp, 밀리초). 토큰에는 `exp` 초 단위로 기록됩니다.
    #[serde(rename = "exp", with = "numeric_date_ms")]
    pub exp_ms: i64,
    /// JWT ID
    pub jti: String,
}

/// Refresh Token 페이로드.
///
/// 역할과 이메일은 담지 않습니다. 갱신 시 디렉토리에서 다시 읽습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClaims {
    pub iss: String,
    pub aud: String,
    /// Subject - 사용자 이름
    pub sub: String,
    pub user_id: Uuid,
    /// 항상 [`TokenKind::Refresh`]
    pub token_type: TokenKind,
    pub iat: i64,
    #[serde(rename = "exp", with = "numeric_date_ms")]
    pub exp_ms: i64,
    pub jti: String,
}

/// 검증 로직이 공통으로 읽는 클레임 필드.
trait TimedClaims: DeserializeOwned {
    fn token_type(&self) -> TokenKind;
    fn issued_at(&self) -> i64;
    fn expires_at_ms(&self) -> i64;
}

impl TimedClaims for AccessClaims {
    fn token_type(&self) -> TokenKind {
        self.token_type
    }
    fn issued_at(&self) -> i64 {
        self.iat
    }
    fn expires_at_ms(&self) -> i64 {
        self.exp_ms
    }
}

impl TimedClaims for RefreshClaims {
    fn token_type(&self) -> TokenKind {
        self.token_type
    }
    fn issued_at(&self) -> i64 {
        self.iat
    }
    fn expires_at_ms(&self) -> i64 {
        self.exp_ms
    }
}

impl AccessClaims {
    /// 만료 시각.
    pub fn expiry(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.exp_ms).unwrap_or_default()
    }
}

/// 로그인/갱신 응답 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access Token 수명 (분)
    pub access_token_lifetime_minutes: i64,
    /// Refresh Token 수명 (분)
    pub refresh_token_lifetime_minutes: i64,
}

/// 토큰 발급기.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: SigningKeys,
    issuer: String,
    audience: String,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig, keys: SigningKeys, clock: Arc<dyn Clock>) -> Self {
        Self {
            keys,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_lifetime: Duration::milliseconds(config.access_token_lifetime),
            refresh_lifetime: Duration::milliseconds(config.refresh_token_lifetime),
            clock,
        }
    }

    /// `(iat 초, exp 밀리초)` 계산.
    fn window(&self, lifetime: Duration) -> (i64, i64) {
        let now = self.clock.now();
        (now.timestamp(), (now + lifetime).timestamp_millis())
    }

    fn sign<T: Serialize>(&self, kind: TokenKind, claims: &T) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::RS256), claims, self.keys.for_kind(kind)).map_err(|e| {
            error!(kind = %kind, error = %e, "Token signing failed");
            AuthError::Internal
        })
    }

    /// Access Token 발급.
    pub fn issue_access_token(&self, identity: &Identity) -> Result<String, AuthError> {
        let (iat, exp_ms) = self.window(self.access_lifetime);
        let claims = AccessClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: identity.username.clone(),
            user_id: identity.id,
            email: identity.email.clone(),
            token_type: TokenKind::Access,
            roles: identity.role_names(),
            iat,
            exp_ms,
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(TokenKind::Access, &claims)
    }

    /// Refresh Token 발급.
    pub fn issue_refresh_token(&self, identity: &Identity) -> Result<String, AuthError> {
        let (iat, exp_ms) = self.window(self.refresh_lifetime);
        let claims = RefreshClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: identity.username.clone(),
            user_id: identity.id,
            token_type: TokenKind::Refresh,
            iat,
            exp_ms,
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(TokenKind::Refresh, &claims)
    }
}

/// 검증 실패 내부 분류.
#[derive(Debug)]
enum Rejection {
    Expired,
    Invalid(String),
}

/// 토큰 검증기.
///
/// 공개키만 보유하므로 토큰을 만들 수 없습니다.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: VerifyingKeys,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    pub fn new(config: &JwtConfig, keys: VerifyingKeys, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        // 소수 exp는 jsonwebtoken이 읽지 못하므로 존재 여부와 만료는 직접 판정
        validation.set_required_spec_claims(&["iss", "aud", "sub"]);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys,
            validation,
            clock,
        }
    }

    fn check<C: TimedClaims>(&self, token: &str, kind: TokenKind) -> Result<C, Rejection> {
        let data = decode::<C>(token, self.keys.for_kind(kind), &self.validation)
            .map_err(|e| Rejection::Invalid(e.to_string()))?;
        let claims = data.claims;

        if claims.token_type() != kind {
            return Err(Rejection::Invalid(format!(
                "unexpected token type {}",
                claims.token_type()
            )));
        }
        if claims.expires_at_ms() <= claims.issued_at().saturating_mul(1000) {
            return Err(Rejection::Invalid("exp is not after iat".to_string()));
        }
        if self.clock.now().timestamp_millis() > claims.expires_at_ms() {
            return Err(Rejection::Expired);
        }
        Ok(claims)
    }

    /// Access Token 검증.
    ///
    /// 만료는 [`AuthError::TokenExpired`], 그 외 모든 실패는
    /// [`AuthError::TokenInvalid`]로 구분됩니다.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        match self.check::<AccessClaims>(token, TokenKind::Access) {
            Ok(claims) => {
                record_token_verification(TokenKind::Access, "valid");
                Ok(claims)
            }
            Err(Rejection::Expired) => {
                debug!("Access token expired");
                record_token_verification(TokenKind::Access, "expired");
                Err(AuthError::TokenExpired)
            }
            Err(Rejection::Invalid(reason)) => {
                warn!(reason = %reason, "Access token rejected");
                record_token_verification(TokenKind::Access, "invalid");
                Err(AuthError::TokenInvalid(TokenKind::Access))
            }
        }
    }

    /// Refresh Token 검증.
    ///
    /// 만료를 포함한 모든 실패가 [`AuthError::TokenInvalid`]로 합쳐집니다.
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        match self.check::<RefreshClaims>(token, TokenKind::Refresh) {
            Ok(claims) => {
                record_token_verification(TokenKind::Refresh, "valid");
                Ok(claims)
            }
            Err(rejection) => {
                let reason = match rejection {
                    Rejection::Expired => "expired".to_string(),
                    Rejection::Invalid(reason) => reason,
                };
                warn!(reason = %reason, "Refresh token rejected");
                record_token_verification(TokenKind::Refresh, "invalid");
                Err(AuthError::TokenInvalid(TokenKind::Refresh))
            }
        }
    }

    /// 유효한 Access Token의 사용자 이름(`sub`).
    pub fn extract_username(&self, access_token: &str) -> Result<String, AuthError> {
        self.verify_access_token(access_token).map(|claims| claims.sub)
    }

    /// 유효한 Refresh Token의 신원 ID(`userId`).
    pub fn extract_identity_id(&self, refresh_token: &str) -> Result<Uuid, AuthError> {
        self.verify_refresh_token(refresh_token)
            .map(|claims| claims.user_id)
    }
}

/// 발급기 + 검증기 파사드.
#[derive(Clone)]
pub struct TokenCodec {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    access_lifetime_minutes: i64,
    refresh_lifetime_minutes: i64,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig, keys: &KeyMaterial, clock: Arc<dyn Clock>) -> Self {
        Self {
            issuer: TokenIssuer::new(config, keys.signing_keys(), Arc::clone(&clock)),
            verifier: TokenVerifier::new(config, keys.verifying_keys(), clock),
            access_lifetime_minutes: config.access_lifetime_minutes(),
            refresh_lifetime_minutes: config.refresh_lifetime_minutes(),
        }
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn issue_access_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issuer.issue_access_token(identity)
    }

    pub fn issue_refresh_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issuer.issue_refresh_token(identity)
    }

    /// Access/Refresh 토큰 쌍 발급.
    ///
    /// 두 토큰이 모두 서명된 경우에만 결과를 반환합니다.
    pub fn issue_token_pair(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        let access_token = self.issue_access_token(identity)?;
        let refresh_token = self.issue_refresh_token(identity)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            access_token_lifetime_minutes: self.access_lifetime_minutes,
            refresh_token_lifetime_minutes: self.refresh_lifetime_minutes,
        })
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        self.verifier.verify_access_token(token)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        self.verifier.verify_refresh_token(token)
    }

    pub fn extract_username(&self, access_token: &str) -> Result<String, AuthError> {
        self.verifier.extract_username(access_token)
    }

    pub fn extract_identity_id(&self, refresh_token: &str) -> Result<Uuid, AuthError> {
        self.verifier.extract_identity_id(refresh_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::{fixed_start, fixture_jwt_config, fixture_path, test_codec};
    use bankcards_core::Role;

    fn alice() -> Identity {
        Identity::new("alice", "alice@example.com", "h").with_roles([Role::User, Role::Admin])
    }

    #[test]
    fn test_access_token_round_trip() {
        let (codec, _clock) = test_codec();
        let identity = alice();

        let token = codec.issue_access_token(&identity).unwrap();
        let claims = codec.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_id, identity.id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.token_type, TokenKind::Access);
        assert_eq!(claims.roles, vec!["USER".to_string(), "ADMIN".to_string()]);
        assert_eq!(claims.iss, "bankcards");
        assert_eq!(claims.aud, "bankcards-api");
        assert_eq!(claims.iat, fixed_start().timestamp());
        assert_eq!(claims.exp_ms, (claims.iat + 900) * 1000);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let (codec, _clock) = test_codec();
        let identity = alice();

        let token = codec.issue_refresh_token(&identity).unwrap();
        let claims = codec.verify_refresh_token(&token).unwrap();
        assert_eq!(claims.user_id, identity.id);
        assert_eq!(claims.token_type, TokenKind::Refresh);
        assert_eq!(claims.exp_ms - claims.iat * 1000, 604_800_000);

        assert_eq!(codec.extract_identity_id(&token).unwrap(), identity.id);
    }

    #[test]
    fn test_extract_username() {
        let (codec, _clock) = test_codec();
        let token = codec.issue_access_token(&alice()).unwrap();
        assert_eq!(codec.extract_username(&token).unwrap(), "alice");
    }

    #[test]
    fn test_jti_unique_per_issue() {
        let (codec, _clock) = test_codec();
        let identity = alice();
        let first = codec.verify_access_token(&codec.issue_access_token(&identity).unwrap());
        let second = codec.verify_access_token(&codec.issue_access_token(&identity).unwrap());
        assert_ne!(first.unwrap().jti, second.unwrap().jti);
    }

    #[test]
    fn test_access_expiry_boundary() {
        let (codec, clock) = test_codec();
        let token = codec.issue_access_token(&alice()).unwrap();

        clock.advance(Duration::milliseconds(899_999));
        assert!(codec.verify_access_token(&token).is_ok());

        // exp 시각 정각까지는 유효
        clock.set(fixed_start() + Duration::milliseconds(900_000));
        assert!(codec.verify_access_token(&token).is_ok());

        clock.set(fixed_start() + Duration::milliseconds(900_001));
        assert_eq!(
            codec.verify_access_token(&token).unwrap_err(),
            AuthError::TokenExpired
        );
    }

    #[test]
    fn test_access_expiry_boundary_mid_second() {
        let (codec, clock) = test_codec();
        let issued = fixed_start() + Duration::milliseconds(500);
        clock.set(issued);
        let token = codec.issue_access_token(&alice()).unwrap();

        clock.set(issued + Duration::milliseconds(899_999));
        assert!(codec.verify_access_token(&token).is_ok());

        clock.set(issued + Duration::milliseconds(900_000));
        assert!(codec.verify_access_token(&token).is_ok());

        clock.set(issued + Duration::milliseconds(900_001));
        assert_eq!(
            codec.verify_access_token(&token).unwrap_err(),
            AuthError::TokenExpired
        );
    }

    #[test]
    fn test_exp_wire_format() {
        let (codec, clock) = test_codec();
        let payload = |token: &str| -> serde_json::Value {
            use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
            let segment = token.split('.').nth(1).unwrap();
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
        };

        let whole = codec.issue_access_token(&alice()).unwrap();
        assert_eq!(payload(&whole)["exp"], 1_760_000_900i64);

        clock.set(fixed_start() + Duration::milliseconds(250));
        let fractional = codec.issue_access_token(&alice()).unwrap();
        assert_eq!(payload(&fractional)["exp"].as_f64(), Some(1_760_000_900.25));
        assert_eq!(
            codec.verify_access_token(&fractional).unwrap().exp_ms,
            1_760_000_900_250
        );
    }

    #[test]
    fn test_missing_exp_rejected() {
        #[derive(Serialize)]
        struct NoExpiry<'a> {
            iss: &'a str,
            aud: &'a str,
            sub: &'a str,
        }

        let (codec, _clock) = test_codec();
        let keys = KeyMaterial::load(&fixture_jwt_config()).unwrap().signing_keys();
        let token = encode(
            &Header::new(Algorithm::RS256),
            &NoExpiry {
                iss: "bankcards",
                aud: "bankcards-api",
                sub: "alice",
            },
            keys.for_kind(TokenKind::Access),
        )
        .unwrap();

        assert_eq!(
            codec.verify_access_token(&token).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Access)
        );
    }

    #[test]
    fn test_expired_refresh_collapses_to_invalid() {
        let (codec, clock) = test_codec();
        let token = codec.issue_refresh_token(&alice()).unwrap();

        clock.advance(Duration::milliseconds(604_800_001));
        assert_eq!(
            codec.verify_refresh_token(&token).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Refresh)
        );
    }

    #[test]
    fn test_token_kinds_not_interchangeable() {
        let (codec, _clock) = test_codec();
        let identity = alice();
        let access = codec.issue_access_token(&identity).unwrap();
        let refresh = codec.issue_refresh_token(&identity).unwrap();

        assert_eq!(
            codec.verify_access_token(&refresh).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Access)
        );
        assert_eq!(
            codec.verify_refresh_token(&access).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Refresh)
        );
    }

    #[test]
    fn test_claims_signed_with_other_kind_key_rejected() {
        let (codec, _clock) = test_codec();
        let identity = alice();
        let signing = KeyMaterial::load(&fixture_jwt_config()).unwrap().signing_keys();

        // tokenType은 맞지만 서명 키가 다른 종류의 것
        let mut access = codec
            .verify_access_token(&codec.issue_access_token(&identity).unwrap())
            .unwrap();
        access.jti = Uuid::new_v4().to_string();
        let forged_access = encode(
            &Header::new(Algorithm::RS256),
            &access,
            signing.for_kind(TokenKind::Refresh),
        )
        .unwrap();
        assert_eq!(
            codec.verify_access_token(&forged_access).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Access)
        );

        let refresh = codec
            .verify_refresh_token(&codec.issue_refresh_token(&identity).unwrap())
            .unwrap();
        let forged_refresh = encode(
            &Header::new(Algorithm::RS256),
            &refresh,
            signing.for_kind(TokenKind::Access),
        )
        .unwrap();
        assert_eq!(
            codec.verify_refresh_token(&forged_refresh).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Refresh)
        );
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let (codec, _clock) = test_codec();
        let token = codec.issue_access_token(&alice()).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut bytes = signature.as_bytes().to_vec();
        bytes[0] = if bytes[0] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{}.{}", head, String::from_utf8(bytes).unwrap());

        assert_eq!(
            codec.verify_access_token(&tampered).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Access)
        );
    }

    #[test]
    fn test_garbage_rejected() {
        let (codec, _clock) = test_codec();
        for token in ["", "abc", "a.b.c", "Bearer x.y.z"] {
            assert_eq!(
                codec.verify_access_token(token).unwrap_err(),
                AuthError::TokenInvalid(TokenKind::Access)
            );
            assert_eq!(
                codec.verify_refresh_token(token).unwrap_err(),
                AuthError::TokenInvalid(TokenKind::Refresh)
            );
        }
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let (codec, clock) = test_codec();
        let mut other = fixture_jwt_config();
        other.issuer = "someone-else".to_string();
        let keys = KeyMaterial::load(&other).unwrap();
        let foreign = TokenCodec::new(&other, &keys, Arc::new(clock));

        let token = foreign.issue_access_token(&alice()).unwrap();
        assert_eq!(
            codec.verify_access_token(&token).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Access)
        );
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let (codec, clock) = test_codec();
        let mut other = fixture_jwt_config();
        other.audience = "another-api".to_string();
        let keys = KeyMaterial::load(&other).unwrap();
        let foreign = TokenCodec::new(&other, &keys, Arc::new(clock));

        let token = foreign.issue_refresh_token(&alice()).unwrap();
        assert!(codec.verify_refresh_token(&token).is_err());
    }

    #[test]
    fn test_foreign_public_key_rejects() {
        let (codec, clock) = test_codec();
        let config = fixture_jwt_config();
        let keys = VerifyingKeys::load(
            fixture_path("foreign_public.pem"),
            fixture_path("refresh_public.key"),
        )
        .unwrap();
        let verifier = TokenVerifier::new(&config, keys, Arc::new(clock));

        let token = codec.issue_access_token(&alice()).unwrap();
        assert_eq!(
            verifier.verify_access_token(&token).unwrap_err(),
            AuthError::TokenInvalid(TokenKind::Access)
        );
    }

    #[test]
    fn test_issue_token_pair_lifetimes() {
        let (codec, _clock) = test_codec();
        let pair = codec.issue_token_pair(&alice()).unwrap();
        assert_eq!(pair.access_token_lifetime_minutes, 15);
        assert_eq!(pair.refresh_token_lifetime_minutes, 10_080);
        assert_ne!(pair.access_token, pair.refresh_token);

        let json = serde_json::to_value(&pair).unwrap();
        assert!(json.get("accessToken").is_some());
        assert!(json.get("refreshTokenLifetimeMinutes").is_some());
    }

    #[test]
    fn test_claims_wire_names() {
        let (codec, _clock) = test_codec();
        let token = codec.issue_access_token(&alice()).unwrap();
        let payload = token.split('.').nth(1).unwrap();

        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
        let json: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(json["tokenType"], "access");
        assert!(json["userId"].is_string());
        assert!(json["roles"].is_array());
    }
}
