//! RSA 키 자료 로딩.
//!
//! Access/Refresh 토큰은 서로 다른 RSA 키 쌍으로 서명됩니다.
//! 키 파일은 PEM 형식이거나, 헤더 없이 base64로 인코딩된 DER
//! (개인키: PKCS#8, 공개키: X.509 SubjectPublicKeyInfo)일 수 있습니다.
//!
//! 로딩은 시작 시점에 한 번만 수행되며, 실패하면 서비스는 기동하지 않습니다.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use bankcards_core::JwtConfig;

use super::TokenKind;

/// 키 로딩 에러.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("키 파일 읽기 실패 ({path}): {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("키 파일이 비어 있습니다: {0}")]
    Empty(PathBuf),
    #[error("키 base64 디코딩 실패 ({path}): {source}")]
    Base64 {
        path: PathBuf,
        #[source]
        source: base64::DecodeError,
    },
    #[error("RSA 키 파싱 실패 ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    #[error("{0} 키 쌍의 개인키와 공개키가 일치하지 않습니다")]
    PairMismatch(TokenKind),
    #[error("access 토큰과 refresh 토큰이 같은 키 쌍을 사용합니다")]
    SharedKeyPair,
}

const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// 키 파일을 읽어 DER 바이트로 변환.
///
/// PEM 경계선(`-----BEGIN ...-----`)과 모든 공백을 제거한 뒤 base64 디코딩합니다.
fn read_der(path: &Path) -> Result<Vec<u8>, KeyError> {
    let raw = std::fs::read_to_string(path).map_err(|source| KeyError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let body: String = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with("-----"))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect();

    if body.is_empty() {
        return Err(KeyError::Empty(path.to_path_buf()));
    }

    STANDARD.decode(body.as_bytes()).map_err(|source| KeyError::Base64 {
        path: path.to_path_buf(),
        source,
    })
}

/// DER 바이트를 64자 줄바꿈 PEM 문자열로 감쌉니다.
fn pem_wrap(label: &str, der: &[u8]) -> String {
    let encoded = STANDARD.encode(der);
    let mut pem = format!("-----BEGIN {label}-----\n");
    for chunk in encoded.as_bytes().chunks(64) {
        // base64 출력은 항상 ASCII
        pem.push_str(&String::from_utf8_lossy(chunk));
        pem.push('\n');
    }
    pem.push_str(&format!("-----END {label}-----\n"));
    pem
}

/// PKCS#8 RSA 개인키 로딩.
pub fn load_private_key(path: impl AsRef<Path>) -> Result<EncodingKey, KeyError> {
    let path = path.as_ref();
    let der = read_der(path)?;
    EncodingKey::from_rsa_pem(pem_wrap(PRIVATE_KEY_LABEL, &der).as_bytes()).map_err(|source| {
        KeyError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// X.509 RSA 공개키 로딩.
pub fn load_public_key(path: impl AsRef<Path>) -> Result<DecodingKey, KeyError> {
    load_public_key_der(path.as_ref()).map(|(key, _)| key)
}

fn load_public_key_der(path: &Path) -> Result<(DecodingKey, Vec<u8>), KeyError> {
    let der = read_der(path)?;
    let key = DecodingKey::from_rsa_pem(pem_wrap(PUBLIC_KEY_LABEL, &der).as_bytes()).map_err(
        |source| KeyError::Parse {
            path: path.to_path_buf(),
            source,
        },
    )?;
    Ok((key, der))
}

#[derive(Serialize, Deserialize)]
struct ProbeClaims {
    sub: String,
}

/// 하나의 토큰 종류에 대한 RSA 키 쌍.
#[derive(Clone)]
pub struct KeyPair {
    kind: TokenKind,
    signing: EncodingKey,
    verifying: DecodingKey,
    public_der: Vec<u8>,
}

impl KeyPair {
    /// 키 쌍을 로딩하고 서명/검증 왕복으로 짝이 맞는지 확인합니다.
    pub fn load(
        kind: TokenKind,
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let signing = load_private_key(private_path)?;
        let (verifying, public_der) = load_public_key_der(public_path.as_ref())?;

        let pair = Self {
            kind,
            signing,
            verifying,
            public_der,
        };
        pair.probe()?;
        debug!(kind = %kind, "Key pair probe succeeded");
        Ok(pair)
    }

    fn probe(&self) -> Result<(), KeyError> {
        let claims = ProbeClaims {
            sub: "key-probe".to_string(),
        };
        let token = encode(&Header::new(Algorithm::RS256), &claims, &self.signing)
            .map_err(|_| KeyError::PairMismatch(self.kind))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        decode::<ProbeClaims>(&token, &self.verifying, &validation)
            .map(|_| ())
            .map_err(|_| KeyError::PairMismatch(self.kind))
    }
}

/// 서명용 개인키 묶음.
#[derive(Clone)]
pub struct SigningKeys {
    access: EncodingKey,
    refresh: EncodingKey,
}

impl SigningKeys {
    pub fn for_kind(&self, kind: TokenKind) -> &EncodingKey {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

/// 검증용 공개키 묶음.
///
/// 서명 능력 없이 토큰을 검증해야 하는 컴포넌트는 이 타입만 받습니다.
#[derive(Clone)]
pub struct VerifyingKeys {
    access: DecodingKey,
    refresh: DecodingKey,
}

impl VerifyingKeys {
    /// 공개키 파일만으로 검증용 키 묶음 생성.
    pub fn load(
        access_public: impl AsRef<Path>,
        refresh_public: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let (access, access_der) = load_public_key_der(access_public.as_ref())?;
        let (refresh, refresh_der) = load_public_key_der(refresh_public.as_ref())?;
        if access_der == refresh_der {
            return Err(KeyError::SharedKeyPair);
        }
        Ok(Self { access, refresh })
    }

    pub fn for_kind(&self, kind: TokenKind) -> &DecodingKey {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

/// Access/Refresh 키 쌍 전체.
#[derive(Clone)]
pub struct KeyMaterial {
    access: KeyPair,
    refresh: KeyPair,
}

impl KeyMaterial {
    /// 설정된 경로에서 네 개의 키를 모두 로딩합니다.
    pub fn load(config: &JwtConfig) -> Result<Self, KeyError> {
        let access = KeyPair::load(
            TokenKind::Access,
            &config.access_private,
            &config.access_public,
        )?;
        let refresh = KeyPair::load(
            TokenKind::Refresh,
            &config.refresh_private,
            &config.refresh_public,
        )?;

        if access.public_der == refresh.public_der {
            return Err(KeyError::SharedKeyPair);
        }

        info!(
            access_public = %config.access_public,
            refresh_public = %config.refresh_public,
            "RSA key material loaded"
        );
        Ok(Self { access, refresh })
    }

    pub fn signing_keys(&self) -> SigningKeys {
        SigningKeys {
            access: self.access.signing.clone(),
            refresh: self.refresh.signing.clone(),
        }
    }

    pub fn verifying_keys(&self) -> VerifyingKeys {
        VerifyingKeys {
            access: self.access.verifying.clone(),
            refresh: self.refresh.verifying.clone(),
        }
    }
}
