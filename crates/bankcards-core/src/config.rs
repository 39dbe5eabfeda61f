//! 설정 관리.
//!
//! 기본값, TOML 파일, 환경 변수(`BANKCARDS__` 접두사) 순서로 설정을 병합합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "BANKCARDS";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 밀리초 → 분 변환 단위.
const MILLIS_PER_MINUTE: i64 = 60_000;

/// 설정 에러.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("설정 로드 실패: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("잘못된 JWT 설정: {0}")]
    InvalidJwt(String),
}

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// JWT 발급/검증 설정
    pub jwt: JwtConfig,
    /// 신원 디렉토리 접근 설정
    pub directory: DirectoryConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 전역 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// JWT 설정.
///
/// 키 경로는 base64 본문(PKCS#8 개인키 / X.509 공개키) 또는 PEM 파일을 가리킵니다.
/// 토큰 수명은 밀리초 단위입니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Access Token 서명용 개인키 경로
    pub access_private: String,
    /// Access Token 검증용 공개키 경로
    pub access_public: String,
    /// Refresh Token 서명용 개인키 경로
    pub refresh_private: String,
    /// Refresh Token 검증용 공개키 경로
    pub refresh_public: String,
    /// Access Token 수명 (밀리초)
    pub access_token_lifetime: i64,
    /// Refresh Token 수명 (밀리초)
    pub refresh_token_lifetime: i64,
    /// `iss` 클레임
    pub issuer: String,
    /// `aud` 클레임
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_private: "keys/access_private.key".to_string(),
            access_public: "keys/access_public.key".to_string(),
            refresh_private: "keys/refresh_private.key".to_string(),
            refresh_public: "keys/refresh_public.key".to_string(),
            access_token_lifetime: 900_000,
            refresh_token_lifetime: 604_800_000,
            issuer: "bankcards".to_string(),
            audience: "bankcards-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// 설정 불변식 검증.
    ///
    /// Access Token 수명은 Refresh Token 수명보다 엄격히 짧아야 합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_lifetime <= 0 || self.refresh_token_lifetime <= 0 {
            return Err(ConfigError::InvalidJwt(
                "토큰 수명은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.access_token_lifetime >= self.refresh_token_lifetime {
            return Err(ConfigError::InvalidJwt(format!(
                "access_token_lifetime({})은 refresh_token_lifetime({})보다 짧아야 합니다",
                self.access_token_lifetime, self.refresh_token_lifetime
            )));
        }
        if self.issuer.trim().is_empty() || self.audience.trim().is_empty() {
            return Err(ConfigError::InvalidJwt(
                "issuer와 audience는 비어 있을 수 없습니다".to_string(),
            ));
        }
        Ok(())
    }

    /// 밀리초 수명을 분 단위로 변환 (정수 나눗셈).
    pub fn lifetime_minutes(millis: i64) -> i64 {
        millis / MILLIS_PER_MINUTE
    }

    /// Access Token 수명 (분).
    pub fn access_lifetime_minutes(&self) -> i64 {
        Self::lifetime_minutes(self.access_token_lifetime)
    }

    /// Refresh Token 수명 (분).
    pub fn refresh_lifetime_minutes(&self) -> i64 {
        Self::lifetime_minutes(self.refresh_token_lifetime)
    }
}

/// 신원 디렉토리 접근 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// 디렉토리 조회 타임아웃 (밀리초)
    pub timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self { timeout_ms: 2_000 }
    }
}

impl DirectoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = ::config::Config::builder()
            // 파일에서 로드 (선택)
            .add_source(::config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.jwt.validate()?;
        Ok(config)
    }

    /// 기본 경로(`BANKCARDS_CONFIG` 또는 `config/default.toml`)에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path =
            std::env::var("BANKCARDS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }
}
