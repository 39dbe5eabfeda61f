//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//! 상태는 시작 시 한 번 만들어지며 이후 변경되지 않습니다.

use std::sync::Arc;

use tracing::warn;

use bankcards_core::{AppConfig, IdentityDirectory};

use crate::auth::{
    Clock, CredentialExchange, DirectoryIdentityVerifier, DirectoryLookup, KeyError, KeyMaterial,
    RefreshOrchestrator, SecurityChain, SystemClock, TokenAuthenticator, TokenCodec,
};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 로드된 설정
    pub config: Arc<AppConfig>,

    /// 토큰 발급/검증
    pub codec: Arc<TokenCodec>,

    /// 신원 디렉토리 (readiness 확인과 관리자 조회용)
    pub lookup: DirectoryLookup,

    /// 로그인 처리
    pub exchange: CredentialExchange,

    /// 토큰 갱신 처리
    pub refresher: RefreshOrchestrator,

    /// Bearer 토큰 검증 미들웨어 상태
    pub authenticator: Arc<TokenAuthenticator>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 이미 로드된 키 자료로 상태를 조립합니다.
    pub fn new(
        config: AppConfig,
        keys: &KeyMaterial,
        directory: Arc<dyn IdentityDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let codec = Arc::new(TokenCodec::new(&config.jwt, keys, clock));
        let lookup = DirectoryLookup::new(directory, config.directory.timeout());

        let verifier = Arc::new(DirectoryIdentityVerifier::new(lookup.clone()));
        let exchange = CredentialExchange::new(verifier, Arc::clone(&codec));
        let refresher = RefreshOrchestrator::new(Arc::clone(&codec), lookup.clone());
        let authenticator = Arc::new(TokenAuthenticator::new(
            codec.verifier().clone(),
            lookup.clone(),
            SecurityChain::default(),
        ));

        Self {
            config: Arc::new(config),
            codec,
            lookup,
            exchange,
            refresher,
            authenticator,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 설정된 경로에서 키를 로드하고 시스템 시계로 상태를 만듭니다.
    pub fn from_config(
        config: AppConfig,
        directory: Arc<dyn IdentityDirectory>,
    ) -> Result<Self, KeyError> {
        let keys = KeyMaterial::load(&config.jwt)?;
        Ok(Self::new(config, &keys, directory, Arc::new(SystemClock)))
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 디렉토리 연결 상태 확인.
    pub async fn is_directory_healthy(&self) -> bool {
        let timeout = self.config.directory.timeout();
        match tokio::time::timeout(timeout, self.lookup.directory().ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Directory health check failed");
                false
            }
            Err(_) => {
                warn!("Directory health check timed out");
                false
            }
        }
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 픽스처 키와 빈 메모리 디렉토리를 사용합니다.
#[cfg(test)]
pub fn create_test_state() -> AppState {
    use crate::auth::testing::{fixed_start, fixture_jwt_config};
    use crate::auth::ManualClock;
    use bankcards_core::InMemoryDirectory;

    let config = AppConfig {
        jwt: fixture_jwt_config(),
        ..AppConfig::default()
    };
    let keys = KeyMaterial::load(&config.jwt).unwrap();
    AppState::new(
        config,
        &keys,
        Arc::new(InMemoryDirectory::new()),
        Arc::new(ManualClock::new(fixed_start())),
    )
}
