//! 단위 테스트 공용 헬퍼.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use bankcards_core::JwtConfig;

use super::{KeyMaterial, ManualClock, TokenCodec};

pub(crate) fn fixture_path(name: &str) -> String {
    format!(
        "{}/tests/fixtures/keys/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

pub(crate) fn fixture_jwt_config() -> JwtConfig {
    JwtConfig {
        access_private: fixture_path("access_private.key"),
        access_public: fixture_path("access_public.key"),
        refresh_private: fixture_path("refresh_private.key"),
        refresh_public: fixture_path("refresh_public.key"),
        ..JwtConfig::default()
    }
}

/// 초 단위로 떨어지는 고정 시작 시각.
pub(crate) fn fixed_start() -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000, 0).unwrap()
}

pub(crate) fn test_codec() -> (Arc<TokenCodec>, ManualClock) {
    let config = fixture_jwt_config();
    let keys = KeyMaterial::load(&config).unwrap();
    let clock = ManualClock::new(fixed_start());
    let codec = TokenCodec::new(&config, &keys, Arc::new(clock.clone()));
    (Arc::new(codec), clock)
}
