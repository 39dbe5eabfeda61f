//! 통합 테스트 공용 헬퍼.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};

use bankcards_api::auth::{hash_password, KeyMaterial, ManualClock, TokenCodec};
use bankcards_api::{create_api_router, AppState};
use bankcards_core::{AppConfig, Identity, InMemoryDirectory, JwtConfig, Role};

pub const ALICE_PASSWORD: &str = "alice-pa:ss";
pub const ROOT_PASSWORD: &str = "root-password";

pub fn fixture_path(name: &str) -> String {
    format!(
        "{}/tests/fixtures/keys/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

pub fn fixture_jwt_config() -> JwtConfig {
    JwtConfig {
        access_private: fixture_path("access_private.key"),
        access_public: fixture_path("access_public.key"),
        refresh_private: fixture_path("refresh_private.key"),
        refresh_public: fixture_path("refresh_public.key"),
        ..JwtConfig::default()
    }
}

pub fn fixed_start() -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000, 0).unwrap()
}

pub fn basic(login: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{login}:{password}")))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// 테스트 서버 구성 요소.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub clock: ManualClock,
    pub directory: InMemoryDirectory,
    pub alice: Identity,
    pub root: Identity,
}

impl TestApp {
    pub async fn new() -> Self {
        let directory = InMemoryDirectory::new();
        let alice = Identity::new("alice", "alice@example.com", hash_password(ALICE_PASSWORD).unwrap());
        let root = Identity::new("root", "root@example.com", hash_password(ROOT_PASSWORD).unwrap())
            .with_roles([Role::User, Role::Admin]);
        directory.insert(alice.clone()).await;
        directory.insert(root.clone()).await;

        let config = AppConfig {
            jwt: fixture_jwt_config(),
            ..AppConfig::default()
        };
        let keys = KeyMaterial::load(&config.jwt).unwrap();
        let clock = ManualClock::new(fixed_start());
        let state = Arc::new(AppState::new(
            config,
            &keys,
            Arc::new(directory.clone()),
            Arc::new(clock.clone()),
        ));

        Self {
            router: create_api_router(Arc::clone(&state)),
            state,
            clock,
            directory,
            alice,
            root,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.state.codec
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        use tower::ServiceExt;
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn login(&self, authorization: Option<String>) -> Response {
        let mut builder = Request::builder().method("POST").uri("/api/v1/login");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn refresh(&self, refresh_token: Option<&str>) -> Response {
        let uri = match refresh_token {
            Some(token) => format!("/api/v1/auth/refresh?refreshToken={token}"),
            None => "/api/v1/auth/refresh".to_string(),
        };
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str, authorization: Option<String>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
