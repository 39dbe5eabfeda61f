//! Bankcards 인증 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 키 자료를 로드하지 못하면 요청을 받기 전에 종료합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{extract::State, http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use bankcards_api::auth::hash_password;
use bankcards_api::metrics::setup_metrics_recorder;
use bankcards_api::middleware::metrics_layer;
use bankcards_api::routes::create_api_router;
use bankcards_api::state::AppState;
use bankcards_core::{init_logging, AppConfig, Identity, InMemoryDirectory, LogConfig, Role};

/// 개발용 관리자 계정 비밀번호 환경 변수.
const SEED_ADMIN_PASSWORD_ENV: &str = "BANKCARDS_SEED_ADMIN_PASSWORD";

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(middleware::from_fn(metrics_layer)),
        )
}

/// 메모리 디렉토리 생성.
///
/// `BANKCARDS_SEED_ADMIN_PASSWORD`가 설정되어 있으면 `admin` 계정을 등록합니다.
async fn seed_directory() -> anyhow::Result<InMemoryDirectory> {
    let directory = InMemoryDirectory::new();

    if let Ok(password) = std::env::var(SEED_ADMIN_PASSWORD_ENV) {
        let hash = hash_password(&password).context("failed to hash seed admin password")?;
        let admin = Identity::new("admin", "admin@bankcards.local", hash)
            .with_roles([Role::User, Role::Admin]);
        info!(identity_id = %admin.id, "Seeded development admin identity");
        directory.insert(admin).await;
    } else {
        warn!("Identity directory is empty; set {SEED_ADMIN_PASSWORD_ENV} to seed an admin");
    }

    info!(identities = directory.len().await, "Identity directory ready");

    Ok(directory)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("failed to load configuration")?;

    init_logging(LogConfig::from(&config.logging)).map_err(|e| anyhow::anyhow!(e))?;
    info!("Starting Bankcards API server...");

    let metrics_handle = setup_metrics_recorder().context("failed to install metrics recorder")?;
    info!("Prometheus metrics recorder initialized");

    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .context("invalid server bind address")?;

    let directory = seed_directory().await?;
    let state = match AppState::from_config(config, Arc::new(directory)) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!(error = %e, "Failed to load RSA key material");
            return Err(e.into());
        }
    };

    let app = create_router(state, metrics_handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    info!("Metrics available at http://{}/metrics", addr);

    let shutdown_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown_token.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token.cancelled_owned())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료 토큰을 취소합니다.
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    shutdown_token.cancel();
}
