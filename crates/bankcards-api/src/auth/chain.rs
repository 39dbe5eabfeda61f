//! 보안 체인 구성.
//!
//! 요청은 아래 순서의 단계를 거칩니다.
//!
//! | 단계 | 적용 위치 | 실패 시 |
//! |------|-----------|---------|
//! | [`SecurityStage::CredentialExchange`] | `POST /api/v1/login` 핸들러 | 401 |
//! | [`SecurityStage::TokenRefresh`] | `POST /api/v1/auth/refresh` 핸들러 | 401 / 503 |
//! | [`SecurityStage::TokenVerification`] | 라우터 전역 미들웨어 | 401 / 503 |
//! | [`SecurityStage::Authorization`] | 라우트 레이어와 추출기 | 401 / 403 |
//!
//! 공개 경로는 토큰 검증을 건너뜁니다. 그 외 경로에서 `Bearer` 헤더가 없으면
//! 미들웨어는 요청을 그대로 통과시키고, 인가 단계가 401을 반환합니다.

use axum::http::Method;

use super::login::LOGIN_PATH;
use super::refresh::REFRESH_PATH;

/// 보안 체인 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityStage {
    /// Basic 자격 증명 → 토큰 쌍
    CredentialExchange,
    /// Refresh Token → 새 토큰 쌍
    TokenRefresh,
    /// Bearer Access Token → 보안 컨텍스트
    TokenVerification,
    /// 보안 컨텍스트 → 역할 검사
    Authorization,
}

impl SecurityStage {
    /// 적용 순서.
    pub const ORDER: [SecurityStage; 4] = [
        SecurityStage::CredentialExchange,
        SecurityStage::TokenRefresh,
        SecurityStage::TokenVerification,
        SecurityStage::Authorization,
    ];
}

#[derive(Debug, Clone)]
struct PublicRoute {
    method: Method,
    path: &'static str,
    /// `true`면 하위 경로까지 포함
    prefix: bool,
}

impl PublicRoute {
    fn matches(&self, method: &Method, path: &str) -> bool {
        if self.method != *method {
            return false;
        }
        if self.prefix {
            path == self.path
                || path
                    .strip_prefix(self.path)
                    .is_some_and(|rest| rest.starts_with('/'))
        } else {
            path == self.path
        }
    }
}

/// 공개 경로 허용 목록.
#[derive(Debug, Clone)]
pub struct SecurityChain {
    public_routes: Vec<PublicRoute>,
}

impl Default for SecurityChain {
    fn default() -> Self {
        Self {
            public_routes: vec![
                PublicRoute {
                    method: Method::POST,
                    path: LOGIN_PATH,
                    prefix: false,
                },
                PublicRoute {
                    method: Method::POST,
                    path: REFRESH_PATH,
                    prefix: false,
                },
                PublicRoute {
                    method: Method::GET,
                    path: "/health",
                    prefix: true,
                },
                PublicRoute {
                    method: Method::GET,
                    path: "/metrics",
                    prefix: false,
                },
            ],
        }
    }
}

impl SecurityChain {
    /// 토큰 검증을 건너뛰는 경로인지.
    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        self.public_routes
            .iter()
            .any(|route| route.matches(method, path))
    }

    pub fn stages(&self) -> &'static [SecurityStage] {
        &SecurityStage::ORDER
    }
}
