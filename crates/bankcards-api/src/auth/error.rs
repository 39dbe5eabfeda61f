//! 인증 에러 분류.
//!
//! 요청 단위 에러는 모두 [`AuthError`]로 표현되며, HTTP 경계에서
//! 한 번만 상태 코드와 [`ErrorResponse`] 본문으로 변환됩니다.
//! 키 로딩 실패는 시작 시점 전용이므로 [`super::KeyError`]로 분리되어 있습니다.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::TokenKind;
use crate::error::ErrorResponse;

pub(crate) const BAD_CREDENTIALS_MESSAGE: &str = "invalid login or password";
pub(crate) const MALFORMED_BASIC_MESSAGE: &str = "malformed Basic authorization header";
pub(crate) const MISSING_BASIC_MESSAGE: &str = "Basic authorization header is required";
pub(crate) const DISABLED_ACCOUNT_MESSAGE: &str = "account is disabled or blocked";

/// 요청 단위 인증/인가 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// 로그인 자격 증명 불일치 또는 Basic 헤더 형식 오류
    #[error("{0}")]
    AuthenticationFailed(&'static str),
    /// 만료된 Access Token (클라이언트는 재로그인 대신 갱신해야 함)
    #[error("access token has expired")]
    TokenExpired,
    /// 서명/형식/발급자 검증 실패, 또는 Refresh Token의 모든 실패
    #[error("{0} token failed validation")]
    TokenInvalid(TokenKind),
    /// Refresh Token이 가리키는 신원을 더 이상 찾을 수 없음
    #[error("refresh token failed validation")]
    IdentityNotFound,
    /// Refresh Token의 신원 ID와 조회된 신원 ID 불일치
    #[error("refresh token failed validation")]
    IdentityMismatch,
    /// 인증이 필요한 경로에 신원 없음
    #[error("authentication required")]
    Unauthorized,
    /// 필요한 역할 없음
    #[error("insufficient access rights")]
    Forbidden,
    /// 신원 디렉토리 조회 실패 또는 시간 초과
    #[error("identity directory unavailable")]
    DirectoryUnavailable,
    /// 서명 실패 등 내부 오류
    #[error("internal authentication error")]
    Internal,
}

impl AuthError {
    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::AuthenticationFailed(_)
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_)
            | AuthError::IdentityNotFound
            | AuthError::IdentityMismatch
            | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::DirectoryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 로그/메트릭 라벨용 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::TokenInvalid(_) => "TOKEN_INVALID",
            AuthError::IdentityNotFound => "IDENTITY_NOT_FOUND",
            AuthError::IdentityMismatch => "IDENTITY_MISMATCH",
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::DirectoryUnavailable => "DIRECTORY_UNAVAILABLE",
            AuthError::Internal => "INTERNAL",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse::new(status, self.to_string()));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
