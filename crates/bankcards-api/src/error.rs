//! 통합 API 에러 응답 타입.
//!
//! 인증 실패를 포함한 모든 요청 단위 에러는 이 형식으로 직렬화됩니다.

use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 응답 타임스탬프 형식 (`dd.MM.yyyy HH:mm:ss`, UTC).
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// 에러 응답 본문.
///
/// # 예시
///
/// ```json
/// {
///   "httpStatus": 401,
///   "message": "access token has expired",
///   "timestamp": "18.10.2026 12:30:00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP 상태 코드
    pub http_status: u16,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 시각
    pub timestamp: String,
}

impl ErrorResponse {
    /// 현재 시각으로 에러 응답 생성.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            http_status: status.as_u16(),
            message: message.into(),
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.http_status, self.message)
    }
}

impl std::error::Error for ErrorResponse {}
