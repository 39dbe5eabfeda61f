//! 시간 제한이 있는 디렉토리 조회.
//!
//! 인증 경로의 모든 디렉토리 호출은 이 래퍼를 거칩니다. 디렉토리 에러와
//! 시간 초과는 [`AuthError::DirectoryUnavailable`]로 변환됩니다.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use bankcards_core::{DirectoryError, Identity, IdentityDirectory};

use super::AuthError;

#[derive(Clone)]
pub struct DirectoryLookup {
    directory: Arc<dyn IdentityDirectory>,
    timeout: Duration,
}

impl DirectoryLookup {
    pub fn new(directory: Arc<dyn IdentityDirectory>, timeout: Duration) -> Self {
        Self { directory, timeout }
    }

    pub fn directory(&self) -> &Arc<dyn IdentityDirectory> {
        &self.directory
    }

    async fn bounded<F>(&self, operation: &'static str, lookup: F) -> Result<Option<Identity>, AuthError>
    where
        F: Future<Output = Result<Option<Identity>, DirectoryError>>,
    {
        let result = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(DirectoryError::Timeout(self.timeout.as_millis() as u64)),
        };

        result.map_err(|e| {
            warn!(operation, error = %e, "Identity directory lookup failed");
            AuthError::DirectoryUnavailable
        })
    }

    pub async fn by_id(&self, id: Uuid) -> Result<Option<Identity>, AuthError> {
        self.bounded("find_by_id", self.directory.find_by_id(id)).await
    }

    pub async fn by_username(&self, username: &str) -> Result<Option<Identity>, AuthError> {
        self.bounded("find_by_username", self.directory.find_by_username(username))
            .await
    }

    /// 사용자 이름, 없으면 이메일로 조회.
    pub async fn by_login(&self, login: &str) -> Result<Option<Identity>, AuthError> {
        self.bounded("find_by_login", self.directory.find_by_login(login))
            .await
    }
}
