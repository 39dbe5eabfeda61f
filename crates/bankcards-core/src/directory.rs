//! 신원 디렉토리 계약.
//!
//! 영속화는 이 크레이트의 범위 밖입니다. 인증 서브시스템은
//! [`IdentityDirectory`] trait을 통해서만 신원을 조회합니다.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::identity::Identity;

/// 디렉토리 조회 에러.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    #[error("디렉토리를 사용할 수 없습니다: {0}")]
    Unavailable(String),
    #[error("디렉토리 조회 시간 초과 ({0}ms)")]
    Timeout(u64),
}

/// 읽기 전용 신원 디렉토리.
///
/// 구현체는 여러 요청 스레드에서 동시에 호출될 수 있어야 합니다.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// ID로 신원 조회.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, DirectoryError>;

    /// 사용자 이름으로 신원 조회.
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, DirectoryError>;

    /// 이메일로 신원 조회.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError>;

    /// 로그인 문자열로 조회: 사용자 이름을 먼저, 없으면 이메일로 조회합니다.
    async fn find_by_login(&self, login: &str) -> Result<Option<Identity>, DirectoryError> {
        match self.find_by_username(login).await? {
            Some(identity) => Ok(Some(identity)),
            None => self.find_by_email(login).await,
        }
    }

    /// 디렉토리 연결 상태 확인 (readiness probe용).
    async fn ping(&self) -> Result<(), DirectoryError> {
        Ok(())
    }
}

/// 메모리 기반 디렉토리.
///
/// 개발 환경 시드 데이터와 테스트에서 사용합니다.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    identities: Arc<RwLock<HashMap<Uuid, Identity>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 신원 등록 (같은 ID가 있으면 교체).
    pub async fn insert(&self, identity: Identity) {
        self.identities.write().await.insert(identity.id, identity);
    }

    /// 신원 삭제. 삭제된 신원을 반환합니다.
    pub async fn remove(&self, id: Uuid) -> Option<Identity> {
        self.identities.write().await.remove(&id)
    }

    /// 등록된 신원 수.
    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, DirectoryError> {
        Ok(self.identities.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, DirectoryError> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|i| i.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|i| i.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_login_prefers_username() {
        let directory = InMemoryDirectory::new();
        let alice = Identity::new("alice", "alice@example.com", "h");
        directory.insert(alice.clone()).await;

        let by_name = directory.find_by_login("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, alice.id);

        let by_email = directory
            .find_by_login("ALICE@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, alice.id);

        assert!(directory.find_by_login("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_identity() {
        let directory = InMemoryDirectory::new();
        let alice = Identity::new("alice", "alice@example.com", "h");
        directory.insert(alice.clone()).await;
        assert_eq!(directory.len().await, 1);

        assert!(directory.remove(alice.id).await.is_some());
        assert!(directory.find_by_id(alice.id).await.unwrap().is_none());
        assert_eq!(directory.len().await, 0);
    }
}
