//! IdentityDirectory 통합 테스트
//!
//! trait 객체를 통한 조회와 동시 접근을 확인합니다.

use std::sync::Arc;

use bankcards_core::{Identity, IdentityDirectory, InMemoryDirectory, Role};

#[tokio::test]
async fn test_directory_as_trait_object() {
    let store = InMemoryDirectory::new();
    let admin = Identity::new("root", "root@example.com", "h").with_roles([Role::Admin, Role::User]);
    store.insert(admin.clone()).await;

    let directory: Arc<dyn IdentityDirectory> = Arc::new(store);

    let found = directory.find_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(found.username, "root");
    assert!(found.has_role(Role::Admin));
    assert!(directory.ping().await.is_ok());
}

#[tokio::test]
async fn test_concurrent_lookups() {
    let store = InMemoryDirectory::new();
    let mut ids = Vec::new();
    for n in 0..16 {
        let identity = Identity::new(format!("user{n}"), format!("user{n}@example.com"), "h");
        ids.push(identity.id);
        store.insert(identity).await;
    }

    let directory: Arc<dyn IdentityDirectory> = Arc::new(store);
    let handles: Vec<_> = ids
        .iter()
        .copied()
        .map(|id| {
            let directory = Arc::clone(&directory);
            tokio::spawn(async move { directory.find_by_id(id).await })
        })
        .collect();

    for handle in handles {
        let found = handle.await.unwrap().unwrap();
        assert!(found.is_some());
    }
}
