//! 신원(Identity) 및 역할 모델.
//!
//! 신원은 외부 디렉토리가 소유합니다. 인증 서브시스템은 토큰 발급과
//! 갱신 시 신원을 읽기만 하며 절대 변경하지 않습니다.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자 역할.
///
/// 토큰의 `roles` 클레임에는 [`Role::authority`] 문자열이 들어갑니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// 일반 사용자 - 본인 카드 조회 및 이체
    User,
    /// 관리자 - 사용자/카드 관리
    Admin,
}

impl Role {
    /// 권한 문자열 (`"USER"`, `"ADMIN"`).
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.authority())
    }
}

/// 디렉토리에 등록된 주체.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// 고유 ID
    pub id: Uuid,
    /// 로그인 이름 (토큰의 `sub`)
    pub username: String,
    /// 이메일 (로그인 대체 식별자)
    pub email: String,
    /// Argon2 PHC 형식 비밀번호 해시
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// 보유 역할
    pub roles: Vec<Role>,
    /// 활성 여부
    pub active: bool,
    /// 차단 여부
    pub blocked: bool,
}

impl Identity {
    /// `USER` 역할을 가진 활성 신원 생성.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            roles: vec![Role::User],
            active: true,
            blocked: false,
        }
    }

    /// 역할 목록을 교체합니다.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    /// 특정 역할 보유 여부.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// 토큰 `roles` 클레임용 권한 문자열 목록.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.authority().to_string()).collect()
    }

    /// 인증 가능한 상태인지 (활성 + 미차단).
    pub fn is_enabled(&self) -> bool {
        self.active && !self.blocked
    }
}
