//! # Bankcards Core
//!
//! 카드 관리 백엔드의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 인증 서브시스템이 읽기 전용으로 참조하는 타입을 정의합니다:
//! - 신원(Identity) 및 역할(Role) 모델
//! - 외부 신원 디렉토리 계약 ([`IdentityDirectory`])
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod directory;
pub mod identity;
pub mod logging;

pub use crate::config::*;
pub use directory::{DirectoryError, IdentityDirectory, InMemoryDirectory};
pub use identity::{Identity, Role};
pub use crate::logging::*;
