//! Repository layer for data access.

pub mod entities;
mod member_repository;
mod role_repository;

pub use member_repository::{MemberRepository, MemberStore};
pub use role_repository::{RoleRepository, RoleStore};

// Export mocks for tests (both unit and cross-crate)
#[cfg(any(test, feature = "test-utils"))]
pub use member_repository::MockMemberRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleRepository;
