//! Member service - Read side of member management.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::Member;

use crate::repository::MemberRepository;

/// Member service trait for dependency injection.
#[async_trait]
pub trait MemberService: Send + Sync {
    /// Get member by ID
    async fn get_member(&self, id: i64) -> AppResult<Member>;
}

/// Concrete implementation of MemberService using repository.
pub struct MemberManager {
    repo: Arc<dyn MemberRepository>,
}

impl MemberManager {
    /// Create new member service instance with repository
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl MemberService for MemberManager {
    async fn get_member(&self, id: i64) -> AppResult<Member> {
        self.repo.find_by_id(id).await?.ok_or_member_not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::AppError;
    use mockall::predicate::eq;

    use crate::repository::MockMemberRepository;

    fn create_test_member(id: i64) -> Member {
        Member {
            id,
            username: "user".to_string(),
            password: "hashed".to_string(),
            nickname: "nick".to_string(),
            email: "ee@naver.com".to_string(),
            roles: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_member_success() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .with(eq(3))
            .returning(|id| Ok(Some(create_test_member(id))));

        let service = MemberManager::new(Arc::new(repo));
        let member = service.get_member(3).await.unwrap();

        assert_eq!(member.id, 3);
    }

    #[tokio::test]
    async fn test_get_member_not_found() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = MemberManager::new(Arc::new(repo));
        let result = service.get_member(42).await;

        assert!(matches!(result, Err(AppError::MemberNotFound)));
    }
}
