//! Username/password authentication against stored members.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::PasswordEncoder;
use common::{AppError, AppResult};
use member_service_lib::repository::MemberRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A verified principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    pub member_id: i64,
    pub username: String,
    /// Role type names in association order
    pub authorities: Vec<String>,
}

/// Verifies a username/password pair.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthenticationManager: Send + Sync {
    /// Authenticate or fail with `LoginFailure`
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Authentication>;
}

/// Authenticates members loaded from the member repository.
pub struct MemberAuthenticationManager {
    members: Arc<dyn MemberRepository>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl MemberAuthenticationManager {
    pub fn new(members: Arc<dyn MemberRepository>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self { members, encoder }
    }
}

#[async_trait]
impl AuthenticationManager for MemberAuthenticationManager {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Authentication> {
        let Some(member) = self.members.find_one_with_roles(username).await? else {
            debug!(username, "Authentication failed: unknown username");
            return Err(AppError::LoginFailure);
        };

        if !self.encoder.matches(password, &member.password) {
            debug!(member_id = member.id, "Authentication failed: bad credentials");
            return Err(AppError::LoginFailure);
        }

        let authorities = member
            .role_types()
            .into_iter()
            .map(|role_type| role_type.as_str().to_string())
            .collect();

        Ok(Authentication {
            member_id: member.id,
            username: member.username,
            authorities,
        })
    }
}
