//! Role repository implementation.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::entities::role::{self, Entity as RoleEntity};
use common::AppResult;
use domain::{Role, RoleType};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Role repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find the role row for a role type
    async fn find_by_role_type(&self, role_type: RoleType) -> AppResult<Option<Role>>;
}

/// Concrete implementation of RoleRepository
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn find_by_role_type(&self, role_type: RoleType) -> AppResult<Option<Role>> {
        let result = RoleEntity::find()
            .filter(role::Column::RoleType.eq(role_type.as_str()))
            .one(&self.db)
            .await?;

        result.map(Role::try_from).transpose()
    }
}
