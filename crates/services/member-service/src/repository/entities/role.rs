//! Role database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppError;
use domain::{Role, RoleType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub role_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::member_role::Entity")]
    MemberRole,
}

impl Related<super::member_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemberRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// An unknown role type in the table is corrupt seed data.
impl TryFrom<Model> for Role {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role_type = model.role_type.parse::<RoleType>().map_err(|_| {
            AppError::internal(format!(
                "Unknown role type '{}' stored for role {}",
                model.role_type, model.id
            ))
        })?;
        Ok(Role::new(model.id, role_type))
    }
}
