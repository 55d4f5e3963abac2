//! Member database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Member, MemberRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 hash
    pub password: String,
    pub nickname: String,
    #[sea_orm(unique)]
    pub email: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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

impl Model {
    /// Convert database model to domain entity with its loaded roles
    pub fn into_member(self, roles: Vec<MemberRole>) -> Member {
        Member {
            id: self.id,
            username: self.username,
            password: self.password,
            nickname: self.nickname,
            email: self.email,
            roles,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
