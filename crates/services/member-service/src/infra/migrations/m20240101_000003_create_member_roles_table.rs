//! Migration: Create member_roles join table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_roles_table::Roles;
use super::m20240101_000002_create_members_table::Members;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberRoles::Table)
                    .if_not_exists()
                    // Surrogate key keeps association insertion order
                    .col(
                        ColumnDef::new(MemberRoles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MemberRoles::MemberId).big_integer().not_null())
                    .col(ColumnDef::new(MemberRoles::RoleId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_roles_member_id")
                            .from(MemberRoles::Table, MemberRoles::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_roles_role_id")
                            .from(MemberRoles::Table, MemberRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_member_roles_member_role")
                    .table(MemberRoles::Table)
                    .col(MemberRoles::MemberId)
                    .col(MemberRoles::RoleId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberRoles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MemberRoles {
    Table,
    Id,
    MemberId,
    RoleId,
}
