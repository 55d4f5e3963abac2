//! Migration: Create members table.

use sea_orm_migration::prelude::*;

use super::{UQ_MEMBERS_EMAIL, UQ_MEMBERS_USERNAME};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Members::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Members::Username).string_len(50).not_null())
                    .col(ColumnDef::new(Members::Password).string().not_null())
                    .col(ColumnDef::new(Members::Nickname).string_len(50).not_null())
                    .col(ColumnDef::new(Members::Email).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Members::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Named unique indexes so violations can be told apart on insert
        manager
            .create_index(
                Index::create()
                    .name(UQ_MEMBERS_USERNAME)
                    .table(Members::Table)
                    .col(Members::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UQ_MEMBERS_EMAIL)
                    .table(Members::Table)
                    .col(Members::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Members {
    Table,
    Id,
    Username,
    Password,
    Nickname,
    Email,
    CreatedAt,
    UpdatedAt,
}
