//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_roles_table;
mod m20240101_000002_create_members_table;
mod m20240101_000003_create_member_roles_table;

/// Name of the unique index on `members.username`.
pub const UQ_MEMBERS_USERNAME: &str = "uq_members_username";

/// Name of the unique index on `members.email`.
pub const UQ_MEMBERS_EMAIL: &str = "uq_members_email";

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_roles_table::Migration),
            Box::new(m20240101_000002_create_members_table::Migration),
            Box::new(m20240101_000003_create_member_roles_table::Migration),
        ]
    }
}
