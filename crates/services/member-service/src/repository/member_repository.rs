//! Member repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sqlx, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, RuntimeErr, Set, SqlErr,
    TransactionTrait,
};
use tracing::debug;

use super::entities::{
    member::{self, Entity as MemberEntity},
    member_role::{self, Entity as MemberRoleEntity},
    role::Entity as RoleEntity,
};
use crate::infra::migrations::{UQ_MEMBERS_EMAIL, UQ_MEMBERS_USERNAME};
use common::{AppError, AppResult};
use domain::{Member, MemberRole, NewMember, Role};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Member repository trait for dependency injection.
///
/// Every returned `Member` carries its role associations in stored order.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Member>>;

    /// Find member by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Member>>;

    /// Find member by username, roles fetched in the same unit of work
    async fn find_one_with_roles(&self, username: &str) -> AppResult<Option<Member>>;

    /// Check whether any member uses this email
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Persist a new member and its role associations atomically.
    ///
    /// A unique-constraint violation on username or email is reported as
    /// `DuplicateUsername` / `DuplicateEmail`.
    async fn save(&self, member: NewMember) -> AppResult<Member>;
}

/// Concrete implementation of MemberRepository
pub struct MemberStore {
    db: DatabaseConnection,
}

impl MemberStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Load the role associations of a member, oldest first.
async fn load_roles<C: ConnectionTrait>(conn: &C, member_id: i64) -> AppResult<Vec<MemberRole>> {
    let rows = MemberRoleEntity::find()
        .filter(member_role::Column::MemberId.eq(member_id))
        .order_by_asc(member_role::Column::Id)
        .find_also_related(RoleEntity)
        .all(conn)
        .await?;

    rows.into_iter()
        .map(|(link, role)| {
            let role = role.ok_or_else(|| {
                AppError::internal(format!(
                    "member_roles row {} references missing role {}",
                    link.id, link.role_id
                ))
            })?;
            Ok(MemberRole {
                member_id: link.member_id,
                role: Role::try_from(role)?,
            })
        })
        .collect()
}

/// SQLSTATE of a unique index violation
const UNIQUE_VIOLATION_SQLSTATE: &str = "23505";

/// Map a failed insert to a duplicate error when a unique index rejected it.
fn map_insert_error(err: DbErr) -> AppError {
    match unique_violation_detail(&err).and_then(|detail| duplicate_from_violation(&detail)) {
        Some(duplicate) => duplicate,
        None => AppError::Database(err),
    }
}

/// Describe a unique violation, or `None` for any other error.
///
/// Driver errors sea-orm does not classify are recognised by SQLSTATE and
/// constraint name.
fn unique_violation_detail(err: &DbErr) -> Option<String> {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return Some(detail);
    }

    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
            if e.code().as_deref() == Some(UNIQUE_VIOLATION_SQLSTATE) =>
        {
            Some(format!(
                "{} ({})",
                e.message(),
                e.constraint().unwrap_or_default()
            ))
        }
        _ => None,
    }
}

/// Classify a unique violation message by the index it names.
///
/// Postgres reports the index name, SQLite reports `table.column`.
fn duplicate_from_violation(detail: &str) -> Option<AppError> {
    if detail.contains(UQ_MEMBERS_USERNAME) || detail.contains("members.username") {
        Some(AppError::DuplicateUsername)
    } else if detail.contains(UQ_MEMBERS_EMAIL) || detail.contains("members.email") {
        Some(AppError::DuplicateEmail)
    } else {
        None
    }
}

impl MemberStore {
    async fn find_one(&self, condition: sea_orm::Condition) -> AppResult<Option<Member>> {
        let Some(model) = MemberEntity::find().filter(condition).one(&self.db).await? else {
            return Ok(None);
        };

        let roles = load_roles(&self.db, model.id).await?;
        Ok(Some(model.into_member(roles)))
    }
}

#[async_trait]
impl MemberRepository for MemberStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Member>> {
        self.find_one(sea_orm::Condition::all().add(member::Column::Id.eq(id)))
            .await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Member>> {
        self.find_one(sea_orm::Condition::all().add(member::Column::Username.eq(username)))
            .await
    }

    async fn find_one_with_roles(&self, username: &str) -> AppResult<Option<Member>> {
        // Member row and its associations read under one transaction
        let txn = self.db.begin().await?;

        let Some(model) = MemberEntity::find()
            .filter(member::Column::Username.eq(username))
            .one(&txn)
            .await?
        else {
            txn.commit().await?;
            return Ok(None);
        };

        let roles = load_roles(&txn, model.id).await?;
        txn.commit().await?;

        Ok(Some(model.into_member(roles)))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = MemberEntity::find()
            .filter(member::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn save(&self, new_member: NewMember) -> AppResult<Member> {
        // Dropping the transaction without commit rolls it back
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let active_model = member::ActiveModel {
            id: NotSet,
            username: Set(new_member.username),
            password: Set(new_member.password),
            nickname: Set(new_member.nickname),
            email: Set(new_member.email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&txn).await.map_err(map_insert_error)?;

        let mut roles = Vec::with_capacity(new_member.roles.len());
        for role in new_member.roles {
            member_role::ActiveModel {
                id: NotSet,
                member_id: Set(model.id),
                role_id: Set(role.id),
            }
            .insert(&txn)
            .await?;

            roles.push(MemberRole {
                member_id: model.id,
                role,
            });
        }

        txn.commit().await?;
        debug!(member_id = model.id, "Member saved with {} role(s)", roles.len());

        Ok(model.into_member(roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_username_violation() {
        let detail = "duplicate key value violates unique constraint \"uq_members_username\"";
        assert!(matches!(
            duplicate_from_violation(detail),
            Some(AppError::DuplicateUsername)
        ));
    }

    #[test]
    fn test_postgres_email_violation() {
        let detail = "duplicate key value violates unique constraint \"uq_members_email\"";
        assert!(matches!(
            duplicate_from_violation(detail),
            Some(AppError::DuplicateEmail)
        ));
    }

    #[test]
    fn test_sqlite_violation() {
        assert!(matches!(
            duplicate_from_violation("UNIQUE constraint failed: members.email"),
            Some(AppError::DuplicateEmail)
        ));
        assert!(matches!(
            duplicate_from_violation("UNIQUE constraint failed: members.username"),
            Some(AppError::DuplicateUsername)
        ));
    }

    #[test]
    fn test_unrelated_violation_is_not_a_duplicate() {
        let detail = "duplicate key value violates unique constraint \"uq_member_roles_member_role\"";
        assert!(duplicate_from_violation(detail).is_none());
    }

    #[test]
    fn test_non_constraint_error_stays_database_error() {
        let err = map_insert_error(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));
    }

    // =========================================================================
    // MemberStore against a mock connection
    // =========================================================================

    mod store {
        use std::borrow::Cow;
        use std::collections::BTreeMap;
        use std::error::Error as StdError;

        use chrono::{TimeZone, Utc};
        use sea_orm::sqlx::error::{DatabaseError, ErrorKind};
        use sea_orm::{DatabaseBackend, MockDatabase, Transaction, Value};

        use super::super::*;
        use crate::repository::entities::role;
        use domain::RoleType;

        /// Postgres-style unique violation raised by the driver.
        #[derive(Debug)]
        struct UniqueViolation {
            constraint: &'static str,
        }

        impl std::fmt::Display for UniqueViolation {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "duplicate key value violates unique constraint")
            }
        }

        impl StdError for UniqueViolation {}

        impl DatabaseError for UniqueViolation {
            fn message(&self) -> &str {
                "duplicate key value violates unique constraint"
            }

            fn code(&self) -> Option<Cow<'_, str>> {
                Some(Cow::Borrowed(UNIQUE_VIOLATION_SQLSTATE))
            }

            fn constraint(&self) -> Option<&str> {
                Some(self.constraint)
            }

            fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
                self
            }

            fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
                self
            }

            fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
                self
            }

            fn kind(&self) -> ErrorKind {
                ErrorKind::UniqueViolation
            }
        }

        fn unique_violation(constraint: &'static str) -> DbErr {
            DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(Box::new(
                UniqueViolation { constraint },
            ))))
        }

        fn member_row(id: i64) -> member::Model {
            let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            member::Model {
                id,
                username: "alice".to_string(),
                password: "hashed".to_string(),
                nickname: "Ally".to_string(),
                email: "a@x.com".to_string(),
                created_at: at,
                updated_at: at,
            }
        }

        fn link_row(id: i64, member_id: i64, role_id: i64) -> member_role::Model {
            member_role::Model {
                id,
                member_id,
                role_id,
            }
        }

        fn role_row(id: i64, role_type: &str) -> role::Model {
            role::Model {
                id,
                role_type: role_type.to_string(),
            }
        }

        fn new_member(roles: Vec<Role>) -> NewMember {
            NewMember::new(
                "alice".to_string(),
                "hashed".to_string(),
                "Ally".to_string(),
                "a@x.com".to_string(),
                roles,
            )
        }

        fn log_text(log: &[Transaction]) -> String {
            format!("{:?}", log)
        }

        #[tokio::test]
        async fn test_save_inserts_member_and_roles_in_one_transaction() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[member_row(1)]])
                .append_query_results([[link_row(10, 1, 1)]])
                .append_query_results([[link_row(11, 1, 2)]])
                .into_connection();
            let store = MemberStore::new(db.clone());

            let member = store
                .save(new_member(vec![
                    Role::new(1, RoleType::User),
                    Role::new(2, RoleType::Admin),
                ]))
                .await
                .unwrap();

            assert_eq!(member.id, 1);
            assert_eq!(member.role_types(), vec![RoleType::User, RoleType::Admin]);

            let log = db.into_transaction_log();
            assert_eq!(log.len(), 1);
            let text = log_text(&log);
            assert!(text.contains("BEGIN"));
            assert!(text.contains("COMMIT"));
            assert_eq!(text.matches(r#"INSERT INTO \"members\""#).count(), 1);
            assert_eq!(text.matches(r#"INSERT INTO \"member_roles\""#).count(), 2);
        }

        #[tokio::test]
        async fn test_save_rolls_back_when_role_insert_fails() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[member_row(1)]])
                .append_query_errors([DbErr::Custom("connection reset".to_string())])
                .into_connection();
            let store = MemberStore::new(db.clone());

            let result = store
                .save(new_member(vec![Role::new(1, RoleType::User)]))
                .await;
            assert!(matches!(result, Err(AppError::Database(_))));

            let text = log_text(&db.into_transaction_log());
            assert!(text.contains("ROLLBACK"));
            assert!(!text.contains("COMMIT"));
        }

        #[tokio::test]
        async fn test_save_duplicate_username_from_unique_index() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([unique_violation(UQ_MEMBERS_USERNAME)])
                .into_connection();
            let store = MemberStore::new(db.clone());

            let result = store
                .save(new_member(vec![Role::new(1, RoleType::User)]))
                .await;
            assert!(matches!(result, Err(AppError::DuplicateUsername)));

            let text = log_text(&db.into_transaction_log());
            assert!(text.contains("ROLLBACK"));
            assert!(!text.contains("member_roles"));
        }

        #[tokio::test]
        async fn test_save_duplicate_email_from_unique_index() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([unique_violation(UQ_MEMBERS_EMAIL)])
                .into_connection();
            let store = MemberStore::new(db);

            let result = store
                .save(new_member(vec![Role::new(1, RoleType::User)]))
                .await;
            assert!(matches!(result, Err(AppError::DuplicateEmail)));
        }

        #[tokio::test]
        async fn test_find_one_with_roles_reads_roles_in_stored_order() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[member_row(1)]])
                .append_query_results([[
                    (link_row(10, 1, 1), role_row(1, "USER")),
                    (link_row(11, 1, 2), role_row(2, "ADMIN")),
                ]])
                .into_connection();
            let store = MemberStore::new(db.clone());

            let member = store.find_one_with_roles("alice").await.unwrap().unwrap();
            assert_eq!(member.role_types(), vec![RoleType::User, RoleType::Admin]);
            assert!(member.roles.iter().all(|mr| mr.member_id == 1));

            let log = db.into_transaction_log();
            assert_eq!(log.len(), 1);
            let text = log_text(&log);
            assert!(text.contains(r#"ORDER BY \"member_roles\".\"id\" ASC"#));
            assert!(text.contains("COMMIT"));
        }

        #[tokio::test]
        async fn test_find_by_id_missing_member_skips_role_query() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<member::Model>::new()])
                .into_connection();
            let store = MemberStore::new(db.clone());

            assert!(store.find_by_id(99).await.unwrap().is_none());
            assert!(!log_text(&db.into_transaction_log()).contains("member_roles"));
        }

        #[tokio::test]
        async fn test_exists_by_email() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[BTreeMap::from([(
                    "num_items",
                    Value::BigInt(Some(1)),
                )])]])
                .append_query_results([[BTreeMap::from([(
                    "num_items",
                    Value::BigInt(Some(0)),
                )])]])
                .into_connection();
            let store = MemberStore::new(db);

            assert!(store.exists_by_email("a@x.com").await.unwrap());
            assert!(!store.exists_by_email("b@x.com").await.unwrap());
        }
    }
}
