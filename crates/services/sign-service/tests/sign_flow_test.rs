//! End-to-end sign-up and login against in-memory repositories.
//!
//! Run with: cargo test -p sign-service --test sign_flow_test

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use common::{AppError, AppResult, JwtConfig};
use domain::{Member, MemberRole, NewMember, Role, RoleType};
use member_service_lib::repository::{MemberRepository, RoleRepository};
use sign_service_lib::{
    Argon2PasswordEncoder, JwtTokenService, LoginRequest, MemberAuthenticationManager,
    SignManager, SignService, SignUpRequest, TokenService,
};

// =============================================================================
// In-memory repositories
// =============================================================================

/// Member store with the same uniqueness rules as the database indexes.
#[derive(Default)]
struct InMemoryMembers {
    rows: Mutex<Vec<Member>>,
}

impl InMemoryMembers {
    fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn find(&self, predicate: impl Fn(&Member) -> bool) -> Option<Member> {
        self.rows.lock().unwrap().iter().find(|m| predicate(m)).cloned()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMembers {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Member>> {
        Ok(self.find(|m| m.id == id))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Member>> {
        Ok(self.find(|m| m.username == username))
    }

    async fn find_one_with_roles(&self, username: &str) -> AppResult<Option<Member>> {
        Ok(self.find(|m| m.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.find(|m| m.email == email).is_some())
    }

    async fn save(&self, new_member: NewMember) -> AppResult<Member> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|m| m.username == new_member.username) {
            return Err(AppError::DuplicateUsername);
        }
        if rows.iter().any(|m| m.email == new_member.email) {
            return Err(AppError::DuplicateEmail);
        }

        let id = rows.len() as i64 + 1;
        let now = Utc::now();
        let member = Member {
            id,
            username: new_member.username,
            password: new_member.password,
            nickname: new_member.nickname,
            email: new_member.email,
            roles: new_member
                .roles
                .into_iter()
                .map(|role| MemberRole { member_id: id, role })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        rows.push(member.clone());
        Ok(member)
    }
}

struct InMemoryRoles {
    roles: Vec<Role>,
}

impl InMemoryRoles {
    fn seeded() -> Self {
        Self {
            roles: vec![Role::new(1, RoleType::User), Role::new(2, RoleType::Admin)],
        }
    }

    fn empty() -> Self {
        Self { roles: Vec::new() }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoles {
    async fn find_by_role_type(&self, role_type: RoleType) -> AppResult<Option<Role>> {
        Ok(self.roles.iter().find(|r| r.role_type == role_type).cloned())
    }
}

// =============================================================================
// Helpers
// =============================================================================

const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiration_hours: 1,
    }
}

fn build(
    members: Arc<InMemoryMembers>,
    roles: InMemoryRoles,
) -> (SignManager, Arc<JwtTokenService>) {
    let encoder = Arc::new(Argon2PasswordEncoder::new());
    let tokens = Arc::new(JwtTokenService::new(&jwt_config()));
    let authentication_manager = Arc::new(MemberAuthenticationManager::new(
        members.clone(),
        encoder.clone(),
    ));

    let service = SignManager::new(
        members,
        Arc::new(roles),
        encoder,
        authentication_manager,
        tokens.clone(),
    );
    (service, tokens)
}

// =============================================================================
// Sign-up
// =============================================================================

#[tokio::test]
async fn test_alice_and_bob_scenario() {
    let members = Arc::new(InMemoryMembers::default());
    let (service, _) = build(members.clone(), InMemoryRoles::seeded());

    service
        .sign_up(SignUpRequest::new("alice", "Pw12345!", "Ally", "a@x.com"))
        .await
        .unwrap();

    let duplicate_username = service
        .sign_up(SignUpRequest::new("alice", "Other1!", "A2", "b@x.com"))
        .await;
    assert!(matches!(duplicate_username, Err(AppError::DuplicateUsername)));

    let duplicate_email = service
        .sign_up(SignUpRequest::new("bob", "Pw12345!", "Bob", "a@x.com"))
        .await;
    assert!(matches!(duplicate_email, Err(AppError::DuplicateEmail)));

    assert_eq!(members.count(), 1);
}

#[tokio::test]
async fn test_sign_up_stores_hash_and_single_user_role() {
    let members = Arc::new(InMemoryMembers::default());
    let (service, _) = build(members.clone(), InMemoryRoles::seeded());

    service
        .sign_up(SignUpRequest::new("alice", "Pw12345!", "Ally", "a@x.com"))
        .await
        .unwrap();

    let stored = members.find(|m| m.username == "alice").unwrap();
    assert_ne!(stored.password, "Pw12345!");
    assert_eq!(stored.role_types(), vec![RoleType::User]);
}

#[tokio::test]
async fn test_sign_up_without_seeded_roles() {
    let members = Arc::new(InMemoryMembers::default());
    let (service, _) = build(members.clone(), InMemoryRoles::empty());

    let result = service
        .sign_up(SignUpRequest::new("alice", "Pw12345!", "Ally", "a@x.com"))
        .await;

    assert!(matches!(result, Err(AppError::RoleNotFound)));
    assert_eq!(members.count(), 0);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_issues_token_with_member_claims() {
    let members = Arc::new(InMemoryMembers::default());
    let (service, tokens) = build(members.clone(), InMemoryRoles::seeded());

    service
        .sign_up(SignUpRequest::new("alice", "Pw12345!", "Ally", "a@x.com"))
        .await
        .unwrap();

    let response = service
        .login(LoginRequest::new("alice", "Pw12345!"))
        .await
        .unwrap();
    assert!(!response.token.is_empty());

    let claims = tokens.verify_token(&response.token).unwrap();
    let stored = members.find(|m| m.username == "alice").unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.private.member_id, stored.id.to_string());
    assert_eq!(claims.private.roles, vec!["USER"]);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let members = Arc::new(InMemoryMembers::default());
    let (service, _) = build(members, InMemoryRoles::seeded());

    service
        .sign_up(SignUpRequest::new("alice", "Pw12345!", "Ally", "a@x.com"))
        .await
        .unwrap();

    let result = service.login(LoginRequest::new("alice", "Wrong123!")).await;
    assert!(matches!(result, Err(AppError::LoginFailure)));
}

#[tokio::test]
async fn test_login_unknown_member() {
    let members = Arc::new(InMemoryMembers::default());
    let (service, _) = build(members, InMemoryRoles::seeded());

    let result = service.login(LoginRequest::new("ghost", "Pw12345!")).await;
    assert!(matches!(result, Err(AppError::MemberNotFound)));
}
