//! Member domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::{Role, RoleType};

/// Association between a member and one of its roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRole {
    pub member_id: i64,
    pub role: Role,
}

/// Member domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub username: String,
    /// Argon2 hash of the member's password
    #[serde(skip_serializing)]
    pub password: String,
    pub nickname: String,
    pub email: String,
    /// Role associations in the order they were stored
    pub roles: Vec<MemberRole>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Role types of this member, in association order.
    pub fn role_types(&self) -> Vec<RoleType> {
        self.roles.iter().map(|mr| mr.role.role_type).collect()
    }
}

/// Member that has not been persisted yet.
///
/// `password` must already be hashed. The repository stores the member and
/// one association per entry of `roles`, in order, within one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl NewMember {
    pub fn new(
        username: String,
        password: String,
        nickname: String,
        email: String,
        roles: Vec<Role>,
    ) -> Self {
        Self {
            username,
            password,
            nickname,
            email,
            roles,
        }
    }
}

/// Custom claims embedded in an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateClaims {
    /// Member id rendered as a string
    pub member_id: String,
    /// Role type names, in the member's association order
    pub roles: Vec<String>,
}

impl PrivateClaims {
    pub fn new(member_id: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            member_id: member_id.into(),
            roles,
        }
    }

    /// Build claims from a member. Role order is kept as stored, not sorted.
    pub fn from_member(member: &Member) -> Self {
        Self {
            member_id: member.id.to_string(),
            roles: member
                .role_types()
                .iter()
                .map(RoleType::to_string)
                .collect(),
        }
    }
}

/// Member lookup response.
///
/// `password` can be set in memory and read from incoming JSON but is never
/// written to outgoing JSON.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MemberResponse {
    /// Login name
    #[cfg_attr(feature = "openapi", schema(example = "alice", min_length = 3, max_length = 50))]
    pub username: String,
    /// Write-only
    #[serde(skip_serializing)]
    #[cfg_attr(feature = "openapi", schema(write_only))]
    pub password: String,
    /// Display name
    #[cfg_attr(feature = "openapi", schema(example = "Ally", min_length = 3, max_length = 50))]
    pub nickname: String,
    /// Email address
    #[cfg_attr(feature = "openapi", schema(example = "a@x.com", min_length = 3, max_length = 50))]
    pub email: String,
}

// Don't expose the password in debug output
impl std::fmt::Debug for MemberResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberResponse")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .finish()
    }
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            username: member.username.clone(),
            password: member.password.clone(),
            nickname: member.nickname.clone(),
            email: member.email.clone(),
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            username: member.username,
            password: member.password,
            nickname: member.nickname,
            email: member.email,
        }
    }
}
