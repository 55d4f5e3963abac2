//! Role domain entity and role types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::error::DomainError;

/// Authorization category assigned to members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RoleType {
    User,
    Admin,
}

impl RoleType {
    /// Role every new member receives at sign-up.
    pub const DEFAULT: RoleType = RoleType::User;

    /// Stable name used in storage and token claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::User => ROLE_USER,
            RoleType::Admin => ROLE_ADMIN,
        }
    }
}

impl FromStr for RoleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(RoleType::User),
            ROLE_ADMIN => Ok(RoleType::Admin),
            other => Err(DomainError::validation(format!("Unknown role type: {}", other))),
        }
    }
}

impl std::fmt::Display for RoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role record as stored in the role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub role_type: RoleType,
}

impl Role {
    pub fn new(id: i64, role_type: RoleType) -> Self {
        Self { id, role_type }
    }
}
