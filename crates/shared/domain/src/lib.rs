//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Members, roles and the response projection handed to API clients live here
//! and are shared by the member, sign and gateway crates.

pub mod constants;
pub mod error;
pub mod member;
pub mod password;
pub mod role;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use member::{Member, MemberResponse, MemberRole, NewMember, PrivateClaims};
pub use password::Password;
pub use role::{Role, RoleType};
