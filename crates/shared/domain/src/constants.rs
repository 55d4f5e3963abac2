//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Role type name for regular members
pub const ROLE_USER: &str = "USER";

/// Role type name for administrators
pub const ROLE_ADMIN: &str = "ADMIN";

/// All valid role type names
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

// =============================================================================
// Validation
// =============================================================================

/// Minimum length of username, nickname, email and password
pub const MIN_FIELD_LENGTH: u64 = 3;

/// Maximum length of username, nickname, email and password
pub const MAX_FIELD_LENGTH: u64 = 50;

// =============================================================================
// Authentication
// =============================================================================

/// Default access token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Maximum access token expiration in hours (one year)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";
