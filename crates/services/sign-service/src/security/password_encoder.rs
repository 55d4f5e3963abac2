//! Password encoder abstraction over the domain `Password` value object.

use common::AppResult;
use domain::Password;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One-way password encoding.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PasswordEncoder: Send + Sync {
    /// Hash a raw password for storage
    fn encode(&self, raw: &str) -> AppResult<String>;

    /// Check a raw password against a stored hash
    fn matches(&self, raw: &str, encoded: &str) -> bool;
}

/// Argon2 encoder with a fresh salt per hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordEncoder;

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> AppResult<String> {
        Ok(Password::new(raw)?.into_string())
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        Password::from_hash(encoded).verify(raw)
    }
}
