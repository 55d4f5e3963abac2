//! Sign-up and login payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Member sign-up request with validation
#[derive(Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SignUpRequest {
    /// Login name, unique across members
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "alice", min_length = 3, max_length = 50))]
    pub username: String,
    /// Plain text password, hashed before storage
    #[validate(length(min = 3, max = 50, message = "Password must be 3-50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Pw12345!", min_length = 3, max_length = 50))]
    pub password: String,
    /// Display name
    #[validate(length(min = 3, max = 50, message = "Nickname must be 3-50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Ally", min_length = 3, max_length = 50))]
    pub nickname: String,
    /// Email address, unique across members
    #[validate(
        email(message = "Invalid email format"),
        length(min = 3, max = 50, message = "Email must be 3-50 characters")
    )]
    #[cfg_attr(feature = "openapi", schema(example = "a@x.com", min_length = 3, max_length = 50))]
    pub email: String,
}

impl SignUpRequest {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            nickname: nickname.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .finish()
    }
}

/// Member login request
#[derive(Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub username: String,
    #[validate(length(min = 3, max = 50, message = "Password must be 3-50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Pw12345!"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Token returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginResponse {
    /// Signed access token
    #[cfg_attr(feature = "openapi", schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."))]
    pub token: String,
}

impl LoginResponse {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}
