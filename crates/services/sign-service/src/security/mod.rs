//! Credential handling: password encoding and authentication.

mod authentication_manager;
mod password_encoder;

pub use authentication_manager::{Authentication, AuthenticationManager, MemberAuthenticationManager};
pub use password_encoder::{Argon2PasswordEncoder, PasswordEncoder};

#[cfg(any(test, feature = "test-utils"))]
pub use authentication_manager::MockAuthenticationManager;
#[cfg(any(test, feature = "test-utils"))]
pub use password_encoder::MockPasswordEncoder;
