//! Access token issuance and verification.

mod token_service;

pub use token_service::{AccessClaims, JwtTokenService, TokenService};

#[cfg(any(test, feature = "test-utils"))]
pub use token_service::MockTokenService;
