//! Sign Service Library
//!
//! Member sign-up and login. Sign-up checks username and email uniqueness,
//! assigns the default role and stores a hashed password; login verifies
//! credentials through an [`security::AuthenticationManager`] and issues a
//! signed access token through a [`token::TokenService`].

pub mod dto;
pub mod security;
pub mod service;
pub mod token;

pub use dto::{LoginRequest, LoginResponse, SignUpRequest};
pub use security::{
    Argon2PasswordEncoder, Authentication, AuthenticationManager, MemberAuthenticationManager,
    PasswordEncoder,
};
pub use service::{SignManager, SignService};
pub use token::{AccessClaims, JwtTokenService, TokenService};
