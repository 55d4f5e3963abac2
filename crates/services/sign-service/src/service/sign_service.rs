//! Sign service - Handles member sign-up and login.
//!
//! Username and email uniqueness are checked up front; the unique indexes
//! behind `MemberRepository::save` still catch a concurrent duplicate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::dto::{LoginRequest, LoginResponse, SignUpRequest};
use crate::security::{AuthenticationManager, PasswordEncoder};
use crate::token::TokenService;
use common::{AppError, AppResult};
use domain::{NewMember, PrivateClaims, RoleType};
use member_service_lib::repository::{MemberRepository, RoleRepository};

/// Sign service trait for dependency injection.
#[async_trait]
pub trait SignService: Send + Sync {
    /// Register a new member with the default role
    async fn sign_up(&self, request: SignUpRequest) -> AppResult<()>;

    /// Verify credentials and issue an access token
    async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse>;
}

/// Concrete implementation of SignService.
pub struct SignManager {
    members: Arc<dyn MemberRepository>,
    roles: Arc<dyn RoleRepository>,
    encoder: Arc<dyn PasswordEncoder>,
    authentication_manager: Arc<dyn AuthenticationManager>,
    tokens: Arc<dyn TokenService>,
}

impl SignManager {
    /// Create new sign service instance
    pub fn new(
        members: Arc<dyn MemberRepository>,
        roles: Arc<dyn RoleRepository>,
        encoder: Arc<dyn PasswordEncoder>,
        authentication_manager: Arc<dyn AuthenticationManager>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            members,
            roles,
            encoder,
            authentication_manager,
            tokens,
        }
    }

    /// Username is checked before email; the first violation wins.
    async fn validate_sign_up_info(&self, request: &SignUpRequest) -> AppResult<()> {
        if self
            .members
            .find_one_with_roles(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateUsername);
        }

        if self.members.exists_by_email(&request.email).await? {
            return Err(AppError::DuplicateEmail);
        }

        Ok(())
    }

    /// Authenticate and issue a token; an empty token counts as a failed login.
    async fn issue_token(&self, request: &LoginRequest, claims: &PrivateClaims) -> AppResult<String> {
        let authentication = self
            .authentication_manager
            .authenticate(&request.username, &request.password)
            .await
            .map_err(|e| {
                if !matches!(e, AppError::LoginFailure) {
                    warn!(username = %request.username, "Authentication error: {}", e);
                }
                AppError::LoginFailure
            })?;

        let token = self
            .tokens
            .create_access_token(&authentication, claims)
            .unwrap_or_else(|e| {
                warn!(member_id = authentication.member_id, "Token issuance failed: {}", e);
                String::new()
            });

        if token.is_empty() {
            return Err(AppError::LoginFailure);
        }

        Ok(token)
    }
}

#[async_trait]
impl SignService for SignManager {
    async fn sign_up(&self, request: SignUpRequest) -> AppResult<()> {
        self.validate_sign_up_info(&request).await?;

        let role = self
            .roles
            .find_by_role_type(RoleType::DEFAULT)
            .await?
            .ok_or(AppError::RoleNotFound)?;

        let password = self.encoder.encode(&request.password)?;

        let member = self
            .members
            .save(NewMember::new(
                request.username,
                password,
                request.nickname,
                request.email,
                vec![role],
            ))
            .await?;

        info!(member_id = member.id, username = %member.username, "Member signed up");
        Ok(())
    }

    async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let member = self
            .members
            .find_by_username(&request.username)
            .await?
            .ok_or(AppError::MemberNotFound)?;

        let claims = PrivateClaims::from_member(&member);
        let token = self.issue_token(&request, &claims).await?;

        info!(member_id = member.id, "Member logged in");
        Ok(LoginResponse::new(token))
    }
}
