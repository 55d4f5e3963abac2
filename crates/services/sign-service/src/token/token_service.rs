//! JWT access tokens signed with HS256.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::security::Authentication;
use common::{AppError, AppResult, JwtConfig};
use domain::PrivateClaims;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Username of the authenticated member
    pub sub: String,
    /// Authorities granted at authentication time
    pub auth: Vec<String>,
    #[serde(flatten)]
    pub private: PrivateClaims,
    /// Unique token id
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token issuance trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenService: Send + Sync {
    /// Issue a signed access token for a verified principal
    fn create_access_token(
        &self,
        authentication: &Authentication,
        claims: &PrivateClaims,
    ) -> AppResult<String>;

    /// Verify signature and expiry, returning the embedded claims
    fn verify_token(&self, token: &str) -> AppResult<AccessClaims>;
}

/// HS256 token service keyed by the configured secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl JwtTokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_bytes()),
            expiration_hours: config.expiration_hours,
        }
    }
}

impl TokenService for JwtTokenService {
    fn create_access_token(
        &self,
        authentication: &Authentication,
        claims: &PrivateClaims,
    ) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(self.expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Token expiry out of range: {} hours",
                    self.expiration_hours
                ))
            })?;

        let access_claims = AccessClaims {
            sub: authentication.username.clone(),
            auth: authentication.authorities.clone(),
            private: claims.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &access_claims,
            &self.encoding_key,
        )?;

        debug!(member_id = %claims.member_id, "Access token issued");
        Ok(token)
    }

    fn verify_token(&self, token: &str) -> AppResult<AccessClaims> {
        let token_data = decode::<AccessClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}
