//! Bearer token authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use common::{AppError, AppResult};
use domain::BEARER_TOKEN_PREFIX;
use sign_service_lib::AccessClaims;

use crate::state::AppState;

/// Member identified by a verified access token.
#[derive(Debug, Clone)]
pub struct CurrentMember {
    pub member_id: i64,
    pub username: String,
    pub roles: Vec<String>,
}

impl TryFrom<AccessClaims> for CurrentMember {
    type Error = AppError;

    fn try_from(claims: AccessClaims) -> AppResult<Self> {
        let member_id = claims
            .private
            .member_id
            .parse()
            .map_err(|_| AppError::Unauthorized)?;

        Ok(Self {
            member_id,
            username: claims.sub,
            roles: claims.private.roles,
        })
    }
}

/// Verifies the bearer token and stores `CurrentMember` in request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;
    let claims = state.token_service.verify_token(token)?;
    let current_member = CurrentMember::try_from(claims)?;

    request.extensions_mut().insert(current_member);

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
