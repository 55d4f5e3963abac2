//! Sign-up and sign-in handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use common::AppResult;
use sign_service_lib::{LoginRequest, LoginResponse, SignUpRequest};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Create sign routes
pub fn sign_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/api/sign-up",
    tag = "Sign",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Member registered"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already registered")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> AppResult<StatusCode> {
    state.sign_service.sign_up(payload).await?;
    Ok(StatusCode::CREATED)
}

/// Log in and receive an access token
#[utoipa::path(
    post,
    path = "/api/sign-in",
    tag = "Sign",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.sign_service.login(payload).await?;
    Ok(Json(response))
}
