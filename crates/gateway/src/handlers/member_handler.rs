//! Member lookup handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::MemberResponse;

use crate::middleware::CurrentMember;
use crate::state::AppState;

/// Routes open to anonymous callers
pub fn member_routes() -> Router<AppState> {
    Router::new().route("/:id", get(get_member))
}

/// Routes that expect `CurrentMember` from the auth middleware
pub fn current_member_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_current_member))
}

/// Get member by ID
#[utoipa::path(
    get,
    path = "/api/members/{id}",
    tag = "Members",
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MemberResponse>> {
    let member = state.member_service.get_member(id).await?;
    Ok(Json(MemberResponse::from(member)))
}

/// Get the authenticated member
#[utoipa::path(
    get,
    path = "/api/members/me",
    tag = "Members",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current member", body = MemberResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_member(
    Extension(current_member): Extension<CurrentMember>,
    State(state): State<AppState>,
) -> AppResult<Json<MemberResponse>> {
    let member = state
        .member_service
        .get_member(current_member.member_id)
        .await?;
    Ok(Json(MemberResponse::from(member)))
}
