//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::MemberResponse;
use sign_service_lib::{LoginRequest, LoginResponse, SignUpRequest};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::sign_handler::sign_up,
        crate::handlers::sign_handler::sign_in,
        crate::handlers::member_handler::get_member,
        crate::handlers::member_handler::get_current_member,
    ),
    components(schemas(SignUpRequest, LoginRequest, LoginResponse, MemberResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Sign", description = "Member sign-up and login"),
        (name = "Members", description = "Member lookup"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
