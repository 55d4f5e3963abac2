//! HTTP request handlers.

pub mod health_handler;
pub mod member_handler;
pub mod sign_handler;

pub use health_handler::{health_routes, HealthCheck};
pub use member_handler::{current_member_routes, member_routes};
pub use sign_handler::sign_routes;
