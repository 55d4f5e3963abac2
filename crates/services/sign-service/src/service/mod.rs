//! Sign-up and login business logic.

mod sign_service;

pub use sign_service::{SignManager, SignService};
