//! Member lookup business logic.

mod member_service;

pub use member_service::{MemberManager, MemberService};
