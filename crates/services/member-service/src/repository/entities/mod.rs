//! SeaORM entities for the member schema.

pub mod member;
pub mod member_role;
pub mod role;
