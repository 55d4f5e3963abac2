//! Application state for dependency injection.

use std::sync::Arc;

use common::JwtConfig;
use member_service_lib::{
    infra::Database,
    repository::{MemberStore, RoleStore},
    service::{MemberManager, MemberService},
};
use sign_service_lib::{
    Argon2PasswordEncoder, JwtTokenService, MemberAuthenticationManager, SignManager,
    SignService, TokenService,
};

use crate::handlers::HealthCheck;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub sign_service: Arc<dyn SignService>,
    pub member_service: Arc<dyn MemberService>,
    pub token_service: Arc<dyn TokenService>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Create app state from already built services.
    pub fn new(
        sign_service: Arc<dyn SignService>,
        member_service: Arc<dyn MemberService>,
        token_service: Arc<dyn TokenService>,
        health: Arc<dyn HealthCheck>,
    ) -> Self {
        Self {
            sign_service,
            member_service,
            token_service,
            health,
        }
    }

    /// Wire the concrete repositories and services over one database.
    pub fn from_database(database: Database, jwt: &JwtConfig) -> Self {
        let connection = database.get_connection();
        let members = Arc::new(MemberStore::new(connection.clone()));
        let roles = Arc::new(RoleStore::new(connection));

        let encoder = Arc::new(Argon2PasswordEncoder::new());
        let token_service = Arc::new(JwtTokenService::new(jwt));
        let authentication_manager = Arc::new(MemberAuthenticationManager::new(
            members.clone(),
            encoder.clone(),
        ));

        let sign_service = Arc::new(SignManager::new(
            members.clone(),
            roles,
            encoder,
            authentication_manager,
            token_service.clone(),
        ));
        let member_service = Arc::new(MemberManager::new(members));

        Self::new(sign_service, member_service, token_service, Arc::new(database))
    }
}
