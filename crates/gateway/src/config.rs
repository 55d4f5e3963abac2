//! Gateway configuration.

use common::{AppResult, DatabaseConfig, JwtConfig, ServerConfig};

/// Everything the HTTP server needs at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails when `JWT_SECRET` is missing or too short.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env()?,
        })
    }

    /// Override the bind address (CLI flags win over the environment).
    pub fn with_bind(mut self, host: String, port: u16) -> Self {
        self.server.host = host;
        self.server.port = port;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
