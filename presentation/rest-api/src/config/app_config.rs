use super::{
    backend_config::BackendConfig, cart_config::CartConfig, cors_config,
    identity_config::IdentityConfig, operator_config::OperatorConfig, server_config::ServerConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub backend: BackendConfig,
    pub identity: IdentityConfig,
    pub cart: CartConfig,
    pub operator: OperatorConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            cors: cors_config::init_cors(),
            backend: BackendConfig::from_env()?,
            identity: IdentityConfig::from_env()?,
            cart: CartConfig::from_env()?,
            operator: OperatorConfig::from_env(),
        })
    }
}
