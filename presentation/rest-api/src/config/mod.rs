pub mod app_config;
pub mod backend_config;
pub mod cart_config;
pub mod cors_config;
pub mod identity_config;
pub mod operator_config;
pub mod server_config;
