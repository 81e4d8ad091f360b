use std::env;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Location of the storefront backend that owns carts, profiles and orders.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl BackendConfig {
    /// Environment variables:
    /// - STOREFRONT_BACKEND_URL (default: "http://localhost:5000")
    /// - STOREFRONT_BACKEND_TIMEOUT_SECS (default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            env::var("STOREFRONT_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match env::var("STOREFRONT_BACKEND_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("STOREFRONT_BACKEND_TIMEOUT_SECS is not a number: {raw}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
