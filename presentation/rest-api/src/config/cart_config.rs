use std::env;

use business::domain::cart::quantity::DecrementPolicy;

#[derive(Debug, Clone, Copy, Default)]
pub struct CartConfig {
    pub decrement_policy: DecrementPolicy,
}

impl CartConfig {
    /// Environment variables:
    /// - CART_DECREMENT_POLICY: "reject" or "remove" (default: "reject")
    pub fn from_env() -> anyhow::Result<Self> {
        let decrement_policy = match env::var("CART_DECREMENT_POLICY") {
            Ok(raw) => raw.parse().map_err(anyhow::Error::msg)?,
            Err(_) => DecrementPolicy::default(),
        };
        Ok(Self { decrement_policy })
    }
}
