use std::env;

/// Access to the operator order stream.
#[derive(Debug, Clone, Default)]
pub struct OperatorConfig {
    /// Stream disabled when unset.
    pub api_key: Option<String>,
}

impl OperatorConfig {
    /// Environment variables:
    /// - OPERATOR_API_KEY: key expected in the `x-api-key` header
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPERATOR_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}
