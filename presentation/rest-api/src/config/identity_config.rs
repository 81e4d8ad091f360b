use std::env;

/// How the `token` cookie is turned into a user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityConfig {
    /// The cookie value is the user id itself.
    Legacy,
    /// The cookie carries an HS256 session token signed with `secret`.
    Jwt { secret: String },
}

impl IdentityConfig {
    /// Environment variables:
    /// - IDENTITY_MODE: "legacy" or "jwt" (default: "legacy")
    /// - SESSION_SECRET: signing secret, required when IDENTITY_MODE is "jwt"
    pub fn from_env() -> anyhow::Result<Self> {
        let mode = env::var("IDENTITY_MODE").unwrap_or_else(|_| "legacy".to_string());
        Self::parse(&mode, env::var("SESSION_SECRET").ok())
    }

    fn parse(mode: &str, secret: Option<String>) -> anyhow::Result<Self> {
        match mode {
            "legacy" => Ok(IdentityConfig::Legacy),
            "jwt" => match secret.filter(|s| !s.is_empty()) {
                Some(secret) => Ok(IdentityConfig::Jwt { secret }),
                None => anyhow::bail!("SESSION_SECRET must be set when IDENTITY_MODE is jwt"),
            },
            other => anyhow::bail!("Invalid IDENTITY_MODE: {other}"),
        }
    }
}
