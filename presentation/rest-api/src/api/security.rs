use std::sync::Arc;

use business::domain::identity::{IdentityError, IdentityProvider};
use business::domain::shared::value_objects::UserId;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use poem::Request;
use poem_openapi::{SecurityScheme, auth::ApiKey};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Compatibility mode: the `token` cookie holds the user id in clear.
pub struct LegacyCookieIdentity;

impl IdentityProvider for LegacyCookieIdentity {
    fn resolve(&self, credential: &str) -> Result<UserId, IdentityError> {
        let user_id = credential.trim();
        if user_id.is_empty() {
            return Err(IdentityError::MissingCredential);
        }
        Ok(UserId::new(user_id))
    }
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct SessionClaims {
    sub: String,
    exp: u64,
}

/// The `token` cookie carries an HS256 session token whose `sub` is the user id.
pub struct SignedSessionIdentity {
    key: DecodingKey,
    validation: Validation,
}

impl SignedSessionIdentity {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl IdentityProvider for SignedSessionIdentity {
    fn resolve(&self, credential: &str) -> Result<UserId, IdentityError> {
        if credential.trim().is_empty() {
            return Err(IdentityError::MissingCredential);
        }

        let token_data = decode::<SessionClaims>(credential, &self.key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Session token rejected: {e}");
                IdentityError::InvalidCredential
            })?;

        let sub = token_data.claims.sub.trim();
        if sub.is_empty() {
            return Err(IdentityError::InvalidCredential);
        }
        Ok(UserId::new(sub))
    }
}

/// Storefront session cookie
#[derive(SecurityScheme)]
#[oai(
    ty = "api_key",
    key_name = "token",
    key_in = "cookie",
    checker = "session_checker"
)]
pub struct SessionCookie(pub UserId);

async fn session_checker(req: &Request, api_key: ApiKey) -> Option<UserId> {
    let provider = req.data::<Arc<dyn IdentityProvider>>()?;

    match provider.resolve(&api_key.key) {
        Ok(user_id) => Some(user_id),
        Err(e) => {
            tracing::warn!("Session rejected: {e}");
            None
        }
    }
}

/// Key guarding the operator endpoints. No key configured means no access.
///
/// Only the SHA-256 digest of the key is kept. Presented keys are hashed and
/// compared digest to digest in constant time.
#[derive(Debug, Clone, Default)]
pub struct OperatorAccess {
    key_digest: Option<[u8; 32]>,
}

impl OperatorAccess {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            key_digest: api_key.as_deref().map(key_digest),
        }
    }

    pub fn allows(&self, presented: &str) -> bool {
        let Some(expected) = &self.key_digest else {
            return false;
        };
        let presented = key_digest(presented);
        let diff = expected
            .iter()
            .zip(presented.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        diff == 0
    }
}

fn key_digest(key: &str) -> [u8; 32] {
    Sha256::digest(key.as_bytes()).into()
}

/// Operator API key
#[derive(SecurityScheme)]
#[oai(
    ty = "api_key",
    key_name = "x-api-key",
    key_in = "header",
    checker = "operator_checker"
)]
#[allow(dead_code)]
pub struct OperatorKey(());

async fn operator_checker(req: &Request, api_key: ApiKey) -> Option<()> {
    let access = req.data::<OperatorAccess>()?;
    if access.allows(&api_key.key) {
        Some(())
    } else {
        tracing::warn!("Operator key rejected");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        exp: i64,
    }

    fn token(secret: &str, sub: &str, exp_offset_secs: i64) -> String {
        let claims = Claims {
            sub,
            exp: Utc::now().timestamp() + exp_offset_secs,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn should_use_cookie_value_as_user_id_in_legacy_mode() {
        // Act
        let result = LegacyCookieIdentity.resolve("64f1c2ab");

        // Assert
        assert_eq!(result, Ok(UserId::new("64f1c2ab")));
    }

    #[test]
    fn should_reject_empty_legacy_cookie() {
        // Act & Assert
        assert_eq!(
            LegacyCookieIdentity.resolve("  "),
            Err(IdentityError::MissingCredential)
        );
    }

    #[test]
    fn should_resolve_subject_of_signed_session() {
        // Arrange
        let identity = SignedSessionIdentity::new("s3cret");

        // Act
        let result = identity.resolve(&token("s3cret", "user-42", 3600));

        // Assert
        assert_eq!(result, Ok(UserId::new("user-42")));
    }

    #[test]
    fn should_reject_session_signed_with_other_secret() {
        // Arrange
        let identity = SignedSessionIdentity::new("s3cret");

        // Act
        let result = identity.resolve(&token("other", "user-42", 3600));

        // Assert
        assert_eq!(result, Err(IdentityError::InvalidCredential));
    }

    #[test]
    fn should_reject_expired_session() {
        // Arrange
        let identity = SignedSessionIdentity::new("s3cret");

        // Act
        let result = identity.resolve(&token("s3cret", "user-42", -3600));

        // Assert
        assert_eq!(result, Err(IdentityError::InvalidCredential));
    }

    #[test]
    fn should_reject_raw_user_id_in_signed_mode() {
        // Arrange
        let identity = SignedSessionIdentity::new("s3cret");

        // Act & Assert
        assert_eq!(
            identity.resolve("64f1c2ab"),
            Err(IdentityError::InvalidCredential)
        );
    }

    #[test]
    fn should_only_allow_configured_operator_key() {
        // Arrange
        let access = OperatorAccess::new(Some("k1".to_string()));

        // Act & Assert
        assert!(access.allows("k1"));
        assert!(!access.allows("k2"));
        assert!(!OperatorAccess::new(None).allows(""));
    }

    #[test]
    fn should_reject_operator_key_sharing_only_a_prefix() {
        // Arrange
        let access = OperatorAccess::new(Some("op-key-2024".to_string()));

        // Act & Assert
        assert!(!access.allows("op-key"));
        assert!(!access.allows("op-key-20245"));
        assert!(!access.allows(""));
        assert!(access.allows("op-key-2024"));
    }

    #[test]
    fn should_keep_only_digest_of_operator_key() {
        // Act
        let access = OperatorAccess::new(Some("k1".to_string()));

        // Assert
        assert_eq!(access.key_digest, Some(key_digest("k1")));
        assert!(!format!("{access:?}").contains("\"k1\""));
    }
}
