use crate::domain::shared::value_objects::UserId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity.missing_credential")]
    MissingCredential,
    #[error("identity.invalid_credential")]
    InvalidCredential,
}

/// Port resolving the session credential presented by the storefront
/// into the user every cart, checkout and order operation runs for.
///
/// The cart core never reads cookies or tokens itself; the edge hands it
/// an already resolved [`UserId`].
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, credential: &str) -> Result<UserId, IdentityError>;
}
