/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.network")]
    Network,
    #[error("repository.remote")]
    Remote { status: u16 },
    #[error("repository.decode")]
    Decode,
    #[error("repository.invalid_id")]
    InvalidId,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn network() -> Self {
        RepositoryError::Network
    }
    pub fn remote(status: u16) -> Self {
        RepositoryError::Remote { status }
    }
    pub fn decode() -> Self {
        RepositoryError::Decode
    }
    pub fn invalid_id() -> Self {
        RepositoryError::InvalidId
    }
}
