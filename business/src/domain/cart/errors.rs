use crate::domain::errors::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("cart.fetch_failed")]
    Fetch(#[source] RepositoryError),
    #[error("cart.not_found")]
    NotFound,
    #[error("cart.quantity_below_minimum")]
    QuantityBelowMinimum,
    #[error("cart.mutation_in_progress")]
    MutationInProgress,
    #[error("cart.discarded")]
    Discarded,
    #[error("cart.remote_failed")]
    Remote(#[source] RepositoryError),
}

impl CartError {
    /// Maps a failed mutation round-trip. A remote 404 means the line is gone,
    /// and an id that cannot address a backend resource names no line either.
    pub fn from_remote(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound | RepositoryError::InvalidId => CartError::NotFound,
            other => CartError::Remote(other),
        }
    }
}
