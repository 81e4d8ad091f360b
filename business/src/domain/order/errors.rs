use crate::domain::errors::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order.no_draft")]
    NoDraft,
    #[error("order.payment_mode_missing")]
    PaymentModeMissing,
    #[error("order.fetch_failed")]
    Fetch(#[source] RepositoryError),
    #[error("order.remote_failed")]
    Remote(#[source] RepositoryError),
}
