use super::model::CheckoutField;
use crate::domain::cart::errors::CartError;
use crate::domain::errors::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("checkout.{0}_required")]
    Validation(CheckoutField),
    #[error("checkout.empty_cart")]
    EmptyCart,
    #[error("checkout.no_draft")]
    NoDraft,
    #[error("checkout.remote_failed")]
    Remote(#[source] RepositoryError),
    #[error(transparent)]
    Cart(#[from] CartError),
}
