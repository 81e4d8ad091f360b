use std::time::Duration;

use anyhow::{Context, bail};
use business::domain::errors::RepositoryError;
use reqwest::{Client, Response, StatusCode, Url};

/// Shared HTTP client for the storefront backend.
#[derive(Clone)]
pub struct StorefrontClient {
    pub client: Client,
    pub base_url: Url,
}

impl StorefrontClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build storefront HTTP client")?;

        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid storefront backend URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Storefront backend URL cannot carry a path: {}", base_url);
        }

        Ok(Self { client, base_url })
    }

    pub fn cart_url(&self, user_id: &str) -> Result<Url, RepositoryError> {
        self.endpoint(&["api", "cart", user_id])
    }

    pub fn add_to_cart_url(&self) -> Result<Url, RepositoryError> {
        self.endpoint(&["api", "cart", "addcart"])
    }

    pub fn update_cart_item_url(&self, item_id: &str) -> Result<Url, RepositoryError> {
        self.endpoint(&["api", "cart", "update", item_id])
    }

    pub fn cart_product_url(&self, user_id: &str, menu_id: &str) -> Result<Url, RepositoryError> {
        self.endpoint(&["api", "cart", user_id, menu_id])
    }

    pub fn place_order_url(&self) -> Result<Url, RepositoryError> {
        self.endpoint(&["api", "order", "place"])
    }

    pub fn my_orders_url(&self) -> Result<Url, RepositoryError> {
        self.endpoint(&["api", "order", "myorders"])
    }

    pub fn profile_url(&self, user_id: &str) -> Result<Url, RepositoryError> {
        self.endpoint(&["food-ordering-app", "api", "user", "profile", user_id])
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    ///
    /// Empty, `.` and `..` segments are refused since they would address a
    /// different route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RepositoryError> {
        if segments
            .iter()
            .any(|segment| matches!(*segment, "" | "." | ".."))
        {
            tracing::warn!(?segments, "Refusing storefront path with a relative segment");
            return Err(RepositoryError::invalid_id());
        }

        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| RepositoryError::invalid_id())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Maps a non-2xx status to the port error; `None` on success.
pub fn status_error(status: StatusCode) -> Option<RepositoryError> {
    if status.is_success() {
        None
    } else if status == StatusCode::NOT_FOUND {
        Some(RepositoryError::not_found())
    } else {
        Some(RepositoryError::remote(status.as_u16()))
    }
}

pub(crate) fn ensure_success(response: Response) -> Result<Response, RepositoryError> {
    match status_error(response.status()) {
        None => Ok(response),
        Some(err) => {
            tracing::warn!(url = %response.url(), status = %response.status(), "Storefront backend rejected request");
            Err(err)
        }
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> RepositoryError {
    tracing::warn!(error = %err, "Storefront backend unreachable");
    if err.is_decode() {
        RepositoryError::decode()
    } else {
        RepositoryError::network()
    }
}
