//! Remote catalog client.
//!
//! One-shot `GET` of the catalog endpoint with no timeout, retry or caching
//! layer. A failed fetch surfaces once as a [`FetchError`].

use thiserror::Error;
use tracing::instrument;
use url::Url;

use super::Product;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog endpoint answered with a non-success status.
    #[error("Catalog request returned HTTP {status}")]
    Status {
        /// Response status code.
        status: u16,
    },

    /// Response body was not a JSON array of products.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the product catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a client for the given catalog endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Endpoint this client fetches from.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the request fails, `FetchError::Status`
    /// for a non-2xx response, and `FetchError::Parse` if the body is not a
    /// product array.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch(&self) -> Result<Vec<Product>, FetchError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse catalog response");
            FetchError::Parse(e)
        })?;

        tracing::debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status { status: 503 };
        assert_eq!(err.to_string(), "Catalog request returned HTTP 503");
    }

    #[test]
    fn test_endpoint_is_kept() {
        let url = Url::parse("https://fakestoreapi.com/products").ok();
        let client = url.map(CatalogClient::new);
        assert_eq!(
            client.map(|c| c.endpoint().path().to_string()).as_deref(),
            Some("/products")
        );
    }
}
