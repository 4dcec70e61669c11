//! Catalog API client for product metadata and stock levels.
//!
//! Uses `reqwest` for HTTP against the read-only catalog endpoints
//! `GET products/{id}` and `GET stock/{id}`. Product metadata is cached
//! with `moka` (5-minute TTL). Stock is NEVER cached: availability is
//! authoritative only at the moment it is fetched, and every cart
//! mutation re-reads it.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use rocket_shoes_core::{Product, ProductId, Stock};

use crate::config::CatalogConfig;

const PRODUCT_CACHE_CAPACITY: u64 = 1000;
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when querying the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failed (connection, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog has no record for the requested id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The catalog answered with a non-success status.
    #[error("Catalog returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built from the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Read-only access to product metadata and stock levels.
///
/// The seam between the cart store and the remote catalog: production
/// code injects [`CatalogClient`], tests inject in-memory fixtures.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Fetch product metadata by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the lookup fails.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the available stock for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the stock record is unknown or the lookup fails.
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}

// =============================================================================
// CatalogClient
// =============================================================================

/// HTTP client for the catalog API.
///
/// Cheaply cloneable via `Arc`. Product metadata is cached for 5 minutes;
/// stock lookups always hit the API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: url::Url,
    api_token: Option<String>,
    products: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let products = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                api_token: config
                    .api_token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string()),
                products,
            }),
        })
    }

    /// Execute a GET request against a catalog path and decode the body.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.inner.products.invalidate(&id).await;
    }

    /// Invalidate all cached products.
    pub async fn invalidate_all(&self) {
        self.inner.products.invalidate_all();
        self.inner.products.run_pending_tasks().await;
    }
}

impl Catalog for CatalogClient {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        // Check cache
        if let Some(product) = self.inner.products.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self.fetch(&format!("products/{id}")).await?;

        // Cache the result
        self.inner.products.insert(id, product.clone()).await;

        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.fetch(&format!("stock/{id}")).await
    }
}
