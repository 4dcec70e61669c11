//! RocketShoes Cart - Stock-validated cart engine.
//!
//! Client-side shopping-cart state management for the RocketShoes
//! storefront: adding a product, removing a product, and adjusting a
//! product's quantity, each validated against the catalog's current
//! stock and persisted to durable local storage after every successful
//! mutation.
//!
//! # Architecture
//!
//! - [`store::CartStore`] - the ordered in-memory cart and its mutations
//! - [`catalog`] - read-only remote lookups (`products/{id}`, `stock/{id}`)
//! - [`storage`] - the persistence boundary (single JSON document)
//! - [`notify`] - user-facing success/error notices
//!
//! All three dependencies are injected, so mutation paths are testable
//! in isolation with in-memory doubles.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartConfig, CartStore, CatalogClient, JsonFileStorage, TracingSink};
//! use rocket_shoes_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let catalog = CatalogClient::new(&config.catalog)?;
//! let storage = JsonFileStorage::new(&config.storage_path);
//! let mut store = CartStore::open(catalog, storage, TracingSink)?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! store.update_product_amount(ProductId::new(1), 3).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, CatalogClient, CatalogError};
pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use error::CartError;
pub use notify::{Notice, NotificationSink, RecordingSink, TracingSink};
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
