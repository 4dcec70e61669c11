//! Unified error handling for cart operations.
//!
//! Every mutation returns `Result<(), CartError>`; the store additionally
//! converts each failure into exactly one user-facing [`Notice`] before
//! returning, so callers may ignore the error without losing feedback.
//!
//! [`Notice`]: crate::notify::Notice

use thiserror::Error;

use rocket_shoes_core::ProductId;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Errors that can occur during a cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// The targeted product has no entry in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The requested quantity is below the minimum of one unit.
    #[error("invalid quantity: {0}")]
    InvalidAmount(u32),

    /// The requested quantity exceeds the available stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    OutOfStock { requested: u32, available: u32 },

    /// A catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;
