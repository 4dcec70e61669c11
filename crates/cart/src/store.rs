//! The cart store: stock-validated mutations over an ordered cart.
//!
//! `CartStore` owns the in-memory cart, seeded from storage when the
//! store opens. The three mutations validate against the catalog's
//! current stock, persist synchronously after success, and surface
//! exactly one notice per call. Dependencies are injected (catalog,
//! storage, notification sink) so every mutation path is testable with
//! in-memory doubles.
//!
//! Mutations take `&mut self`, so two operations on the same store can
//! never interleave; a failed operation leaves both the in-memory cart
//! and the persisted document at their last validated state.

use rust_decimal::Decimal;
use tracing::instrument;

use rocket_shoes_core::{CartItem, ProductId};

use crate::catalog::Catalog;
use crate::error::{CartError, Result};
use crate::notify::{Notice, NotificationSink};
use crate::storage::{CartStorage, StorageError};

/// Ordered, duplicate-free cart with stock-validated mutations.
///
/// Entries keep insertion order; newly added products append. No two
/// entries share a product id, and every amount is at least one and was
/// within stock when last validated.
pub struct CartStore<C, S, N> {
    items: Vec<CartItem>,
    catalog: C,
    storage: S,
    sink: N,
}

impl<C, S, N> CartStore<C, S, N>
where
    C: Catalog,
    S: CartStorage,
    N: NotificationSink,
{
    /// Open a store, seeding the cart from persisted storage.
    ///
    /// An absent document yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if a persisted document exists but cannot be
    /// read or decoded.
    pub fn open(catalog: C, storage: S, sink: N) -> std::result::Result<Self, StorageError> {
        let items = storage.load()?.unwrap_or_default();

        Ok(Self {
            items,
            catalog,
            storage,
            sink,
        })
    }

    /// The cart entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of price times quantity across all entries.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.product.price.line_total(item.amount))
            .sum()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its quantity incremented; a new
    /// product is fetched from the catalog and appended with quantity
    /// one. Either way the requested quantity is validated against
    /// current stock before anything is committed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfStock` when the incremented quantity exceeds
    /// availability (or a new product has none), or the catalog/storage
    /// error that aborted the operation. A notice is emitted either way.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_product(&mut self, id: ProductId) -> Result<()> {
        match self.try_add(id).await {
            Ok(()) => {
                self.sink.notify(Notice::ProductAdded);
                Ok(())
            }
            Err(err) => Err(self.reject(Notice::AddFailed, err)),
        }
    }

    /// Remove a product from the cart.
    ///
    /// Removal never consults the catalog; taking items out of the cart
    /// is always permitted.
    ///
    /// # Errors
    ///
    /// Returns `NotInCart` if the product has no entry, or the storage
    /// error that aborted the operation.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_product(&mut self, id: ProductId) -> Result<()> {
        self.try_remove(id)
            .map_err(|err| self.reject(Notice::RemoveFailed, err))
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Rejects without a catalog call when `amount` is zero or the
    /// product is not in the cart; otherwise the quantity is validated
    /// against current stock.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `NotInCart`, `OutOfStock`, or the
    /// catalog/storage error that aborted the operation.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn update_product_amount(&mut self, id: ProductId, amount: u32) -> Result<()> {
        match self.try_update(id, amount).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.reject(Notice::UpdateFailed, err)),
        }
    }

    async fn try_add(&mut self, id: ProductId) -> Result<()> {
        let updated = match self.amount_of(id) {
            Some(current) => {
                let requested = current + 1;
                let stock = self.catalog.get_stock(id).await?;

                if requested > stock.amount {
                    return Err(CartError::OutOfStock {
                        requested,
                        available: stock.amount,
                    });
                }

                self.with_amount(id, requested)
            }
            None => {
                let product = self.catalog.get_product(id).await?;
                let stock = self.catalog.get_stock(id).await?;

                if stock.amount == 0 {
                    return Err(CartError::OutOfStock {
                        requested: 1,
                        available: 0,
                    });
                }

                let mut updated = self.items.clone();
                updated.push(CartItem::new(product, 1));
                updated
            }
        };

        self.commit(updated)
    }

    fn try_remove(&mut self, id: ProductId) -> Result<()> {
        if self.amount_of(id).is_none() {
            return Err(CartError::NotInCart(id));
        }

        let updated = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();

        self.commit(updated)
    }

    async fn try_update(&mut self, id: ProductId, amount: u32) -> Result<()> {
        if amount == 0 {
            return Err(CartError::InvalidAmount(amount));
        }
        if self.amount_of(id).is_none() {
            return Err(CartError::NotInCart(id));
        }

        let stock = self.catalog.get_stock(id).await?;
        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                requested: amount,
                available: stock.amount,
            });
        }

        let updated = self.with_amount(id, amount);
        self.commit(updated)
    }

    /// Persist `updated` and swap it in. Persisting first means a storage
    /// failure leaves the in-memory cart untouched.
    fn commit(&mut self, updated: Vec<CartItem>) -> Result<()> {
        self.storage.save(&updated)?;
        self.items = updated;
        Ok(())
    }

    /// Emit the notice for a failed operation and pass the error through.
    ///
    /// Stock exhaustion gets its own category; everything else collapses
    /// into the operation's generic failure notice.
    fn reject(&self, fallback: Notice, err: CartError) -> CartError {
        let notice = match err {
            CartError::OutOfStock { .. } => Notice::OutOfStock,
            _ => fallback,
        };
        self.sink.notify(notice);
        err
    }

    fn amount_of(&self, id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .map(|item| item.amount)
    }

    fn with_amount(&self, id: ProductId, amount: u32) -> Vec<CartItem> {
        self.items
            .iter()
            .map(|item| {
                if item.id() == id {
                    CartItem::new(item.product.clone(), amount)
                } else {
                    item.clone()
                }
            })
            .collect()
    }
}
