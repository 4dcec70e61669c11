//! Catalog and cart records.
//!
//! These mirror the catalog API's JSON documents (`products/{id}` and
//! `stock/{id}`) plus the persisted cart entry, which is a product with
//! the quantity the shopper intends to purchase.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product metadata as served by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

/// Available quantity for a product.
///
/// Authoritative at the moment it is fetched; never cached across cart
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// A cart entry: a product paired with the quantity in the cart.
///
/// Invariant: `amount >= 1`. Zero-quantity entries are removed, never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartItem {
    /// Create an entry for a product entering the cart.
    #[must_use]
    pub const fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }

    /// The product identifier for this entry.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Tênis de Caminhada Leve Confortável".to_string(),
            price: Price::new("179.9".parse().expect("valid decimal")),
            image: "https://cdn.rocketshoes.dev/images/shoes-1.jpg".to_string(),
        }
    }

    #[test]
    fn test_cart_item_flattens_product_fields() {
        let item = CartItem::new(shoe(), 2);
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["amount"], 2);
        assert_eq!(json["title"], "Tênis de Caminhada Leve Confortável");
        // No nested "product" object; entries persist flat like the
        // original storage document.
        assert!(json.get("product").is_none());
    }

    #[test]
    fn test_cart_item_round_trip() {
        let item = CartItem::new(shoe(), 3);
        let json = serde_json::to_string(&item).expect("serialize");
        let back: CartItem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, item);
    }
}
