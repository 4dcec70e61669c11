//! Core types for RocketShoes.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;
pub mod price;

pub use catalog::{CartItem, Product, Stock};
pub use id::*;
pub use price::Price;
