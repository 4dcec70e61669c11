//! RocketShoes Core - Shared types library.
//!
//! This crate provides common types used across all RocketShoes components:
//! - `cart` - Cart engine library (stock-validated mutations, persistence)
//! - `cli` - Command-line driver for the cart engine
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and the catalog/cart records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
