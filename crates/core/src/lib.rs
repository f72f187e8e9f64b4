//! Crescent Core - Shared types library.
//!
//! This crate provides common types used across all Crescent Commerce
//! components:
//! - `storefront` - Catalog, cart, checkout and subscription logic
//! - `admin` - Dashboard aggregation and order management
//! - `cli` - Command-line demo and seeding tools
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no runtime, no
//! concrete storage backend. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, phones and prices, plus
//!   the domain records (products, carts, orders, subscriptions)
//! - [`store`] - The `DocumentStore` trait every storage backend implements

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod store;
pub mod types;

pub use store::*;
pub use types::*;
