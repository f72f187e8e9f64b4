//! Crescent Storefront - catalog, cart, checkout and subscription logic.
//!
//! Everything here is in-process: there is no wire protocol. The storefront
//! is handed a [`crescent_core::DocumentStore`] implementation at
//! construction (see [`state::AppState`]) and exposes the operations the
//! shop pages need:
//!
//! - [`catalog`] - pure filter/sort/paginate queries over the product set
//! - [`cart`] - a single user's cart ledger, persisted whole on mutation
//! - [`checkout`] - billing validation and the cart-to-order handoff
//! - [`tracking`] - read-only fulfillment progress for placed orders
//! - [`subscription`] - the parallel service-package flow
//! - [`store`] - the bundled in-memory store backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod subscription;
pub mod tracking;

pub use error::{Result, StorefrontError};
