//! Crescent Admin - dashboard aggregation and order management.
//!
//! The admin side is a read/aggregate view over the same order and
//! subscription records the storefront writes, plus the one mutation the
//! storefront never performs: moving an order through its fulfillment
//! statuses.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod error;
pub mod orders;

pub use error::{AdminError, Result};
