//! Cart line items and the stored cart document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One line in a cart: a product reference, its quantity, and the price as
/// of the last add.
///
/// Identity key is `id`; no two items in the same cart share one. Merging
/// combines quantity instead of duplicating the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    /// Always at least 1.
    pub qty: u32,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Variant selected when the line was first added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CartItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

/// The stored cart document, keyed by user id in the `carts` collection.
///
/// Replaced wholesale on every mutation; cleared (set to empty) atomically
/// with order creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDocument {
    #[serde(default)]
    pub items: Vec<CartItem>,
}
