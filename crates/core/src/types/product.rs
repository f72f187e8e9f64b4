//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A purchasable product in the catalog.
///
/// Read-only to the storefront; created and owned by whoever maintains the
/// `products` collection. Field names follow the stored document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Department tag (e.g., "Electronics").
    pub tag: String,
    pub category: String,
    pub color: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Review count.
    pub reviews: u32,
    pub price: Decimal,
    /// Pre-discount price, when the product is on sale.
    #[serde(default)]
    pub compare_at: Option<Decimal>,
    pub image: String,
    /// Discount badge percentage, 0 through 100.
    #[serde(default)]
    pub sale_percent: u8,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}
