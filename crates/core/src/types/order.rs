//! Billing details and the immutable order record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::email::Email;
use super::id::{OrderId, UserId};
use super::phone::Phone;
use super::status::OrderStatus;

/// Validated billing details, snapshotted onto each order.
///
/// The checkout form collects these as raw strings; this type only exists
/// after validation has passed, so `email` and `phone` are the typed
/// wrappers rather than free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub country: String,
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub town: String,
    pub zip: String,
    pub phone: Phone,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BillingDetails {
    /// Customer display name, "First Last".
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The stored order document.
///
/// Created exactly once at checkout from a snapshot of the cart; immutable
/// afterwards except for `status`, which an admin moves through the
/// fulfillment progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub user_id: UserId,
    /// Copied, not referenced, from the cart at checkout time.
    pub items: Vec<CartItem>,
    pub billing_details: BillingDetails,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// An order together with its store-generated key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    #[serde(flatten)]
    pub order: Order,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;

    fn billing() -> BillingDetails {
        BillingDetails {
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            company: None,
            country: "India".to_owned(),
            street1: "1 Main St".to_owned(),
            street2: None,
            town: "Mumbai".to_owned(),
            zip: "400001".to_owned(),
            phone: Phone::parse("1234567890").unwrap(),
            email: Email::parse("john@example.com").unwrap(),
            note: None,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(billing().display_name(), "John Doe");
    }

    #[test]
    fn test_order_record_flattens_document() {
        let order = Order {
            user_id: UserId::new("user-001"),
            items: vec![CartItem {
                id: ProductId::new("1"),
                title: "Wireless Headphones".to_owned(),
                price: Decimal::from(150),
                qty: 1,
                image: String::new(),
                sku: None,
                color: None,
            }],
            billing_details: billing(),
            total: Decimal::from(150),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        let record = OrderRecord {
            id: OrderId::new("order-abc"),
            order,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "order-abc");
        assert_eq!(json["userId"], "user-001");
        assert_eq!(json["status"], "pending");

        let back: OrderRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
