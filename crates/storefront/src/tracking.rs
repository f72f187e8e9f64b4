//! Order tracking: read-only fulfillment progress.
//!
//! The tracker computes display state from an order's status; it never
//! mutates anything. Status changes come from the admin side and are
//! accepted as given, including backward moves.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use crescent_core::{
    DocumentStore, Order, OrderId, OrderRecord, OrderStatus, UserId, collections, decode,
};

use crate::error::{Result, StorefrontError};

/// Display copy for one step of the fulfillment progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub description: &'static str,
}

/// The four fulfillment steps, in progression order.
pub const STATUS_STEPS: [StatusStep; 4] = [
    StatusStep {
        status: OrderStatus::Pending,
        label: "Order Placed",
        description: "Your order has been received and is being processed.",
    },
    StatusStep {
        status: OrderStatus::Processing,
        label: "Processing",
        description: "Your order is being prepared for shipment.",
    },
    StatusStep {
        status: OrderStatus::Shipped,
        label: "Shipped",
        description: "Your order has been shipped and is on its way.",
    },
    StatusStep {
        status: OrderStatus::Delivered,
        label: "Delivered",
        description: "Your order has been successfully delivered.",
    },
];

/// One rendered step in the progress bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub label: &'static str,
    pub description: &'static str,
    /// At or before the current step.
    pub completed: bool,
    pub current: bool,
}

/// Serializable view-model for an order's tracking display. Passed as-is
/// to whatever renders it; no framework state involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingView {
    pub steps: Vec<StepView>,
    /// `(step index + 1) / step count`, as a percentage.
    pub progress_percent: u32,
}

/// Fraction of the progression completed, for the progress bar fill.
#[must_use]
#[allow(clippy::cast_precision_loss)] // 4 steps
pub fn progress(status: OrderStatus) -> f64 {
    (status.step_index() + 1) as f64 / STATUS_STEPS.len() as f64
}

/// Build the tracking view-model for an order.
#[must_use]
pub fn tracking_view(order: &Order) -> TrackingView {
    let current = order.status.step_index();
    let steps = STATUS_STEPS
        .iter()
        .enumerate()
        .map(|(i, step)| StepView {
            label: step.label,
            description: step.description,
            completed: i <= current,
            current: i == current,
        })
        .collect();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let progress_percent = (progress(order.status) * 100.0).round() as u32;

    TrackingView {
        steps,
        progress_percent,
    }
}

/// Read-only order lookups for the tracking page.
pub struct OrderTracker<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> OrderTracker<S> {
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All orders placed by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails or a document is corrupt.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user: &UserId) -> Result<Vec<OrderRecord>> {
        let documents = self
            .store
            .query(collections::ORDERS, "userId", &json!(user.as_str()))
            .await?;

        let mut records = Vec::with_capacity(documents.len());
        for (key, doc) in documents {
            records.push(OrderRecord {
                id: OrderId::new(key),
                order: decode(doc)?,
            });
        }
        records.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
        Ok(records)
    }

    /// Look up one order by id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such order exists; a store error otherwise.
    #[instrument(skip(self))]
    pub async fn find_order(&self, order_id: &OrderId) -> Result<OrderRecord> {
        let doc = self
            .store
            .get(collections::ORDERS, order_id.as_str())
            .await?
            .ok_or_else(|| StorefrontError::NotFound(format!("order {order_id}")))?;
        Ok(OrderRecord {
            id: order_id.clone(),
            order: decode(doc)?,
        })
    }
}
