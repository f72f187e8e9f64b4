//! Order administration.

use std::sync::Arc;

use tracing::instrument;

use crescent_core::{
    DocumentStore, OrderId, OrderRecord, OrderStatus, collections, decode, encode,
};

use crate::error::{AdminError, Result};

/// Admin-side order operations.
pub struct AdminOrders<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> AdminOrders<S> {
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every order in the store, newest first.
    ///
    /// # Errors
    ///
    /// Returns a store error if the collection cannot be read or a
    /// document is corrupt.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderRecord>> {
        let documents = self.store.list(collections::ORDERS).await?;
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

    /// Set an order's fulfillment status.
    ///
    /// Read-modify-write of the whole order document, last-writer-wins.
    /// Any status may be set, including backward moves; the tracker's
    /// display logic derives progress from whatever is stored.
    ///
    /// # Errors
    ///
    /// `NotFound` if the order does not exist; a store error otherwise.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<OrderRecord> {
        let doc = self
            .store
            .get(collections::ORDERS, order_id.as_str())
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("order {order_id}")))?;

        let mut order: crescent_core::Order = decode(doc)?;
        let previous = order.status;
        order.status = status;

        self.store
            .put(collections::ORDERS, order_id.as_str(), encode(&order)?)
            .await?;
        tracing::info!(%order_id, %previous, %status, "order status updated");

        Ok(OrderRecord {
            id: order_id.clone(),
            order,
        })
    }
}
