//! A single user's cart ledger.
//!
//! The ledger keeps the cart consistent with catalog identity: one line per
//! product id, quantities merged on repeat adds. Every mutation replaces
//! the user's stored cart document wholesale (last-writer-wins). Guest
//! carts live only in memory and never touch the store.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use crescent_core::{
    CartDocument, CartItem, DocumentStore, Product, ProductId, UserId, collections, decode, encode,
};

use crate::error::Result;

/// Image shown when a product has none.
const PLACEHOLDER_IMAGE: &str = "assets/img/default-product.png";

/// Cart totals. No tax or shipping applies in this storefront, so the
/// total equals the subtotal; coupon codes are display-only and never
/// reach this computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub total: Decimal,
}

/// Who owns a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CartOwner {
    /// Persisted under the user's key in the `carts` collection.
    User(UserId),
    /// Session-local; mutations skip the store entirely.
    Guest,
}

/// One user's cart and its persistence handle.
pub struct CartLedger<S> {
    store: Arc<S>,
    owner: CartOwner,
    items: Vec<CartItem>,
}

impl<S: DocumentStore> CartLedger<S> {
    /// Load a user's cart from the store. An absent cart document is an
    /// empty cart, not an error.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails or the document is corrupt.
    #[instrument(skip(store))]
    pub async fn load(store: Arc<S>, user: UserId) -> Result<Self> {
        let items = match store.get(collections::CARTS, user.as_str()).await? {
            Some(doc) => decode::<CartDocument>(doc)?.items,
            None => Vec::new(),
        };
        Ok(Self {
            store,
            owner: CartOwner::User(user),
            items,
        })
    }

    /// Create a session-local guest cart. Never persisted.
    pub fn guest(store: Arc<S>) -> Self {
        Self {
            store,
            owner: CartOwner::Guest,
            items: Vec::new(),
        }
    }

    /// Current line items.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Add a product to the cart, merging with an existing line.
    ///
    /// If a line with the same product id exists, its quantity grows by
    /// `qty` and its title, price and image are refreshed to the current
    /// catalog values ("price as of last add"); the originally selected
    /// sku and color stick. Otherwise a new line is appended. A `qty` of 0
    /// is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns a store error if persisting the updated cart fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_or_merge(
        &mut self,
        product: &Product,
        qty: u32,
        color: Option<&str>,
    ) -> Result<()> {
        let qty = qty.max(1);
        let image = if product.image.is_empty() {
            PLACEHOLDER_IMAGE.to_owned()
        } else {
            product.image.clone()
        };

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            existing.qty += qty;
            existing.title = product.title.clone();
            existing.price = product.price;
            existing.image = image;
        } else {
            self.items.push(CartItem {
                id: product.id.clone(),
                title: product.title.clone(),
                price: product.price,
                qty,
                image,
                sku: product.sku.clone(),
                color: color.map(str::to_owned),
            });
        }

        self.persist().await
    }

    /// Adjust a line's quantity by `delta`, flooring at 1. Driving a line
    /// to zero requires [`CartLedger::remove`]. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a store error if persisting the updated cart fails.
    #[instrument(skip(self))]
    pub async fn adjust_qty(&mut self, item_id: &ProductId, delta: i64) -> Result<()> {
        let Some(item) = self.items.iter_mut().find(|i| &i.id == item_id) else {
            return Ok(());
        };

        let next = (i64::from(item.qty) + delta).max(1);
        item.qty = u32::try_from(next).unwrap_or(u32::MAX);

        self.persist().await
    }

    /// Delete a line. Absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a store error if persisting the updated cart fails.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, item_id: &ProductId) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist().await
    }

    /// Compute the cart totals: `subtotal = Σ price·qty`, `total = subtotal`.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal: Decimal = self.items.iter().map(CartItem::line_total).sum();
        CartTotals {
            subtotal,
            total: subtotal,
        }
    }

    /// Empty the cart and persist the empty document.
    ///
    /// The stored document is written first; the in-memory items are
    /// dropped only once that write succeeds, so a failed clear leaves the
    /// ledger and the store agreeing on the old contents.
    ///
    /// # Errors
    ///
    /// Returns a store error if persisting fails.
    pub(crate) async fn clear(&mut self) -> Result<()> {
        if let CartOwner::User(user) = &self.owner {
            let doc = encode(&CartDocument { items: Vec::new() })?;
            self.store
                .put(collections::CARTS, user.as_str(), doc)
                .await?;
        }
        self.items.clear();
        Ok(())
    }

    /// Write the full cart document for user-owned carts; guests skip the
    /// store.
    async fn persist(&self) -> Result<()> {
        let CartOwner::User(user) = &self.owner else {
            return Ok(());
        };
        let doc = encode(&CartDocument {
            items: self.items.clone(),
        })?;
        self.store
            .put(collections::CARTS, user.as_str(), doc)
            .await?;
        Ok(())
    }
}
