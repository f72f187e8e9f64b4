//! Application state shared across storefront entry points.

use std::sync::Arc;

use crescent_core::{DocumentStore, UserId};

use crate::cart::CartLedger;
use crate::catalog::ProductCatalog;
use crate::checkout::OrderProcessor;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::subscription::SubscriptionService;
use crate::tracking::OrderTracker;

/// Application state shared across all storefront entry points.
///
/// Owns the storage handle; the application entry point constructs one
/// store and injects it here, and every service borrows the same `Arc`.
/// Cheaply cloneable.
pub struct AppState<S> {
    config: StorefrontConfig,
    store: Arc<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> AppState<S> {
    /// Create a new application state around a storage backend.
    pub fn new(config: StorefrontConfig, store: S) -> Self {
        Self {
            config,
            store: Arc::new(store),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get the shared storage handle.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Load the catalog snapshot for the configured department.
    ///
    /// # Errors
    ///
    /// Returns a store error if the product collection cannot be read.
    pub async fn load_catalog(&self) -> Result<ProductCatalog> {
        ProductCatalog::load(self.store.as_ref(), &self.config.department_tag).await
    }

    /// Load a user's cart ledger.
    ///
    /// # Errors
    ///
    /// Returns a store error if the cart document cannot be read.
    pub async fn cart_for(&self, user: UserId) -> Result<CartLedger<S>> {
        CartLedger::load(Arc::clone(&self.store), user).await
    }

    /// A session-local cart for an unauthenticated visitor.
    #[must_use]
    pub fn guest_cart(&self) -> CartLedger<S> {
        CartLedger::guest(Arc::clone(&self.store))
    }

    /// The order processor.
    #[must_use]
    pub fn orders(&self) -> OrderProcessor<S> {
        OrderProcessor::new(Arc::clone(&self.store))
    }

    /// The read-only order tracker.
    #[must_use]
    pub fn tracker(&self) -> OrderTracker<S> {
        OrderTracker::new(Arc::clone(&self.store))
    }

    /// The subscription service.
    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionService<S> {
        SubscriptionService::new(Arc::clone(&self.store))
    }
}
