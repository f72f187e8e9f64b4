//! Shared helpers for the Crescent Commerce integration tests.
//!
//! These tests exercise full flows (browse, cart, checkout, subscribe,
//! admin) in process against the in-memory store, so they need no
//! external services and run under plain `cargo test`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use crescent_core::{DocumentStore, Product, ProductId, StoreError, collections, encode};
use crescent_storefront::checkout::BillingForm;
use crescent_storefront::config::StorefrontConfig;
use crescent_storefront::state::AppState;
use crescent_storefront::store::MemoryStore;

/// A seeded application state plus direct access to the backing store.
pub struct TestContext {
    pub state: AppState<MemoryStore>,
}

impl TestContext {
    /// Build a context with the sample catalog already in the store.
    ///
    /// # Panics
    ///
    /// Panics if seeding fails, which the in-memory store never does.
    #[allow(clippy::unwrap_used)]
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        for product in sample_products() {
            let key = product.id.as_str().to_owned();
            store
                .put(collections::PRODUCTS, &key, encode(&product).unwrap())
                .await
                .unwrap();
        }
        Self {
            state: AppState::new(StorefrontConfig::default(), store),
        }
    }

    /// The shared store handle, for direct inspection.
    #[must_use]
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(self.state.store())
    }
}

/// A small catalog covering two categories and a couple of price points.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    let product = |id: &str, title: &str, category: &str, color: &str, rating: u8, cents: i64| {
        Product {
            id: ProductId::new(id),
            title: title.to_owned(),
            tag: "Electronics".to_owned(),
            category: category.to_owned(),
            color: color.to_owned(),
            rating,
            reviews: 40,
            price: Decimal::new(cents, 2),
            compare_at: None,
            image: format!("assets/img/shop/{id}.jpg"),
            sale_percent: 0,
            is_new: false,
            sku: None,
        }
    };
    vec![
        product("1", "Wireless Optical Mouse", "Mouse", "Black", 4, 20_99),
        product("2", "Gaming Mechanical Keyboard", "Keyboard", "Black", 5, 90_99),
        product("3", "Wireless Bluetooth Keyboard", "Keyboard", "White", 4, 55_99),
        product("4", "1TB NVMe SSD", "SSD", "Black", 5, 90_99),
    ]
}

/// A billing form that passes validation.
#[must_use]
pub fn valid_billing_form() -> BillingForm {
    BillingForm {
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        company: String::new(),
        country: "India".to_owned(),
        street1: "42 Market Road".to_owned(),
        street2: String::new(),
        town: "Chennai".to_owned(),
        zip: "600001".to_owned(),
        phone: "+91 98765 43210".to_owned(),
        email: "john@example.com".to_owned(),
        note: String::new(),
    }
}

/// A store wrapper that fails writes to chosen collections.
///
/// Used to drive the checkout rollback path: the order append succeeds
/// against the inner store, then the follow-up write fails here.
pub struct FailingStore {
    inner: MemoryStore,
    failing_collections: HashSet<String>,
}

impl FailingStore {
    #[must_use]
    pub fn failing_writes_to(collections: &[&str]) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing_collections: collections.iter().map(|&c| c.to_owned()).collect(),
        }
    }

    pub const fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self, collection: &str) -> Result<(), StoreError> {
        if self.failing_collections.contains(collection) {
            Err(StoreError::Unavailable(format!(
                "injected failure for {collection}"
            )))
        } else {
            Ok(())
        }
    }
}

impl DocumentStore for FailingStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(collection, key).await
    }

    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        self.check(collection)?;
        self.inner.put(collection, key, document).await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        self.inner.delete(collection, key).await
    }

    async fn append(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        self.check(collection)?;
        self.inner.append(collection, document).await
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        self.inner.query(collection, field, value).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
        self.inner.list(collection).await
    }
}
