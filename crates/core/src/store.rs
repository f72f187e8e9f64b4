//! The document-store abstraction.
//!
//! All persistence goes through [`DocumentStore`]: an opaque collaborator
//! offering whole-document reads and writes over named collections. There
//! are no partial updates and no optimistic concurrency - every `put` is a
//! full overwrite with last-writer-wins semantics.
//!
//! Backends implement the trait (the storefront crate ships an in-memory
//! one); services stay generic over `S: DocumentStore` so the concrete
//! handle is injected by the application entry point.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Collection names used by the storefront and admin.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    /// Keyed by user id.
    pub const CARTS: &str = "carts";
    /// Keyed by user id.
    pub const BILLING_DETAILS: &str = "billingDetails";
    /// Generated keys.
    pub const ORDERS: &str = "orders";
    /// Generated keys.
    pub const SERVICE_SUBSCRIPTIONS: &str = "serviceSubscriptions";
    /// Written on subscribe; read for asset-id numbering.
    pub const USER_ASSETS: &str = "userAssets";
    pub const USERS: &str = "users";
}

/// Errors surfaced by a document-store backend.
///
/// Transport-level failures are folded into these categories at the store
/// boundary; callers never see raw backend errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    /// The caller is not allowed to touch this collection or key.
    #[error("permission denied for {collection}/{key}")]
    PermissionDenied { collection: String, key: String },
    /// The operation did not complete in time.
    #[error("document store timed out: {0}")]
    Timeout(String),
    /// A stored document could not be decoded into the expected shape.
    #[error("corrupt document: {0}")]
    Corrupt(String),
}

/// A key/value document store with named collections.
///
/// Documents cross this boundary as [`serde_json::Value`]; the typed
/// [`decode`] and [`encode`] helpers convert at call sites.
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by key, or `None` if absent.
    fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Write a document, replacing any existing one at this key.
    fn put(
        &self,
        collection: &str,
        key: &str,
        document: Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove a document; absent keys are a no-op.
    fn delete(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Append a document under a store-generated key and return the key.
    fn append(
        &self,
        collection: &str,
        document: Value,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// All documents whose `field` equals `value`.
    fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> impl Future<Output = Result<Vec<(String, Value)>, StoreError>> + Send;

    /// Every document in a collection, keyed.
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<(String, Value)>, StoreError>> + Send;
}

/// Decode a stored document into a typed record.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] when the document does not match the
/// expected shape.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Corrupt(e.to_string()))
}

/// Encode a typed record into a storable document.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] when the record cannot be represented
/// as a JSON document (e.g., non-string map keys).
pub fn encode<T: Serialize>(record: &T) -> Result<Value, StoreError> {
    serde_json::to_value(record).map_err(|e| StoreError::Corrupt(e.to_string()))
}
