//! Unified error handling for storefront operations.
//!
//! Every public operation returns `Result<T, StorefrontError>`. Raw
//! [`StoreError`]s are converted at the operation boundary; no transport
//! error escapes as-is, and nothing here is fatal to the process.

use thiserror::Error;

use crescent_core::StoreError;

use crate::checkout::ValidationError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Billing or form input failed validation. Locally recoverable: the
    /// user corrects the input and resubmits.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A record that must exist does not. Carts and absent orders-by-user
    /// degrade to empty instead of raising this.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A locally rejected duplicate (e.g., an asset serial number already
    /// registered). No write is attempted.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Talking to the document store failed. Surfaced as a retryable
    /// message; there is no automatic retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(StoreError),
}

impl From<StoreError> for StorefrontError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err)
    }
}

impl StorefrontError {
    /// Whether retrying the same call may succeed without user action.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_retryable() {
        let err =
            StorefrontError::from(StoreError::Unavailable("connection refused".to_owned()));
        assert!(err.is_retryable());
        assert!(err.to_string().starts_with("Store unavailable"));
    }

    #[test]
    fn test_duplicate_is_not_retryable() {
        let err = StorefrontError::Duplicate("serial SN-1".to_owned());
        assert!(!err.is_retryable());
    }
}
