//! Error handling for admin operations.

use thiserror::Error;

use crescent_core::StoreError;

/// Application-level error type for the admin side.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A record that must exist does not.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Talking to the document store failed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(StoreError),
}

impl From<StoreError> for AdminError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err)
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
