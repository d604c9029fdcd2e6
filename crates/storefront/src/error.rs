//! Unified error handling.
//!
//! Provides a unified `AppError` type for operations that span several
//! stores. Host-facing entry points on [`Storefront`](crate::state::Storefront)
//! return `Result<T, AppError>`.

use thiserror::Error;

use crate::cart::CartError;
use crate::config::ConfigError;
use crate::extractor::ExtractError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A cart operation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// A catalog entry could not be turned into a product.
    #[error("Catalog error: {0}")]
    Extract(#[from] ExtractError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Referenced product does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Message suitable for showing to the shopper.
    ///
    /// Storage and configuration details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Cart(CartError::EmptyCart) => "Корзина пуста".to_string(),
            Self::Storage(_) | Self::Cart(CartError::Storage(_)) | Self::Config(_) => {
                "Не удалось сохранить изменения".to_string()
            }
            Self::Extract(_) => "Не удалось прочитать данные товара".to_string(),
            Self::NotFound(_) => "Товар не найден".to_string(),
        }
    }

    /// Whether the failure came from the storage backend.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Cart(CartError::Storage(_)))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
