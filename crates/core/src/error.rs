//! Error model for configuration resolution.

use thiserror::Error;

/// Result type used across the resolution layer.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Resolution-level error.
///
/// Collaborator failures are carried opaquely in [`ConfigError::Provider`];
/// everything else is a deterministic failure of the request itself.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A request value failed validation (e.g. blank SKU, non-positive stock id).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The product is not assigned to the requested stock.
    #[error("product '{sku}' is not assigned to stock {stock_id}")]
    NotAssigned { sku: String, stock_id: i64 },

    /// A global-scope record lacked a value that must always be defined.
    #[error("global configuration does not define '{0}'")]
    MissingGlobal(&'static str),

    /// A configuration or index provider failed; passed through unchanged.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

impl ConfigError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_assigned(sku: impl Into<String>, stock_id: i64) -> Self {
        Self::NotAssigned {
            sku: sku.into(),
            stock_id,
        }
    }

    pub fn is_not_assigned(&self) -> bool {
        matches!(self, Self::NotAssigned { .. })
    }
}
