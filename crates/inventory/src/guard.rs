//! Assignment check run before every resolution.

use std::sync::Arc;

use stockconf_core::{ConfigError, ConfigResult, ProductStockKey};

use crate::provider::AssignmentIndex;

/// Rejects (sku, stock) pairs that are not currently assigned.
#[derive(Clone)]
pub struct AssignmentGuard {
    index: Arc<dyn AssignmentIndex>,
}

impl AssignmentGuard {
    pub fn new(index: Arc<dyn AssignmentIndex>) -> Self {
        Self { index }
    }

    pub fn verify(&self, key: &ProductStockKey) -> ConfigResult<()> {
        if self.index.is_assigned(&key.sku, key.stock_id)? {
            return Ok(());
        }
        tracing::warn!(sku = %key.sku, stock_id = %key.stock_id, "product is not assigned to stock");
        Err(ConfigError::not_assigned(key.sku.as_str(), key.stock_id.get()))
    }
}

impl core::fmt::Debug for AssignmentGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AssignmentGuard").finish_non_exhaustive()
    }
}
