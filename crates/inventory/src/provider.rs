//! Collaborator contracts consumed by the resolution core.
//!
//! The core never stores configuration itself. Storage, assignment indexes and
//! the source-link catalog live behind these traits and are injected into
//! [`crate::InventoryConfiguration`]. Implementations must tolerate concurrent
//! reads; any error they return is propagated to the caller unchanged.

use std::sync::Arc;

use stockconf_core::{Sku, SourceCode, StockId};

use crate::scope::ScopeConfiguration;

/// Result type returned by collaborators. Failures are opaque to the core.
pub type ProviderResult<T> = Result<T, anyhow::Error>;

/// Knows which products are currently assigned to which stocks.
pub trait AssignmentIndex: Send + Sync {
    fn is_assigned(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<bool>;
}

/// Maps a product within a stock to the sources that can fulfil it.
pub trait SourceLinkIndex: Send + Sync {
    /// Source codes linked to `sku` for `stock_id`, in link order, without duplicates.
    fn source_codes_for(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<Vec<SourceCode>>;
}

/// Stock-side configuration records.
pub trait StockConfigurationProvider: Send + Sync {
    fn for_stock_item(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<ScopeConfiguration>;
    fn for_stock(&self, stock_id: StockId) -> ProviderResult<ScopeConfiguration>;
    /// Global record; expected to define every stock-side parameter.
    fn for_global(&self) -> ProviderResult<ScopeConfiguration>;
}

/// Source-side configuration records. Only backorders are read from these.
pub trait SourceConfigurationProvider: Send + Sync {
    fn for_source_item(&self, sku: &Sku, source_code: &SourceCode)
    -> ProviderResult<ScopeConfiguration>;
    fn for_source(&self, source_code: &SourceCode) -> ProviderResult<ScopeConfiguration>;
    /// Global record; expected to define backorders.
    fn for_global(&self) -> ProviderResult<ScopeConfiguration>;
}

/// System-wide default minimum sale quantity.
pub trait SystemMinSaleQty: Send + Sync {
    fn min_sale_qty(&self) -> ProviderResult<f64>;
}

impl<T> AssignmentIndex for Arc<T>
where
    T: AssignmentIndex + ?Sized,
{
    fn is_assigned(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<bool> {
        (**self).is_assigned(sku, stock_id)
    }
}

impl<T> SourceLinkIndex for Arc<T>
where
    T: SourceLinkIndex + ?Sized,
{
    fn source_codes_for(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<Vec<SourceCode>> {
        (**self).source_codes_for(sku, stock_id)
    }
}

impl<T> StockConfigurationProvider for Arc<T>
where
    T: StockConfigurationProvider + ?Sized,
{
    fn for_stock_item(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<ScopeConfiguration> {
        (**self).for_stock_item(sku, stock_id)
    }

    fn for_stock(&self, stock_id: StockId) -> ProviderResult<ScopeConfiguration> {
        (**self).for_stock(stock_id)
    }

    fn for_global(&self) -> ProviderResult<ScopeConfiguration> {
        (**self).for_global()
    }
}

impl<T> SourceConfigurationProvider for Arc<T>
where
    T: SourceConfigurationProvider + ?Sized,
{
    fn for_source_item(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
    ) -> ProviderResult<ScopeConfiguration> {
        (**self).for_source_item(sku, source_code)
    }

    fn for_source(&self, source_code: &SourceCode) -> ProviderResult<ScopeConfiguration> {
        (**self).for_source(source_code)
    }

    fn for_global(&self) -> ProviderResult<ScopeConfiguration> {
        (**self).for_global()
    }
}

impl<T> SystemMinSaleQty for Arc<T>
where
    T: SystemMinSaleQty + ?Sized,
{
    fn min_sale_qty(&self) -> ProviderResult<f64> {
        (**self).min_sale_qty()
    }
}

/// Fixed minimum sale quantity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConstantMinSaleQty(pub f64);

impl SystemMinSaleQty for ConstantMinSaleQty {
    fn min_sale_qty(&self) -> ProviderResult<f64> {
        Ok(self.0)
    }
}
