//! In-memory configuration stores for tests, fixtures and embedded use.
//!
//! Each store is an `RwLock`-guarded map; reads take the shared lock, so the
//! stores can serve concurrent resolutions. A poisoned lock surfaces as a
//! provider error on reads and writes alike, never as a panic or a dropped write.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockconf_core::{Sku, SourceCode, StockId};
use stockconf_inventory::{
    AssignmentIndex, Parameter, ProviderResult, ScopeConfiguration, SourceConfigurationProvider,
    SourceLinkIndex, StockConfigurationProvider,
};

fn read<T>(lock: &RwLock<T>) -> ProviderResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| anyhow::anyhow!("configuration store lock poisoned: {e}"))
}

fn write<T>(lock: &RwLock<T>) -> ProviderResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| anyhow::anyhow!("configuration store lock poisoned: {e}"))
}

/// Product-to-stock assignments.
#[derive(Debug, Default)]
pub struct InMemoryAssignmentIndex {
    inner: RwLock<HashSet<(Sku, StockId)>>,
}

impl InMemoryAssignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&self, sku: Sku, stock_id: StockId) -> ProviderResult<()> {
        let mut set = write(&self.inner)?;
        set.insert((sku, stock_id));
        Ok(())
    }

    pub fn unassign(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<()> {
        let mut set = write(&self.inner)?;
        set.remove(&(sku.clone(), stock_id));
        Ok(())
    }
}

impl AssignmentIndex for InMemoryAssignmentIndex {
    fn is_assigned(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<bool> {
        Ok(read(&self.inner)?.contains(&(sku.clone(), stock_id)))
    }
}

/// Source codes linked to each product within a stock, in link order.
#[derive(Debug, Default)]
pub struct InMemorySourceLinkIndex {
    inner: RwLock<HashMap<(Sku, StockId), Vec<SourceCode>>>,
}

impl InMemorySourceLinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a source; linking the same source twice keeps the first position.
    pub fn link(
        &self,
        sku: Sku,
        stock_id: StockId,
        source_code: SourceCode,
    ) -> ProviderResult<()> {
        let mut map = write(&self.inner)?;
        let codes = map.entry((sku, stock_id)).or_default();
        if !codes.contains(&source_code) {
            codes.push(source_code);
        }
        Ok(())
    }
}

impl SourceLinkIndex for InMemorySourceLinkIndex {
    fn source_codes_for(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<Vec<SourceCode>> {
        let map = read(&self.inner)?;
        Ok(map
            .get(&(sku.clone(), stock_id))
            .cloned()
            .unwrap_or_default())
    }
}

/// Stock-side records: per stock item, per stock, and global.
#[derive(Debug, Default)]
pub struct InMemoryStockConfiguration {
    items: RwLock<HashMap<(Sku, StockId), ScopeConfiguration>>,
    stocks: RwLock<HashMap<StockId, ScopeConfiguration>>,
    global: RwLock<ScopeConfiguration>,
}

impl InMemoryStockConfiguration {
    pub fn new(global: ScopeConfiguration) -> Self {
        Self {
            global: RwLock::new(global),
            ..Self::default()
        }
    }

    pub fn set_stock_item(
        &self,
        sku: Sku,
        stock_id: StockId,
        config: ScopeConfiguration,
    ) -> ProviderResult<()> {
        let mut map = write(&self.items)?;
        map.insert((sku, stock_id), config);
        Ok(())
    }

    pub fn set_stock(&self, stock_id: StockId, config: ScopeConfiguration) -> ProviderResult<()> {
        let mut map = write(&self.stocks)?;
        map.insert(stock_id, config);
        Ok(())
    }

    pub fn set_global(&self, config: ScopeConfiguration) -> ProviderResult<()> {
        let mut global = write(&self.global)?;
        *global = config;
        Ok(())
    }
}

impl StockConfigurationProvider for InMemoryStockConfiguration {
    fn for_stock_item(&self, sku: &Sku, stock_id: StockId) -> ProviderResult<ScopeConfiguration> {
        let map = read(&self.items)?;
        Ok(map.get(&(sku.clone(), stock_id)).cloned().unwrap_or_default())
    }

    fn for_stock(&self, stock_id: StockId) -> ProviderResult<ScopeConfiguration> {
        Ok(read(&self.stocks)?.get(&stock_id).cloned().unwrap_or_default())
    }

    fn for_global(&self) -> ProviderResult<ScopeConfiguration> {
        Ok(read(&self.global)?.clone())
    }
}

/// Source-side backorder records: per source item, per source, and global.
#[derive(Debug, Default)]
pub struct InMemorySourceConfiguration {
    items: RwLock<HashMap<(Sku, SourceCode), ScopeConfiguration>>,
    sources: RwLock<HashMap<SourceCode, ScopeConfiguration>>,
    global: RwLock<ScopeConfiguration>,
}

impl InMemorySourceConfiguration {
    pub fn new(global_backorders: i64) -> Self {
        Self {
            global: RwLock::new(
                ScopeConfiguration::new().with(Parameter::Backorders, global_backorders),
            ),
            ..Self::default()
        }
    }

    pub fn set_source_item(
        &self,
        sku: Sku,
        source_code: SourceCode,
        config: ScopeConfiguration,
    ) -> ProviderResult<()> {
        let mut map = write(&self.items)?;
        map.insert((sku, source_code), config);
        Ok(())
    }

    pub fn set_source(&self, source_code: SourceCode, config: ScopeConfiguration) -> ProviderResult<()> {
        let mut map = write(&self.sources)?;
        map.insert(source_code, config);
        Ok(())
    }

    pub fn set_global(&self, config: ScopeConfiguration) -> ProviderResult<()> {
        let mut global = write(&self.global)?;
        *global = config;
        Ok(())
    }
}

impl SourceConfigurationProvider for InMemorySourceConfiguration {
    fn for_source_item(
        &self,
        sku: &Sku,
        source_code: &SourceCode,
    ) -> ProviderResult<ScopeConfiguration> {
        let map = read(&self.items)?;
        Ok(map
            .get(&(sku.clone(), source_code.clone()))
            .cloned()
            .unwrap_or_default())
    }

    fn for_source(&self, source_code: &SourceCode) -> ProviderResult<ScopeConfiguration> {
        Ok(read(&self.sources)?.get(source_code).cloned().unwrap_or_default())
    }

    fn for_global(&self) -> ProviderResult<ScopeConfiguration> {
        Ok(read(&self.global)?.clone())
    }
}
