//! Declarative configuration snapshots (JSON).
//!
//! A snapshot describes a whole configuration store: assignments, source links
//! and every scope's records. Loading it yields ready-to-inject collaborators.
//!
//! ```json
//! {
//!   "assignments": [{ "sku": "SKU1", "stock_id": 10, "sources": ["src-a"] }],
//!   "stock": {
//!     "global": { "min_qty": 1, "manage_stock": true },
//!     "stocks": [{ "stock_id": 10, "config": { "min_qty": 5 } }],
//!     "items": [{ "sku": "SKU1", "stock_id": 10, "config": { "is_qty_decimal": false } }]
//!   },
//!   "source": {
//!     "global": { "backorders": 0 },
//!     "sources": [{ "source_code": "src-a", "config": { "backorders": 1 } }],
//!     "items": [{ "sku": "SKU1", "source_code": "src-a", "config": { "backorders": 2 } }]
//!   },
//!   "system": { "min_sale_qty": 1 }
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockconf_core::{Sku, SourceCode, StockId};
use stockconf_inventory::{Collaborators, InventoryConfiguration, ScopeConfiguration};

use crate::memory::{
    InMemoryAssignmentIndex, InMemorySourceConfiguration, InMemorySourceLinkIndex,
    InMemoryStockConfiguration,
};
use crate::settings::SystemDefaults;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration store rejected snapshot: {0}")]
    Store(#[from] anyhow::Error),
}

/// A product assigned to a stock, with the sources feeding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub sku: Sku,
    pub stock_id: StockId,
    #[serde(default)]
    pub sources: Vec<SourceCode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub stock_id: StockId,
    pub config: ScopeConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItemRecord {
    pub sku: Sku,
    pub stock_id: StockId,
    pub config: ScopeConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub source_code: SourceCode,
    pub config: ScopeConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceItemRecord {
    pub sku: Sku,
    pub source_code: SourceCode,
    pub config: ScopeConfiguration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSection {
    #[serde(default)]
    pub global: ScopeConfiguration,
    #[serde(default)]
    pub stocks: Vec<StockRecord>,
    #[serde(default)]
    pub items: Vec<StockItemRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSection {
    #[serde(default)]
    pub global: ScopeConfiguration,
    #[serde(default)]
    pub sources: Vec<SourceRecord>,
    #[serde(default)]
    pub items: Vec<SourceItemRecord>,
}

/// Whole-store configuration description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    #[serde(default)]
    pub assignments: Vec<AssignmentRecord>,
    #[serde(default)]
    pub stock: StockSection,
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub system: SystemDefaults,
}

impl ConfigurationSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Populate in-memory stores with this snapshot.
    pub fn into_collaborators(self) -> Result<Collaborators, SnapshotError> {
        let assignments = InMemoryAssignmentIndex::new();
        let links = InMemorySourceLinkIndex::new();
        for record in self.assignments {
            for source_code in record.sources {
                links.link(record.sku.clone(), record.stock_id, source_code)?;
            }
            assignments.assign(record.sku, record.stock_id)?;
        }

        let stock = InMemoryStockConfiguration::new(self.stock.global);
        for record in self.stock.stocks {
            stock.set_stock(record.stock_id, record.config)?;
        }
        for record in self.stock.items {
            stock.set_stock_item(record.sku, record.stock_id, record.config)?;
        }

        let source = InMemorySourceConfiguration::default();
        source.set_global(self.source.global)?;
        for record in self.source.sources {
            source.set_source(record.source_code, record.config)?;
        }
        for record in self.source.items {
            source.set_source_item(record.sku, record.source_code, record.config)?;
        }

        tracing::debug!("configuration snapshot loaded");

        Ok(Collaborators {
            assignments: Arc::new(assignments),
            source_links: Arc::new(links),
            stock_configuration: Arc::new(stock),
            source_configuration: Arc::new(source),
            system_min_sale_qty: Arc::new(self.system),
        })
    }

    pub fn into_configuration(self) -> Result<InventoryConfiguration, SnapshotError> {
        Ok(InventoryConfiguration::new(self.into_collaborators()?))
    }
}
