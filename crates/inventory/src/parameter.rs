//! The fixed set of inventory-control parameters and how each one resolves.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use stockconf_core::ConfigError;

use crate::value::ValueKind;

/// An inventory-control parameter.
///
/// Each parameter is configured independently at every scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    #[serde(rename = "is_qty_decimal")]
    QtyDecimal,
    MinQty,
    MinSaleQty,
    MaxSaleQty,
    Backorders,
    QtyIncrements,
    EnableQtyIncrements,
    ManageStock,
    LowStockDate,
    #[serde(rename = "is_decimal_divided")]
    DecimalDivided,
    StockStatusChangedAuto,
    StockThresholdQty,
}

/// Where a single-chain parameter lands when neither item nor stock defines it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// The global-scope record, which must define the parameter.
    Global,
    /// The system-wide minimum sale quantity constant.
    SystemMinSaleQty,
}

/// Resolution strategy of a parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// item → stock → terminal; the first defined value wins.
    ScopeChain(Terminal),
    /// Maximum over the global default and every linked source's override.
    SourceMaximum,
}

/// Declarative resolution entry for one parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub kind: ValueKind,
    pub strategy: Strategy,
}

impl Parameter {
    pub const ALL: [Parameter; 12] = [
        Parameter::QtyDecimal,
        Parameter::MinQty,
        Parameter::MinSaleQty,
        Parameter::MaxSaleQty,
        Parameter::Backorders,
        Parameter::QtyIncrements,
        Parameter::EnableQtyIncrements,
        Parameter::ManageStock,
        Parameter::LowStockDate,
        Parameter::DecimalDivided,
        Parameter::StockStatusChangedAuto,
        Parameter::StockThresholdQty,
    ];

    /// Stable attribute code, as used by configuration stores.
    pub const fn code(self) -> &'static str {
        match self {
            Parameter::QtyDecimal => "is_qty_decimal",
            Parameter::MinQty => "min_qty",
            Parameter::MinSaleQty => "min_sale_qty",
            Parameter::MaxSaleQty => "max_sale_qty",
            Parameter::Backorders => "backorders",
            Parameter::QtyIncrements => "qty_increments",
            Parameter::EnableQtyIncrements => "enable_qty_increments",
            Parameter::ManageStock => "manage_stock",
            Parameter::LowStockDate => "low_stock_date",
            Parameter::DecimalDivided => "is_decimal_divided",
            Parameter::StockStatusChangedAuto => "stock_status_changed_auto",
            Parameter::StockThresholdQty => "stock_threshold_qty",
        }
    }

    pub const fn spec(self) -> ParameterSpec {
        use Strategy::*;
        use Terminal::*;
        use ValueKind as K;

        let (kind, strategy) = match self {
            Parameter::QtyDecimal => (K::Bool, ScopeChain(Global)),
            Parameter::MinQty => (K::Float, ScopeChain(Global)),
            Parameter::MinSaleQty => (K::Float, ScopeChain(SystemMinSaleQty)),
            Parameter::MaxSaleQty => (K::Float, ScopeChain(Global)),
            Parameter::Backorders => (K::Int, SourceMaximum),
            Parameter::QtyIncrements => (K::Float, ScopeChain(Global)),
            Parameter::EnableQtyIncrements => (K::Bool, ScopeChain(Global)),
            Parameter::ManageStock => (K::Bool, ScopeChain(Global)),
            Parameter::LowStockDate => (K::Text, ScopeChain(Global)),
            Parameter::DecimalDivided => (K::Bool, ScopeChain(Global)),
            Parameter::StockStatusChangedAuto => (K::Bool, ScopeChain(Global)),
            Parameter::StockThresholdQty => (K::Float, ScopeChain(Global)),
        };
        ParameterSpec { kind, strategy }
    }

    pub const fn kind(self) -> ValueKind {
        self.spec().kind
    }
}

impl core::fmt::Display for Parameter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Parameter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::ALL
            .into_iter()
            .find(|p| p.code() == s)
            .ok_or_else(|| ConfigError::validation(format!("unknown parameter: {s}")))
    }
}

/// Backorder policy, ordered from strictest to most permissive.
///
/// The numeric level is what configuration stores hold; aggregation across
/// sources takes the numeric maximum.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackorderPolicy {
    NoBackorders,
    AllowQtyBelowZero,
    AllowQtyBelowZeroAndNotify,
}

impl BackorderPolicy {
    pub fn from_level(level: i64) -> Result<Self, ConfigError> {
        match level {
            0 => Ok(BackorderPolicy::NoBackorders),
            1 => Ok(BackorderPolicy::AllowQtyBelowZero),
            2 => Ok(BackorderPolicy::AllowQtyBelowZeroAndNotify),
            other => Err(ConfigError::validation(format!(
                "unknown backorder level: {other}"
            ))),
        }
    }

    pub fn level(self) -> i64 {
        match self {
            BackorderPolicy::NoBackorders => 0,
            BackorderPolicy::AllowQtyBelowZero => 1,
            BackorderPolicy::AllowQtyBelowZeroAndNotify => 2,
        }
    }
}
