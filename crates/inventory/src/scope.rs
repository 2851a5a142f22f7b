//! Per-scope configuration snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockconf_core::{ConfigError, ConfigResult, ValueObject};

use crate::parameter::Parameter;
use crate::value::ConfigValue;

/// Configuration level a value was read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    StockItem,
    Stock,
    SourceItem,
    Source,
    Global,
    System,
}

impl core::fmt::Display for Scope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Scope::StockItem => "stock_item",
            Scope::Stock => "stock",
            Scope::SourceItem => "source_item",
            Scope::Source => "source",
            Scope::Global => "global",
            Scope::System => "system",
        };
        f.write_str(name)
    }
}

/// Immutable snapshot of every parameter configured at one scope.
///
/// A parameter missing from the map is unset. A parameter present with a
/// degenerate value (`0`, `false`, `""`) is set. When deserializing, an
/// explicit `null` entry is unset as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Parameter, Option<ConfigValue>>",
    into = "BTreeMap<Parameter, ConfigValue>"
)]
pub struct ScopeConfiguration {
    values: BTreeMap<Parameter, ConfigValue>,
}

impl ScopeConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, parameter: Parameter, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(parameter, value.into());
        self
    }

    /// Returns the value if this scope defines it.
    pub fn get(&self, parameter: Parameter) -> Option<&ConfigValue> {
        self.values.get(&parameter)
    }

    /// Returns the value, treating absence as a broken global-scope contract.
    pub fn require(&self, parameter: Parameter) -> ConfigResult<ConfigValue> {
        self.get(parameter)
            .cloned()
            .ok_or(ConfigError::MissingGlobal(parameter.code()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Parameter, ConfigValue)> for ScopeConfiguration {
    fn from_iter<I: IntoIterator<Item = (Parameter, ConfigValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<Parameter, Option<ConfigValue>>> for ScopeConfiguration {
    fn from(entries: BTreeMap<Parameter, Option<ConfigValue>>) -> Self {
        entries
            .into_iter()
            .filter_map(|(parameter, value)| value.map(|v| (parameter, v)))
            .collect()
    }
}

impl From<ScopeConfiguration> for BTreeMap<Parameter, ConfigValue> {
    fn from(config: ScopeConfiguration) -> Self {
        config.values
    }
}

impl ValueObject for ScopeConfiguration {}
