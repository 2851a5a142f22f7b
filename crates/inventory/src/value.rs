//! Raw configuration values and their canonical casts.
//!
//! Providers hand back whatever was stored for an attribute; each parameter then
//! casts it to its canonical type. A stored `0`, `false` or `""` is a real value:
//! only the *absence* of an entry means "unset".

use serde::{Deserialize, Serialize};

use stockconf_core::ValueObject;

/// A stored configuration value at one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ValueObject for ConfigValue {}

/// Canonical type of a parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
}

impl ConfigValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::Int(_) => ValueKind::Int,
            ConfigValue::Float(_) => ValueKind::Float,
            ConfigValue::Text(_) => ValueKind::Text,
        }
    }

    /// Cast to the given canonical kind.
    pub fn cast(&self, kind: ValueKind) -> ConfigValue {
        match kind {
            ValueKind::Bool => ConfigValue::Bool(bool::from_config_value(self)),
            ValueKind::Int => ConfigValue::Int(i64::from_config_value(self)),
            ValueKind::Float => ConfigValue::Float(f64::from_config_value(self)),
            ValueKind::Text => ConfigValue::Text(String::from_config_value(self)),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

/// Total conversion from a stored value to a canonical type.
///
/// Every defined value converts; there is no "cast failed, treat as unset" path.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue) -> Self;
}

impl FromConfigValue for ConfigValue {
    fn from_config_value(value: &ConfigValue) -> Self {
        value.clone()
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Bool(b) => *b,
            ConfigValue::Int(i) => *i != 0,
            ConfigValue::Float(f) => *f != 0.0,
            ConfigValue::Text(s) => !(s.is_empty() || s == "0"),
        }
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Bool(b) => f64::from(u8::from(*b)),
            ConfigValue::Int(i) => *i as f64,
            ConfigValue::Float(f) => *f,
            ConfigValue::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Bool(b) => i64::from(*b),
            ConfigValue::Int(i) => *i,
            ConfigValue::Float(f) => f.trunc() as i64,
            ConfigValue::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .or_else(|_| s.parse::<f64>().map(|f| f.trunc() as i64))
                    .unwrap_or(0)
            }
        }
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Bool(true) => "1".to_string(),
            ConfigValue::Bool(false) => String::new(),
            ConfigValue::Int(i) => i.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::Text(s) => s.clone(),
        }
    }
}
