//! Strongly-typed identifiers used across the resolution layer.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::value_object::ValueObject;

/// Product stock-keeping unit. Never empty or blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

/// Code of a physical inventory source (warehouse, store, drop-shipper).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceCode(String);

macro_rules! impl_code_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ConfigError::validation(concat!($name, " cannot be empty")));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = ConfigError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_code_newtype!(Sku, "sku");
impl_code_newtype!(SourceCode, "source code");

/// Identifier of a stock (a sales-channel view over one or more sources). Always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StockId(i64);

impl StockId {
    pub fn new(value: i64) -> Result<Self, ConfigError> {
        if value <= 0 {
            return Err(ConfigError::validation(format!(
                "stock id must be positive, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for StockId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<i64> for StockId {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StockId> for i64 {
    fn from(value: StockId) -> Self {
        value.0
    }
}

/// Scope of one resolution request: a product within a stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductStockKey {
    pub sku: Sku,
    pub stock_id: StockId,
}

impl ProductStockKey {
    /// Validate raw request input into a key.
    pub fn new(sku: &str, stock_id: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            sku: Sku::new(sku)?,
            stock_id: StockId::new(stock_id)?,
        })
    }
}

impl core::fmt::Display for ProductStockKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{}", self.sku, self.stock_id)
    }
}

impl ValueObject for ProductStockKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_sku_is_rejected() {
        let err = Sku::new("   ").unwrap_err();
        match err {
            ConfigError::Validation(msg) => assert!(msg.contains("sku")),
            _ => panic!("Expected Validation error for blank sku"),
        }
    }

    #[test]
    fn non_positive_stock_id_is_rejected() {
        assert!(matches!(StockId::new(0), Err(ConfigError::Validation(_))));
        assert!(matches!(StockId::new(-3), Err(ConfigError::Validation(_))));
        assert_eq!(StockId::new(10).unwrap().get(), 10);
    }

    #[test]
    fn key_validates_both_parts() {
        let key = ProductStockKey::new("SKU1", 10).unwrap();
        assert_eq!(key.sku.as_str(), "SKU1");
        assert_eq!(key.stock_id.get(), 10);
        assert_eq!(key.to_string(), "SKU1@10");

        assert!(ProductStockKey::new("", 10).is_err());
        assert!(ProductStockKey::new("SKU1", 0).is_err());
    }

    #[test]
    fn source_code_parses_from_str() {
        let code: SourceCode = "src-a".parse().unwrap();
        assert_eq!(code.as_str(), "src-a");
        assert!("".parse::<SourceCode>().is_err());
    }
}
