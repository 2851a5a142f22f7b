//! System-wide defaults read from the environment.

use serde::{Deserialize, Serialize};

use stockconf_core::{ConfigError, ConfigResult};
use stockconf_inventory::{ProviderResult, SystemMinSaleQty};

/// Environment variable holding the system minimum sale quantity.
pub const MIN_SALE_QTY_ENV: &str = "STOCKCONF_MIN_SALE_QTY";

/// Shipped default when nothing is configured.
pub const DEFAULT_MIN_SALE_QTY: f64 = 1.0;

/// System defaults used below every configurable scope.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDefaults {
    #[serde(default = "default_min_sale_qty")]
    pub min_sale_qty: f64,
}

fn default_min_sale_qty() -> f64 {
    DEFAULT_MIN_SALE_QTY
}

impl Default for SystemDefaults {
    fn default() -> Self {
        Self {
            min_sale_qty: DEFAULT_MIN_SALE_QTY,
        }
    }
}

impl SystemDefaults {
    pub fn new(min_sale_qty: f64) -> ConfigResult<Self> {
        if !min_sale_qty.is_finite() || min_sale_qty < 0.0 {
            return Err(ConfigError::validation(format!(
                "min sale qty must be a non-negative number, got {min_sale_qty}"
            )));
        }
        Ok(Self { min_sale_qty })
    }

    /// Read defaults from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        match lookup(MIN_SALE_QTY_ENV) {
            Some(raw) => {
                let value = raw.trim().parse::<f64>().map_err(|e| {
                    ConfigError::validation(format!("{MIN_SALE_QTY_ENV}={raw:?}: {e}"))
                })?;
                Self::new(value)
            }
            None => {
                tracing::warn!(
                    "{MIN_SALE_QTY_ENV} not set; using default {DEFAULT_MIN_SALE_QTY}"
                );
                Ok(Self::default())
            }
        }
    }
}

impl SystemMinSaleQty for SystemDefaults {
    fn min_sale_qty(&self) -> ProviderResult<f64> {
        Ok(self.min_sale_qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_uses_default() {
        let defaults = SystemDefaults::from_lookup(|_| None).unwrap();
        assert_eq!(defaults.min_sale_qty, DEFAULT_MIN_SALE_QTY);
    }

    #[test]
    fn variable_overrides_default() {
        let defaults = SystemDefaults::from_lookup(|_| Some(" 4.5 ".to_string())).unwrap();
        assert_eq!(defaults.min_sale_qty().unwrap(), 4.5);
    }

    #[test]
    fn malformed_or_negative_values_are_rejected() {
        assert!(matches!(
            SystemDefaults::from_lookup(|_| Some("lots".to_string())),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            SystemDefaults::from_lookup(|_| Some("-1".to_string())),
            Err(ConfigError::Validation(_))
        ));
    }
}
