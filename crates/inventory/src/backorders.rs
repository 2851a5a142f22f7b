//! Backorder policy aggregated over every source linked to a product.

use std::sync::Arc;

use stockconf_core::{ConfigResult, ProductStockKey};

use crate::parameter::Parameter;
use crate::provider::{SourceConfigurationProvider, SourceLinkIndex};
use crate::scope::Scope;
use crate::value::FromConfigValue;

/// Resolves backorders as the most permissive level across linked sources.
///
/// The global default always contributes. Each linked source contributes its
/// source-item override, else its source override, else nothing.
#[derive(Clone)]
pub struct SourceBackorderAggregator {
    source_links: Arc<dyn SourceLinkIndex>,
    source_config: Arc<dyn SourceConfigurationProvider>,
}

impl SourceBackorderAggregator {
    pub fn new(
        source_links: Arc<dyn SourceLinkIndex>,
        source_config: Arc<dyn SourceConfigurationProvider>,
    ) -> Self {
        Self {
            source_links,
            source_config,
        }
    }

    pub fn resolve_backorders(&self, key: &ProductStockKey) -> ConfigResult<i64> {
        let global = self.source_config.for_global()?;
        let mut level = i64::from_config_value(&global.require(Parameter::Backorders)?);

        let source_codes = self.source_links.source_codes_for(&key.sku, key.stock_id)?;
        for source_code in &source_codes {
            let item = self.source_config.for_source_item(&key.sku, source_code)?;
            let contribution = match item.get(Parameter::Backorders) {
                Some(value) => Some((Scope::SourceItem, value.clone())),
                None => self
                    .source_config
                    .for_source(source_code)?
                    .get(Parameter::Backorders)
                    .map(|value| (Scope::Source, value.clone())),
            };

            match contribution {
                Some((scope, value)) => {
                    let source_level = i64::from_config_value(&value);
                    tracing::trace!(%source_code, scope = %scope, source_level, "backorder contribution");
                    level = level.max(source_level);
                }
                None => tracing::trace!(%source_code, "no backorder override"),
            }
        }

        tracing::debug!(
            key = %key,
            sources = source_codes.len(),
            level,
            "resolved backorders"
        );
        Ok(level)
    }
}

impl core::fmt::Debug for SourceBackorderAggregator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SourceBackorderAggregator").finish_non_exhaustive()
    }
}
