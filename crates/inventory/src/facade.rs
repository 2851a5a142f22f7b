//! Public query surface: one operation per inventory-control parameter.
//!
//! Every operation validates the request key, checks the assignment, then
//! dispatches on the parameter's [`Strategy`]. Nothing is cached or mutated;
//! repeated calls against unchanged collaborators return identical results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockconf_core::{ConfigResult, ProductStockKey};

use crate::backorders::SourceBackorderAggregator;
use crate::guard::AssignmentGuard;
use crate::parameter::{BackorderPolicy, Parameter, Strategy, Terminal};
use crate::provider::{
    AssignmentIndex, SourceConfigurationProvider, SourceLinkIndex, StockConfigurationProvider,
    SystemMinSaleQty,
};
use crate::resolver::ScopeFallbackResolver;
use crate::scope::Scope;
use crate::value::{ConfigValue, FromConfigValue};

/// Collaborators injected into [`InventoryConfiguration`].
#[derive(Clone)]
pub struct Collaborators {
    pub assignments: Arc<dyn AssignmentIndex>,
    pub source_links: Arc<dyn SourceLinkIndex>,
    pub stock_configuration: Arc<dyn StockConfigurationProvider>,
    pub source_configuration: Arc<dyn SourceConfigurationProvider>,
    pub system_min_sale_qty: Arc<dyn SystemMinSaleQty>,
}

/// Effective inventory configuration for a product within a stock.
#[derive(Clone)]
pub struct InventoryConfiguration {
    guard: AssignmentGuard,
    stock_configuration: Arc<dyn StockConfigurationProvider>,
    system_min_sale_qty: Arc<dyn SystemMinSaleQty>,
    backorders: SourceBackorderAggregator,
}

impl InventoryConfiguration {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            guard: AssignmentGuard::new(collaborators.assignments),
            stock_configuration: collaborators.stock_configuration,
            system_min_sale_qty: collaborators.system_min_sale_qty,
            backorders: SourceBackorderAggregator::new(
                collaborators.source_links,
                collaborators.source_configuration,
            ),
        }
    }

    /// Resolve any parameter, cast to its canonical kind.
    pub fn resolve(&self, parameter: Parameter, sku: &str, stock_id: i64) -> ConfigResult<ConfigValue> {
        let key = self.verified_key(sku, stock_id)?;
        self.resolve_verified(parameter, &key)
    }

    /// Resolve all parameters at once. The assignment is checked a single time.
    pub fn effective_configuration(
        &self,
        sku: &str,
        stock_id: i64,
    ) -> ConfigResult<EffectiveConfiguration> {
        let key = self.verified_key(sku, stock_id)?;
        Ok(EffectiveConfiguration {
            is_qty_decimal: self.typed(Parameter::QtyDecimal, &key)?,
            min_qty: self.typed(Parameter::MinQty, &key)?,
            min_sale_qty: self.typed(Parameter::MinSaleQty, &key)?,
            max_sale_qty: self.typed(Parameter::MaxSaleQty, &key)?,
            backorders: self.typed(Parameter::Backorders, &key)?,
            qty_increments: self.typed(Parameter::QtyIncrements, &key)?,
            enable_qty_increments: self.typed(Parameter::EnableQtyIncrements, &key)?,
            manage_stock: self.typed(Parameter::ManageStock, &key)?,
            low_stock_date: self.typed(Parameter::LowStockDate, &key)?,
            is_decimal_divided: self.typed(Parameter::DecimalDivided, &key)?,
            stock_status_changed_auto: self.typed(Parameter::StockStatusChangedAuto, &key)?,
            stock_threshold_qty: self.typed(Parameter::StockThresholdQty, &key)?,
        })
    }

    pub fn is_qty_decimal(&self, sku: &str, stock_id: i64) -> ConfigResult<bool> {
        self.query(Parameter::QtyDecimal, sku, stock_id)
    }

    pub fn get_min_qty(&self, sku: &str, stock_id: i64) -> ConfigResult<f64> {
        self.query(Parameter::MinQty, sku, stock_id)
    }

    pub fn get_min_sale_qty(&self, sku: &str, stock_id: i64) -> ConfigResult<f64> {
        self.query(Parameter::MinSaleQty, sku, stock_id)
    }

    pub fn get_max_sale_qty(&self, sku: &str, stock_id: i64) -> ConfigResult<f64> {
        self.query(Parameter::MaxSaleQty, sku, stock_id)
    }

    /// Most permissive backorder level across the global default and linked sources.
    pub fn get_backorders(&self, sku: &str, stock_id: i64) -> ConfigResult<i64> {
        self.query(Parameter::Backorders, sku, stock_id)
    }

    pub fn get_qty_increments(&self, sku: &str, stock_id: i64) -> ConfigResult<f64> {
        self.query(Parameter::QtyIncrements, sku, stock_id)
    }

    pub fn is_enable_qty_increments(&self, sku: &str, stock_id: i64) -> ConfigResult<bool> {
        self.query(Parameter::EnableQtyIncrements, sku, stock_id)
    }

    pub fn is_manage_stock(&self, sku: &str, stock_id: i64) -> ConfigResult<bool> {
        self.query(Parameter::ManageStock, sku, stock_id)
    }

    pub fn get_low_stock_date(&self, sku: &str, stock_id: i64) -> ConfigResult<String> {
        self.query(Parameter::LowStockDate, sku, stock_id)
    }

    pub fn is_decimal_divided(&self, sku: &str, stock_id: i64) -> ConfigResult<bool> {
        self.query(Parameter::DecimalDivided, sku, stock_id)
    }

    pub fn is_stock_status_changed_auto(&self, sku: &str, stock_id: i64) -> ConfigResult<bool> {
        self.query(Parameter::StockStatusChangedAuto, sku, stock_id)
    }

    pub fn get_stock_threshold_qty(&self, sku: &str, stock_id: i64) -> ConfigResult<f64> {
        self.query(Parameter::StockThresholdQty, sku, stock_id)
    }

    fn query<T: FromConfigValue>(&self, parameter: Parameter, sku: &str, stock_id: i64) -> ConfigResult<T> {
        let key = self.verified_key(sku, stock_id)?;
        self.typed(parameter, &key)
    }

    fn verified_key(&self, sku: &str, stock_id: i64) -> ConfigResult<ProductStockKey> {
        let key = ProductStockKey::new(sku, stock_id)?;
        self.guard.verify(&key)?;
        Ok(key)
    }

    fn typed<T: FromConfigValue>(&self, parameter: Parameter, key: &ProductStockKey) -> ConfigResult<T> {
        let value = self.resolve_verified(parameter, key)?;
        Ok(T::from_config_value(&value))
    }

    fn resolve_verified(&self, parameter: Parameter, key: &ProductStockKey) -> ConfigResult<ConfigValue> {
        let spec = parameter.spec();
        let raw = match spec.strategy {
            Strategy::ScopeChain(terminal) => self.resolve_chain(parameter, terminal, key)?,
            Strategy::SourceMaximum => ConfigValue::Int(self.backorders.resolve_backorders(key)?),
        };
        Ok(raw.cast(spec.kind))
    }

    fn resolve_chain(
        &self,
        parameter: Parameter,
        terminal: Terminal,
        key: &ProductStockKey,
    ) -> ConfigResult<ConfigValue> {
        let stock = &self.stock_configuration;
        let chain = ScopeFallbackResolver::new(parameter)
            .level(Scope::StockItem, || {
                Ok(stock.for_stock_item(&key.sku, key.stock_id)?.get(parameter).cloned())
            })
            .level(Scope::Stock, || {
                Ok(stock.for_stock(key.stock_id)?.get(parameter).cloned())
            });

        match terminal {
            Terminal::Global => chain.resolve_raw(Scope::Global, || {
                stock.for_global()?.require(parameter)
            }),
            Terminal::SystemMinSaleQty => chain.resolve_raw(Scope::System, || {
                Ok(ConfigValue::Float(self.system_min_sale_qty.min_sale_qty()?))
            }),
        }
    }
}

impl core::fmt::Debug for InventoryConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryConfiguration")
            .field("guard", &self.guard)
            .field("backorders", &self.backorders)
            .finish_non_exhaustive()
    }
}

/// Every parameter's effective value for one (sku, stock) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveConfiguration {
    pub is_qty_decimal: bool,
    pub min_qty: f64,
    pub min_sale_qty: f64,
    pub max_sale_qty: f64,
    pub backorders: i64,
    pub qty_increments: f64,
    pub enable_qty_increments: bool,
    pub manage_stock: bool,
    pub low_stock_date: String,
    pub is_decimal_divided: bool,
    pub stock_status_changed_auto: bool,
    pub stock_threshold_qty: f64,
}

impl EffectiveConfiguration {
    pub fn backorder_policy(&self) -> ConfigResult<BackorderPolicy> {
        BackorderPolicy::from_level(self.backorders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use proptest::prelude::*;
    use proptest::strategy::Strategy;
    use stockconf_core::{ConfigError, Sku, SourceCode, StockId};

    use crate::parameter::Parameter as P;
    use crate::provider::{ConstantMinSaleQty, ProviderResult};
    use crate::scope::ScopeConfiguration;

    /// Single-product fake: one item record, one stock record, one global record.
    #[derive(Default)]
    struct Fake {
        assigned: bool,
        item: ScopeConfiguration,
        stock: ScopeConfiguration,
        global: ScopeConfiguration,
        source_global: i64,
        reads: Mutex<Vec<&'static str>>,
    }

    impl Fake {
        fn read(&self, what: &'static str) {
            self.reads.lock().unwrap().push(what);
        }
    }

    impl AssignmentIndex for Fake {
        fn is_assigned(&self, _sku: &Sku, _stock_id: StockId) -> ProviderResult<bool> {
            Ok(self.assigned)
        }
    }

    impl SourceLinkIndex for Fake {
        fn source_codes_for(&self, _sku: &Sku, _stock_id: StockId) -> ProviderResult<Vec<SourceCode>> {
            self.read("source_links");
            Ok(Vec::new())
        }
    }

    impl StockConfigurationProvider for Fake {
        fn for_stock_item(&self, _sku: &Sku, _stock_id: StockId) -> ProviderResult<ScopeConfiguration> {
            self.read("stock_item");
            Ok(self.item.clone())
        }

        fn for_stock(&self, _stock_id: StockId) -> ProviderResult<ScopeConfiguration> {
            self.read("stock");
            Ok(self.stock.clone())
        }

        fn for_global(&self) -> ProviderResult<ScopeConfiguration> {
            self.read("global");
            Ok(self.global.clone())
        }
    }

    impl SourceConfigurationProvider for Fake {
        fn for_source_item(&self, _sku: &Sku, _code: &SourceCode) -> ProviderResult<ScopeConfiguration> {
            self.read("source_item");
            Ok(ScopeConfiguration::new())
        }

        fn for_source(&self, _code: &SourceCode) -> ProviderResult<ScopeConfiguration> {
            self.read("source");
            Ok(ScopeConfiguration::new())
        }

        fn for_global(&self) -> ProviderResult<ScopeConfiguration> {
            self.read("source_global");
            Ok(ScopeConfiguration::new().with(P::Backorders, self.source_global))
        }
    }

    fn global_defaults() -> ScopeConfiguration {
        ScopeConfiguration::new()
            .with(P::QtyDecimal, true)
            .with(P::MinQty, 1.0)
            .with(P::MaxSaleQty, 10_000.0)
            .with(P::QtyIncrements, 1.0)
            .with(P::EnableQtyIncrements, false)
            .with(P::ManageStock, true)
            .with(P::LowStockDate, "2024-01-01 00:00:00")
            .with(P::DecimalDivided, false)
            .with(P::StockStatusChangedAuto, true)
            .with(P::StockThresholdQty, 0.0)
    }

    fn facade(fake: Fake) -> (InventoryConfiguration, Arc<Fake>) {
        let fake = Arc::new(fake);
        let facade = InventoryConfiguration::new(Collaborators {
            assignments: fake.clone(),
            source_links: fake.clone(),
            stock_configuration: fake.clone(),
            source_configuration: fake.clone(),
            system_min_sale_qty: Arc::new(ConstantMinSaleQty(1.0)),
        });
        (facade, fake)
    }

    fn assigned() -> Fake {
        Fake {
            assigned: true,
            global: global_defaults(),
            ..Fake::default()
        }
    }

    #[test]
    fn stock_value_used_when_item_is_unset() {
        let (facade, _) = facade(Fake {
            stock: ScopeConfiguration::new().with(P::MinQty, 5.0),
            ..assigned()
        });
        assert_eq!(facade.get_min_qty("SKU1", 10).unwrap(), 5.0);
    }

    #[test]
    fn global_value_used_when_item_and_stock_are_unset() {
        let (facade, _) = facade(assigned());
        assert_eq!(facade.get_max_sale_qty("SKU1", 10).unwrap(), 10_000.0);
        assert_eq!(facade.get_low_stock_date("SKU1", 10).unwrap(), "2024-01-01 00:00:00");
        assert!(facade.is_stock_status_changed_auto("SKU1", 10).unwrap());
    }

    #[test]
    fn min_sale_qty_falls_back_to_system_constant() {
        let (facade, fake) = facade(assigned());
        assert_eq!(facade.get_min_sale_qty("SKU1", 10).unwrap(), 1.0);
        assert!(!fake.reads.lock().unwrap().contains(&"global"));
    }

    #[test]
    fn item_false_shadows_stock_and_global() {
        let (facade, _) = facade(Fake {
            item: ScopeConfiguration::new().with(P::QtyDecimal, false),
            stock: ScopeConfiguration::new().with(P::QtyDecimal, true),
            ..assigned()
        });
        assert!(!facade.is_qty_decimal("SKU1", 10).unwrap());
    }

    #[test]
    fn stored_text_is_cast_to_parameter_kind() {
        let (facade, _) = facade(Fake {
            item: ScopeConfiguration::new()
                .with(P::QtyIncrements, "2.5")
                .with(P::ManageStock, 0i64),
            ..assigned()
        });
        assert_eq!(facade.get_qty_increments("SKU1", 10).unwrap(), 2.5);
        assert!(!facade.is_manage_stock("SKU1", 10).unwrap());
        assert_eq!(
            facade.resolve(P::QtyIncrements, "SKU1", 10).unwrap(),
            ConfigValue::Float(2.5)
        );
    }

    #[test]
    fn unassigned_pair_fails_before_any_scope_read() {
        let (facade, fake) = facade(Fake {
            assigned: false,
            ..assigned()
        });

        assert!(facade.is_qty_decimal("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.get_min_qty("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.get_min_sale_qty("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.get_max_sale_qty("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.get_backorders("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.get_qty_increments("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.is_enable_qty_increments("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.is_manage_stock("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.get_low_stock_date("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.is_decimal_divided("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.is_stock_status_changed_auto("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.get_stock_threshold_qty("SKU3", 30).unwrap_err().is_not_assigned());
        assert!(facade.effective_configuration("SKU3", 30).unwrap_err().is_not_assigned());

        assert!(fake.reads.lock().unwrap().is_empty());
    }

    #[test]
    fn invalid_key_is_rejected() {
        let (facade, _) = facade(assigned());
        assert!(matches!(facade.get_min_qty("  ", 10), Err(ConfigError::Validation(_))));
        assert!(matches!(facade.get_min_qty("SKU1", 0), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn missing_global_value_is_an_error() {
        let (facade, _) = facade(Fake {
            global: ScopeConfiguration::new(),
            ..assigned()
        });
        match facade.get_stock_threshold_qty("SKU1", 10).unwrap_err() {
            ConfigError::MissingGlobal(code) => assert_eq!(code, "stock_threshold_qty"),
            other => panic!("Expected MissingGlobal, got {other:?}"),
        }
    }

    #[test]
    fn backorders_without_sources_returns_source_global() {
        let (facade, _) = facade(Fake {
            source_global: 1,
            ..assigned()
        });
        assert_eq!(facade.get_backorders("SKU2", 20).unwrap(), 1);
    }

    #[test]
    fn effective_configuration_collects_every_parameter() {
        let (facade, _) = facade(Fake {
            item: ScopeConfiguration::new().with(P::MinQty, 3.0),
            stock: ScopeConfiguration::new().with(P::MinSaleQty, 2.0),
            source_global: 2,
            ..assigned()
        });

        let effective = facade.effective_configuration("SKU1", 10).unwrap();
        assert_eq!(effective.min_qty, 3.0);
        assert_eq!(effective.min_sale_qty, 2.0);
        assert_eq!(effective.max_sale_qty, 10_000.0);
        assert_eq!(effective.backorders, 2);
        assert!(effective.is_qty_decimal);
        assert_eq!(
            effective.backorder_policy().unwrap(),
            BackorderPolicy::AllowQtyBelowZeroAndNotify
        );

        assert_eq!(facade.effective_configuration("SKU1", 10).unwrap(), effective);
    }

    fn single_chain() -> impl Strategy<Value = P> {
        proptest::sample::select(
            P::ALL
                .into_iter()
                .filter(|p| p.spec().strategy != crate::parameter::Strategy::SourceMaximum)
                .collect::<Vec<_>>(),
        )
    }

    fn any_value() -> impl Strategy<Value = ConfigValue> {
        prop_oneof![
            any::<bool>().prop_map(ConfigValue::Bool),
            (-5i64..5).prop_map(ConfigValue::Int),
            (-5.0f64..5.0).prop_map(ConfigValue::Float),
            "[0-9a-z]{0,3}".prop_map(ConfigValue::Text),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a defined item value always wins over stock and global values.
        #[test]
        fn item_value_shadows_other_scopes(
            parameter in single_chain(),
            item in any_value(),
            stock in prop::option::of(any_value()),
        ) {
            let mut stock_config = ScopeConfiguration::new();
            if let Some(v) = stock {
                stock_config = stock_config.with(parameter, v);
            }
            let (facade, _) = facade(Fake {
                item: ScopeConfiguration::new().with(parameter, item.clone()),
                stock: stock_config,
                ..assigned()
            });

            let resolved = facade.resolve(parameter, "SKU1", 10).unwrap();
            prop_assert_eq!(resolved, item.cast(parameter.kind()));
        }

        /// Property: with the item unset, a defined stock value wins.
        #[test]
        fn stock_value_shadows_terminal(
            parameter in single_chain(),
            stock in any_value(),
        ) {
            let (facade, _) = facade(Fake {
                stock: ScopeConfiguration::new().with(parameter, stock.clone()),
                ..assigned()
            });

            let resolved = facade.resolve(parameter, "SKU1", 10).unwrap();
            prop_assert_eq!(resolved, stock.cast(parameter.kind()));
        }
    }
}
