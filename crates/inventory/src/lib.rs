//! Inventory configuration resolution.
//!
//! Resolves the effective inventory-control parameters of a product within a
//! stock by walking a fixed override hierarchy (stock item → stock → global)
//! and returning the first explicitly set value. Backorders instead take the
//! most permissive level across every source feeding the stock.
//!
//! This crate is pure logic over injected collaborators (no storage, no IO).

pub mod backorders;
pub mod facade;
pub mod guard;
pub mod parameter;
pub mod provider;
pub mod resolver;
pub mod scope;
pub mod value;

pub use backorders::SourceBackorderAggregator;
pub use facade::{Collaborators, EffectiveConfiguration, InventoryConfiguration};
pub use guard::AssignmentGuard;
pub use parameter::{BackorderPolicy, Parameter, ParameterSpec, Strategy, Terminal};
pub use provider::{
    AssignmentIndex, ConstantMinSaleQty, ProviderResult, SourceConfigurationProvider,
    SourceLinkIndex, StockConfigurationProvider, SystemMinSaleQty,
};
pub use resolver::ScopeFallbackResolver;
pub use scope::{Scope, ScopeConfiguration};
pub use value::{ConfigValue, FromConfigValue, ValueKind};
