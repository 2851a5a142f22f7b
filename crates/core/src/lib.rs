//! `stockconf-core` — identifiers and error model shared by the resolution crates.
//!
//! This crate contains **pure domain** primitives (no IO, no providers).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{ConfigError, ConfigResult};
pub use id::{ProductStockKey, Sku, SourceCode, StockId};
pub use value_object::ValueObject;
