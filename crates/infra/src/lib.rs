//! Infrastructure layer: in-memory configuration stores, snapshot loading, settings.

pub mod memory;
pub mod settings;
pub mod snapshot;


pub use memory::{
    InMemoryAssignmentIndex, InMemorySourceConfiguration, InMemorySourceLinkIndex,
    InMemoryStockConfiguration,
};
pub use settings::SystemDefaults;
pub use snapshot::{ConfigurationSnapshot, SnapshotError};
