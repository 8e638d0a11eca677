pub mod error;
pub mod filter_engine;
pub mod installer;
pub mod interface;

pub use error::Error;
pub use filter_engine::condition::{CompareOp, Condition, ConditionBuilder};
pub use filter_engine::filter::{Action, Filter, FilterBuilder, WeightClass};
pub use filter_engine::layer::Layer;
pub use installer::ObjectInstaller;
pub use interface::{InterfaceResolver, SystemInterfaces};

#[cfg(windows)]
pub use filter_engine::{transaction::Transaction, FilterEngine};

/// Engine object identity. Converted to the platform `GUID` only when talking to the engine.
pub type Guid = u128;
