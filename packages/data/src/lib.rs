//! Aspect data layer: typed access to state on hosts the framework does not own.
//!
//! - `Key`: shared, typed identity of one aspect
//! - `Value` / `ImmutableValue`: one aspect's key, default, and current value
//! - `DataManipulator`: a bundle of aspects with table-driven get/set
//! - `ValueProcessor` / `DataProcessor`: per-host-type access strategies
//! - `ProcessorRegistry`: picks the most specific processor for a host
//! - `DataTransactionResult`: what a mutation applied, replaced, or rejected
//!
//! # Example
//!
//! ```rust
//! use aspect_container::query;
//! use aspect_data::{data_holder, DataTransactionResult, Key, ProcessorRegistry, Value, ValueProcessor};
//!
//! struct Pig { saddled: bool }
//! data_holder!(Pig);
//!
//! struct Saddle(Key<bool>);
//!
//! impl ValueProcessor for Saddle {
//!     type Host = Pig;
//!     type Value = bool;
//!
//!     fn key(&self) -> &Key<bool> { &self.0 }
//!     fn construct_value(&self, actual: bool) -> Value<bool> {
//!         Value::new(self.0.clone(), false, actual)
//!     }
//!     fn set(&self, host: &mut Pig, value: bool) -> bool {
//!         host.saddled = value;
//!         true
//!     }
//!     fn get_val(&self, host: &Pig) -> Option<bool> { Some(host.saddled) }
//!     fn remove_from(&self, _host: &mut Pig) -> DataTransactionResult {
//!         DataTransactionResult::fail_no_data()
//!     }
//! }
//!
//! let saddled = Key::builder("saddled", query!("Saddle")).build();
//! let mut registry = ProcessorRegistry::new();
//! registry.register_value_processor(Saddle(saddled.clone())).unwrap();
//!
//! let mut pig = Pig { saddled: false };
//! assert!(registry.offer(&mut pig, &saddled, true).is_successful());
//! assert_eq!(registry.get(&pig, &saddled), Some(true));
//! ```

mod data_value;
mod dual;
mod error;
mod holder;
mod key;
mod manipulator;
mod processor;
mod registry;
pub mod result;
mod value;

pub use data_value::DataValue;
pub use dual::{DataProcessor, DualProcessor};
pub use error::{DataError, Result};
pub use holder::{DataHolder, HostType};
pub use key::{Comparator, Key, KeyBuilder, KeyId, KeyInfo, KeyRegistry};
pub use manipulator::{DataManipulator, FieldRegistry, FieldRegistryBuilder, ImmutableManipulator};
pub use processor::ValueProcessor;
pub use registry::ProcessorRegistry;
pub use result::{DataTransactionResult, ResultType};
pub use value::{AnyImmutableValue, Bounds, ErasedValue, ImmutableValue, Value};
