//! Typed, transactional data components for objects you do not own.
//!
//! This crate re-exports the layered `aspect-*` crates:
//!
//! - [`container`]: queries and the structured `Data` tree
//! - [`data`]: keys, values, manipulators, processors, dispatch
//! - [`catalog`]: open and closed catalogs of named entries
//! - [`runtime`]: configuration and the framework handle
//! - [`vanilla`]: reference hosts and aspects

pub use aspect_catalog as catalog;
pub use aspect_container as container;
pub use aspect_data as data;
pub use aspect_runtime as runtime;
pub use aspect_vanilla as vanilla;

// Everyday types and macros
pub use aspect_catalog::{
    AdditionalCatalogRegistryModule, CatalogError, CatalogRegistry, CatalogRegistryModule,
    CatalogType, Catalogs,
};
pub use aspect_container::{query, Data, Query};
pub use aspect_data::{
    data_holder, DataError, DataHolder, DataManipulator, DataProcessor, DataTransactionResult,
    DataValue, DualProcessor, FieldRegistry, ImmutableManipulator, ImmutableValue, Key,
    KeyRegistry, ProcessorRegistry, ResultType, Value, ValueProcessor,
};
pub use aspect_runtime::{Framework, FrameworkConfig, FrameworkError, Registries};
