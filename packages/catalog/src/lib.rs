//! Catalogs: open or closed registries of named entries looked up by id.
//!
//! A catalog starts from a static set of entries and may accept more at
//! runtime. Ids are case-insensitive; entries are never removed.
//!
//! # Example
//!
//! ```rust
//! use aspect_catalog::{
//!     AdditionalCatalogRegistryModule, CatalogRegistry, CatalogRegistryModule, CatalogType,
//! };
//!
//! #[derive(Clone, Debug)]
//! struct Weather(&'static str);
//!
//! impl CatalogType for Weather {
//!     fn id(&self) -> &str { self.0 }
//!     fn name(&self) -> &str { self.0 }
//! }
//!
//! let mut weathers = CatalogRegistry::new("weather", true);
//! weathers.populate([Weather("clear"), Weather("rain")]).unwrap();
//! weathers.complete_startup(true);
//! weathers.register_additional_catalog(Weather("Acid_Rain")).unwrap();
//! assert!(weathers.get_by_id("acid_rain").unwrap().is_some());
//! ```

mod catalogs;
mod error;
mod module;
mod registry;

pub use catalogs::{CatalogModule, Catalogs};
pub use error::{CatalogError, Result};
pub use module::{AdditionalCatalogRegistryModule, CatalogRegistryModule, CatalogType};
pub use registry::{CatalogRegistry, RegistryState};
