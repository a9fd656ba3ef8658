//! Catalog types and the registry module contracts.

use std::fmt;

use crate::Result;

/// An entry of a catalog: a named, reusable instance looked up by id.
pub trait CatalogType: Clone + fmt::Debug + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn name(&self) -> &str;
}

/// Read access to a catalog.
pub trait CatalogRegistryModule<T: CatalogType> {
    /// Case-insensitive lookup.
    ///
    /// # Errors
    ///
    /// [`crate::CatalogError::EmptyId`] if `id` is empty.
    fn get_by_id(&self, id: &str) -> Result<Option<&T>>;

    /// Every entry, ordered by lower-cased id.
    fn get_all(&self) -> Vec<&T>;
}

/// A catalog that accepts entries beyond its static set.
pub trait AdditionalCatalogRegistryModule<T: CatalogType>: CatalogRegistryModule<T> {
    /// Whether callers outside the framework may add entries once startup
    /// is over.
    fn allows_api_registration(&self) -> bool;

    /// Insert `entry` under its lower-cased id. An existing entry with the
    /// same id is replaced.
    fn register_additional_catalog(&mut self, entry: T) -> Result<()>;
}
