//! The catalog registry: a lower-cased id map with a startup lifecycle.
//!
//! ```text
//! Uninitialized --populate--> Populated --complete_startup--> Open | Closed
//! ```
//!
//! Entries can be added while `Populated` (framework startup) and, if the
//! catalog allows API registration, while `Open`. A `Closed` catalog rejects
//! every registration.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    AdditionalCatalogRegistryModule, CatalogError, CatalogRegistryModule, CatalogType, Result,
};

/// Lifecycle of a catalog registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistryState {
    Uninitialized,
    Populated,
    Open,
    Closed,
}

/// Case-insensitive catalog of `T`, composed of a static set plus
/// additional registrations.
#[derive(Debug)]
pub struct CatalogRegistry<T> {
    name: &'static str,
    entries: BTreeMap<String, T>,
    state: RegistryState,
    allows_api_registration: bool,
}

impl<T: CatalogType> CatalogRegistry<T> {
    pub fn new(name: &'static str, allows_api_registration: bool) -> Self {
        CatalogRegistry {
            name,
            entries: BTreeMap::new(),
            state: RegistryState::Uninitialized,
            allows_api_registration,
        }
    }

    /// A catalog with no static entries, already accepting startup
    /// registrations.
    pub fn empty(name: &'static str, allows_api_registration: bool) -> Self {
        CatalogRegistry {
            state: RegistryState::Populated,
            ..Self::new(name, allows_api_registration)
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the static entries shipped with the catalog.
    ///
    /// Either every entry is loaded or none is; on error the catalog stays
    /// `Uninitialized` and can be populated again.
    pub fn populate(&mut self, entries: impl IntoIterator<Item = T>) -> Result<()> {
        if self.state != RegistryState::Uninitialized {
            return Err(CatalogError::AlreadyPopulated(self.name));
        }
        let entries = entries
            .into_iter()
            .map(|entry| {
                let id = entry.id().to_lowercase();
                if id.is_empty() {
                    return Err(CatalogError::EmptyId);
                }
                Ok((id, entry))
            })
            .collect::<Result<Vec<_>>>()?;

        for (id, entry) in entries {
            self.store(id, entry);
        }
        self.state = RegistryState::Populated;
        debug!(catalog = self.name, entries = self.entries.len(), "catalog populated");
        Ok(())
    }

    /// Insert `entry` under `id` (lower-cased), replacing any previous entry
    /// with that id.
    pub fn insert(&mut self, id: &str, entry: T) -> Result<()> {
        if id.is_empty() {
            return Err(CatalogError::EmptyId);
        }
        match self.state {
            RegistryState::Uninitialized => return Err(CatalogError::NotPopulated(self.name)),
            RegistryState::Closed => {
                return Err(CatalogError::RegistrationClosed {
                    catalog: self.name,
                    id: id.to_string(),
                })
            }
            RegistryState::Populated | RegistryState::Open => {}
        }

        self.store(id.to_lowercase(), entry);
        Ok(())
    }

    fn store(&mut self, id: String, entry: T) {
        if let Some(previous) = self.entries.get(&id) {
            warn!(catalog = self.name, %id, previous = previous.name(), "catalog entry overwritten");
        } else {
            debug!(catalog = self.name, %id, "catalog entry registered");
        }
        self.entries.insert(id, entry);
    }

    /// End startup. The catalog stays open only if it allows API
    /// registration and `allow_registration` is set. Closing is final.
    pub fn complete_startup(&mut self, allow_registration: bool) -> RegistryState {
        if self.state == RegistryState::Closed {
            return self.state;
        }
        self.state = if self.allows_api_registration && allow_registration {
            RegistryState::Open
        } else {
            RegistryState::Closed
        };
        debug!(catalog = self.name, state = ?self.state, "catalog startup complete");
        self.state
    }

    pub fn close(&mut self) {
        self.state = RegistryState::Closed;
    }
}

impl<T: CatalogType> CatalogRegistryModule<T> for CatalogRegistry<T> {
    fn get_by_id(&self, id: &str) -> Result<Option<&T>> {
        if id.is_empty() {
            return Err(CatalogError::EmptyId);
        }
        Ok(self.entries.get(&id.to_lowercase()))
    }

    fn get_all(&self) -> Vec<&T> {
        self.entries.values().collect()
    }
}

impl<T: CatalogType> AdditionalCatalogRegistryModule<T> for CatalogRegistry<T> {
    fn allows_api_registration(&self) -> bool {
        self.allows_api_registration
    }

    fn register_additional_catalog(&mut self, entry: T) -> Result<()> {
        let id = entry.id().to_string();
        self.insert(&id, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Dye {
        id: &'static str,
        name: &'static str,
    }

    impl CatalogType for Dye {
        fn id(&self) -> &str {
            self.id
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn dye(id: &'static str, name: &'static str) -> Dye {
        Dye { id, name }
    }

    fn populated(allows_api: bool) -> CatalogRegistry<Dye> {
        let mut registry = CatalogRegistry::new("dye", allows_api);
        registry
            .populate([dye("RED", "Red"), dye("blue", "Blue")])
            .unwrap();
        registry
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = populated(true);
        assert_eq!(registry.get_by_id("red").unwrap(), Some(&dye("RED", "Red")));
        assert_eq!(
            registry.get_by_id("BLUE").unwrap(),
            registry.get_by_id("blue").unwrap()
        );
        assert_eq!(registry.get_by_id("green").unwrap(), None);
    }

    #[test]
    fn empty_id_is_a_contract_violation() {
        let mut registry = populated(true);
        assert_eq!(registry.get_by_id(""), Err(CatalogError::EmptyId));
        assert_eq!(
            registry.register_additional_catalog(dye("", "Nothing")),
            Err(CatalogError::EmptyId)
        );
    }

    #[test]
    fn lifecycle_transitions() {
        let mut registry = CatalogRegistry::<Dye>::new("dye", true);
        assert_eq!(registry.state(), RegistryState::Uninitialized);
        assert_eq!(
            registry.register_additional_catalog(dye("red", "Red")),
            Err(CatalogError::NotPopulated("dye"))
        );

        registry.populate([dye("red", "Red")]).unwrap();
        assert_eq!(registry.state(), RegistryState::Populated);
        assert_eq!(
            registry.populate([]),
            Err(CatalogError::AlreadyPopulated("dye"))
        );

        assert_eq!(registry.complete_startup(true), RegistryState::Open);
        registry
            .register_additional_catalog(dye("green", "Green"))
            .unwrap();
        assert_eq!(registry.len(), 2);

        registry.close();
        assert!(matches!(
            registry.register_additional_catalog(dye("cyan", "Cyan")),
            Err(CatalogError::RegistrationClosed { catalog: "dye", .. })
        ));
    }

    #[test]
    fn empty_catalog_accepts_startup_registration() {
        let mut registry = CatalogRegistry::<Dye>::empty("dye", false);
        assert_eq!(registry.state(), RegistryState::Populated);
        assert!(registry.is_empty());
        registry.insert("Lime", dye("lime", "Lime")).unwrap();
        assert_eq!(registry.complete_startup(true), RegistryState::Closed);
    }

    #[test]
    fn closed_unless_api_registration_allowed() {
        assert_eq!(populated(false).complete_startup(true), RegistryState::Closed);
        assert_eq!(populated(true).complete_startup(false), RegistryState::Closed);
    }

    #[test]
    fn collision_overwrites() {
        let mut registry = populated(true);
        registry
            .register_additional_catalog(dye("Red", "Crimson"))
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get_by_id("red").unwrap().map(|d| d.name), Some("Crimson"));
    }

    #[test]
    fn get_all_orders_by_id() {
        let registry = populated(true);
        let names: Vec<_> = registry.get_all().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Blue", "Red"]);
    }
}
