//! The set of catalog registries a framework instance owns.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use tracing::warn;

use crate::{CatalogRegistry, CatalogType, RegistryState};

/// A catalog registry stored in [`Catalogs`].
pub trait CatalogModule: Any + Send + Sync {
    fn catalog_name(&self) -> &'static str;

    fn catalog_state(&self) -> RegistryState;

    /// See [`CatalogRegistry::complete_startup`].
    fn complete_startup(&mut self, allow_registration: bool) -> RegistryState;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: CatalogType> CatalogModule for CatalogRegistry<T> {
    fn catalog_name(&self) -> &'static str {
        self.name()
    }

    fn catalog_state(&self) -> RegistryState {
        self.state()
    }

    fn complete_startup(&mut self, allow_registration: bool) -> RegistryState {
        CatalogRegistry::complete_startup(self, allow_registration)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Catalog registries indexed by their Rust type.
#[derive(Default)]
pub struct Catalogs {
    modules: HashMap<TypeId, Box<dyn CatalogModule>>,
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `module`, replacing any module of the same type.
    pub fn register<R: CatalogModule>(&mut self, module: R) {
        if let Some(previous) = self.modules.insert(TypeId::of::<R>(), Box::new(module)) {
            warn!(catalog = previous.catalog_name(), "catalog module replaced");
        }
    }

    pub fn get<R: CatalogModule>(&self) -> Option<&R> {
        self.modules.get(&TypeId::of::<R>())?.as_any().downcast_ref()
    }

    pub fn get_mut<R: CatalogModule>(&mut self) -> Option<&mut R> {
        self.modules
            .get_mut(&TypeId::of::<R>())?
            .as_any_mut()
            .downcast_mut()
    }

    /// Finish startup for every module.
    pub fn complete_startup(&mut self, allow_registration: bool) {
        for module in self.modules.values_mut() {
            module.complete_startup(allow_registration);
        }
    }

    /// Every module's name and state, ordered by name.
    pub fn states(&self) -> Vec<(&'static str, RegistryState)> {
        let mut states: Vec<_> = self
            .modules
            .values()
            .map(|m| (m.catalog_name(), m.catalog_state()))
            .collect();
        states.sort();
        states
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogRegistryModule;

    #[derive(Clone, Debug)]
    struct Biome(&'static str);

    impl CatalogType for Biome {
        fn id(&self) -> &str {
            self.0
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn modules_are_found_by_type() {
        let mut registry = CatalogRegistry::new("biome", true);
        registry.populate([Biome("plains")]).unwrap();

        let mut catalogs = Catalogs::new();
        catalogs.register(registry);
        assert_eq!(catalogs.len(), 1);

        let biomes = catalogs.get::<CatalogRegistry<Biome>>().unwrap();
        assert!(biomes.get_by_id("PLAINS").unwrap().is_some());

        catalogs.complete_startup(false);
        assert_eq!(catalogs.states(), vec![("biome", RegistryState::Closed)]);
        assert!(catalogs
            .get_mut::<CatalogRegistry<Biome>>()
            .unwrap()
            .insert("desert", Biome("desert"))
            .is_err());
    }
}
