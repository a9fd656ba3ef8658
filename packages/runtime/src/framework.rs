//! The framework handle.
//!
//! A [`Framework`] owns the processor registry, the key registry and the
//! catalogs once startup is over. Components normally receive a
//! `&Framework`; hosts that need ambient access initialize one process-wide
//! instance with [`Framework::init`] and reach it with
//! [`Framework::instance`].

use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use aspect_catalog::Catalogs;
use aspect_data::{KeyRegistry, ProcessorRegistry};
use tracing::debug;

use crate::{FrameworkConfig, FrameworkError, Result};

static INSTANCE: OnceLock<Framework> = OnceLock::new();

/// Everything registered during startup.
#[derive(Default)]
pub struct Registries {
    pub processors: ProcessorRegistry,
    pub keys: KeyRegistry,
    pub catalogs: Catalogs,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A started framework: registries frozen, catalogs opened or closed.
pub struct Framework {
    config: FrameworkConfig,
    processors: ProcessorRegistry,
    keys: KeyRegistry,
    catalogs: RwLock<Catalogs>,
}

impl Framework {
    /// Finish startup over `registries`.
    pub fn new(config: FrameworkConfig, registries: Registries) -> Self {
        let Registries {
            mut processors,
            keys,
            mut catalogs,
        } = registries;

        processors.set_trace_dispatch(config.trace_dispatch);
        processors.freeze();
        catalogs.complete_startup(config.allow_catalog_registration);
        debug!(
            name = %config.name,
            keys = keys.len(),
            catalogs = catalogs.len(),
            "framework started"
        );

        Self {
            config,
            processors,
            keys,
            catalogs: RwLock::new(catalogs),
        }
    }

    /// Start the process-wide instance.
    ///
    /// # Errors
    ///
    /// [`FrameworkError::AlreadyInitialized`] if an instance exists.
    pub fn init(config: FrameworkConfig, registries: Registries) -> Result<&'static Framework> {
        let mut created = false;
        let instance = INSTANCE.get_or_init(|| {
            created = true;
            Framework::new(config, registries)
        });
        if created {
            Ok(instance)
        } else {
            Err(FrameworkError::AlreadyInitialized)
        }
    }

    /// The process-wide instance.
    ///
    /// # Errors
    ///
    /// [`FrameworkError::NotInitialized`] before [`Framework::init`].
    pub fn instance() -> Result<&'static Framework> {
        INSTANCE.get().ok_or(FrameworkError::NotInitialized)
    }

    pub fn is_initialized() -> bool {
        INSTANCE.get().is_some()
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &FrameworkConfig {
        &self.config
    }

    pub fn processors(&self) -> &ProcessorRegistry {
        &self.processors
    }

    pub fn keys(&self) -> &KeyRegistry {
        &self.keys
    }

    pub fn catalogs(&self) -> RwLockReadGuard<'_, Catalogs> {
        self.catalogs.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access for runtime registration into open catalogs.
    pub fn catalogs_mut(&self) -> RwLockWriteGuard<'_, Catalogs> {
        self.catalogs.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspect_catalog::{CatalogRegistry, CatalogType, RegistryState};
    use aspect_container::query;
    use aspect_data::{DataError, Key};

    #[derive(Clone, Debug)]
    struct Tool(&'static str);

    impl CatalogType for Tool {
        fn id(&self) -> &str {
            self.0
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    fn registries() -> Registries {
        let mut registries = Registries::new();
        let mut tools = CatalogRegistry::new("tool", true);
        tools.populate([Tool("pickaxe")]).unwrap();
        registries.catalogs.register(tools);
        registries
            .keys
            .register(&Key::<bool>::builder("sneaking", query!("Sneaking")).build())
            .unwrap();
        registries
    }

    #[test]
    fn test_startup_freezes_processors() {
        let framework = Framework::new(FrameworkConfig::default(), registries());
        assert_eq!(framework.name(), "aspect");
        assert!(framework.processors().is_frozen());
        assert!(framework.keys().get("sneaking").is_some());
    }

    #[test]
    fn test_catalog_state_follows_config() {
        let open = Framework::new(FrameworkConfig::default(), registries());
        assert_eq!(open.catalogs().states(), vec![("tool", RegistryState::Open)]);
        open.catalogs_mut()
            .get_mut::<CatalogRegistry<Tool>>()
            .unwrap()
            .insert("shears", Tool("shears"))
            .unwrap();

        let config = FrameworkConfig {
            allow_catalog_registration: false,
            ..FrameworkConfig::default()
        };
        let closed = Framework::new(config, registries());
        assert_eq!(
            closed.catalogs().states(),
            vec![("tool", RegistryState::Closed)]
        );
    }

    #[test]
    fn test_errors_convert() {
        let err: FrameworkError = DataError::RegistryFrozen.into();
        assert_eq!(
            err.to_string(),
            "data error: registry is frozen; register processors during startup"
        );
    }
}
