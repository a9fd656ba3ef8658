//! Reference aspects for the aspect framework.
//!
//! A small host model (entities, horses, flower pots) with the keys,
//! manipulators, processors and catalogs that serve it. [`registries`]
//! collects all of it for [`aspect_runtime::Framework`].
//!
//! # Example
//!
//! ```rust
//! use aspect_runtime::{Framework, FrameworkConfig};
//! use aspect_vanilla::{keys, registries, EntityLiving};
//!
//! let framework = Framework::new(FrameworkConfig::default(), registries().unwrap());
//! let mut zombie = EntityLiving::new(12);
//! let result = framework.processors().offer(&mut zombie, &keys::PERSISTS, true);
//! assert!(result.is_successful());
//! assert!(zombie.is_no_despawn_required());
//! ```

mod catalog;
mod host;
mod item;
pub mod keys;
mod manipulator;
pub mod processor;
mod types;

pub use catalog::{register_catalogs, EnumTraitRegistry, FLOWER_POT, PLANKS, STONE};
pub use host::{
    flower_pot_can_contain, BlockPos, Entity, EntityHorse, EntityLiving, EntityLivingBase,
    TileEntityFlowerPot,
};
pub use item::ItemStackSnapshot;
pub use manipulator::{HorseData, PersistingData, RepresentedItemData, StuckArrowsData};
pub use types::{BlockType, EnumTrait, HorseColor, HorseStyle, HorseVariant};

use aspect_runtime::Registries;

/// Keys, processors and catalogs for every reference aspect.
pub fn registries() -> aspect_runtime::Result<Registries> {
    let mut registries = Registries::new();
    keys::register_keys(&mut registries.keys)?;
    processor::register_processors(&mut registries.processors)?;
    register_catalogs(&mut registries.catalogs)?;
    Ok(registries)
}
