//! Reference catalogs.

use aspect_catalog::{
    AdditionalCatalogRegistryModule, CatalogError, CatalogModule, CatalogRegistry,
    CatalogRegistryModule, CatalogType, Catalogs, RegistryState, Result,
};
use lazy_static::lazy_static;
use tracing::debug;

use crate::{BlockType, EnumTrait, HorseColor, HorseStyle, HorseVariant};

lazy_static! {
    pub static ref STONE: BlockType = BlockType::new("minecraft:stone", "Stone");
    pub static ref PLANKS: BlockType = BlockType::new("minecraft:planks", "Wood Planks");
    pub static ref FLOWER_POT: BlockType = BlockType::new("minecraft:flower_pot", "Flower Pot");
}

/// Block traits, keyed `<block id>_<trait name>`.
///
/// Traits come from the blocks themselves, so callers outside the framework
/// never add to this catalog.
#[derive(Debug)]
pub struct EnumTraitRegistry {
    traits: CatalogRegistry<EnumTrait>,
}

impl EnumTraitRegistry {
    pub fn new() -> Self {
        // no static set; every trait arrives through register_block
        EnumTraitRegistry {
            traits: CatalogRegistry::empty("enum_trait", false),
        }
    }

    /// Register `property` of `block` under `<id>_<property name>`, both
    /// lower-cased.
    pub fn register_block(&mut self, id: &str, block: &BlockType, property: EnumTrait) -> Result<()> {
        if id.is_empty() {
            return Err(CatalogError::EmptyId);
        }
        let trait_id = format!("{}_{}", id, property.name()).to_lowercase();
        debug!(block = block.id(), %trait_id, "block trait registered");
        self.traits.insert(&trait_id, property)
    }

    pub fn state(&self) -> RegistryState {
        self.traits.state()
    }
}

impl Default for EnumTraitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogRegistryModule<EnumTrait> for EnumTraitRegistry {
    fn get_by_id(&self, id: &str) -> Result<Option<&EnumTrait>> {
        self.traits.get_by_id(id)
    }

    fn get_all(&self) -> Vec<&EnumTrait> {
        self.traits.get_all()
    }
}

impl AdditionalCatalogRegistryModule<EnumTrait> for EnumTraitRegistry {
    fn allows_api_registration(&self) -> bool {
        false
    }

    fn register_additional_catalog(&mut self, entry: EnumTrait) -> Result<()> {
        self.traits.register_additional_catalog(entry)
    }
}

impl CatalogModule for EnumTraitRegistry {
    fn catalog_name(&self) -> &'static str {
        self.traits.name()
    }

    fn catalog_state(&self) -> RegistryState {
        self.traits.state()
    }

    fn complete_startup(&mut self, allow_registration: bool) -> RegistryState {
        self.traits.complete_startup(allow_registration)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Register every reference catalog.
pub fn register_catalogs(catalogs: &mut Catalogs) -> Result<()> {
    let mut colors = CatalogRegistry::new("horse_color", false);
    colors.populate(HorseColor::ALL.iter().copied())?;
    catalogs.register(colors);

    let mut styles = CatalogRegistry::new("horse_style", false);
    styles.populate(HorseStyle::ALL.iter().copied())?;
    catalogs.register(styles);

    let mut variants = CatalogRegistry::new("horse_variant", false);
    variants.populate(HorseVariant::ALL.iter().copied())?;
    catalogs.register(variants);

    let mut blocks = CatalogRegistry::new("block_type", true);
    blocks.populate([STONE.clone(), PLANKS.clone(), FLOWER_POT.clone()])?;
    catalogs.register(blocks);

    let mut traits = EnumTraitRegistry::new();
    traits.register_block(
        STONE.id(),
        &STONE,
        EnumTrait::new(
            "minecraft:stone_variant",
            "variant",
            &["stone", "granite", "smooth_granite", "diorite", "andesite"],
        ),
    )?;
    traits.register_block(
        PLANKS.id(),
        &PLANKS,
        EnumTrait::new(
            "minecraft:planks_variant",
            "variant",
            &["oak", "spruce", "birch", "jungle", "acacia", "dark_oak"],
        ),
    )?;
    catalogs.register(traits);
    Ok(())
}
