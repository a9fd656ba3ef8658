//! Reference host model.
//!
//! These stand in for objects owned by the game runtime. Each type embeds its
//! superclass as a field, and `data_holder!` exposes that chain so processors
//! bound to an ancestor serve every descendant.

use aspect_data::data_holder;

/// Any entity in the world.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub entity_id: u32,
}

/// An entity with health: players, mobs, armor stands.
#[derive(Debug, Clone, Default)]
pub struct EntityLivingBase {
    pub entity: Entity,
    arrow_count: i32,
}

impl EntityLivingBase {
    pub fn new(entity_id: u32) -> Self {
        EntityLivingBase {
            entity: Entity { entity_id },
            arrow_count: 0,
        }
    }

    pub fn arrow_count_in_entity(&self) -> i32 {
        self.arrow_count
    }

    pub fn set_arrow_count_in_entity(&mut self, count: i32) {
        self.arrow_count = count;
    }
}

/// A mob with AI and despawn rules.
#[derive(Debug, Clone, Default)]
pub struct EntityLiving {
    pub living: EntityLivingBase,
    pub persistence_required: bool,
}

impl EntityLiving {
    pub fn new(entity_id: u32) -> Self {
        EntityLiving {
            living: EntityLivingBase::new(entity_id),
            persistence_required: false,
        }
    }

    /// Whether the mob is kept when no player is nearby.
    pub fn is_no_despawn_required(&self) -> bool {
        self.persistence_required
    }
}

/// A horse, donkey, mule, or undead horse.
#[derive(Debug, Clone, Default)]
pub struct EntityHorse {
    pub mob: EntityLiving,
    horse_type: i32,
    /// Color in the low byte, markings in the second byte.
    horse_variant: i32,
}

impl EntityHorse {
    pub fn new(entity_id: u32) -> Self {
        EntityHorse {
            mob: EntityLiving::new(entity_id),
            horse_type: 0,
            horse_variant: 0,
        }
    }

    pub fn horse_type(&self) -> i32 {
        self.horse_type
    }

    pub fn set_horse_type(&mut self, horse_type: i32) {
        self.horse_type = horse_type;
    }

    pub fn horse_variant(&self) -> i32 {
        self.horse_variant
    }

    pub fn set_horse_variant(&mut self, variant: i32) {
        self.horse_variant = variant;
    }
}

/// A block position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Flower pot tile entity.
#[derive(Debug, Clone, Default)]
pub struct TileEntityFlowerPot {
    pub pos: BlockPos,
    flower_pot_item: Option<String>,
    flower_pot_data: i32,
    dirty: bool,
    block_updates: u32,
}

impl TileEntityFlowerPot {
    pub fn new(pos: BlockPos) -> Self {
        TileEntityFlowerPot {
            pos,
            ..Self::default()
        }
    }

    pub fn flower_pot_item(&self) -> Option<&str> {
        self.flower_pot_item.as_deref()
    }

    pub fn flower_pot_data(&self) -> i32 {
        self.flower_pot_data
    }

    /// Plant `item` with damage value `data`, or empty the pot with `None`.
    pub fn set_flower_pot_data(&mut self, item: Option<&str>, data: i32) {
        self.flower_pot_item = item.map(str::to_string);
        self.flower_pot_data = data;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Ask the world to re-render the block.
    pub fn mark_block_for_update(&mut self) {
        self.block_updates += 1;
    }

    pub fn block_updates(&self) -> u32 {
        self.block_updates
    }
}

/// Whether a flower pot can hold `item` with damage value `data`.
pub fn flower_pot_can_contain(item: &str, data: i32) -> bool {
    const FERN: i32 = 2;
    match item {
        "minecraft:yellow_flower"
        | "minecraft:red_flower"
        | "minecraft:cactus"
        | "minecraft:brown_mushroom"
        | "minecraft:red_mushroom"
        | "minecraft:sapling"
        | "minecraft:deadbush" => true,
        "minecraft:tallgrass" => data == FERN,
        _ => false,
    }
}

data_holder!(Entity);
data_holder!(EntityLivingBase => entity);
data_holder!(EntityLiving => living);
data_holder!(EntityHorse => mob);
data_holder!(TileEntityFlowerPot);

#[cfg(test)]
mod tests {
    use super::*;
    use aspect_data::{DataHolder, HostType};

    #[test]
    fn horse_lineage_reaches_entity() {
        let horse = EntityHorse::new(7);
        let holder: &dyn DataHolder = &horse;
        assert_eq!(holder.rank_of(&HostType::of::<EntityLiving>()), Some(1));
        assert_eq!(holder.rank_of(&HostType::of::<Entity>()), Some(3));
        assert_eq!(holder.view_as::<Entity>().map(|e| e.entity_id), Some(7));
        assert_eq!(holder.rank_of(&HostType::of::<TileEntityFlowerPot>()), None);
    }

    #[test]
    fn ferns_are_the_only_pottable_grass() {
        assert!(flower_pot_can_contain("minecraft:tallgrass", 2));
        assert!(!flower_pot_can_contain("minecraft:tallgrass", 1));
        assert!(flower_pot_can_contain("minecraft:sapling", 5));
        assert!(!flower_pot_can_contain("minecraft:diamond", 0));
    }
}
