//! Tile entity processors.

use aspect_data::{DataTransactionResult, Key, Value, ValueProcessor};
use tracing::debug;

use crate::host::flower_pot_can_contain;
use crate::keys::REPRESENTED_ITEM;
use crate::{ItemStackSnapshot, TileEntityFlowerPot};

/// The plant in a flower pot. [`ItemStackSnapshot::NONE`] empties the pot.
pub struct FlowerPotValueProcessor;

impl ValueProcessor for FlowerPotValueProcessor {
    type Host = TileEntityFlowerPot;
    type Value = ItemStackSnapshot;

    fn key(&self) -> &Key<ItemStackSnapshot> {
        &REPRESENTED_ITEM
    }

    fn construct_value(&self, actual: ItemStackSnapshot) -> Value<ItemStackSnapshot> {
        Value::new(REPRESENTED_ITEM.clone(), ItemStackSnapshot::NONE, actual)
    }

    fn set(&self, pot: &mut TileEntityFlowerPot, value: ItemStackSnapshot) -> bool {
        if value.is_none() {
            pot.set_flower_pot_data(None, 0);
        } else {
            if !flower_pot_can_contain(value.item_type(), value.damage()) {
                debug!(item = value.item_type(), "flower pot cannot hold item");
                return false;
            }
            pot.set_flower_pot_data(Some(value.item_type()), value.damage());
        }
        pot.mark_dirty();
        pot.mark_block_for_update();
        true
    }

    fn get_val(&self, pot: &TileEntityFlowerPot) -> Option<ItemStackSnapshot> {
        let item = pot.flower_pot_item()?;
        Some(ItemStackSnapshot::of(item, pot.flower_pot_data()))
    }

    fn remove_from(&self, pot: &mut TileEntityFlowerPot) -> DataTransactionResult {
        let Some(old) = self.get_val(pot) else {
            return DataTransactionResult::success_no_data();
        };
        pot.set_flower_pot_data(None, 0);
        pot.mark_dirty();
        DataTransactionResult::success_remove(self.construct_immutable_value(old))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockPos;

    fn pot() -> TileEntityFlowerPot {
        TileEntityFlowerPot::new(BlockPos { x: 1, y: 64, z: -3 })
    }

    #[test]
    fn empty_pot_has_no_value() {
        assert_eq!(FlowerPotValueProcessor.get_val(&pot()), None);
    }

    #[test]
    fn planting_marks_the_pot() {
        let mut pot = pot();
        let fern = ItemStackSnapshot::of("minecraft:tallgrass", 2);
        assert!(FlowerPotValueProcessor.set(&mut pot, fern.clone()));
        assert!(pot.is_dirty());
        assert_eq!(pot.block_updates(), 1);
        assert_eq!(FlowerPotValueProcessor.get_val(&pot), Some(fern));
    }

    #[test]
    fn unpottable_item_is_refused() {
        let mut pot = pot();
        let result =
            FlowerPotValueProcessor.offer(&mut pot, ItemStackSnapshot::of("minecraft:stone", 0));
        assert!(!result.is_successful());
        assert!(!pot.is_dirty());
        assert_eq!(pot.flower_pot_item(), None);
    }

    #[test]
    fn none_clears_the_pot() {
        let mut pot = pot();
        pot.set_flower_pot_data(Some("minecraft:cactus"), 0);
        let result = FlowerPotValueProcessor.offer(&mut pot, ItemStackSnapshot::NONE);
        assert!(result.is_successful());
        assert_eq!(pot.flower_pot_item(), None);
        assert_eq!(
            result
                .replaced_value(&REPRESENTED_ITEM)
                .map(|v| v.get().item_type().to_string()),
            Some("minecraft:cactus".to_string())
        );
    }

    #[test]
    fn remove_reports_old_plant() {
        let mut pot = pot();
        assert!(FlowerPotValueProcessor.remove_from(&mut pot).is_empty());

        pot.set_flower_pot_data(Some("minecraft:red_mushroom"), 0);
        let result = FlowerPotValueProcessor.remove_from(&mut pot);
        assert!(result.is_successful());
        assert!(result.replaced_value(&REPRESENTED_ITEM).is_some());
        assert_eq!(pot.flower_pot_item(), None);
    }
}
