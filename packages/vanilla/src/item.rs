//! Item stack snapshots.

use std::cmp::Ordering;

use aspect_container::{from_data, to_data, Data};
use aspect_data::DataValue;
use serde::{Deserialize, Serialize};

/// An immutable description of an item stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStackSnapshot {
    item_type: String,
    count: u32,
    damage: i32,
}

impl ItemStackSnapshot {
    /// The empty stack.
    pub const NONE: ItemStackSnapshot = ItemStackSnapshot {
        item_type: String::new(),
        count: 0,
        damage: 0,
    };

    pub fn new(item_type: &str, count: u32, damage: i32) -> Self {
        ItemStackSnapshot {
            item_type: item_type.to_string(),
            count,
            damage,
        }
    }

    /// One item of `item_type`.
    pub fn of(item_type: &str, damage: i32) -> Self {
        Self::new(item_type, 1, damage)
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }
}

impl DataValue for ItemStackSnapshot {
    fn to_data(&self) -> Data {
        // three plain fields; serialization cannot fail
        to_data(self).unwrap_or(Data::Null)
    }

    fn from_data(data: &Data) -> Option<Self> {
        from_data(data).ok()
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.item_type
            .cmp(&other.item_type)
            .then(self.damage.cmp(&other.damage))
            .then(self.count.cmp(&other.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspect_container::query;

    #[test]
    fn none_is_empty() {
        assert!(ItemStackSnapshot::NONE.is_none());
        assert!(!ItemStackSnapshot::of("minecraft:cactus", 0).is_none());
    }

    #[test]
    fn snapshot_serializes_as_container() {
        let stack = ItemStackSnapshot::new("minecraft:red_flower", 3, 4);
        let data = stack.to_data();
        assert_eq!(
            data.get(&query!("item_type")),
            Some(&Data::from("minecraft:red_flower"))
        );
        assert_eq!(data.get(&query!("damage")), Some(&Data::Integer(4)));
        assert_eq!(ItemStackSnapshot::from_data(&data), Some(stack));
        assert_eq!(ItemStackSnapshot::from_data(&Data::from("cactus")), None);
    }

    #[test]
    fn ordering_is_type_then_damage() {
        let a = ItemStackSnapshot::of("minecraft:sapling", 1);
        let b = ItemStackSnapshot::of("minecraft:sapling", 3);
        let c = ItemStackSnapshot::of("minecraft:cactus", 9);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(c.compare(&a), Ordering::Less);
    }
}
