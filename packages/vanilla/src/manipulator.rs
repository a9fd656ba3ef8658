//! Reference manipulators.

use aspect_data::{DataManipulator, FieldRegistry};
use lazy_static::lazy_static;

use crate::keys::{HORSE_COLOR, HORSE_STYLE, HORSE_VARIANT, PERSISTS, REPRESENTED_ITEM, STUCK_ARROWS};
use crate::{HorseColor, HorseStyle, HorseVariant, ItemStackSnapshot};

lazy_static! {
    static ref HORSE_FIELDS: FieldRegistry<HorseData> = FieldRegistry::<HorseData>::builder("HorseData")
        .field(&HORSE_COLOR, |m| &m.color, |m, v| m.color = v)
        .field(&HORSE_STYLE, |m| &m.style, |m, v| m.style = v)
        .field(&HORSE_VARIANT, |m| &m.variant, |m, v| m.variant = v)
        .build();
    static ref PERSISTING_FIELDS: FieldRegistry<PersistingData> =
        FieldRegistry::<PersistingData>::builder("PersistingData")
            .field(&PERSISTS, |m| &m.persists, |m, v| m.persists = v)
            .build();
    static ref STUCK_ARROWS_FIELDS: FieldRegistry<StuckArrowsData> =
        FieldRegistry::<StuckArrowsData>::builder("StuckArrowsData")
            .field(&STUCK_ARROWS, |m| &m.arrows, |m, v| m.arrows = v)
            .build();
    static ref REPRESENTED_ITEM_FIELDS: FieldRegistry<RepresentedItemData> =
        FieldRegistry::<RepresentedItemData>::builder("RepresentedItemData")
            .field(&REPRESENTED_ITEM, |m| &m.item, |m, v| m.item = v)
            .build();
}

/// Color, markings and species of a horse.
#[derive(Clone, Debug, PartialEq)]
pub struct HorseData {
    color: HorseColor,
    style: HorseStyle,
    variant: HorseVariant,
}

impl HorseData {
    pub fn new(color: HorseColor, style: HorseStyle, variant: HorseVariant) -> Self {
        HorseData {
            color,
            style,
            variant,
        }
    }

    pub fn color(&self) -> HorseColor {
        self.color
    }

    pub fn style(&self) -> HorseStyle {
        self.style
    }

    pub fn variant(&self) -> HorseVariant {
        self.variant
    }
}

impl Default for HorseData {
    fn default() -> Self {
        Self::new(HorseColor::WHITE, HorseStyle::NONE, HorseVariant::HORSE)
    }
}

impl DataManipulator for HorseData {
    fn fields() -> &'static FieldRegistry<Self> {
        &HORSE_FIELDS
    }
}

/// Whether a mob survives despawning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersistingData {
    persists: bool,
}

impl PersistingData {
    pub fn new(persists: bool) -> Self {
        PersistingData { persists }
    }
}

impl DataManipulator for PersistingData {
    fn fields() -> &'static FieldRegistry<Self> {
        &PERSISTING_FIELDS
    }
}

/// Arrows stuck in a living entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StuckArrowsData {
    arrows: i32,
}

impl DataManipulator for StuckArrowsData {
    fn fields() -> &'static FieldRegistry<Self> {
        &STUCK_ARROWS_FIELDS
    }
}

/// The item a block or entity displays.
#[derive(Clone, Debug, PartialEq)]
pub struct RepresentedItemData {
    item: ItemStackSnapshot,
}

impl RepresentedItemData {
    pub fn new(item: ItemStackSnapshot) -> Self {
        RepresentedItemData { item }
    }
}

impl Default for RepresentedItemData {
    fn default() -> Self {
        Self::new(ItemStackSnapshot::NONE)
    }
}

impl DataManipulator for RepresentedItemData {
    fn fields() -> &'static FieldRegistry<Self> {
        &REPRESENTED_ITEM_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn horse_defaults() {
        let data = HorseData::default();
        assert_eq!(data.get(&HORSE_COLOR).unwrap(), HorseColor::WHITE);
        assert_eq!(data.get(&HORSE_STYLE).unwrap(), HorseStyle::NONE);
        assert_eq!(data.get(&HORSE_VARIANT).unwrap(), HorseVariant::HORSE);
    }

    #[test]
    fn aspect_defaults_follow_default_impls() {
        let horse = HorseData::default().get_value(&HORSE_STYLE).unwrap();
        assert_eq!(horse.default_value(), &HorseStyle::NONE);
        let arrows = StuckArrowsData::default().get_value(&STUCK_ARROWS).unwrap();
        assert_eq!(arrows.default_value(), &0);
    }

    #[test]
    fn horse_compares_by_catalog_id() {
        let mut a = HorseData::default();
        let b = HorseData::default();
        a.set(&HORSE_STYLE, HorseStyle::BLACK_DOTS).unwrap();
        // "black_dots" sorts before "none"
        assert_eq!(a.compare_to(&b), Ordering::Less);
    }

    #[test]
    fn stuck_arrows_refuses_negative() {
        let mut data = StuckArrowsData::default();
        assert!(!data.set(&STUCK_ARROWS, -1).unwrap());
        assert!(data.set(&STUCK_ARROWS, i32::MAX).unwrap());
        assert_eq!(data.get(&STUCK_ARROWS).unwrap(), i32::MAX);
    }

    #[test]
    fn persisting_does_not_support_horse_keys() {
        let data = PersistingData::new(true);
        assert!(!data.supports(&HORSE_COLOR));
        assert!(data.get(&HORSE_COLOR).is_err());
        assert!(data.get(&PERSISTS).unwrap());
    }

    #[test]
    fn represented_item_defaults_to_none() {
        let data = RepresentedItemData::default();
        assert!(data.get(&REPRESENTED_ITEM).unwrap().is_none());
        let value = data.get_value(&REPRESENTED_ITEM).unwrap();
        assert_eq!(value.default_value(), &ItemStackSnapshot::NONE);
    }
}
