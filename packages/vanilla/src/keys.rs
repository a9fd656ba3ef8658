//! Keys for the reference aspects.

use aspect_container::query;
use aspect_data::{DataError, Key, KeyRegistry};
use lazy_static::lazy_static;

use crate::{HorseColor, HorseStyle, HorseVariant, ItemStackSnapshot};

lazy_static! {
    pub static ref HORSE_COLOR: Key<HorseColor> =
        Key::builder("horse_color", query!("HorseColor")).name("Horse Color").build();
    pub static ref HORSE_STYLE: Key<HorseStyle> =
        Key::builder("horse_style", query!("HorseStyle")).name("Horse Style").build();
    pub static ref HORSE_VARIANT: Key<HorseVariant> =
        Key::builder("horse_variant", query!("HorseVariant")).name("Horse Variant").build();
    pub static ref PERSISTS: Key<bool> =
        Key::builder("persists", query!("Persists")).name("Persists").build();
    pub static ref STUCK_ARROWS: Key<i32> = Key::builder("stuck_arrows", query!("StuckArrows"))
        .name("Stuck Arrows")
        .bounds(0, i32::MAX)
        .build();
    pub static ref REPRESENTED_ITEM: Key<ItemStackSnapshot> =
        Key::builder("represented_item", query!("RepresentedItem"))
            .name("Represented Item")
            .build();
}

/// Record every reference key.
pub fn register_keys(registry: &mut KeyRegistry) -> Result<(), DataError> {
    registry.register(&HORSE_COLOR)?;
    registry.register(&HORSE_STYLE)?;
    registry.register(&HORSE_VARIANT)?;
    registry.register(&PERSISTS)?;
    registry.register(&STUCK_ARROWS)?;
    registry.register(&REPRESENTED_ITEM)?;
    Ok(())
}
