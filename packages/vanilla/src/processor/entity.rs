//! Entity processors.

use aspect_data::{
    DataManipulator, DataProcessor, DataTransactionResult, DataValue, Key, Value, ValueProcessor,
};

use crate::keys::{HORSE_COLOR, HORSE_STYLE, HORSE_VARIANT, PERSISTS, STUCK_ARROWS};
use crate::{
    EntityHorse, EntityLiving, EntityLivingBase, HorseColor, HorseData, HorseStyle, HorseVariant,
};

/// `persists` on any mob. Always present, so it cannot be removed.
pub struct PersistingDataProcessor;

impl ValueProcessor for PersistingDataProcessor {
    type Host = EntityLiving;
    type Value = bool;

    fn key(&self) -> &Key<bool> {
        &PERSISTS
    }

    fn construct_value(&self, actual: bool) -> Value<bool> {
        Value::new(PERSISTS.clone(), false, actual)
    }

    fn set(&self, entity: &mut EntityLiving, value: bool) -> bool {
        entity.persistence_required = value;
        true
    }

    fn get_val(&self, entity: &EntityLiving) -> Option<bool> {
        Some(entity.is_no_despawn_required())
    }

    fn remove_from(&self, _entity: &mut EntityLiving) -> DataTransactionResult {
        DataTransactionResult::fail_no_data()
    }
}

/// `stuck_arrows` on any living entity, bounded to `[0, i32::MAX]`.
pub struct StuckArrowsProcessor;

impl ValueProcessor for StuckArrowsProcessor {
    type Host = EntityLivingBase;
    type Value = i32;

    fn key(&self) -> &Key<i32> {
        &STUCK_ARROWS
    }

    fn construct_value(&self, actual: i32) -> Value<i32> {
        Value::new(STUCK_ARROWS.clone(), 0, actual)
    }

    fn set(&self, entity: &mut EntityLivingBase, arrows: i32) -> bool {
        if arrows < 0 {
            return false;
        }
        entity.set_arrow_count_in_entity(arrows);
        true
    }

    fn get_val(&self, entity: &EntityLivingBase) -> Option<i32> {
        Some(entity.arrow_count_in_entity())
    }

    fn remove_from(&self, _entity: &mut EntityLivingBase) -> DataTransactionResult {
        DataTransactionResult::fail_no_data()
    }
}

const COLOR_MASK: i32 = 0xFF;
const STYLE_SHIFT: i32 = 8;

fn horse_color(horse: &EntityHorse) -> Option<HorseColor> {
    HorseColor::from_index(horse.horse_variant() & COLOR_MASK)
}

fn set_horse_color(horse: &mut EntityHorse, color: HorseColor) {
    let variant = (horse.horse_variant() & !COLOR_MASK) | color.index();
    horse.set_horse_variant(variant);
}

fn horse_style(horse: &EntityHorse) -> Option<HorseStyle> {
    HorseStyle::from_index((horse.horse_variant() >> STYLE_SHIFT) & COLOR_MASK)
}

fn set_horse_style(horse: &mut EntityHorse, style: HorseStyle) {
    let variant = (horse.horse_variant() & COLOR_MASK) | (style.index() << STYLE_SHIFT);
    horse.set_horse_variant(variant);
}

fn horse_variant(horse: &EntityHorse) -> Option<HorseVariant> {
    HorseVariant::from_index(horse.horse_type())
}

fn set_horse_variant(horse: &mut EntityHorse, variant: HorseVariant) {
    horse.set_horse_type(variant.index());
}

/// Whole [`HorseData`] on a horse.
pub struct HorseDataProcessor;

impl DataProcessor for HorseDataProcessor {
    type Host = EntityHorse;
    type Manipulator = HorseData;

    fn from_host(&self, horse: &EntityHorse) -> Option<HorseData> {
        Some(HorseData::new(
            horse_color(horse).unwrap_or(HorseColor::WHITE),
            horse_style(horse).unwrap_or(HorseStyle::NONE),
            horse_variant(horse).unwrap_or(HorseVariant::HORSE),
        ))
    }

    fn set(&self, horse: &mut EntityHorse, data: &HorseData) -> DataTransactionResult {
        let old = self.from_host(horse);
        set_horse_color(horse, data.color());
        set_horse_style(horse, data.style());
        set_horse_variant(horse, data.variant());

        let mut builder = DataTransactionResult::builder();
        for value in data.values() {
            builder = builder.success(value);
        }
        for value in old.iter().flat_map(|old| old.values()) {
            builder = builder.replace(value);
        }
        builder.build()
    }

    fn remove_from(&self, _horse: &mut EntityHorse) -> DataTransactionResult {
        DataTransactionResult::fail_no_data()
    }
}

/// One horse aspect, read out of the packed type and variant fields.
pub struct HorseValueProcessor<V: DataValue> {
    key: &'static Key<V>,
    default: V,
    read: fn(&EntityHorse) -> Option<V>,
    write: fn(&mut EntityHorse, V),
}

impl HorseValueProcessor<HorseColor> {
    pub fn color() -> Self {
        HorseValueProcessor {
            key: &HORSE_COLOR,
            default: HorseColor::WHITE,
            read: horse_color,
            write: set_horse_color,
        }
    }
}

impl HorseValueProcessor<HorseStyle> {
    pub fn style() -> Self {
        HorseValueProcessor {
            key: &HORSE_STYLE,
            default: HorseStyle::NONE,
            read: horse_style,
            write: set_horse_style,
        }
    }
}

impl HorseValueProcessor<HorseVariant> {
    pub fn variant() -> Self {
        HorseValueProcessor {
            key: &HORSE_VARIANT,
            default: HorseVariant::HORSE,
            read: horse_variant,
            write: set_horse_variant,
        }
    }
}

impl<V: DataValue> ValueProcessor for HorseValueProcessor<V> {
    type Host = EntityHorse;
    type Value = V;

    fn key(&self) -> &Key<V> {
        self.key
    }

    fn construct_value(&self, actual: V) -> Value<V> {
        Value::new(self.key.clone(), self.default.clone(), actual)
    }

    fn set(&self, horse: &mut EntityHorse, value: V) -> bool {
        (self.write)(horse, value);
        true
    }

    fn get_val(&self, horse: &EntityHorse) -> Option<V> {
        (self.read)(horse)
    }

    fn remove_from(&self, _horse: &mut EntityHorse) -> DataTransactionResult {
        DataTransactionResult::fail_no_data()
    }
}
