//! Reference processors and their registration.

mod entity;
mod tile;

pub use entity::{
    HorseDataProcessor, HorseValueProcessor, PersistingDataProcessor, StuckArrowsProcessor,
};
pub use tile::FlowerPotValueProcessor;

use aspect_data::{DataError, ProcessorRegistry};

use crate::{PersistingData, RepresentedItemData, StuckArrowsData};

/// Register every reference processor.
pub fn register_processors(processors: &mut ProcessorRegistry) -> Result<(), DataError> {
    processors.register_dual::<_, PersistingData>(PersistingDataProcessor)?;
    processors.register_dual::<_, StuckArrowsData>(StuckArrowsProcessor)?;
    processors.register_dual::<_, RepresentedItemData>(FlowerPotValueProcessor)?;

    processors.register_data_processor(HorseDataProcessor)?;
    processors.register_value_processor(HorseValueProcessor::color())?;
    processors.register_value_processor(HorseValueProcessor::style())?;
    processors.register_value_processor(HorseValueProcessor::variant())?;
    Ok(())
}
