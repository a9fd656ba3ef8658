//! Data processors and the manipulator/processor bridge.
//!
//! A [`DataProcessor`] reads and writes a whole manipulator on one host type.
//! [`DualProcessor`] derives one from a single [`ValueProcessor`] whose key
//! is the manipulator's only aspect, so the whole-component path and the
//! single-aspect path run the same validation and the same host access.

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    DataError, DataHolder, DataManipulator, DataTransactionResult, HostType, ValueProcessor,
};

/// Strategy reading and writing a whole manipulator on one host type.
pub trait DataProcessor: Send + Sync + 'static {
    type Host: Any + Send + Sync;
    type Manipulator: DataManipulator;

    /// A manipulator with every aspect at its default.
    fn create_manipulator(&self) -> Self::Manipulator {
        Self::Manipulator::default()
    }

    /// Populate a manipulator from the host, or `None` if the host carries
    /// none of its aspects.
    fn from_host(&self, host: &Self::Host) -> Option<Self::Manipulator>;

    /// Write every aspect of `manipulator` into the host.
    fn set(&self, host: &mut Self::Host, manipulator: &Self::Manipulator)
        -> DataTransactionResult;

    fn remove_from(&self, host: &mut Self::Host) -> DataTransactionResult;

    fn host_type(&self) -> HostType {
        HostType::of::<Self::Host>()
    }
}

/// A [`DataProcessor`] for a single-aspect manipulator, backed by the
/// [`ValueProcessor`] for that aspect.
pub struct DualProcessor<P, M> {
    processor: Arc<P>,
    _manipulator: PhantomData<fn() -> M>,
}

impl<P: ValueProcessor, M: DataManipulator> DualProcessor<P, M> {
    /// Bind `processor` to `M`.
    ///
    /// # Errors
    ///
    /// [`DataError::IncompatibleManipulator`] unless `M` declares exactly
    /// the processor's key.
    pub fn new(processor: P) -> Result<Self, DataError> {
        Self::shared(Arc::new(processor))
    }

    pub(crate) fn shared(processor: Arc<P>) -> Result<Self, DataError> {
        let fields = M::fields();
        if fields.len() != 1 || !fields.supports(processor.key().id()) {
            return Err(DataError::IncompatibleManipulator {
                manipulator: fields.name(),
                key: processor.key().id().clone(),
            });
        }
        Ok(DualProcessor {
            processor,
            _manipulator: PhantomData,
        })
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }
}

impl<P: ValueProcessor, M: DataManipulator> DataProcessor for DualProcessor<P, M> {
    type Host = P::Host;
    type Manipulator = M;

    fn from_host(&self, host: &P::Host) -> Option<M> {
        let value = self.processor.get_val(host)?;
        let mut manipulator = self.create_manipulator();
        // report what the host holds, even outside the key's bounds
        M::fields()
            .load_any(&mut manipulator, self.processor.key().id(), Box::new(value))
            .then_some(manipulator)
    }

    fn set(&self, host: &mut P::Host, manipulator: &M) -> DataTransactionResult {
        match manipulator.get(self.processor.key()) {
            Ok(value) => self.processor.offer(host, value),
            Err(_) => DataTransactionResult::fail_no_data(),
        }
    }

    fn remove_from(&self, host: &mut P::Host) -> DataTransactionResult {
        self.processor.remove_from(host)
    }
}

/// Object-safe face of a [`DataProcessor`], used by the dispatch registry.
pub(crate) trait AnyDataProcessor: Send + Sync {
    fn manipulator_type(&self) -> TypeId;

    fn host_type(&self) -> HostType;

    /// Boxed `Self::Manipulator`.
    fn from_any(&self, holder: &dyn DataHolder) -> Option<Box<dyn Any>>;

    /// `manipulator` must be a `Self::Manipulator`.
    fn set_any(&self, holder: &mut dyn DataHolder, manipulator: &dyn Any) -> DataTransactionResult;

    fn remove_any(&self, holder: &mut dyn DataHolder) -> DataTransactionResult;
}

impl<D: DataProcessor> AnyDataProcessor for D {
    fn manipulator_type(&self) -> TypeId {
        TypeId::of::<D::Manipulator>()
    }

    fn host_type(&self) -> HostType {
        DataProcessor::host_type(self)
    }

    fn from_any(&self, holder: &dyn DataHolder) -> Option<Box<dyn Any>> {
        let host = holder.view_as::<D::Host>()?;
        let manipulator = self.from_host(host)?;
        Some(Box::new(manipulator))
    }

    fn set_any(&self, holder: &mut dyn DataHolder, manipulator: &dyn Any) -> DataTransactionResult {
        let (Some(host), Some(manipulator)) = (
            holder.view_as_mut::<D::Host>(),
            manipulator.downcast_ref::<D::Manipulator>(),
        ) else {
            return DataTransactionResult::fail_no_data();
        };
        self.set(host, manipulator)
    }

    fn remove_any(&self, holder: &mut dyn DataHolder) -> DataTransactionResult {
        match holder.view_as_mut::<D::Host>() {
            Some(host) => self.remove_from(host),
            None => DataTransactionResult::fail_no_data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldRegistry, Key, Value};
    use aspect_container::query;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref LEVEL: Key<i32> = Key::builder("level", query!("Level"))
            .bounds(0, 30)
            .build();
        static ref NAME: Key<String> = Key::builder("name", query!("Name")).build();
        static ref LEVEL_FIELDS: FieldRegistry<LevelData> = FieldRegistry::<LevelData>::builder("LevelData")
            .field(&LEVEL, |m| &m.level, |m, v| m.level = v)
            .build();
        static ref PAIR_FIELDS: FieldRegistry<PairData> = FieldRegistry::<PairData>::builder("PairData")
            .field(&LEVEL, |m| &m.level, |m, v| m.level = v)
            .field(&NAME, |m| &m.name, |m, v| m.name = v)
            .build();
    }

    #[derive(Clone, Debug, Default)]
    struct LevelData {
        level: i32,
    }

    impl DataManipulator for LevelData {
        fn fields() -> &'static FieldRegistry<Self> {
            &LEVEL_FIELDS
        }
    }

    #[derive(Clone, Debug, Default)]
    struct PairData {
        level: i32,
        name: String,
    }

    impl DataManipulator for PairData {
        fn fields() -> &'static FieldRegistry<Self> {
            &PAIR_FIELDS
        }
    }

    struct Player {
        level: Option<i32>,
    }

    struct LevelProcessor;

    impl ValueProcessor for LevelProcessor {
        type Host = Player;
        type Value = i32;

        fn key(&self) -> &Key<i32> {
            &LEVEL
        }

        fn construct_value(&self, actual: i32) -> Value<i32> {
            Value::new(LEVEL.clone(), 0, actual)
        }

        fn set(&self, host: &mut Player, value: i32) -> bool {
            host.level = Some(value);
            true
        }

        fn get_val(&self, host: &Player) -> Option<i32> {
            host.level
        }

        fn remove_from(&self, host: &mut Player) -> DataTransactionResult {
            match host.level.take() {
                Some(old) => DataTransactionResult::success_remove(self.construct_immutable_value(old)),
                None => DataTransactionResult::success_no_data(),
            }
        }
    }

    #[test]
    fn from_host_mirrors_value_processor() {
        let dual = DualProcessor::<_, LevelData>::new(LevelProcessor).unwrap();
        assert!(dual.from_host(&Player { level: None }).is_none());

        let data = dual.from_host(&Player { level: Some(12) }).unwrap();
        assert_eq!(data.get(&LEVEL).unwrap(), 12);
    }

    #[test]
    fn from_host_keeps_out_of_bounds_values() {
        let dual = DualProcessor::<_, LevelData>::new(LevelProcessor).unwrap();
        let player = Player { level: Some(45) };
        let data = dual.from_host(&player).unwrap();
        assert_eq!(data.get(&LEVEL).unwrap(), 45);
        assert_eq!(LevelProcessor.get_val(&player), Some(45));
    }

    #[test]
    fn set_shares_validation_with_value_path() {
        let dual = DualProcessor::<_, LevelData>::new(LevelProcessor).unwrap();
        let mut player = Player { level: Some(3) };

        let mut data = dual.create_manipulator();
        data.set(&LEVEL, 20).unwrap();
        assert!(dual.set(&mut player, &data).is_successful());
        assert_eq!(player.level, Some(20));

        // out of range for the key, refused by the shared offer pipeline
        let result = LevelProcessor.offer(&mut player, 31);
        assert!(!result.is_successful());
        assert_eq!(player.level, Some(20));
    }

    #[test]
    fn remove_delegates() {
        let dual = DualProcessor::<_, LevelData>::new(LevelProcessor).unwrap();
        let mut player = Player { level: Some(4) };
        let result = dual.remove_from(&mut player);
        assert!(result.is_successful());
        assert_eq!(player.level, None);
        assert_eq!(result.replaced_value(&LEVEL).map(|v| *v.get()), Some(4));
    }

    #[test]
    fn multi_aspect_manipulator_is_incompatible() {
        let err = DualProcessor::<_, PairData>::new(LevelProcessor)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            DataError::IncompatibleManipulator {
                manipulator: "PairData",
                ..
            }
        ));
    }
}
