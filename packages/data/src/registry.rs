//! Processor dispatch.
//!
//! Value processors are indexed by key id and value type; data processors by
//! manipulator type. For a given holder the most specific candidate wins:
//! the one whose host type sits earliest in the holder's lineage, with ties
//! going to whichever was registered first.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::dual::AnyDataProcessor;
use crate::error::Result;
use crate::processor::AnyValueProcessor;
use crate::{
    DataError, DataHolder, DataManipulator, DataProcessor, DataTransactionResult, DataValue,
    DualProcessor, HostType, Key, KeyId, Value, ValueProcessor,
};

/// Dispatch table from (key, value type) and manipulator type to processors.
///
/// Populated at startup, then frozen; lookups never mutate it.
#[derive(Default)]
pub struct ProcessorRegistry {
    values: HashMap<(KeyId, TypeId), Vec<Arc<dyn AnyValueProcessor>>>,
    data: HashMap<TypeId, Vec<Arc<dyn AnyDataProcessor>>>,
    frozen: bool,
    trace_dispatch: bool,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a `trace!` event for every dispatch decision.
    pub fn set_trace_dispatch(&mut self, enabled: bool) {
        self.trace_dispatch = enabled;
    }

    /// Reject any further registration.
    pub fn freeze(&mut self) {
        debug!(
            value_processors = self.values.values().map(Vec::len).sum::<usize>(),
            data_processors = self.data.values().map(Vec::len).sum::<usize>(),
            "processor registry frozen"
        );
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn check_open(&self) -> Result<()> {
        if self.frozen {
            Err(DataError::RegistryFrozen)
        } else {
            Ok(())
        }
    }

    pub fn register_value_processor<P: ValueProcessor>(&mut self, processor: P) -> Result<()> {
        self.check_open()?;
        self.insert_value(Arc::new(processor));
        Ok(())
    }

    pub fn register_data_processor<D: DataProcessor>(&mut self, processor: D) -> Result<()> {
        self.check_open()?;
        self.insert_data(Arc::new(processor));
        Ok(())
    }

    /// Register `processor` for its key and, through a [`DualProcessor`],
    /// for manipulator `M`. Both paths share the one instance.
    pub fn register_dual<P: ValueProcessor, M: DataManipulator>(
        &mut self,
        processor: P,
    ) -> Result<()> {
        self.check_open()?;
        let processor = Arc::new(processor);
        let dual = DualProcessor::<P, M>::shared(Arc::clone(&processor))?;
        self.insert_value(processor);
        self.insert_data(Arc::new(dual));
        Ok(())
    }

    fn insert_value(&mut self, processor: Arc<dyn AnyValueProcessor>) {
        debug!(
            key = %processor.key_id(),
            host = processor.host_type().name(),
            "registered value processor"
        );
        self.values
            .entry((processor.key_id().clone(), processor.value_type()))
            .or_default()
            .push(processor);
    }

    fn insert_data(&mut self, processor: Arc<dyn AnyDataProcessor>) {
        debug!(host = processor.host_type().name(), "registered data processor");
        self.data
            .entry(processor.manipulator_type())
            .or_default()
            .push(processor);
    }

    fn select<'a, T: ?Sized>(
        &self,
        candidates: Option<&'a Vec<Arc<T>>>,
        lineage: &[HostType],
        host_of: impl Fn(&T) -> HostType,
    ) -> Option<&'a Arc<T>> {
        let (rank, selected) = candidates?
            .iter()
            .filter_map(|p| {
                let host = host_of(&**p);
                lineage.iter().position(|t| *t == host).map(|rank| (rank, p))
            })
            .min_by_key(|(rank, _)| *rank)?;
        if self.trace_dispatch {
            trace!(
                holder = ?lineage.first(),
                host = host_of(&**selected).name(),
                rank,
                "dispatch resolved"
            );
        }
        Some(selected)
    }

    fn value_processor(
        &self,
        lineage: &[HostType],
        key: &KeyId,
        value_type: TypeId,
    ) -> Option<&Arc<dyn AnyValueProcessor>> {
        self.select(
            self.values.get(&(key.clone(), value_type)),
            lineage,
            |p| p.host_type(),
        )
    }

    fn data_processor<M: DataManipulator>(
        &self,
        lineage: &[HostType],
    ) -> Option<&Arc<dyn AnyDataProcessor>> {
        self.select(self.data.get(&TypeId::of::<M>()), lineage, |p| p.host_type())
    }

    fn value_processor_for<V: DataValue>(
        &self,
        holder: &dyn DataHolder,
        key: &Key<V>,
    ) -> Option<&Arc<dyn AnyValueProcessor>> {
        self.value_processor(&holder.lineage(), key.id(), TypeId::of::<V>())
    }

    /// Whether some processor handles `key` on this holder.
    pub fn supports<V: DataValue>(&self, holder: &dyn DataHolder, key: &Key<V>) -> bool {
        self.value_processor_for(holder, key).is_some()
    }

    pub fn get<V: DataValue>(&self, holder: &dyn DataHolder, key: &Key<V>) -> Option<V> {
        let boxed = self.value_processor_for(holder, key)?.get_any(holder)?;
        boxed.downcast::<V>().ok().map(|v| *v)
    }

    pub fn get_value<V: DataValue>(
        &self,
        holder: &dyn DataHolder,
        key: &Key<V>,
    ) -> Option<Value<V>> {
        let boxed = self.value_processor_for(holder, key)?.value_any(holder)?;
        boxed.downcast::<Value<V>>().ok().map(|v| *v)
    }

    /// Offer `value` for `key`. Fails with no data when nothing handles the
    /// key on this holder.
    pub fn offer<V: DataValue>(
        &self,
        holder: &mut dyn DataHolder,
        key: &Key<V>,
        value: V,
    ) -> DataTransactionResult {
        match self.value_processor_for(holder, key) {
            Some(processor) => processor.offer_any(holder, Box::new(value)),
            None => DataTransactionResult::fail_no_data(),
        }
    }

    pub fn remove<V: DataValue>(
        &self,
        holder: &mut dyn DataHolder,
        key: &Key<V>,
    ) -> DataTransactionResult {
        match self.value_processor_for(holder, key) {
            Some(processor) => processor.remove_any(holder),
            None => DataTransactionResult::fail_no_data(),
        }
    }

    /// Read manipulator `M` off the holder, or `None` if the holder carries
    /// none of its aspects.
    pub fn get_manipulator<M: DataManipulator>(&self, holder: &dyn DataHolder) -> Option<M> {
        let lineage = holder.lineage();
        if let Some(processor) = self.data_processor::<M>(&lineage) {
            return processor
                .from_any(holder)?
                .downcast::<M>()
                .ok()
                .map(|m| *m);
        }

        let fields = M::fields();
        let mut manipulator = M::default();
        let mut found = false;
        for (key, value_type) in fields.erased_keys() {
            let value = self
                .value_processor(&lineage, key, value_type)
                .and_then(|p| p.get_any(holder));
            if let Some(value) = value {
                found |= fields.load_any(&mut manipulator, key, value);
            }
        }
        found.then_some(manipulator)
    }

    /// Write every aspect of `manipulator` into the holder.
    pub fn offer_manipulator<M: DataManipulator>(
        &self,
        holder: &mut dyn DataHolder,
        manipulator: &M,
    ) -> DataTransactionResult {
        let lineage = holder.lineage();
        if let Some(processor) = self.data_processor::<M>(&lineage) {
            return processor.set_any(holder, manipulator as &dyn Any);
        }

        let fields = M::fields();
        let mut builder = DataTransactionResult::builder();
        for (key, value_type) in fields.erased_keys() {
            let result = match (
                self.value_processor(&lineage, key, value_type),
                fields.get_any(manipulator, key),
            ) {
                (Some(processor), Some(value)) => processor.offer_any(holder, value),
                _ => DataTransactionResult::fail_no_data(),
            };
            builder = builder.absorb(result);
        }
        builder.build()
    }

    /// Remove every aspect of `M` from the holder.
    pub fn remove_manipulator<M: DataManipulator>(
        &self,
        holder: &mut dyn DataHolder,
    ) -> DataTransactionResult {
        let lineage = holder.lineage();
        if let Some(processor) = self.data_processor::<M>(&lineage) {
            return processor.remove_any(holder);
        }

        let mut builder = DataTransactionResult::builder();
        for (key, value_type) in M::fields().erased_keys() {
            let result = match self.value_processor(&lineage, key, value_type) {
                Some(processor) => processor.remove_any(holder),
                None => DataTransactionResult::fail_no_data(),
            };
            builder = builder.absorb(result);
        }
        builder.build()
    }
}
