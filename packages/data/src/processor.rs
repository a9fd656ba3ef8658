//! Value processors: per-(host type, key) access strategies.
//!
//! A [`ValueProcessor`] translates between one host type's raw state and the
//! typed wrappers for one key. Implementors write `get_val`, `set`,
//! `construct_value`, and `remove_from`; the offer pipeline (bounds check,
//! old-value capture, transaction result) is shared.

use std::any::{Any, TypeId};

use tracing::debug;

use crate::{
    DataHolder, DataTransactionResult, DataValue, HostType, ImmutableValue, Key, KeyId, Value,
};

/// Strategy reading and writing one aspect on one host type.
///
/// Processors are stateless; they are registered once at startup and shared.
pub trait ValueProcessor: Send + Sync + 'static {
    /// The host type (or ancestor) this processor is bound to.
    type Host: Any + Send + Sync;
    type Value: DataValue;

    fn key(&self) -> &Key<Self::Value>;

    /// Wrap a raw value with the key's default and bounds.
    fn construct_value(&self, actual: Self::Value) -> Value<Self::Value>;

    fn construct_immutable_value(&self, actual: Self::Value) -> ImmutableValue<Self::Value> {
        self.construct_value(actual).as_immutable()
    }

    /// Write `value` into the host. `false` when the host refuses it.
    fn set(&self, host: &mut Self::Host, value: Self::Value) -> bool;

    /// The host's current value, or `None` if it has none.
    fn get_val(&self, host: &Self::Host) -> Option<Self::Value>;

    /// Clear the aspect. Structural aspects return
    /// [`DataTransactionResult::fail_no_data`].
    fn remove_from(&self, host: &mut Self::Host) -> DataTransactionResult;

    fn host_type(&self) -> HostType {
        HostType::of::<Self::Host>()
    }

    fn get_value(&self, host: &Self::Host) -> Option<Value<Self::Value>> {
        self.get_val(host).map(|v| self.construct_value(v))
    }

    /// Validate and apply `value`, reporting what changed.
    fn offer(&self, host: &mut Self::Host, value: Self::Value) -> DataTransactionResult {
        let proposed = self.construct_value(value.clone());
        if !proposed.accepts(&value) {
            debug!(key = %self.key().id(), ?value, "offer out of bounds");
            return DataTransactionResult::fail_result(proposed.as_immutable());
        }

        let old = self.get_val(host);
        if !self.set(host, value) {
            debug!(key = %self.key().id(), "host refused offer");
            return DataTransactionResult::fail_result(proposed.as_immutable());
        }

        let new = proposed.as_immutable();
        match old {
            Some(old) => {
                DataTransactionResult::success_replace_result(new, self.construct_immutable_value(old))
            }
            None => DataTransactionResult::success_result(new),
        }
    }
}

/// Object-safe face of a [`ValueProcessor`], used by the dispatch registry.
pub(crate) trait AnyValueProcessor: Send + Sync {
    fn key_id(&self) -> &KeyId;

    fn value_type(&self) -> TypeId;

    fn host_type(&self) -> HostType;

    /// Boxed `Self::Value`.
    fn get_any(&self, holder: &dyn DataHolder) -> Option<Box<dyn Any>>;

    /// Boxed `Value<Self::Value>`.
    fn value_any(&self, holder: &dyn DataHolder) -> Option<Box<dyn Any>>;

    /// `value` must be a boxed `Self::Value`.
    fn offer_any(&self, holder: &mut dyn DataHolder, value: Box<dyn Any>) -> DataTransactionResult;

    fn remove_any(&self, holder: &mut dyn DataHolder) -> DataTransactionResult;
}

impl<P: ValueProcessor> AnyValueProcessor for P {
    fn key_id(&self) -> &KeyId {
        self.key().id()
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<P::Value>()
    }

    fn host_type(&self) -> HostType {
        ValueProcessor::host_type(self)
    }

    fn get_any(&self, holder: &dyn DataHolder) -> Option<Box<dyn Any>> {
        let host = holder.view_as::<P::Host>()?;
        let value = self.get_val(host)?;
        Some(Box::new(value))
    }

    fn value_any(&self, holder: &dyn DataHolder) -> Option<Box<dyn Any>> {
        let host = holder.view_as::<P::Host>()?;
        let value = self.get_value(host)?;
        Some(Box::new(value))
    }

    fn offer_any(&self, holder: &mut dyn DataHolder, value: Box<dyn Any>) -> DataTransactionResult {
        let (Some(host), Ok(value)) = (holder.view_as_mut::<P::Host>(), value.downcast::<P::Value>())
        else {
            return DataTransactionResult::fail_no_data();
        };
        self.offer(host, *value)
    }

    fn remove_any(&self, holder: &mut dyn DataHolder) -> DataTransactionResult {
        match holder.view_as_mut::<P::Host>() {
            Some(host) => self.remove_from(host),
            None => DataTransactionResult::fail_no_data(),
        }
    }
}
