//! Value wrappers: one aspect's key, default, and current value.
//!
//! [`Value`] is the mutable form and [`ImmutableValue`] the frozen form;
//! each converts into the other explicitly. Either may carry [`Bounds`],
//! which reject out-of-range values before any state changes.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use aspect_container::{Data, Query};

use crate::key::Comparator;
use crate::{DataTransactionResult, DataValue, Key, KeyId};

/// Inclusive range `[minimum, maximum]` under a comparator.
#[derive(Clone)]
pub struct Bounds<V> {
    minimum: V,
    maximum: V,
    comparator: Comparator<V>,
}

impl<V: DataValue> Bounds<V> {
    /// Bounds ordered by [`DataValue::compare`].
    pub fn new(minimum: V, maximum: V) -> Self {
        Self::with_comparator(minimum, maximum, V::compare)
    }

    pub fn with_comparator(minimum: V, maximum: V, comparator: Comparator<V>) -> Self {
        Bounds {
            minimum,
            maximum,
            comparator,
        }
    }

    pub fn minimum(&self) -> &V {
        &self.minimum
    }

    pub fn maximum(&self) -> &V {
        &self.maximum
    }

    pub fn contains(&self, value: &V) -> bool {
        (self.comparator)(value, &self.minimum).is_ge()
            && (self.comparator)(value, &self.maximum).is_le()
    }
}

impl<V: fmt::Debug> fmt::Debug for Bounds<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.minimum, self.maximum)
    }
}

/// Mutable holder for one aspect's value.
///
/// `get()` returns the current value, or the default if none was ever set.
/// The default never changes after construction.
#[derive(Clone, Debug)]
pub struct Value<V: DataValue> {
    key: Key<V>,
    default: V,
    actual: Option<V>,
    bounds: Option<Bounds<V>>,
}

impl<V: DataValue> Value<V> {
    /// A value currently holding `actual`. Inherits the key's bounds.
    pub fn new(key: Key<V>, default: V, actual: V) -> Self {
        let bounds = key.bounds().cloned();
        Value {
            key,
            default,
            actual: Some(actual),
            bounds,
        }
    }

    /// A value that was never set.
    pub fn of_default(key: Key<V>, default: V) -> Self {
        let bounds = key.bounds().cloned();
        Value {
            key,
            default,
            actual: None,
            bounds,
        }
    }

    /// A value restricted to `bounds`, overriding any key-level bounds.
    pub fn bounded(key: Key<V>, default: V, actual: V, bounds: Bounds<V>) -> Self {
        Value {
            key,
            default,
            actual: Some(actual),
            bounds: Some(bounds),
        }
    }

    pub fn key(&self) -> &Key<V> {
        &self.key
    }

    pub fn get(&self) -> &V {
        self.actual.as_ref().unwrap_or(&self.default)
    }

    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// Whether a value was set explicitly.
    pub fn is_set(&self) -> bool {
        self.actual.is_some()
    }

    pub fn bounds(&self) -> Option<&Bounds<V>> {
        self.bounds.as_ref()
    }

    /// Whether `value` is acceptable under this wrapper's bounds.
    pub fn accepts(&self, value: &V) -> bool {
        self.bounds.as_ref().map_or(true, |b| b.contains(value))
    }

    /// Replace the current value.
    ///
    /// Out-of-range values are rejected without touching state; the failed
    /// result carries the rejected value.
    pub fn set(&mut self, value: V) -> DataTransactionResult {
        let proposed = self.with_actual(value.clone());
        if !self.accepts(&value) {
            return DataTransactionResult::fail_result(proposed);
        }
        let old = self.as_immutable();
        self.actual = Some(value);
        DataTransactionResult::success_replace_result(proposed, old)
    }

    /// Apply `f` to the current value and [`Value::set`] the result.
    pub fn transform(&mut self, f: impl FnOnce(&V) -> V) -> DataTransactionResult {
        let next = f(self.get());
        self.set(next)
    }

    /// A frozen snapshot of this value.
    pub fn as_immutable(&self) -> ImmutableValue<V> {
        ImmutableValue {
            key: self.key.clone(),
            default: self.default.clone(),
            actual: self.actual.clone(),
            bounds: self.bounds.clone(),
        }
    }

    fn with_actual(&self, value: V) -> ImmutableValue<V> {
        ImmutableValue {
            key: self.key.clone(),
            default: self.default.clone(),
            actual: Some(value),
            bounds: self.bounds.clone(),
        }
    }
}

/// Frozen holder for one aspect's value. Never mutates in place.
#[derive(Clone, Debug)]
pub struct ImmutableValue<V: DataValue> {
    key: Key<V>,
    default: V,
    actual: Option<V>,
    bounds: Option<Bounds<V>>,
}

impl<V: DataValue> ImmutableValue<V> {
    pub fn new(key: Key<V>, default: V, actual: V) -> Self {
        Value::new(key, default, actual).as_immutable()
    }

    pub fn bounded(key: Key<V>, default: V, actual: V, bounds: Bounds<V>) -> Self {
        Value::bounded(key, default, actual, bounds).as_immutable()
    }

    pub fn key(&self) -> &Key<V> {
        &self.key
    }

    pub fn get(&self) -> &V {
        self.actual.as_ref().unwrap_or(&self.default)
    }

    pub fn default_value(&self) -> &V {
        &self.default
    }

    pub fn bounds(&self) -> Option<&Bounds<V>> {
        self.bounds.as_ref()
    }

    /// A new wrapper holding `value`, or `None` if it is out of bounds.
    pub fn with(&self, value: V) -> Option<Self> {
        if !self.bounds.as_ref().map_or(true, |b| b.contains(&value)) {
            return None;
        }
        Some(ImmutableValue {
            key: self.key.clone(),
            default: self.default.clone(),
            actual: Some(value),
            bounds: self.bounds.clone(),
        })
    }

    /// An independent mutable copy.
    pub fn as_mutable(&self) -> Value<V> {
        Value {
            key: self.key.clone(),
            default: self.default.clone(),
            actual: self.actual.clone(),
            bounds: self.bounds.clone(),
        }
    }
}

impl<V: DataValue> PartialEq for ImmutableValue<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.get() == other.get() && self.default == other.default
    }
}

/// An immutable value with its type erased, as stored in transaction
/// results.
pub trait AnyImmutableValue: fmt::Debug + Send + Sync {
    fn key_id(&self) -> &KeyId;

    fn query(&self) -> &Query;

    /// Serialized current value.
    fn to_data(&self) -> Data;

    fn as_any(&self) -> &dyn Any;
}

impl<V: DataValue> AnyImmutableValue for ImmutableValue<V> {
    fn key_id(&self) -> &KeyId {
        self.key.id()
    }

    fn query(&self) -> &Query {
        self.key.query()
    }

    fn to_data(&self) -> Data {
        self.get().to_data()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn AnyImmutableValue {
    /// Recover the typed value if it belongs to `key`.
    pub fn typed<V: DataValue>(&self, key: &Key<V>) -> Option<&ImmutableValue<V>> {
        if self.key_id() != key.id() {
            return None;
        }
        self.as_any().downcast_ref::<ImmutableValue<V>>()
    }
}

/// Shared handle to an erased immutable value.
pub type ErasedValue = Arc<dyn AnyImmutableValue>;

impl<V: DataValue> From<ImmutableValue<V>> for ErasedValue {
    fn from(value: ImmutableValue<V>) -> Self {
        Arc::new(value)
    }
}
