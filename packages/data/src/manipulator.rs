//! Data manipulators: cohesive bundles of aspects.
//!
//! A manipulator type declares its aspects once, in a static
//! [`FieldRegistry`] that maps each key to its getter, setter, and value
//! supplier. Generic `get`/`set`/`get_value` dispatch through that table, so
//! adding an aspect never grows a `match` over keys.
//!
//! # Example
//!
//! ```rust
//! use aspect_container::query;
//! use aspect_data::{DataManipulator, FieldRegistry, Key};
//! use std::sync::OnceLock;
//!
//! #[derive(Clone, Debug, Default)]
//! struct ArrowData {
//!     arrows: i32,
//! }
//!
//! fn arrows_key() -> &'static Key<i32> {
//!     static KEY: OnceLock<Key<i32>> = OnceLock::new();
//!     KEY.get_or_init(|| Key::builder("arrows", query!("Arrows")).bounds(0, 64).build())
//! }
//!
//! impl DataManipulator for ArrowData {
//!     fn fields() -> &'static FieldRegistry<Self> {
//!         static FIELDS: OnceLock<FieldRegistry<ArrowData>> = OnceLock::new();
//!         FIELDS.get_or_init(|| {
//!             FieldRegistry::<ArrowData>::builder("ArrowData")
//!                 .field(arrows_key(), |m| &m.arrows, |m, v| m.arrows = v)
//!                 .build()
//!         })
//!     }
//! }
//!
//! let mut data = ArrowData::default();
//! assert_eq!(data.set(arrows_key(), 3).unwrap(), true);
//! assert_eq!(data.set(arrows_key(), 99).unwrap(), false);
//! assert_eq!(data.get(arrows_key()).unwrap(), 3);
//! ```

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use aspect_container::Data;

use crate::error::Result;
use crate::value::ErasedValue;
use crate::{DataError, DataValue, ImmutableValue, Key, KeyId, KeyInfo, Value};

type GetFn<M> = Box<dyn Fn(&M) -> Box<dyn Any> + Send + Sync>;
type SetFn<M> = Box<dyn Fn(&mut M, Box<dyn Any>) -> Option<bool> + Send + Sync>;
type LoadFn<M> = Box<dyn Fn(&mut M, Box<dyn Any>) -> bool + Send + Sync>;
type SnapshotFn<M> = Box<dyn Fn(&M) -> ErasedValue + Send + Sync>;
type EncodeFn<M> = Box<dyn Fn(&M) -> Data + Send + Sync>;
type DecodeFn<M> = Box<dyn Fn(&mut M, &Data) -> bool + Send + Sync>;
type CompareFn<M> = Box<dyn Fn(&M, &M) -> Ordering + Send + Sync>;

/// One declared aspect of a manipulator type.
struct Field<M> {
    info: KeyInfo,
    value_type: TypeId,
    /// Raw value, boxed `V`.
    get: GetFn<M>,
    /// `None` if the box holds the wrong type, `Some(false)` if rejected.
    set: SetFn<M>,
    /// Unchecked write of a value read off a host; `false` on a type mismatch.
    load: LoadFn<M>,
    /// Full wrapper, boxed `Value<V>`.
    value: GetFn<M>,
    snapshot: SnapshotFn<M>,
    encode: EncodeFn<M>,
    decode: DecodeFn<M>,
    compare: CompareFn<M>,
}

/// Static dispatch table for one manipulator type.
pub struct FieldRegistry<M> {
    name: &'static str,
    fields: Vec<Field<M>>,
    index: HashMap<KeyId, usize>,
}

impl<M: 'static> FieldRegistry<M> {
    pub fn builder(name: &'static str) -> FieldRegistryBuilder<M> {
        FieldRegistryBuilder {
            name,
            fields: Vec::new(),
        }
    }

    /// Name of the manipulator type, used in errors.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn supports(&self, key: &KeyId) -> bool {
        self.index.contains_key(key)
    }

    /// Declared keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyInfo> {
        self.fields.iter().map(|f| &f.info)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field<V: DataValue>(&self, key: &Key<V>) -> Result<&Field<M>> {
        let field = self
            .index
            .get(key.id())
            .map(|&i| &self.fields[i])
            .ok_or_else(|| DataError::UnsupportedKey {
                key: key.id().clone(),
                manipulator: self.name,
            })?;
        if field.value_type != TypeId::of::<V>() {
            return Err(DataError::TypeMismatch {
                key: key.id().clone(),
                expected: field.info.value_type,
            });
        }
        Ok(field)
    }

    pub fn get<V: DataValue>(&self, manipulator: &M, key: &Key<V>) -> Result<V> {
        let field = self.field(key)?;
        (field.get)(manipulator)
            .downcast::<V>()
            .map(|v| *v)
            .map_err(|_| DataError::TypeMismatch {
                key: key.id().clone(),
                expected: field.info.value_type,
            })
    }

    pub fn get_value<V: DataValue>(&self, manipulator: &M, key: &Key<V>) -> Result<Value<V>> {
        let field = self.field(key)?;
        (field.value)(manipulator)
            .downcast::<Value<V>>()
            .map(|v| *v)
            .map_err(|_| DataError::TypeMismatch {
                key: key.id().clone(),
                expected: field.info.value_type,
            })
    }

    /// Returns `Ok(false)` when the value is outside the key's bounds.
    pub fn set<V: DataValue>(&self, manipulator: &mut M, key: &Key<V>, value: V) -> Result<bool> {
        let field = self.field(key)?;
        (field.set)(manipulator, Box::new(value)).ok_or_else(|| DataError::TypeMismatch {
            key: key.id().clone(),
            expected: field.info.value_type,
        })
    }

    /// Left-to-right comparison over the declared keys; the first non-equal
    /// key decides.
    pub fn compare(&self, a: &M, b: &M) -> Ordering {
        self.fields
            .iter()
            .map(|f| (f.compare)(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Each aspect's current value under its query.
    pub fn to_container(&self, manipulator: &M) -> Data {
        let mut data = Data::container();
        for field in &self.fields {
            // Infallible: the tree starts as an empty map and build() rejects
            // queries nested under one another, so no path crosses a scalar.
            let _ = data.set(&field.info.query, (field.encode)(manipulator));
        }
        data
    }

    /// Overwrite aspects present in `data`; absent entries are left alone.
    pub fn fill_from_container(&self, manipulator: &mut M, data: &Data) -> Result<()> {
        for field in &self.fields {
            let Some(entry) = data.get(&field.info.query) else {
                continue;
            };
            if !(field.decode)(manipulator, entry) {
                return Err(DataError::InvalidEntry {
                    query: field.info.query.clone(),
                    expected: field.info.value_type,
                });
            }
        }
        Ok(())
    }

    /// Immutable snapshots of every aspect.
    pub fn values(&self, manipulator: &M) -> Vec<ErasedValue> {
        self.fields.iter().map(|f| (f.snapshot)(manipulator)).collect()
    }

    /// Declared keys with their value types, for erased dispatch.
    pub(crate) fn erased_keys(&self) -> impl Iterator<Item = (&KeyId, TypeId)> {
        self.fields.iter().map(|f| (&f.info.id, f.value_type))
    }

    pub(crate) fn get_any(&self, manipulator: &M, key: &KeyId) -> Option<Box<dyn Any>> {
        let field = &self.fields[*self.index.get(key)?];
        Some((field.get)(manipulator))
    }

    /// Store a value read off a host. Bounds are not checked: the
    /// manipulator must report what the host holds.
    pub(crate) fn load_any(&self, manipulator: &mut M, key: &KeyId, value: Box<dyn Any>) -> bool {
        match self.index.get(key) {
            Some(&i) => (self.fields[i].load)(manipulator, value),
            None => false,
        }
    }
}

impl<M> fmt::Debug for FieldRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("name", &self.name)
            .field(
                "keys",
                &self.fields.iter().map(|f| &f.info.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder returned by [`FieldRegistry::builder`].
pub struct FieldRegistryBuilder<M> {
    name: &'static str,
    fields: Vec<Field<M>>,
}

impl<M: Default + 'static> FieldRegistryBuilder<M> {
    /// Declare one aspect backed by a field of `M`. The aspect's default is
    /// the field's value in `M::default()`.
    pub fn field<V: DataValue>(
        mut self,
        key: &Key<V>,
        getter: fn(&M) -> &V,
        setter: fn(&mut M, V),
    ) -> Self {
        let default = getter(&M::default()).clone();
        let accepts = {
            let key = key.clone();
            move |v: &V| key.bounds().map_or(true, |b| b.contains(v))
        };

        let set = {
            let accepts = accepts.clone();
            move |m: &mut M, boxed: Box<dyn Any>| {
                let value = *boxed.downcast::<V>().ok()?;
                if !accepts(&value) {
                    return Some(false);
                }
                setter(m, value);
                Some(true)
            }
        };
        let load = move |m: &mut M, boxed: Box<dyn Any>| match boxed.downcast::<V>() {
            Ok(value) => {
                setter(m, *value);
                true
            }
            Err(_) => false,
        };
        let value = {
            let (key, default) = (key.clone(), default.clone());
            move |m: &M| -> Box<dyn Any> {
                Box::new(Value::new(key.clone(), default.clone(), getter(m).clone()))
            }
        };
        let snapshot = {
            let (key, default) = (key.clone(), default);
            move |m: &M| -> ErasedValue {
                ImmutableValue::new(key.clone(), default.clone(), getter(m).clone()).into()
            }
        };
        let decode = move |m: &mut M, data: &Data| match V::from_data(data) {
            Some(v) if accepts(&v) => {
                setter(m, v);
                true
            }
            _ => false,
        };
        let compare = {
            let key = key.clone();
            move |a: &M, b: &M| key.compare(getter(a), getter(b))
        };

        self.fields.push(Field {
            info: key.info(),
            value_type: TypeId::of::<V>(),
            get: Box::new(move |m: &M| -> Box<dyn Any> { Box::new(getter(m).clone()) }),
            set: Box::new(set),
            load: Box::new(load),
            value: Box::new(value),
            snapshot: Box::new(snapshot),
            encode: Box::new(move |m: &M| getter(m).to_data()),
            decode: Box::new(decode),
            compare: Box::new(compare),
        });
        self
    }

    /// Finish the table.
    ///
    /// # Panics
    ///
    /// Panics if a key is declared twice or one key's query is nested under
    /// another's; both are errors in the manipulator's declaration.
    pub fn build(self) -> FieldRegistry<M> {
        let mut index = HashMap::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            if index.insert(field.info.id.clone(), i).is_some() {
                panic!("{}: key {} declared twice", self.name, field.info.id);
            }
            for other in &self.fields[..i] {
                let (a, b) = (&field.info.query, &other.info.query);
                if a.parts().zip(b.parts()).all(|(x, y)| x == y) {
                    panic!("{}: query {} overlaps {}", self.name, a, b);
                }
            }
        }
        FieldRegistry {
            name: self.name,
            fields: self.fields,
            index,
        }
    }
}

/// A mutable bundle of related aspects.
///
/// Implementors provide the static [`FieldRegistry`]; everything else is
/// dispatched through it. `Default` constructs the manipulator with every
/// aspect at its default value.
pub trait DataManipulator: Clone + Default + fmt::Debug + Send + Sync + 'static {
    fn fields() -> &'static FieldRegistry<Self>;

    fn supports<V: DataValue>(&self, key: &Key<V>) -> bool {
        Self::fields().supports(key.id())
    }

    /// Current value of `key`.
    ///
    /// # Errors
    ///
    /// [`DataError::UnsupportedKey`] if this manipulator does not declare
    /// `key`.
    fn get<V: DataValue>(&self, key: &Key<V>) -> Result<V> {
        Self::fields().get(self, key)
    }

    /// The full wrapper for `key`, including its default.
    fn get_value<V: DataValue>(&self, key: &Key<V>) -> Result<Value<V>> {
        Self::fields().get_value(self, key)
    }

    /// Set `key`; `Ok(false)` means the value was rejected and nothing
    /// changed.
    fn set<V: DataValue>(&mut self, key: &Key<V>, value: V) -> Result<bool> {
        Self::fields().set(self, key, value)
    }

    /// An independent duplicate.
    fn copy(&self) -> Self {
        self.clone()
    }

    fn as_immutable(&self) -> ImmutableManipulator<Self> {
        ImmutableManipulator::new(self.clone())
    }

    fn compare_to(&self, other: &Self) -> Ordering {
        Self::fields().compare(self, other)
    }

    fn to_container(&self) -> Data {
        Self::fields().to_container(self)
    }

    /// Rebuild a manipulator from [`DataManipulator::to_container`] output.
    /// Aspects missing from `data` keep their defaults.
    fn from_container(data: &Data) -> Result<Self> {
        let mut manipulator = Self::default();
        Self::fields().fill_from_container(&mut manipulator, data)?;
        Ok(manipulator)
    }

    /// Immutable snapshots of every aspect.
    fn values(&self) -> Vec<ErasedValue> {
        Self::fields().values(self)
    }
}

/// Frozen snapshot of a manipulator. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ImmutableManipulator<M> {
    inner: Arc<M>,
}

impl<M: DataManipulator> ImmutableManipulator<M> {
    pub fn new(manipulator: M) -> Self {
        ImmutableManipulator {
            inner: Arc::new(manipulator),
        }
    }

    pub fn supports<V: DataValue>(&self, key: &Key<V>) -> bool {
        self.inner.supports(key)
    }

    pub fn get<V: DataValue>(&self, key: &Key<V>) -> Result<V> {
        self.inner.get(key)
    }

    pub fn get_value<V: DataValue>(&self, key: &Key<V>) -> Result<ImmutableValue<V>> {
        Ok(self.inner.get_value(key)?.as_immutable())
    }

    /// A new snapshot with `key` set to `value`, or `None` if rejected.
    pub fn with<V: DataValue>(&self, key: &Key<V>, value: V) -> Result<Option<Self>> {
        let mut next = self.as_mutable();
        Ok(next.set(key, value)?.then(|| Self::new(next)))
    }

    /// An independent mutable copy.
    pub fn as_mutable(&self) -> M {
        M::clone(&self.inner)
    }

    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.inner.compare_to(&other.inner)
    }

    pub fn to_container(&self) -> Data {
        self.inner.to_container()
    }

    pub fn values(&self) -> Vec<ErasedValue> {
        self.inner.values()
    }
}
