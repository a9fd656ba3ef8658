//! Typed aspect keys and the key registry.
//!
//! A [`Key`] is declared once, usually in a `lazy_static!` block, and cloned
//! wherever it is needed. Clones share one allocation; two keys are equal iff
//! their ids are equal.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use aspect_container::Query;
use tracing::debug;

use crate::value::Bounds;
use crate::{DataError, DataValue};

/// Canonical identity of a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(Arc<str>);

impl KeyId {
    pub fn new(id: &str) -> Self {
        KeyId(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Orders two values of a key.
pub type Comparator<V> = fn(&V, &V) -> Ordering;

struct KeyInner<V> {
    id: KeyId,
    name: String,
    query: Query,
    comparator: Option<Comparator<V>>,
    bounds: Option<Bounds<V>>,
}

/// Immutable identity of one aspect holding values of type `V`.
pub struct Key<V> {
    inner: Arc<KeyInner<V>>,
}

impl<V: DataValue> Key<V> {
    /// Start declaring a key. `id` must be unique process-wide.
    pub fn builder(id: &str, query: Query) -> KeyBuilder<V> {
        KeyBuilder {
            id: KeyId::new(id),
            name: None,
            query,
            comparator: None,
            bounds: None,
        }
    }

    pub fn id(&self) -> &KeyId {
        &self.inner.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Serialization path used by `to_container()`.
    pub fn query(&self) -> &Query {
        &self.inner.query
    }

    /// Name of the value type tag.
    pub fn value_type(&self) -> &'static str {
        std::any::type_name::<V>()
    }

    /// Range every value of this key must fall in, if declared.
    pub fn bounds(&self) -> Option<&Bounds<V>> {
        self.inner.bounds.as_ref()
    }

    /// Compare two values with the key's comparator, falling back to
    /// [`DataValue::compare`].
    pub fn compare(&self, a: &V, b: &V) -> Ordering {
        match self.inner.comparator {
            Some(cmp) => cmp(a, b),
            None => a.compare(b),
        }
    }

    /// Type-erased description of this key.
    pub fn info(&self) -> KeyInfo {
        KeyInfo {
            id: self.inner.id.clone(),
            name: self.inner.name.clone(),
            query: self.inner.query.clone(),
            value_type: self.value_type(),
            bounded: self.inner.bounds.is_some(),
        }
    }
}

impl<V> Clone for Key<V> {
    fn clone(&self) -> Self {
        Key {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> PartialEq for Key<V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl<V> Eq for Key<V> {}

impl<V> Hash for Key<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl<V> fmt::Debug for Key<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.inner.id)
            .field("query", &self.inner.query)
            .finish()
    }
}

impl<V> fmt::Display for Key<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.inner.id)
    }
}

/// Builder returned by [`Key::builder`].
pub struct KeyBuilder<V> {
    id: KeyId,
    name: Option<String>,
    query: Query,
    comparator: Option<Comparator<V>>,
    bounds: Option<(V, V)>,
}

impl<V: DataValue> KeyBuilder<V> {
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn comparator(mut self, comparator: Comparator<V>) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Restrict values to `[minimum, maximum]`, compared with the key's
    /// comparator.
    pub fn bounds(mut self, minimum: V, maximum: V) -> Self {
        self.bounds = Some((minimum, maximum));
        self
    }

    pub fn build(self) -> Key<V> {
        let comparator = self.comparator;
        let bounds = self.bounds.map(|(minimum, maximum)| {
            Bounds::with_comparator(minimum, maximum, comparator.unwrap_or(V::compare))
        });
        debug!(key = %self.id, query = %self.query, "declared key");
        Key {
            inner: Arc::new(KeyInner {
                name: self.name.unwrap_or_else(|| self.id.to_string()),
                id: self.id,
                query: self.query,
                comparator,
                bounds,
            }),
        }
    }
}

/// Type-erased description of a declared key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInfo {
    pub id: KeyId,
    pub name: String,
    pub query: Query,
    pub value_type: &'static str,
    pub bounded: bool,
}

/// Index of every declared key, by id.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    keys: BTreeMap<KeyId, KeyInfo>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key.
    ///
    /// # Errors
    ///
    /// [`DataError::DuplicateKey`] if a key with the same id was registered.
    pub fn register<V: DataValue>(&mut self, key: &Key<V>) -> Result<(), DataError> {
        if self.keys.contains_key(key.id()) {
            return Err(DataError::DuplicateKey(key.id().clone()));
        }
        debug!(key = %key.id(), value_type = key.value_type(), "registered key");
        self.keys.insert(key.id().clone(), key.info());
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&KeyInfo> {
        self.keys.get(&KeyId::new(id))
    }

    /// Find the key serialized under `query`.
    pub fn by_query(&self, query: &Query) -> Option<&KeyInfo> {
        self.keys.values().find(|info| &info.query == query)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &KeyInfo> {
        self.keys.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspect_container::query;

    fn arrows() -> Key<i32> {
        Key::builder("stuck_arrows", query!("StuckArrows"))
            .name("Stuck Arrows")
            .bounds(0, i32::MAX)
            .build()
    }

    #[test]
    fn keys_compare_by_id() {
        let a = arrows();
        let b = arrows();
        assert_eq!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(
            a,
            Key::<i32>::builder("other", query!("StuckArrows")).build()
        );
    }

    #[test]
    fn name_defaults_to_id() {
        let key = Key::<bool>::builder("persists", query!("Persists")).build();
        assert_eq!(key.name(), "persists");
        assert_eq!(arrows().name(), "Stuck Arrows");
    }

    #[test]
    fn bounds_use_declared_comparator() {
        let reversed = Key::<i32>::builder("reversed", query!("Reversed"))
            .comparator(|a, b| b.cmp(a))
            .bounds(10, 0)
            .build();
        let bounds = reversed.bounds().unwrap();
        assert!(bounds.contains(&5));
        assert!(!bounds.contains(&11));
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = KeyRegistry::new();
        registry.register(&arrows()).unwrap();
        let err = registry.register(&arrows()).unwrap_err();
        assert!(matches!(err, DataError::DuplicateKey(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_lookups() {
        let mut registry = KeyRegistry::new();
        registry.register(&arrows()).unwrap();

        let info = registry.get("stuck_arrows").unwrap();
        assert!(info.bounded);
        assert_eq!(info.value_type, "i32");
        assert_eq!(
            registry.by_query(&query!("StuckArrows")).map(|i| &i.id),
            Some(&KeyId::new("stuck_arrows"))
        );
        assert!(registry.get("missing").is_none());
    }
}
