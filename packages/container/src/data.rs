//! The structured data tree aspects serialize into.

use std::collections::BTreeMap;

use crate::{Error, Query};

/// A dynamically-typed tree of structured data.
///
/// `to_container()` on a manipulator yields a `Data::Map` whose entries are
/// addressed by each aspect's [`Query`]. The tree is encoding-agnostic; see
/// [`crate::convert`] for the JSON bridge.
///
/// Maps are `BTreeMap`s so two containers with the same entries compare and
/// print identically.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Data {
    /// No value.
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Data>),
    Map(BTreeMap<String, Data>),
}

impl Data {
    /// An empty container.
    pub fn container() -> Self {
        Data::Map(BTreeMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Data::Null)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Data::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Data::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Data::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Data::Float(f) => Some(*f),
            Data::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up the entry at `query`.
    ///
    /// Returns `None` when any part is missing or a non-container is in the
    /// way.
    pub fn get(&self, query: &Query) -> Option<&Data> {
        let mut current = self;
        for part in query.parts() {
            current = match current {
                Data::Map(map) => map.get(part)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Whether an entry exists at `query`.
    pub fn contains(&self, query: &Query) -> bool {
        self.get(query).is_some()
    }

    /// Store `value` at `query`, creating intermediate containers.
    ///
    /// # Errors
    ///
    /// Fails if an intermediate entry exists and is not a container.
    pub fn set(&mut self, query: &Query, value: Data) -> Result<(), Error> {
        let Some(name) = query.last() else {
            *self = value;
            return Ok(());
        };

        let mut current = self;
        if let Some(parent) = query.parent() {
            for part in parent.parts() {
                current = match current {
                    Data::Map(map) => map
                        .entry(part.to_string())
                        .or_insert_with(Data::container),
                    _ => {
                        return Err(Error::NotAContainer {
                            query: query.clone(),
                            part: part.to_string(),
                        })
                    }
                };
            }
        }

        match current {
            Data::Map(map) => {
                map.insert(name.to_string(), value);
                Ok(())
            }
            _ => Err(Error::NotAContainer {
                query: query.clone(),
                part: name.to_string(),
            }),
        }
    }

    /// Builder-style [`Data::set`].
    pub fn with(mut self, query: &Query, value: impl Into<Data>) -> Result<Self, Error> {
        self.set(query, value.into())?;
        Ok(self)
    }
}

impl From<bool> for Data {
    fn from(v: bool) -> Self {
        Data::Bool(v)
    }
}

impl From<i32> for Data {
    fn from(v: i32) -> Self {
        Data::Integer(v as i64)
    }
}

impl From<i64> for Data {
    fn from(v: i64) -> Self {
        Data::Integer(v)
    }
}

impl From<f64> for Data {
    fn from(v: f64) -> Self {
        Data::Float(v)
    }
}

impl From<String> for Data {
    fn from(v: String) -> Self {
        Data::String(v)
    }
}

impl From<&str> for Data {
    fn from(v: &str) -> Self {
        Data::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use collection_literals::btree;

    #[test]
    fn set_creates_intermediate_containers() {
        let mut data = Data::container();
        data.set(&query!("Horse.Color"), Data::from("white")).unwrap();

        assert_eq!(data.get(&query!("Horse.Color")), Some(&Data::from("white")));
        assert!(data.get(&query!("Horse")).unwrap().is_container());
        assert_eq!(data.get(&query!("Missing")), None);
    }

    #[test]
    fn set_through_scalar_fails() {
        let mut data = Data::container()
            .with(&query!("Persists"), true)
            .unwrap();
        let err = data
            .set(&query!("Persists.Inner"), Data::Null)
            .unwrap_err();
        assert!(err.to_string().contains("Persists"));
    }

    #[test]
    fn root_query_replaces_whole_tree() {
        let mut data = Data::container();
        data.set(&query!(""), Data::Integer(3)).unwrap();
        assert_eq!(data, Data::Integer(3));
    }

    #[test]
    fn nested_lookup_stops_at_scalars() {
        let data = Data::Map(btree! {
            "StuckArrows".to_string() => Data::Integer(4),
            "Horse".to_string() => Data::Map(btree! {
                "Color".to_string() => Data::from("gray"),
            }),
        });

        assert_eq!(data.get(&query!("Horse.Color")), Some(&Data::from("gray")));
        assert!(data.contains(&query!("StuckArrows")));
        assert!(!data.contains(&query!("StuckArrows.Count")));
    }

    #[test]
    fn scalar_accessors() {
        assert_eq!(Data::from(true).as_bool(), Some(true));
        assert_eq!(Data::from(7i32).as_integer(), Some(7));
        assert_eq!(Data::from(7i64).as_float(), Some(7.0));
        assert_eq!(Data::from("x").as_str(), Some("x"));
        assert_eq!(Data::Null.as_str(), None);
    }
}
