//! The contract every aspect value type satisfies.

use std::cmp::Ordering;
use std::fmt;

use aspect_container::Data;

/// A type that can be stored under a [`crate::Key`].
///
/// Values must serialize into a [`Data`] entry for `to_container()` and
/// provide the comparable identity manipulators sort by. Catalog-backed
/// values compare by id; numbers and strings compare naturally.
pub trait DataValue: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Serialized form written under the key's query.
    fn to_data(&self) -> Data;

    /// Inverse of [`DataValue::to_data`]; `None` if `data` is not a valid
    /// encoding of this type.
    fn from_data(data: &Data) -> Option<Self>;

    /// Ordering of the comparable identity.
    fn compare(&self, other: &Self) -> Ordering;
}

impl DataValue for bool {
    fn to_data(&self) -> Data {
        Data::Bool(*self)
    }

    fn from_data(data: &Data) -> Option<Self> {
        data.as_bool()
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl DataValue for i32 {
    fn to_data(&self) -> Data {
        Data::Integer(*self as i64)
    }

    fn from_data(data: &Data) -> Option<Self> {
        data.as_integer().and_then(|i| i32::try_from(i).ok())
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl DataValue for i64 {
    fn to_data(&self) -> Data {
        Data::Integer(*self)
    }

    fn from_data(data: &Data) -> Option<Self> {
        data.as_integer()
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl DataValue for f64 {
    fn to_data(&self) -> Data {
        Data::Float(*self)
    }

    fn from_data(data: &Data) -> Option<Self> {
        data.as_float()
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl DataValue for String {
    fn to_data(&self) -> Data {
        Data::String(self.clone())
    }

    fn from_data(data: &Data) -> Option<Self> {
        data.as_str().map(str::to_string)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i32_rejects_out_of_range_integers() {
        assert_eq!(i32::from_data(&Data::Integer(5)), Some(5));
        assert_eq!(i32::from_data(&Data::Integer(i64::MAX)), None);
        assert_eq!(i32::from_data(&Data::from("5")), None);
    }

    #[test]
    fn floats_accept_integer_entries() {
        assert_eq!(f64::from_data(&Data::Integer(2)), Some(2.0));
        assert_eq!(1.0f64.compare(&f64::NAN), Ordering::Less);
    }
}
