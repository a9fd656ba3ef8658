//! Catalog-backed value types.

use std::cmp::Ordering;
use std::fmt;

use aspect_catalog::CatalogType;
use aspect_container::Data;
use aspect_data::DataValue;

/// Declare a closed catalog type whose entries are associated constants.
///
/// Entries serialize as their id and compare by id.
macro_rules! catalog_type {
    ($(#[$meta:meta])* $ty:ident { $($entry:ident => ($id:literal, $name:literal, $index:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $ty {
            id: &'static str,
            name: &'static str,
            index: i32,
        }

        impl $ty {
            $(pub const $entry: $ty = $ty { id: $id, name: $name, index: $index };)+

            /// Every entry, in index order.
            pub const ALL: &'static [$ty] = &[$($ty::$entry),+];

            /// The host's numeric encoding.
            pub fn index(&self) -> i32 {
                self.index
            }

            pub fn from_index(index: i32) -> Option<$ty> {
                Self::ALL.iter().copied().find(|e| e.index == index)
            }

            pub fn from_id(id: &str) -> Option<$ty> {
                Self::ALL.iter().copied().find(|e| e.id.eq_ignore_ascii_case(id))
            }
        }

        impl CatalogType for $ty {
            fn id(&self) -> &str {
                self.id
            }

            fn name(&self) -> &str {
                self.name
            }
        }

        impl DataValue for $ty {
            fn to_data(&self) -> Data {
                Data::from(self.id)
            }

            fn from_data(data: &Data) -> Option<Self> {
                Self::from_id(data.as_str()?)
            }

            fn compare(&self, other: &Self) -> Ordering {
                self.id.cmp(other.id)
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($ty), self.id)
            }
        }
    };
}

catalog_type! {
    /// Coat color of a horse.
    HorseColor {
        WHITE => ("white", "White", 0),
        CREAMY => ("creamy", "Creamy", 1),
        CHESTNUT => ("chestnut", "Chestnut", 2),
        BROWN => ("brown", "Brown", 3),
        BLACK => ("black", "Black", 4),
        GRAY => ("gray", "Gray", 5),
        DARK_BROWN => ("dark_brown", "Dark Brown", 6),
    }
}

catalog_type! {
    /// Coat markings of a horse.
    HorseStyle {
        NONE => ("none", "None", 0),
        WHITE => ("white", "White", 1),
        WHITEFIELD => ("white_field", "White Field", 2),
        WHITE_DOTS => ("white_dots", "White Dots", 3),
        BLACK_DOTS => ("black_dots", "Black Dots", 4),
    }
}

catalog_type! {
    /// Species of a horse-like entity.
    HorseVariant {
        HORSE => ("horse", "Horse", 0),
        DONKEY => ("donkey", "Donkey", 1),
        MULE => ("mule", "Mule", 2),
        UNDEAD_HORSE => ("undead_horse", "Undead Horse", 3),
        SKELETON_HORSE => ("skeleton_horse", "Skeleton Horse", 4),
    }
}

/// A kind of block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    id: String,
    name: String,
}

impl BlockType {
    pub fn new(id: &str, name: &str) -> Self {
        BlockType {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

impl CatalogType for BlockType {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A named, enumerable block property such as `variant` or `facing`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumTrait {
    id: String,
    name: String,
    values: Vec<String>,
}

impl EnumTrait {
    pub fn new(id: &str, name: &str, values: &[&str]) -> Self {
        EnumTrait {
            id: id.to_string(),
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

impl CatalogType for EnumTrait {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_round_trip_through_index_and_id() {
        for color in HorseColor::ALL {
            assert_eq!(HorseColor::from_index(color.index()), Some(*color));
            assert_eq!(HorseColor::from_id(color.id()), Some(*color));
        }
        assert_eq!(HorseStyle::from_id("WHITE_DOTS"), Some(HorseStyle::WHITE_DOTS));
        assert_eq!(HorseVariant::from_index(9), None);
    }

    #[test]
    fn values_compare_by_id() {
        assert_eq!(HorseColor::BLACK.compare(&HorseColor::WHITE), Ordering::Less);
        assert_eq!(
            HorseVariant::MULE.compare(&HorseVariant::DONKEY),
            Ordering::Greater
        );
    }

    #[test]
    fn values_serialize_as_id() {
        let data = HorseStyle::WHITEFIELD.to_data();
        assert_eq!(data, Data::from("white_field"));
        assert_eq!(HorseStyle::from_data(&data), Some(HorseStyle::WHITEFIELD));
        assert_eq!(HorseStyle::from_data(&Data::Integer(2)), None);
    }

    #[test]
    fn enum_trait_values() {
        let variant = EnumTrait::new("variant", "variant", &["stone", "granite"]);
        assert!(variant.accepts("granite"));
        assert!(!variant.accepts("marble"));
        assert_eq!(variant.values().len(), 2);
    }
}
