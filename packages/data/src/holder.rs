//! Host objects that carry aspects.
//!
//! Hosts are owned by the embedding runtime; the framework only sees them
//! through [`DataHolder`]. A host reports its type lineage (its own type
//! first, then each ancestor it embeds) and hands out views of itself as any
//! of those types, which is what processors bound to an ancestor type need.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a host type.
#[derive(Clone, Copy)]
pub struct HostType {
    id: TypeId,
    name: &'static str,
}

impl HostType {
    pub fn of<T: Any>() -> Self {
        HostType {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for HostType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HostType {}

impl Hash for HostType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An object whose raw state processors read and write.
///
/// Implement with [`crate::data_holder!`] rather than by hand.
pub trait DataHolder: Send + Sync {
    /// This holder's type followed by its ancestors, most specific first.
    fn lineage(&self) -> Vec<HostType>;

    /// This holder viewed as the lineage type `ty`.
    fn view(&self, ty: TypeId) -> Option<&dyn Any>;

    fn view_mut(&mut self, ty: TypeId) -> Option<&mut dyn Any>;
}

impl<'a> dyn DataHolder + 'a {
    /// How far `ty` is from this holder's own type: 0 for the holder's own
    /// type, `None` if `ty` is not in its lineage.
    pub fn rank_of(&self, ty: &HostType) -> Option<usize> {
        self.lineage().iter().position(|t| t == ty)
    }

    pub fn view_as<T: Any>(&self) -> Option<&T> {
        self.view(TypeId::of::<T>())?.downcast_ref::<T>()
    }

    pub fn view_as_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.view_mut(TypeId::of::<T>())?.downcast_mut::<T>()
    }
}

/// Implement [`DataHolder`] for a host type.
///
/// `data_holder!(Root)` declares a type with no ancestors;
/// `data_holder!(Child => parent)` declares a type whose `parent` field is
/// its direct ancestor (itself a `DataHolder`).
///
/// ```rust
/// use aspect_data::{data_holder, DataHolder, HostType};
///
/// struct Entity { ticks: u64 }
/// struct Living { entity: Entity, health: f64 }
///
/// data_holder!(Entity);
/// data_holder!(Living => entity);
///
/// let living = Living { entity: Entity { ticks: 3 }, health: 20.0 };
/// let holder: &dyn DataHolder = &living;
/// assert_eq!(holder.rank_of(&HostType::of::<Entity>()), Some(1));
/// assert_eq!(holder.view_as::<Entity>().map(|e| e.ticks), Some(3));
/// ```
#[macro_export]
macro_rules! data_holder {
    ($ty:ty) => {
        impl $crate::DataHolder for $ty {
            fn lineage(&self) -> ::std::vec::Vec<$crate::HostType> {
                ::std::vec![$crate::HostType::of::<$ty>()]
            }

            fn view(&self, ty: ::std::any::TypeId) -> Option<&dyn ::std::any::Any> {
                if ty == ::std::any::TypeId::of::<$ty>() {
                    Some(self as &dyn ::std::any::Any)
                } else {
                    None
                }
            }

            fn view_mut(&mut self, ty: ::std::any::TypeId) -> Option<&mut dyn ::std::any::Any> {
                if ty == ::std::any::TypeId::of::<$ty>() {
                    Some(self as &mut dyn ::std::any::Any)
                } else {
                    None
                }
            }
        }
    };
    ($ty:ty => $parent:ident) => {
        impl $crate::DataHolder for $ty {
            fn lineage(&self) -> ::std::vec::Vec<$crate::HostType> {
                let mut lineage = ::std::vec![$crate::HostType::of::<$ty>()];
                lineage.extend($crate::DataHolder::lineage(&self.$parent));
                lineage
            }

            fn view(&self, ty: ::std::any::TypeId) -> Option<&dyn ::std::any::Any> {
                if ty == ::std::any::TypeId::of::<$ty>() {
                    Some(self as &dyn ::std::any::Any)
                } else {
                    $crate::DataHolder::view(&self.$parent, ty)
                }
            }

            fn view_mut(&mut self, ty: ::std::any::TypeId) -> Option<&mut dyn ::std::any::Any> {
                if ty == ::std::any::TypeId::of::<$ty>() {
                    Some(self as &mut dyn ::std::any::Any)
                } else {
                    $crate::DataHolder::view_mut(&mut self.$parent, ty)
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Base {
        value: i32,
    }

    struct Middle {
        base: Base,
    }

    struct Leaf {
        middle: Middle,
    }

    crate::data_holder!(Base);
    crate::data_holder!(Middle => base);
    crate::data_holder!(Leaf => middle);

    fn leaf() -> Leaf {
        Leaf {
            middle: Middle {
                base: Base { value: 1 },
            },
        }
    }

    #[test]
    fn lineage_is_most_specific_first() {
        let leaf = leaf();
        assert_eq!(
            leaf.lineage(),
            vec![
                HostType::of::<Leaf>(),
                HostType::of::<Middle>(),
                HostType::of::<Base>()
            ]
        );
    }

    #[test]
    fn rank_measures_distance() {
        let leaf = leaf();
        let holder: &dyn DataHolder = &leaf;
        assert_eq!(holder.rank_of(&HostType::of::<Leaf>()), Some(0));
        assert_eq!(holder.rank_of(&HostType::of::<Base>()), Some(2));
        assert_eq!(holder.rank_of(&HostType::of::<String>()), None);
    }

    #[test]
    fn views_reach_ancestor_state() {
        let mut leaf = leaf();
        let holder: &mut dyn DataHolder = &mut leaf;
        holder.view_as_mut::<Base>().unwrap().value = 9;
        assert!(holder.view_as::<String>().is_none());
        assert_eq!(leaf.middle.base.value, 9);
    }
}
