//! # Component Store — Type-Erased Columns
//!
//! Components are plain data: a [`TileGrid`](crate::tile::TileGrid), a
//! [`Dimensions`](crate::tile::Dimensions), a
//! [`Displayable`](crate::displayable::Displayable). Each archetype keeps one
//! [`ComponentColumn`] per component type, and row `i` of every column belongs
//! to the same entity.
//!
//! Columns hold `Box<dyn Any + Send + Sync>` and downcast on access. There is
//! no `unsafe` here; a downcast failure means the archetype bookkeeping is
//! broken and panics.

use std::any::{Any, TypeId};

/// Any `'static + Send + Sync` type can be a component. This alias names the
/// bound used at every storage entry point.
pub trait Component: Any + Send + Sync {}

impl<T: Any + Send + Sync> Component for T {}

pub(crate) fn component_type_id<T: Component>() -> TypeId {
    TypeId::of::<T>()
}

/// One column of components of a single type.
pub struct ComponentColumn {
    data: Vec<Box<dyn Any + Send + Sync>>,
}

impl ComponentColumn {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn push<T: Component>(&mut self, value: T) {
        self.data.push(Box::new(value));
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range or the column holds another type.
    pub fn get<T: Component>(&self, index: usize) -> &T {
        self.data[index].downcast_ref().unwrap_or_else(|| {
            panic!(
                "component column does not hold `{}`",
                std::any::type_name::<T>()
            )
        })
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range or the column holds another type.
    pub fn get_mut<T: Component>(&mut self, index: usize) -> &mut T {
        self.data[index].downcast_mut().unwrap_or_else(|| {
            panic!(
                "component column does not hold `{}`",
                std::any::type_name::<T>()
            )
        })
    }

    /// Drop the value at `index`, moving the last value into its slot.
    pub fn swap_remove(&mut self, index: usize) {
        self.data.swap_remove(index);
    }

    /// Like [`swap_remove`](Self::swap_remove) but hands the value back, for
    /// moving an entity between archetypes.
    pub fn take(&mut self, index: usize) -> Box<dyn Any + Send + Sync> {
        self.data.swap_remove(index)
    }

    pub fn push_any(&mut self, value: Box<dyn Any + Send + Sync>) {
        self.data.push(value);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for ComponentColumn {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_get() {
        let mut col = ComponentColumn::new();
        col.push(3u32);
        col.push(5u32);
        assert_eq!(*col.get::<u32>(0), 3);
        assert_eq!(*col.get::<u32>(1), 5);
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn swap_remove_moves_last_into_hole() {
        let mut col = ComponentColumn::new();
        col.push('a');
        col.push('b');
        col.push('c');
        col.swap_remove(0);
        assert_eq!(*col.get::<char>(0), 'c');
        assert_eq!(*col.get::<char>(1), 'b');
    }

    #[test]
    fn take_hands_value_to_another_column() {
        let mut from = ComponentColumn::new();
        from.push(String::from("plains"));
        let mut to = ComponentColumn::new();
        to.push_any(from.take(0));
        assert!(from.is_empty());
        assert_eq!(to.get::<String>(0), "plains");
    }

    #[test]
    fn removed_values_are_dropped() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static DROPS: AtomicUsize = AtomicUsize::new(0);

        struct Tracked;
        impl Drop for Tracked {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut col = ComponentColumn::new();
        col.push(Tracked);
        col.push(Tracked);
        col.swap_remove(1);
        assert_eq!(DROPS.load(Ordering::SeqCst), 1);
        drop(col);
        assert_eq!(DROPS.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[should_panic(expected = "does not hold")]
    fn wrong_type_panics() {
        let mut col = ComponentColumn::new();
        col.push(1u8);
        col.get::<u16>(0);
    }
}
