//! # Archetype — Entities Grouped by Component Set
//!
//! Every distinct set of component types gets one [`Archetype`]. An area
//! entity (`TileGrid`, `Dimensions`, `Name`, `Displayable`, `Visibility`) and
//! the editor overlay (`Dimensions`, `Displayable`, `Visibility`,
//! `PermissionsOverlay`) live in different archetypes, so an aspect query for
//! `TileGrid` never even looks at overlay rows.
//!
//! ```text
//! Archetype [Dimensions, Displayable, TileGrid, ...]
//!   Dimensions:  [d0, d1]
//!   Displayable: [q0, q1]
//!   TileGrid:    [g0, g1]
//!   entities:    [e0, e1]     parallel to every column
//! ```

use std::any::TypeId;
use std::collections::HashMap;

use super::component::ComponentColumn;
use super::entity::Entity;

/// Sorted, deduplicated type list identifying an archetype.
pub(crate) type ArchetypeKey = Vec<TypeId>;

pub(crate) fn archetype_key(mut type_ids: Vec<TypeId>) -> ArchetypeKey {
    type_ids.sort();
    type_ids.dedup();
    type_ids
}

pub(crate) struct Archetype {
    pub columns: HashMap<TypeId, ComponentColumn>,
    pub entities: Vec<Entity>,
}

impl Archetype {
    pub fn new(columns: HashMap<TypeId, ComponentColumn>) -> Self {
        Self {
            columns,
            entities: Vec::new(),
        }
    }

    /// Empty columns for every type in `key`.
    pub fn with_key(key: &ArchetypeKey) -> Self {
        Self::new(key.iter().map(|&t| (t, ComponentColumn::new())).collect())
    }

    pub fn has_component(&self, type_id: &TypeId) -> bool {
        self.columns.contains_key(type_id)
    }

    /// True when this archetype carries every type in `required`.
    pub fn matches(&self, required: &[TypeId]) -> bool {
        required.iter().all(|tid| self.has_component(tid))
    }

    /// Remove row `index` from every column. Returns the entity that was
    /// moved into that row, if any, so the caller can fix its location.
    pub fn swap_remove(&mut self, index: usize) -> Option<Entity> {
        for column in self.columns.values_mut() {
            column.swap_remove(index);
        }
        self.entities.swap_remove(index);
        self.entities.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_order_and_duplicates() {
        let a = TypeId::of::<u8>();
        let b = TypeId::of::<u16>();
        assert_eq!(archetype_key(vec![a, b]), archetype_key(vec![b, a, b]));
    }

    #[test]
    fn matches_requires_every_type() {
        let key = archetype_key(vec![TypeId::of::<u8>(), TypeId::of::<u16>()]);
        let arch = Archetype::with_key(&key);
        assert!(arch.matches(&[TypeId::of::<u8>()]));
        assert!(arch.matches(&[]));
        assert!(!arch.matches(&[TypeId::of::<u8>(), TypeId::of::<u32>()]));
    }
}
