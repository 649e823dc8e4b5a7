//! # Entity — Opaque Handles
//!
//! An [`Entity`] carries no data of its own. The [`World`](super::world::World)
//! maps it to components, and tags map names to it.
//!
//! ## Generational Handles
//!
//! Each handle is a slot index plus a generation. Despawning bumps the slot's
//! generation, so a handle kept around after its entity died (in a tag, in an
//! editor field, in a renderer cache) fails every lookup instead of silently
//! aliasing whatever entity reuses the slot:
//!
//! ```text
//! spawn area       -> Entity { index: 0, generation: 0 }
//! despawn area     -> slot 0 generation becomes 1
//! spawn overlay    -> Entity { index: 0, generation: 1 }
//! old area handle  -> is_alive() == false
//! ```
//!
//! This is what lets tags behave as weak references: a tag that still points
//! at a dead handle resolves to nothing.

use std::fmt;

/// A handle to an entity in the [`World`](super::world::World).
///
/// Only meaningful for the world that produced it, and only while its
/// generation matches the slot's current generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Entity {
    /// Raw slot index. Diagnostics only.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Issues and recycles entity handles.
///
/// ```text
/// generations: [1, 0, 2]   one counter per slot ever issued
/// free_list:   [0]         slots waiting for reuse
/// len:         3           next fresh slot
/// ```
pub(crate) struct EntityAllocator {
    generations: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Hand out a handle, reusing a freed slot when one exists.
    pub fn allocate(&mut self) -> Entity {
        match self.free_list.pop() {
            Some(index) => Entity {
                index,
                generation: self.generations[index as usize],
            },
            None => {
                let index = self.len;
                self.len += 1;
                self.generations.push(0);
                Entity {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Retire a handle. Returns `false` if it was already stale.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.generations[entity.index as usize] += 1;
        self.free_list.push(entity.index);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index as usize)
            .is_some_and(|&generation| generation == entity.generation)
    }

    pub fn alive_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    #[cfg(test)]
    pub(crate) fn free_count(&self) -> usize {
        self.free_list.len()
    }
}
