//! Pointer input state.
//!
//! The [`Pointer`] resource is fed by whatever owns the window: it reports
//! which tile the cursor hovers and which buttons are held. Systems only
//! read it.

use std::collections::HashSet;
use std::hash::Hash;

use glam::UVec2;

/// Which inputs of a set are currently held down.
#[derive(Debug, Clone)]
pub struct Input<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
        }
    }

    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    pub fn press(&mut self, input: T) {
        self.pressed.insert(input);
    }

    pub fn release(&mut self, input: T) {
        self.pressed.remove(&input);
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Where the pointer is, in tile coordinates, and what it is doing.
#[derive(Debug, Clone, Default)]
pub struct Pointer {
    /// Tile under the cursor, `None` when the cursor is off the area.
    pub hovered: Option<UVec2>,
    pub buttons: Input<PointerButton>,
}

impl Pointer {
    /// Primary action engaged (button held).
    pub fn primary_engaged(&self) -> bool {
        self.buttons.pressed(PointerButton::Primary)
    }

    pub fn hover(&mut self, tile: Option<UVec2>) {
        self.hovered = tile;
    }
}
