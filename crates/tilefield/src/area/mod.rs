//! # Areas — Loading, Saving, and the Area Entity
//!
//! An area is one rectangular tile map. While it is loaded it lives in the
//! world as a single entity, tagged [`AREA_TAG`]:
//!
//! ```text
//! area entity
//!   TileGrid      permissions, row-major
//!   Dimensions    width x length
//!   Name          "plains"
//!   Displayable   AreaForm(model handle) + update queue
//!   Visibility
//! ```
//!
//! [`AreaManager`] owns the lifecycle: create a file, load it into the world,
//! save the mutated grid back, unload.

mod format;
mod manager;

pub use format::{AreaFile, TileEntry};
pub use manager::AreaManager;

use std::fmt;
use std::io;
use std::path::PathBuf;

use glam::UVec2;
use thiserror::Error;

use crate::asset::AssetError;
use crate::tile::GridError;

/// Tag of the currently loaded area entity.
pub const AREA_TAG: &str = "area";

#[derive(Debug, Error)]
pub enum AreaError {
    #[error("I/O error on area file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed area data: {0}")]
    MalformedData(String),
    #[error("failed to resolve area asset")]
    AssetResolution(#[from] AssetError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("invalid area name {0:?}")]
    InvalidName(String),
    #[error("{0}")]
    InvalidState(&'static str),
}

/// Human-readable area name; also the stem of its file and model paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of travel through a passage tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassageAction {
    Entry,
    Exit,
}

impl PassageAction {
    fn as_str(self) -> &'static str {
        match self {
            PassageAction::Entry => "entry",
            PassageAction::Exit => "exit",
        }
    }
}

/// Animation id for a passage transition: `passage-<entry|exit>-<x>-<y>`.
pub fn passage_animation_id(coords: UVec2, action: PassageAction) -> String {
    format!("passage-{}-{}-{}", action.as_str(), coords.x, coords.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passage_ids_encode_action_and_coords() {
        assert_eq!(
            passage_animation_id(UVec2::new(4, 7), PassageAction::Entry),
            "passage-entry-4-7"
        );
        assert_eq!(
            passage_animation_id(UVec2::new(0, 12), PassageAction::Exit),
            "passage-exit-0-12"
        );
    }
}
