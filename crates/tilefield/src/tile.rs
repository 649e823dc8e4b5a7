//! Tile grid model: permissions, tiles, and the row-major grid that owns them.
//!
//! ```text
//! width = 3, length = 2
//!
//!   y=1 |  3  4  5 |
//!   y=0 |  0  1  2 |
//!        x=0 x=1 x=2      index = y * width + x
//! ```
//!
//! A tile's `index` always equals its position in the grid's storage, so
//! coordinate access and linear access reach the same tile.

use std::fmt;

use glam::UVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Movement classification of a tile.
///
/// Serialized by its upper-case name (`"LEVEL0"`, `"OBSTACLE"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TilePermission {
    #[default]
    Level0,
    Level1,
    Level2,
    Level3,
    Obstacle,
    Passage,
}

impl TilePermission {
    pub const ALL: [TilePermission; 6] = [
        TilePermission::Level0,
        TilePermission::Level1,
        TilePermission::Level2,
        TilePermission::Level3,
        TilePermission::Obstacle,
        TilePermission::Passage,
    ];

    /// External name, as written to area files.
    pub fn name(self) -> &'static str {
        match self {
            TilePermission::Level0 => "LEVEL0",
            TilePermission::Level1 => "LEVEL1",
            TilePermission::Level2 => "LEVEL2",
            TilePermission::Level3 => "LEVEL3",
            TilePermission::Obstacle => "OBSTACLE",
            TilePermission::Passage => "PASSAGE",
        }
    }
}

impl fmt::Display for TilePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One cell of a [`TileGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    permission: TilePermission,
    index: usize,
}

impl Tile {
    pub fn permission(&self) -> TilePermission {
        self.permission
    }

    /// Row-major position within the owning grid.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Area extent in tiles. Both sides are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub length: u32,
}

impl Dimensions {
    pub fn new(width: u32, length: u32) -> Self {
        Self { width, length }
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.length as usize
    }
}

/// Where a rejected access pointed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPosition {
    Coords(i32, i32),
    Index(usize),
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridPosition::Coords(x, y) => write!(f, "tile ({x}, {y})"),
            GridPosition::Index(i) => write!(f, "tile index {i}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("{position} is outside a {width}x{length} grid")]
    OutOfBounds {
        position: GridPosition,
        width: u32,
        length: u32,
    },
    #[error("grid dimensions must be positive, got {width}x{length}")]
    InvalidDimensions { width: u32, length: u32 },
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
}

/// `width * length` tiles in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    length: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// A grid with every tile set to `default`.
    pub fn build(width: u32, length: u32, default: TilePermission) -> Result<Self, GridError> {
        let count = checked_tile_count(width, length)?;
        Ok(Self::from_fn(width, length, count, |_| default))
    }

    /// A grid from a row-major permission list, as read from an area file.
    pub fn from_permissions(
        width: u32,
        length: u32,
        permissions: Vec<TilePermission>,
    ) -> Result<Self, GridError> {
        let expected = checked_tile_count(width, length)?;
        let actual = permissions.len();
        if expected != actual {
            return Err(GridError::TileCountMismatch { expected, actual });
        }
        Ok(Self::from_fn(width, length, expected, |i| permissions[i]))
    }

    fn from_fn(
        width: u32,
        length: u32,
        count: usize,
        permission: impl Fn(usize) -> TilePermission,
    ) -> Self {
        let tiles = (0..count)
            .map(|index| Tile {
                permission: permission(index),
                index,
            })
            .collect();
        Self {
            width,
            length,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.length)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Row-major index of `(x, y)`.
    pub fn index_of(&self, x: i32, y: i32) -> Result<usize, GridError> {
        let in_bounds = x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.length;
        if !in_bounds {
            return Err(self.out_of_bounds(GridPosition::Coords(x, y)));
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn coords_of(&self, index: usize) -> Result<UVec2, GridError> {
        if index >= self.tiles.len() {
            return Err(self.out_of_bounds(GridPosition::Index(index)));
        }
        let width = self.width as usize;
        Ok(UVec2::new((index % width) as u32, (index / width) as u32))
    }

    pub fn get(&self, x: i32, y: i32) -> Result<&Tile, GridError> {
        let index = self.index_of(x, y)?;
        Ok(&self.tiles[index])
    }

    pub fn get_by_index(&self, index: usize) -> Result<&Tile, GridError> {
        self.tiles
            .get(index)
            .ok_or_else(|| self.out_of_bounds(GridPosition::Index(index)))
    }

    /// Change one tile's permission in place and return the updated tile.
    pub fn set(&mut self, x: i32, y: i32, permission: TilePermission) -> Result<&Tile, GridError> {
        let index = self.index_of(x, y)?;
        let tile = &mut self.tiles[index];
        tile.permission = permission;
        Ok(tile)
    }

    pub fn tiles(&self) -> impl ExactSizeIterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Row-major permissions, the order an area file stores them in.
    pub fn permissions(&self) -> impl ExactSizeIterator<Item = TilePermission> + '_ {
        self.tiles.iter().map(|t| t.permission)
    }

    fn out_of_bounds(&self, position: GridPosition) -> GridError {
        GridError::OutOfBounds {
            position,
            width: self.width,
            length: self.length,
        }
    }
}

fn checked_tile_count(width: u32, length: u32) -> Result<usize, GridError> {
    if width == 0 || length == 0 {
        return Err(GridError::InvalidDimensions { width, length });
    }
    (width as usize)
        .checked_mul(length as usize)
        .ok_or(GridError::InvalidDimensions { width, length })
}
