//! On-disk area format.
//!
//! ```json
//! {
//!   "width": 3,
//!   "length": 2,
//!   "tiles": [ { "permissions": "LEVEL0" }, ... ]
//! }
//! ```
//!
//! `tiles` holds exactly `width * length` entries in row-major order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::AreaError;
use crate::tile::{TileGrid, TilePermission};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaFile {
    pub width: u32,
    pub length: u32,
    pub tiles: Vec<TileEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileEntry {
    pub permissions: TilePermission,
}

impl AreaFile {
    pub fn from_grid(grid: &TileGrid) -> Self {
        Self {
            width: grid.width(),
            length: grid.length(),
            tiles: grid
                .permissions()
                .map(|permissions| TileEntry { permissions })
                .collect(),
        }
    }

    pub fn into_grid(self) -> Result<TileGrid, AreaError> {
        let permissions = self.tiles.into_iter().map(|t| t.permissions).collect();
        TileGrid::from_permissions(self.width, self.length, permissions)
            .map_err(|e| AreaError::MalformedData(e.to_string()))
    }

    pub fn read(path: &Path) -> Result<Self, AreaError> {
        let text = fs::read_to_string(path).map_err(|source| AreaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text)
            .map_err(|e| AreaError::MalformedData(format!("{}: {e}", path.display())))
    }

    /// Write through a sibling temp file so a failed write never leaves a
    /// truncated area behind.
    pub fn write(&self, path: &Path) -> Result<(), AreaError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AreaError::MalformedData(e.to_string()))?;
        write_text_atomic(path, &json).map_err(|source| AreaError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text)?;
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("area.json");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_round_trips_through_file_shape() {
        let mut grid = TileGrid::build(3, 2, TilePermission::Level0).expect("grid");
        grid.set(2, 1, TilePermission::Passage).expect("in bounds");

        let file = AreaFile::from_grid(&grid);
        assert_eq!(file.tiles.len(), 6);
        assert_eq!(file.tiles[5].permissions, TilePermission::Passage);
        assert_eq!(file.into_grid().expect("grid"), grid);
    }

    #[test]
    fn serialized_shape_uses_permission_names() {
        let grid = TileGrid::build(1, 1, TilePermission::Obstacle).expect("grid");
        let value = serde_json::to_value(AreaFile::from_grid(&grid)).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "width": 1,
                "length": 1,
                "tiles": [ { "permissions": "OBSTACLE" } ]
            })
        );
    }

    #[test]
    fn count_mismatch_is_malformed() {
        let file = AreaFile {
            width: 2,
            length: 2,
            tiles: vec![TileEntry { permissions: TilePermission::Level0 }; 3],
        };
        assert!(matches!(file.into_grid(), Err(AreaError::MalformedData(_))));
    }

    #[test]
    fn write_replaces_existing_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("area/plains.json");
        let small = AreaFile::from_grid(&TileGrid::build(1, 1, TilePermission::Level0).expect("grid"));
        let large = AreaFile::from_grid(&TileGrid::build(2, 2, TilePermission::Level1).expect("grid"));

        small.write(&path).expect("write");
        large.write(&path).expect("overwrite");

        assert_eq!(AreaFile::read(&path).expect("read"), large);
        assert!(!dir.path().join("area/plains.json.tmp").exists());
    }

    #[test]
    fn read_distinguishes_missing_from_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = AreaFile::read(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(AreaError::Io { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{ "width": 1, "length": 1, "tiles": [ { "permissions": "LAVA" } ] }"#)
            .expect("write");
        assert!(matches!(AreaFile::read(&bad), Err(AreaError::MalformedData(_))));
    }
}
