//! Area configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides:
//!
//! ```json
//! { "area_dir": "maps", "max_pending_updates": 64 }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Directory holding `<name>.json` area files.
    pub area_dir: PathBuf,
    /// Directory holding area models, relative to the asset root.
    pub model_dir: PathBuf,
    pub model_extension: String,
    /// Atlas used by the permissions overlay, relative to the asset root.
    pub permissions_atlas: PathBuf,
    /// Pending partial tile updates a displayable holds before collapsing
    /// them into one full update. At least 1.
    pub max_pending_updates: usize,
    pub model_alpha_test: f32,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            area_dir: PathBuf::from("area"),
            model_dir: PathBuf::from("model"),
            model_extension: "g3db".to_string(),
            permissions_atlas: PathBuf::from("texture-atlas/tile-permissions.atlas"),
            max_pending_updates: 256,
            model_alpha_test: 0.1,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: &'static str },
}

impl AreaConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AreaConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if config.max_pending_updates == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "max_pending_updates must be at least 1",
            });
        }
        log::debug!("loaded area config from {}", path.display());
        Ok(config)
    }

    /// `<area_dir>/<name>.json`
    pub fn area_path(&self, name: &str) -> PathBuf {
        self.area_dir.join(format!("{name}.json"))
    }

    /// `<model_dir>/<name>.<model_extension>`
    pub fn model_path(&self, name: &str) -> PathBuf {
        self.model_dir.join(format!("{name}.{}", self.model_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_derive_conventional_paths() {
        let config = AreaConfig::default();
        assert_eq!(config.area_path("plains"), Path::new("area/plains.json"));
        assert_eq!(config.model_path("plains"), Path::new("model/plains.g3db"));
        assert_eq!(
            config.permissions_atlas,
            Path::new("texture-atlas/tile-permissions.atlas")
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("area.json");
        std::fs::write(&path, r#"{ "area_dir": "maps", "max_pending_updates": 8 }"#).expect("write");

        let config = AreaConfig::from_file(&path).expect("config");
        assert_eq!(config.area_dir, Path::new("maps"));
        assert_eq!(config.max_pending_updates, 8);
        assert_eq!(config.model_extension, "g3db");
    }

    #[test]
    fn missing_and_malformed_files_are_distinguished() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = AreaConfig::from_file(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").expect("write");
        assert!(matches!(AreaConfig::from_file(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn zero_update_cap_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("area.json");
        std::fs::write(&path, r#"{ "max_pending_updates": 0 }"#).expect("write");
        assert!(matches!(
            AreaConfig::from_file(&path),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
