//! # Assets — Resolve by Path, Get a Handle
//!
//! Loading models and textures is somebody else's job. This module only
//! needs to know whether an asset *can* be resolved, and to hand out a
//! stable handle for it:
//!
//! ```text
//! AssetServer (resource in World)
//!   source   ── AssetSource::resolve(path, kind), may block
//!   paths    ── Vec<PathBuf>, AssetHandle is an index into it
//!   by_path  ── PathBuf -> AssetHandle, so one path yields one handle
//! ```
//!
//! ## Handle Stability
//!
//! Handles are indices into `paths`. Resolving the same path twice returns
//! the same handle without asking the source again. Whatever the renderer
//! builds from a handle is the renderer's to own.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Opaque, copyable reference to a resolved asset.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(u32);

impl AssetHandle {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetHandle({})", self.0)
    }
}

/// What the caller expects to find at a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetKind {
    /// An area's 3D model. Fragments below `alpha_test` are discarded.
    AreaModel { alpha_test: f32 },
    /// The texture atlas for the permissions overlay.
    PermissionsAtlas,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read asset {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Backend that decides whether an asset exists and prepares it.
///
/// Implementations may block; callers resolve before spawning anything that
/// depends on the asset.
pub trait AssetSource: Send + Sync {
    fn resolve(&self, path: &Path, kind: AssetKind) -> Result<(), AssetError>;
}

/// Resolves assets as regular files under a root directory.
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for FsAssetSource {
    fn resolve(&self, path: &Path, kind: AssetKind) -> Result<(), AssetError> {
        let full = self.root.join(path);
        match std::fs::metadata(&full) {
            Ok(meta) if meta.is_file() => {
                log::trace!("resolved {kind:?} at {}", full.display());
                Ok(())
            }
            Ok(_) => Err(AssetError::NotFound { path: full }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AssetError::NotFound { path: full })
            }
            Err(source) => Err(AssetError::Io { path: full, source }),
        }
    }
}

/// Caches resolved paths and hands out [`AssetHandle`]s.
pub struct AssetServer {
    source: Box<dyn AssetSource>,
    paths: Vec<PathBuf>,
    by_path: HashMap<PathBuf, AssetHandle>,
}

impl AssetServer {
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            paths: Vec::new(),
            by_path: HashMap::new(),
        }
    }

    /// Resolve `path`, or return the handle from an earlier resolution.
    pub fn load(&mut self, path: impl AsRef<Path>, kind: AssetKind) -> Result<AssetHandle, AssetError> {
        let path = path.as_ref();
        if let Some(&handle) = self.by_path.get(path) {
            return Ok(handle);
        }

        self.source.resolve(path, kind)?;

        let handle = AssetHandle(self.paths.len() as u32);
        self.paths.push(path.to_path_buf());
        self.by_path.insert(path.to_path_buf(), handle);
        log::debug!("asset {} -> {handle:?}", path.display());
        Ok(handle)
    }

    /// Path a handle was resolved from.
    pub fn path(&self, handle: AssetHandle) -> Option<&Path> {
        self.paths.get(handle.0 as usize).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
