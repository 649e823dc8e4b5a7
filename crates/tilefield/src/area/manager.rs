use std::path::{Path, PathBuf};

use super::format::AreaFile;
use super::{AREA_TAG, AreaError, Name};
use crate::asset::{AssetKind, AssetServer};
use crate::config::AreaConfig;
use crate::displayable::{Displayable, RenderableHandle, Visibility};
use crate::ecs::{Entity, World};
use crate::event::{EditorEvent, EventBus};
use crate::tile::{TileGrid, TilePermission};

/// Creates, loads, saves and unloads areas. At most one area is loaded at a
/// time.
///
/// Loading needs an [`AssetServer`] resource in the world. If an
/// [`EventBus<EditorEvent>`] resource is present, load and unload are
/// announced on it.
pub struct AreaManager {
    config: AreaConfig,
    current: Option<Entity>,
}

impl AreaManager {
    pub fn new(config: AreaConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &AreaConfig {
        &self.config
    }

    /// Write a new area file with every tile at the lowest level. Overwrites
    /// an existing file of the same name.
    pub fn create(&self, name: &str, width: u32, length: u32) -> Result<PathBuf, AreaError> {
        validate_name(name)?;
        let grid = TileGrid::build(width, length, TilePermission::default())?;
        let path = self.config.area_path(name);
        AreaFile::from_grid(&grid).write(&path)?;
        log::info!("created area \"{name}\" ({width}x{length}) at {}", path.display());
        Ok(path)
    }

    /// Load `<area_dir>/<name>.json`.
    pub fn load(&mut self, world: &mut World, name: &str) -> Result<Entity, AreaError> {
        validate_name(name)?;
        let path = self.config.area_path(name);
        self.load_from_file(world, &path, name)
    }

    /// Load an area from an explicit file. `name` still selects the model and
    /// the save path.
    ///
    /// On any error the world is left untouched.
    pub fn load_from_file(
        &mut self,
        world: &mut World,
        path: &Path,
        name: &str,
    ) -> Result<Entity, AreaError> {
        validate_name(name)?;
        if self.loaded_area(world).is_some() {
            return Err(AreaError::InvalidState(
                "an area is already loaded; unload it first",
            ));
        }

        let grid = AreaFile::read(path)?.into_grid()?;
        let dimensions = grid.dimensions();

        let model_path = self.config.model_path(name);
        let kind = AssetKind::AreaModel {
            alpha_test: self.config.model_alpha_test,
        };
        let model = world
            .get_resource_mut::<AssetServer>()
            .ok_or(AreaError::InvalidState("no AssetServer resource in world"))?
            .load(&model_path, kind)?;

        let area = world.spawn((
            grid,
            dimensions,
            Name(name.to_string()),
            Displayable::new(
                RenderableHandle::AreaForm(model),
                self.config.max_pending_updates,
            ),
            Visibility::Visible,
        ));
        world.register_tag(AREA_TAG, area);
        self.current = Some(area);

        log::info!(
            "loaded area \"{name}\" ({}x{}) from {} as {area:?}",
            dimensions.width,
            dimensions.length,
            path.display()
        );
        if let Some(bus) = world.get_resource_mut::<EventBus<EditorEvent>>() {
            bus.publish(EditorEvent::AreaLoaded { area });
        }
        Ok(area)
    }

    /// Write the loaded area's grid back to the file named after it.
    pub fn save(&self, world: &World) -> Result<PathBuf, AreaError> {
        let area = self
            .loaded_area(world)
            .ok_or(AreaError::InvalidState("no area is loaded"))?;
        let name = world
            .get::<Name>(area)
            .ok_or(AreaError::InvalidState("area entity has no Name"))?;
        let grid = world
            .get::<TileGrid>(area)
            .ok_or(AreaError::InvalidState("area entity has no TileGrid"))?;

        let path = self.config.area_path(name.as_str());
        AreaFile::from_grid(grid).write(&path)?;
        log::info!("saved area \"{name}\" to {}", path.display());
        Ok(path)
    }

    /// Despawn the loaded area. Does nothing when none was loaded.
    ///
    /// `AreaUnloaded` is announced even if the entity was already despawned
    /// elsewhere, so listeners holding per-area state still tear it down.
    pub fn unload_current(&mut self, world: &mut World) {
        let Some(area) = self.current.take() else {
            return;
        };
        if world.resolve_tag(AREA_TAG) == Some(area) {
            world.clear_tag(AREA_TAG);
        }
        if world.despawn(area) {
            log::info!("unloaded area {area:?}");
        } else {
            log::debug!("area {area:?} was already despawned");
        }
        if let Some(bus) = world.get_resource_mut::<EventBus<EditorEvent>>() {
            bus.publish(EditorEvent::AreaUnloaded);
        }
    }

    /// Whether the loaded area's entity is still alive in `world`.
    pub fn is_area_loaded(&self, world: &World) -> bool {
        self.loaded_area(world).is_some()
    }

    pub fn area(&self, world: &World) -> Option<Entity> {
        self.loaded_area(world)
    }

    fn loaded_area(&self, world: &World) -> Option<Entity> {
        self.current.filter(|&area| world.is_alive(area))
    }
}

/// Names become file stems, so they must stay inside `area_dir`.
fn validate_name(name: &str) -> Result<(), AreaError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(AreaError::InvalidName(name.to_string()));
    }
    Ok(())
}
