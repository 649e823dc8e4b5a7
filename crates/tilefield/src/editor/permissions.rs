//! # Tile Permissions Editor
//!
//! Paints the selected [`TilePermission`] onto whatever tile the pointer
//! hovers while the primary button is held.
//!
//! ```text
//!            AreaLoaded                     AreaUnloaded
//!   Idle ───────────────► Active{overlay} ───────────────► Idle
//!                          │  ▲
//!                          └──┘ per tick: paint hovered tile
//! ```
//!
//! Entering `Active` spawns an overlay entity showing every tile's
//! permission, tagged [`OVERLAY_TAG`]. Each paint pushes a one-tile partial
//! update onto the overlay's queue.
//!
//! A held button sweeping across tiles paints each tile once. The tile last
//! painted is never repainted until another tile has been painted, even
//! across separate presses. A target that could not be painted is reported
//! once and then skipped until the pointer moves.

use std::path::PathBuf;

use glam::UVec2;
use thiserror::Error;

use crate::area::AREA_TAG;
use crate::asset::{AssetError, AssetKind, AssetServer};
use crate::config::AreaConfig;
use crate::displayable::{Displayable, DisplayableUpdateRequest, RenderableHandle, Visibility};
use crate::ecs::{Entity, System, World};
use crate::event::{EditorEvent, EventBus};
use crate::input::Pointer;
use crate::tile::{Dimensions, GridError, Tile, TileGrid, TilePermission};

/// Tag of the permissions overlay entity while editing is active.
pub const OVERLAY_TAG: &str = "tilePermissionsGrid";

/// Marks the overlay entity and names the area it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionsOverlay {
    pub area: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Active { overlay: Entity },
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to resolve permissions atlas")]
    AssetResolution(#[from] AssetError),
    #[error("hovered tile is not on the area")]
    Grid(#[from] GridError),
    #[error("{0}")]
    InvalidState(&'static str),
}

pub struct PermissionsEditor {
    state: EditorState,
    selected: Option<TilePermission>,
    hovered: Option<UVec2>,
    last_repainted: Option<UVec2>,
    rejected: Option<UVec2>,
    atlas_path: PathBuf,
    max_pending_updates: usize,
}

impl PermissionsEditor {
    pub fn new(config: &AreaConfig) -> Self {
        Self {
            state: EditorState::Idle,
            selected: None,
            hovered: None,
            last_repainted: None,
            rejected: None,
            atlas_path: config.permissions_atlas.clone(),
            max_pending_updates: config.max_pending_updates,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn selected(&self) -> Option<TilePermission> {
        self.selected
    }

    /// Tile the pointer hovered on the last active tick.
    pub fn hovered(&self) -> Option<UVec2> {
        self.hovered
    }

    pub fn overlay(&self) -> Option<Entity> {
        match self.state {
            EditorState::Active { overlay } => Some(overlay),
            EditorState::Idle => None,
        }
    }

    pub fn handle_event(&mut self, world: &mut World, event: EditorEvent) -> Result<(), EditorError> {
        match event {
            EditorEvent::AreaLoaded { area } => {
                self.teardown(world);
                let overlay = self.build_overlay(world, area)?;
                self.state = EditorState::Active { overlay };
            }
            EditorEvent::AreaUnloaded => self.teardown(world),
            EditorEvent::PermissionSelectionChanged(permission) => {
                log::debug!("permissions editor: selected {permission}");
                self.selected = Some(permission);
            }
        }
        Ok(())
    }

    fn build_overlay(&self, world: &mut World, area: Entity) -> Result<Entity, EditorError> {
        let dimensions = *world
            .get::<Dimensions>(area)
            .ok_or(EditorError::InvalidState("loaded area has no Dimensions"))?;
        let atlas = world
            .get_resource_mut::<AssetServer>()
            .ok_or(EditorError::InvalidState("no AssetServer resource in world"))?
            .load(&self.atlas_path, AssetKind::PermissionsAtlas)?;

        let overlay = world.spawn((
            dimensions,
            Displayable::new(
                RenderableHandle::GridOverlayForm { atlas },
                self.max_pending_updates,
            ),
            Visibility::Visible,
            PermissionsOverlay { area },
        ));
        world.register_tag(OVERLAY_TAG, overlay);
        log::debug!("permissions editor: overlay {overlay:?} built for {area:?}");
        Ok(overlay)
    }

    fn teardown(&mut self, world: &mut World) {
        if let EditorState::Active { overlay } = self.state {
            world.despawn(overlay);
            log::debug!("permissions editor: overlay {overlay:?} removed");
        }
        self.state = EditorState::Idle;
        self.hovered = None;
        self.last_repainted = None;
        self.rejected = None;
    }

    /// One tick of painting. Returns the tile that was repainted, if any.
    pub fn process(&mut self, world: &mut World) -> Result<Option<Tile>, EditorError> {
        let EditorState::Active { overlay } = self.state else {
            return Ok(None);
        };
        let Some(pointer) = world.get_resource::<Pointer>() else {
            return Ok(None);
        };
        let hovered = pointer.hovered;
        let engaged = pointer.primary_engaged();

        if hovered != self.hovered {
            self.hovered = hovered;
            self.rejected = None;
        }
        let Some(target) = hovered else {
            return Ok(None);
        };
        if self.last_repainted == Some(target) || self.rejected == Some(target) || !engaged {
            return Ok(None);
        }
        let Some(permission) = self.selected else {
            log::debug!("permissions editor: no permission selected, ignoring paint");
            return Ok(None);
        };

        match Self::paint(world, overlay, target, permission) {
            Ok(tile) => {
                self.last_repainted = Some(target);
                log::debug!(
                    "permissions editor: tile ({}, {}) set to {permission}",
                    target.x,
                    target.y
                );
                Ok(Some(tile))
            }
            Err(e) => {
                self.rejected = Some(target);
                Err(e)
            }
        }
    }

    fn paint(
        world: &mut World,
        overlay: Entity,
        target: UVec2,
        permission: TilePermission,
    ) -> Result<Tile, EditorError> {
        let area = world
            .get::<PermissionsOverlay>(overlay)
            .map(|o| o.area)
            .or_else(|| world.resolve_tag(AREA_TAG))
            .ok_or(EditorError::InvalidState("overlay has no area"))?;
        let tile = *world
            .get_mut::<TileGrid>(area)
            .ok_or(EditorError::InvalidState("area has no TileGrid"))?
            .set(coord(target.x), coord(target.y), permission)?;

        world
            .get_mut::<Displayable>(overlay)
            .ok_or(EditorError::InvalidState("overlay has no Displayable"))?
            .request_update(DisplayableUpdateRequest::tile(tile));
        Ok(tile)
    }
}

fn coord(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

impl System for PermissionsEditor {
    fn run(&mut self, world: &mut World) {
        let events = world
            .get_resource_mut::<EventBus<EditorEvent>>()
            .map(EventBus::drain)
            .unwrap_or_default();
        for event in events {
            if let Err(e) = self.handle_event(world, event) {
                log::error!("permissions editor: {event:?} failed: {e}");
            }
        }
        match self.process(world) {
            Err(e @ EditorError::Grid(_)) => log::debug!("permissions editor: paint skipped: {e}"),
            Err(e) => log::warn!("permissions editor: paint failed: {e}"),
            Ok(_) => {}
        }
    }
}
