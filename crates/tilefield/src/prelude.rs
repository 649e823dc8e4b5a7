//! Convenience re-exports — `use tilefield::prelude::*` for the common items.

pub use crate::area::{AREA_TAG, AreaError, AreaManager, Name, PassageAction, passage_animation_id};
pub use crate::asset::{AssetError, AssetHandle, AssetKind, AssetServer, AssetSource, FsAssetSource};
pub use crate::config::{AreaConfig, ConfigError};
pub use crate::displayable::{Displayable, DisplayableUpdateRequest, RenderableHandle, Visibility};
pub use crate::ecs::{Entity, Schedule, System, World};
pub use crate::editor::{EditorError, EditorState, OVERLAY_TAG, PermissionsEditor, PermissionsOverlay};
pub use crate::event::{EditorEvent, EventBus};
pub use crate::input::{Input, Pointer, PointerButton};
pub use crate::tile::{Dimensions, GridError, Tile, TileGrid, TilePermission};
pub use glam::UVec2;
