//! Editing tools that run while an area is loaded.

mod permissions;

pub use permissions::{EditorError, EditorState, OVERLAY_TAG, PermissionsEditor, PermissionsOverlay};
