//! # tilefield — Tile Areas in an ECS
//!
//! A rectangular tile map lives in the world as one entity carrying a
//! [`TileGrid`](tile::TileGrid). Changes to the grid reach whatever draws it
//! through a per-entity update queue, never through direct calls into a
//! renderer.
//!
//! Start with `use tilefield::prelude::*`, create an
//! [`AreaManager`](area::AreaManager), and add a
//! [`PermissionsEditor`](editor::PermissionsEditor) to a
//! [`Schedule`](ecs::Schedule) to paint tile permissions.

pub mod area;
pub mod asset;
pub mod config;
pub mod displayable;
pub mod ecs;
pub mod editor;
pub mod event;
pub mod input;
pub mod prelude;
pub mod tile;
