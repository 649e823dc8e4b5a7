//! Display-side components and the update-request queue.
//!
//! Mutators never touch graphics state. They push a
//! [`DisplayableUpdateRequest`] onto the entity's [`Displayable`], and the
//! renderer drains it once per frame:
//!
//! ```ignore
//! world.query::<(&mut Displayable,)>(|entity, (display,)| {
//!     while let Some(request) = display.poll_update_request() {
//!         match request {
//!             DisplayableUpdateRequest::Full => rebuild(entity),
//!             DisplayableUpdateRequest::TilesPartial(tiles) => patch(entity, &tiles),
//!         }
//!     }
//! });
//! ```

use std::collections::{BTreeMap, VecDeque};

use crate::asset::AssetHandle;
use crate::tile::Tile;

/// What a display should be rebuilt from.
///
/// Only asset handles are stored; the graphics resources behind them belong
/// to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderableHandle {
    /// The area's 3D model.
    AreaForm(AssetHandle),
    /// A per-tile overlay drawn from a texture atlas.
    GridOverlayForm { atlas: AssetHandle },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayableUpdateRequest {
    /// Rebuild everything.
    Full,
    /// Rebuild only these tiles, keyed by tile index. Snapshots are taken at
    /// request time.
    TilesPartial(BTreeMap<usize, Tile>),
}

impl DisplayableUpdateRequest {
    pub fn tile(tile: Tile) -> Self {
        DisplayableUpdateRequest::TilesPartial(BTreeMap::from([(tile.index(), tile)]))
    }
}

/// Whether the renderer should draw the entity at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// FIFO of pending display updates.
///
/// Consecutive partial requests merge into one, later snapshots winning per
/// index. A `Full` request drops everything queued before it. Once the
/// merged partial payload holds more than `max_pending` tiles the queue
/// collapses to a single `Full`. A cap of 0 is treated as 1.
#[derive(Debug, Clone)]
pub struct UpdateQueue {
    pending: VecDeque<DisplayableUpdateRequest>,
    max_pending: usize,
}

impl UpdateQueue {
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            max_pending: max_pending.max(1),
        }
    }

    pub fn push(&mut self, request: DisplayableUpdateRequest) {
        match request {
            DisplayableUpdateRequest::Full => {
                self.pending.clear();
                self.pending.push_back(DisplayableUpdateRequest::Full);
            }
            DisplayableUpdateRequest::TilesPartial(tiles) => {
                if let Some(DisplayableUpdateRequest::TilesPartial(last)) = self.pending.back_mut() {
                    last.extend(tiles);
                } else {
                    self.pending
                        .push_back(DisplayableUpdateRequest::TilesPartial(tiles));
                }
                self.collapse_if_over_cap();
            }
        }
    }

    fn collapse_if_over_cap(&mut self) {
        let pending_tiles: usize = self
            .pending
            .iter()
            .map(|r| match r {
                DisplayableUpdateRequest::Full => 0,
                DisplayableUpdateRequest::TilesPartial(tiles) => tiles.len(),
            })
            .sum();
        if pending_tiles > self.max_pending {
            log::debug!(
                "update queue: {pending_tiles} pending tiles exceed cap {}, collapsing to full update",
                self.max_pending
            );
            self.pending.clear();
            self.pending.push_back(DisplayableUpdateRequest::Full);
        }
    }

    pub fn pop(&mut self) -> Option<DisplayableUpdateRequest> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Component linking an entity to its on-screen form.
#[derive(Debug, Clone)]
pub struct Displayable {
    renderable: RenderableHandle,
    queue: UpdateQueue,
}

impl Displayable {
    pub fn new(renderable: RenderableHandle, max_pending: usize) -> Self {
        Self {
            renderable,
            queue: UpdateQueue::new(max_pending),
        }
    }

    pub fn renderable(&self) -> RenderableHandle {
        self.renderable
    }

    /// Queue a display update. Never blocks.
    pub fn request_update(&mut self, request: DisplayableUpdateRequest) {
        self.queue.push(request);
    }

    /// Oldest pending update, removing it. Renderer side only.
    pub fn poll_update_request(&mut self) -> Option<DisplayableUpdateRequest> {
        self.queue.pop()
    }

    pub fn pending_updates(&self) -> usize {
        self.queue.len()
    }

    pub fn has_pending_updates(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{TileGrid, TilePermission};

    fn displayable(cap: usize) -> Displayable {
        Displayable::new(RenderableHandle::AreaForm(AssetHandle::new(0)), cap)
    }

    fn snapshot(grid: &mut TileGrid, x: i32, y: i32, p: TilePermission) -> Tile {
        *grid.set(x, y, p).expect("in bounds")
    }

    #[test]
    fn empty_queue_polls_none() {
        let mut d = displayable(16);
        assert_eq!(d.poll_update_request(), None);
        assert!(!d.has_pending_updates());
    }

    #[test]
    fn full_then_partial_drain_in_order() {
        let mut grid = TileGrid::build(3, 3, TilePermission::Level0).expect("grid");
        let tile = snapshot(&mut grid, 1, 1, TilePermission::Obstacle);

        let mut d = displayable(16);
        d.request_update(DisplayableUpdateRequest::Full);
        d.request_update(DisplayableUpdateRequest::tile(tile));
        assert_eq!(d.pending_updates(), 2);

        assert_eq!(d.poll_update_request(), Some(DisplayableUpdateRequest::Full));
        assert_eq!(
            d.poll_update_request(),
            Some(DisplayableUpdateRequest::tile(tile))
        );
        assert_eq!(d.poll_update_request(), None);
    }

    #[test]
    fn consecutive_partials_merge_later_snapshot_wins() {
        let mut grid = TileGrid::build(3, 3, TilePermission::Level0).expect("grid");
        let a = snapshot(&mut grid, 0, 0, TilePermission::Level1);
        let b = snapshot(&mut grid, 2, 0, TilePermission::Level2);
        let a2 = snapshot(&mut grid, 0, 0, TilePermission::Passage);

        let mut d = displayable(16);
        d.request_update(DisplayableUpdateRequest::tile(a));
        d.request_update(DisplayableUpdateRequest::tile(b));
        d.request_update(DisplayableUpdateRequest::tile(a2));
        assert_eq!(d.pending_updates(), 1);

        let Some(DisplayableUpdateRequest::TilesPartial(tiles)) = d.poll_update_request() else {
            panic!("expected a partial update");
        };
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[&0].permission(), TilePermission::Passage);
        assert_eq!(tiles[&2].permission(), TilePermission::Level2);
    }

    #[test]
    fn full_supersedes_pending_partials() {
        let grid = TileGrid::build(2, 2, TilePermission::Level0).expect("grid");
        let tile = *grid.get(0, 0).expect("in bounds");

        let mut d = displayable(16);
        d.request_update(DisplayableUpdateRequest::tile(tile));
        d.request_update(DisplayableUpdateRequest::Full);
        assert_eq!(d.poll_update_request(), Some(DisplayableUpdateRequest::Full));
        assert_eq!(d.poll_update_request(), None);
    }

    #[test]
    fn oversized_backlog_collapses_to_full() {
        let grid = TileGrid::build(4, 4, TilePermission::Level0).expect("grid");
        let mut d = displayable(3);
        for tile in grid.tiles().take(4) {
            d.request_update(DisplayableUpdateRequest::tile(*tile));
        }
        assert_eq!(d.pending_updates(), 1);
        assert_eq!(d.poll_update_request(), Some(DisplayableUpdateRequest::Full));
    }

    #[test]
    fn zero_cap_still_carries_single_tile_partials() {
        let grid = TileGrid::build(2, 2, TilePermission::Level0).expect("grid");
        let tile = *grid.get(1, 0).expect("in bounds");
        let mut d = displayable(0);
        d.request_update(DisplayableUpdateRequest::tile(tile));
        assert_eq!(
            d.poll_update_request(),
            Some(DisplayableUpdateRequest::tile(tile))
        );
    }

    #[test]
    fn partial_payload_matches_grid_after_apply() {
        let mut grid = TileGrid::build(3, 2, TilePermission::Level0).expect("grid");
        let mut d = displayable(16);
        for (x, y, p) in [(0, 0, TilePermission::Obstacle), (2, 1, TilePermission::Level3)] {
            let tile = snapshot(&mut grid, x, y, p);
            d.request_update(DisplayableUpdateRequest::tile(tile));
        }

        let Some(DisplayableUpdateRequest::TilesPartial(tiles)) = d.poll_update_request() else {
            panic!("expected a partial update");
        };
        for (index, tile) in &tiles {
            assert_eq!(grid.get_by_index(*index), Ok(tile));
        }
    }
}
