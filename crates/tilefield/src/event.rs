//! Queued events between systems.
//!
//! An [`EventBus<E>`] lives in the world as a resource. Publishers append,
//! the consuming system drains once per tick. Events published during a
//! drain pass are seen on the next one.

use crate::ecs::Entity;
use crate::tile::TilePermission;

/// Notifications the editing tools react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    AreaLoaded { area: Entity },
    AreaUnloaded,
    PermissionSelectionChanged(TilePermission),
}

/// FIFO of events of one type.
#[derive(Debug)]
pub struct EventBus<E> {
    queue: Vec<E>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn publish(&mut self, event: E) {
        self.queue.push(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_events_in_publish_order_once() {
        let mut bus = EventBus::new();
        bus.publish("loaded");
        bus.publish("unloaded");
        assert_eq!(bus.len(), 2);
        assert_eq!(bus.drain(), vec!["loaded", "unloaded"]);
        assert!(bus.is_empty());
        assert!(bus.drain().is_empty());
    }
}
