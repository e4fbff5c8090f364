//! Host scroll container interface
//!
//! The control does not own scroll physics; it observes the host container's
//! vertical content offset. [`ScrollViewport`] is the minimal stand-in for
//! that container: it stores the offset and visible height, and notifies
//! registered observers synchronously whenever the offset changes. Hosts
//! with their own scroll machinery can skip it and call
//! [`RefreshControl::offset_changed`](crate::RefreshControl::offset_changed)
//! directly with the same snapshot.

use slotmap::{new_key_type, SlotMap};
use std::sync::Arc;

new_key_type! {
    /// Handle to a registered offset observation
    pub struct ObservationId;
}

/// Snapshot delivered to offset observers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetChange {
    /// Vertical content offset; negative when content is dragged below rest
    pub offset_y: f32,
    /// Visible height of the viewport at notification time
    pub visible_height: f32,
}

impl OffsetChange {
    /// How far content has been dragged past its rest position
    pub fn pull_distance(&self) -> f32 {
        -self.offset_y
    }
}

/// Observer callback invoked synchronously on every offset change
pub type OffsetObserver = Arc<dyn Fn(OffsetChange) + Send + Sync>;

/// Minimal observable scroll viewport
pub struct ScrollViewport {
    offset_y: f32,
    visible_height: f32,
    observers: SlotMap<ObservationId, OffsetObserver>,
}

impl ScrollViewport {
    pub fn new(visible_height: f32) -> Self {
        Self {
            offset_y: 0.0,
            visible_height,
            observers: SlotMap::with_key(),
        }
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn visible_height(&self) -> f32 {
        self.visible_height
    }

    /// How far content is currently dragged past its rest position
    pub fn pull_distance(&self) -> f32 {
        -self.offset_y
    }

    /// Update the visible height (no notification; the next offset change
    /// carries the new value)
    pub fn set_visible_height(&mut self, height: f32) {
        self.visible_height = height;
    }

    /// Update the content offset and synchronously notify all observers
    pub fn set_offset(&mut self, offset_y: f32) {
        self.offset_y = offset_y;
        let change = OffsetChange {
            offset_y,
            visible_height: self.visible_height,
        };
        for (_, observer) in &self.observers {
            observer(change);
        }
    }

    /// Register an observer, returning a handle for later removal
    pub fn observe<F>(&mut self, observer: F) -> ObservationId
    where
        F: Fn(OffsetChange) + Send + Sync + 'static,
    {
        let id = self.observers.insert(Arc::new(observer));
        tracing::trace!(?id, "offset observer registered");
        id
    }

    /// Remove a previously registered observer
    pub fn remove_observer(&mut self, id: ObservationId) {
        if self.observers.remove(id).is_none() {
            tracing::warn!(?id, "remove_observer called with unknown observation");
        }
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
