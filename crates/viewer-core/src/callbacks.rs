//! Observer hooks a host registers on a [`Viewport`](crate::Viewport).
//!
//! Hooks cannot borrow the viewport while it is mutating, so each one is
//! handed a [`ViewportSnapshot`] of the state it is allowed to observe.

use std::fmt;

use doc_model::{FittingType, Point, ScrollbarNeeds, Size};
use serde::Serialize;

/// Read-only view of the viewport at a notification point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportSnapshot {
    pub zoom: f64,
    /// Scroll offset in screen pixels, toolbar excluded.
    pub position: Point,
    pub fitting_type: FittingType,
    /// Visible area in screen pixels, scrollbars excluded.
    pub size: Size,
    pub scrollbars: ScrollbarNeeds,
    /// `None` until a document with pages is laid out.
    pub most_visible_page: Option<usize>,
}

type SnapshotHook = Box<dyn FnMut(&ViewportSnapshot)>;
type ResizeHook = Box<dyn FnMut(Size)>;

#[derive(Default)]
pub struct ViewportCallbacks {
    viewport_changed: Option<SnapshotHook>,
    before_zoom: Option<SnapshotHook>,
    after_zoom: Option<SnapshotHook>,
    content_resized: Option<ResizeHook>,
}

impl ViewportCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired after every operation that can move, zoom or refit the view.
    pub fn on_viewport_changed(mut self, hook: impl FnMut(&ViewportSnapshot) + 'static) -> Self {
        self.viewport_changed = Some(Box::new(hook));
        self
    }

    /// Fired before a zoom transition, with the old zoom and position.
    pub fn before_zoom(mut self, hook: impl FnMut(&ViewportSnapshot) + 'static) -> Self {
        self.before_zoom = Some(Box::new(hook));
        self
    }

    /// Fired after a zoom transition, with the new zoom and position.
    pub fn after_zoom(mut self, hook: impl FnMut(&ViewportSnapshot) + 'static) -> Self {
        self.after_zoom = Some(Box::new(hook));
        self
    }

    /// Fired when the drawable area of the viewport changes size.
    pub fn on_content_resized(mut self, hook: impl FnMut(Size) + 'static) -> Self {
        self.content_resized = Some(Box::new(hook));
        self
    }

    pub(crate) fn notify_viewport_changed(&mut self, snapshot: &ViewportSnapshot) {
        if let Some(hook) = self.viewport_changed.as_mut() {
            hook(snapshot);
        }
    }

    pub(crate) fn notify_before_zoom(&mut self, snapshot: &ViewportSnapshot) {
        if let Some(hook) = self.before_zoom.as_mut() {
            hook(snapshot);
        }
    }

    pub(crate) fn notify_after_zoom(&mut self, snapshot: &ViewportSnapshot) {
        if let Some(hook) = self.after_zoom.as_mut() {
            hook(snapshot);
        }
    }

    pub(crate) fn notify_content_resized(&mut self, size: Size) {
        if let Some(hook) = self.content_resized.as_mut() {
            hook(size);
        }
    }
}

impl fmt::Debug for ViewportCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportCallbacks")
            .field("viewport_changed", &self.viewport_changed.is_some())
            .field("before_zoom", &self.before_zoom.is_some())
            .field("after_zoom", &self.after_zoom.is_some())
            .field("content_resized", &self.content_resized.is_some())
            .finish()
    }
}
