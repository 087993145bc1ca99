//! Zoom and scroll state of a document viewer.
//!
//! A [`Viewport`] drives a host scroll window and a sizer element: it keeps
//! the scrollable range in sync with the zoomed document, fits pages to the
//! window, and reports which page is on screen.

mod callbacks;
mod config;
mod host;
mod message;
mod navigation;
mod viewport;

pub use callbacks::{ViewportCallbacks, ViewportSnapshot};
pub use config::{ConfigError, ViewportConfig, DEFAULT_ZOOM_FACTORS};
pub use host::{format_px, InMemorySizer, InMemoryWindow, ScrollWindow, Sizer};
pub use message::ViewportMessage;
pub use navigation::{NavigationKey, SCROLL_INCREMENT};
pub use viewport::{scrollbars_needed, Viewport};

pub use doc_model::{
    DocumentDimensions, FittingType, PageShadow, Point, Rect, ScrollbarNeeds, Size, PAGE_SHADOW,
};
