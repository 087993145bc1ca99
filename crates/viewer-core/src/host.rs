//! Host handles the viewport drives.
//!
//! The embedding environment owns the scrolling window and the sizer element.
//! The viewport only reads their geometry and writes scroll offsets and sizes.

use doc_model::{Point, Size};

/// A scroll container, e.g. the browser window hosting the viewer.
pub trait ScrollWindow {
    /// Visible size in screen pixels, scrollbars included.
    fn inner_size(&self) -> Size;

    /// Current scroll offset in screen pixels.
    fn scroll_offset(&self) -> Point;

    fn scroll_to(&mut self, x: f64, y: f64);
}

/// Proxy element whose size defines the scrollable range of the window.
pub trait Sizer {
    fn resize(&mut self, width_px: f64, height_px: f64);

    fn size(&self) -> Size;
}

impl<T: ScrollWindow + ?Sized> ScrollWindow for &mut T {
    fn inner_size(&self) -> Size {
        (**self).inner_size()
    }

    fn scroll_offset(&self) -> Point {
        (**self).scroll_offset()
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        (**self).scroll_to(x, y);
    }
}

impl<T: Sizer + ?Sized> Sizer for &mut T {
    fn resize(&mut self, width_px: f64, height_px: f64) {
        (**self).resize(width_px, height_px);
    }

    fn size(&self) -> Size {
        (**self).size()
    }
}

/// Headless window. Scroll offsets are stored as given, without clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryWindow {
    size: Size,
    offset: Point,
}

impl InMemoryWindow {
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: Size::new(width, height), offset: Point::ORIGIN }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
    }

    pub fn page_y_offset(&self) -> f64 {
        self.offset.y
    }
}

impl ScrollWindow for InMemoryWindow {
    fn inner_size(&self) -> Size {
        self.size
    }

    fn scroll_offset(&self) -> Point {
        self.offset
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.offset = Point::new(x, y);
    }
}

/// Headless sizer that records its size the way a DOM element's inline
/// style would, e.g. `"250px"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemorySizer {
    width: String,
    height: String,
}

impl Default for InMemorySizer {
    fn default() -> Self {
        Self { width: "0px".to_owned(), height: "0px".to_owned() }
    }
}

impl InMemorySizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> &str {
        &self.width
    }

    pub fn height(&self) -> &str {
        &self.height
    }
}

impl Sizer for InMemorySizer {
    fn resize(&mut self, width_px: f64, height_px: f64) {
        self.width = format_px(width_px);
        self.height = format_px(height_px);
    }

    fn size(&self) -> Size {
        Size::new(parse_px(&self.width), parse_px(&self.height))
    }
}

pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

fn parse_px(value: &str) -> f64 {
    value.trim_end_matches("px").parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizer_reports_css_pixels() {
        let mut sizer = InMemorySizer::new();
        assert_eq!(sizer.width(), "0px");
        assert_eq!(sizer.height(), "0px");

        sizer.resize(100.0, 12.5);
        assert_eq!(sizer.width(), "100px");
        assert_eq!(sizer.height(), "12.5px");
        assert_eq!(sizer.size(), Size::new(100.0, 12.5));
    }

    fn scroll_host<W: ScrollWindow>(mut window: W) {
        window.scroll_to(3.0, 4.0);
    }

    #[test]
    fn borrowed_window_writes_through() {
        let mut window = InMemoryWindow::new(100.0, 100.0);
        scroll_host(&mut window);

        assert_eq!(window.scroll_offset(), Point::new(3.0, 4.0));
        assert_eq!(window.page_y_offset(), 4.0);
    }
}
