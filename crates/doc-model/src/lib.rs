use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self { width: self.width * factor, height: self.height * factor }
    }
}

/// Axis-aligned rectangle. Page rects are in unzoomed document units,
/// screen rects in zoomed pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn intersection_height(&self, other: &Rect) -> f64 {
        let top = self.y.max(other.y);
        let bottom = self.bottom().min(other.bottom());

        (bottom - top).max(0.0)
    }

    pub fn inset(&self, shadow: PageShadow) -> Rect {
        Rect {
            x: self.x + shadow.left,
            y: self.y + shadow.top,
            width: self.width - shadow.left - shadow.right,
            height: self.height - shadow.top - shadow.bottom,
        }
    }
}

/// Drop shadow drawn around every page, in unzoomed document units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageShadow {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

pub const PAGE_SHADOW: PageShadow = PageShadow { top: 3.0, bottom: 7.0, left: 5.0, right: 5.0 };

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FittingType {
    #[default]
    None,
    FitToWidth,
    FitToHeight,
    FitToPage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollbarNeeds {
    pub horizontal: bool,
    pub vertical: bool,
}

impl ScrollbarNeeds {
    pub const NONE: Self = Self { horizontal: false, vertical: false };
}

/// Unzoomed layout of a document: pages stacked top to bottom, left aligned,
/// without gaps. The width is that of the widest page and the height the sum
/// of all page heights, both starting from the size given to [`new`](Self::new).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentDimensions {
    width: f64,
    height: f64,
    pages: Vec<Rect>,
}

impl DocumentDimensions {
    /// A single region without discrete pages.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, pages: Vec::new() }
    }

    pub fn from_pages<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut dimensions = Self::default();
        for (width, height) in pages {
            dimensions.add_page(width, height);
        }

        dimensions
    }

    pub fn reset(&mut self) {
        self.width = 0.0;
        self.height = 0.0;
        self.pages.clear();
    }

    pub fn add_page(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            tracing::warn!(width, height, "adding page with a degenerate size");
        }

        let y = self.pages.last().map_or(0.0, Rect::bottom);
        self.pages.push(Rect::new(0.0, y, width, height));
        self.width = self.width.max(width);
        self.height += height;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn pages(&self) -> &[Rect] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Rect> {
        self.pages.get(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn has_pages(&self) -> bool {
        !self.pages.is_empty()
    }
}
