//! Zoom, scroll and page geometry for a continuously scrolled document.
//!
//! Two coordinate spaces are in play:
//! - document space: unzoomed units in which [`DocumentDimensions`] lays out pages;
//! - screen space: document units multiplied by the zoom, the space the host
//!   window scrolls in.
//!
//! The window's vertical scroll range is extended by the top toolbar height,
//! so a window offset of `toolbar` shows the document top just below it.

use doc_model::{
    DocumentDimensions, FittingType, Point, Rect, ScrollbarNeeds, Size, PAGE_SHADOW,
};

use crate::callbacks::{ViewportCallbacks, ViewportSnapshot};
use crate::config::{ConfigError, ViewportConfig};
use crate::host::{ScrollWindow, Sizer};

#[derive(Debug)]
pub struct Viewport<W, S> {
    window: W,
    sizer: S,
    config: ViewportConfig,
    callbacks: ViewportCallbacks,
    zoom: f64,
    fitting_type: FittingType,
    document: Option<DocumentDimensions>,
    reported_size: Option<Size>,
}

/// Decides which scrollbars a zoomed document of `document` size needs in
/// `available` space.
///
/// The vertical bar is decided first and narrows the width available to the
/// horizontal test; a horizontal bar can then still induce the vertical one.
/// A document exactly as large as the available space needs no scrollbar.
pub fn scrollbars_needed(document: Size, available: Size, scrollbar_width: f64) -> ScrollbarNeeds {
    let vertical_alone = document.height > available.height;
    let available_width =
        if vertical_alone { available.width - scrollbar_width } else { available.width };

    let horizontal = document.width > available_width;
    let vertical =
        vertical_alone || (horizontal && document.height > available.height - scrollbar_width);

    ScrollbarNeeds { horizontal, vertical }
}

fn fitting_zoom_for(fit_width: bool, fit_height: bool, window: Size, page: Size) -> Option<f64> {
    let zoom = match (fit_width, fit_height) {
        (true, false) => window.width / page.width,
        (false, true) => window.height / page.height,
        _ => (window.width / page.width).min(window.height / page.height),
    };

    (zoom.is_finite() && zoom > 0.0).then_some(zoom)
}

/// Index of the page whose vertical extent contains `y`, clamped to the
/// first and last page. `pages` must not be empty.
fn page_at_y(pages: &[Rect], y: f64) -> usize {
    pages.partition_point(|page| page.bottom() <= y).min(pages.len() - 1)
}

impl<W: ScrollWindow, S: Sizer> Viewport<W, S> {
    pub fn new(
        window: W,
        sizer: S,
        config: ViewportConfig,
        callbacks: ViewportCallbacks,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            window,
            sizer,
            zoom: config.default_zoom,
            config,
            callbacks,
            fitting_type: FittingType::None,
            document: None,
            reported_size: None,
        })
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    /// Mutable access for hosts that scroll or resize the window directly.
    /// Call [`handle_scroll`](Self::handle_scroll) or
    /// [`handle_resize`](Self::handle_resize) afterwards.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn sizer(&self) -> &S {
        &self.sizer
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn fitting_type(&self) -> FittingType {
        self.fitting_type
    }

    pub fn document_dimensions(&self) -> Option<&DocumentDimensions> {
        self.document.as_ref()
    }

    pub fn scrollbar_width(&self) -> f64 {
        self.config.scrollbar_width
    }

    /// Fit-to-page and fit-to-height scroll page by page.
    pub fn is_paged_mode(&self) -> bool {
        matches!(self.fitting_type, FittingType::FitToPage | FittingType::FitToHeight)
    }

    /// Scroll offset in screen pixels, with the toolbar removed from `y`.
    pub fn position(&self) -> Point {
        let offset = self.window.scroll_offset();
        Point::new(offset.x, offset.y - self.config.top_toolbar_height)
    }

    /// Scroll offset in unzoomed document units.
    pub fn document_position(&self) -> Point {
        self.position().scale(1.0 / self.zoom)
    }

    pub fn set_position(&mut self, position: Point) {
        self.write_position(position);
        self.viewport_changed();
    }

    /// Visible area in screen pixels, excluding the scrollbars currently shown.
    pub fn size(&self) -> Size {
        let window = self.window.inner_size();
        let scrollbars = self.document_has_scrollbars();
        let bar = self.config.scrollbar_width;

        Size::new(
            window.width - if scrollbars.vertical { bar } else { 0.0 },
            window.height - if scrollbars.horizontal { bar } else { 0.0 },
        )
    }

    pub fn document_needs_scrollbars(&self, zoom: f64) -> ScrollbarNeeds {
        let Some(document) = self.zoomed_document_size(zoom) else {
            return ScrollbarNeeds::NONE;
        };

        let window = self.window.inner_size();
        let available = Size::new(window.width, window.height - self.config.top_toolbar_height);

        scrollbars_needed(document, available, self.config.scrollbar_width)
    }

    pub fn document_has_scrollbars(&self) -> ScrollbarNeeds {
        self.document_needs_scrollbars(self.zoom)
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            zoom: self.zoom,
            position: self.position(),
            fitting_type: self.fitting_type,
            size: self.size(),
            scrollbars: self.document_has_scrollbars(),
            most_visible_page: self.most_visible_page_index(),
        }
    }

    pub fn set_document_dimensions(&mut self, dimensions: DocumentDimensions) {
        tracing::debug!(
            width = dimensions.width(),
            height = dimensions.height(),
            pages = dimensions.page_count(),
            "document dimensions changed"
        );

        self.might_zoom(|viewport| {
            let initial = viewport.document.is_none();
            viewport.document = Some(dimensions);

            if initial {
                let default_zoom = viewport.config.default_zoom;
                let zoom =
                    viewport.fit_width_zoom().map_or(default_zoom, |fit| fit.min(default_zoom));
                viewport.set_zoom_internal(zoom);
                viewport.write_position(Point::new(0.0, -viewport.config.top_toolbar_height));
            }

            viewport.content_size_changed();
            viewport.refit();
        });
    }

    /// Sets an explicit zoom, leaving any fitting mode. The value is clamped
    /// to the configured preset range.
    pub fn set_zoom(&mut self, zoom: f64) {
        debug_assert!(zoom > 0.0, "zoom must be positive, got {zoom}");

        let zoom = self.config.clamp_zoom(zoom);
        self.fitting_type = FittingType::None;
        self.might_zoom(|viewport| viewport.set_zoom_internal(zoom));
    }

    pub fn zoom_in(&mut self) {
        let current = self.zoom;
        let next = self
            .config
            .zoom_factors
            .iter()
            .copied()
            .find(|factor| *factor > current)
            .unwrap_or_else(|| self.config.max_zoom());

        self.fitting_type = FittingType::None;
        self.might_zoom(|viewport| viewport.set_zoom_internal(next));
    }

    pub fn zoom_out(&mut self) {
        let current = self.zoom;
        let next = self
            .config
            .zoom_factors
            .iter()
            .copied()
            .rev()
            .find(|factor| *factor < current)
            .unwrap_or_else(|| self.config.min_zoom());

        self.fitting_type = FittingType::None;
        self.might_zoom(|viewport| viewport.set_zoom_internal(next));
    }

    pub fn set_fitting_type(&mut self, fitting_type: FittingType) {
        match fitting_type {
            FittingType::None => self.fit_to_none(),
            FittingType::FitToWidth => self.fit_to_width(),
            FittingType::FitToHeight => self.fit_to_height(),
            FittingType::FitToPage => self.fit_to_page(),
        }
    }

    /// Zooms so the widest page spans the window, keeping the scrolled-to
    /// document row in view.
    pub fn fit_to_width(&mut self) {
        self.might_zoom(Self::fit_to_width_internal);
    }

    /// Zooms so the most visible page fits in the window and scrolls to its top.
    pub fn fit_to_page(&mut self) {
        self.might_zoom(|viewport| viewport.fit_to_page_internal(true));
    }

    /// Zooms so the height of the most visible page fills the window and
    /// scrolls to its top.
    pub fn fit_to_height(&mut self) {
        self.might_zoom(|viewport| viewport.fit_to_height_internal(true));
    }

    /// Returns to the default zoom, shrunk if needed to avoid a horizontal
    /// scrollbar.
    pub fn fit_to_none(&mut self) {
        self.might_zoom(|viewport| {
            viewport.fitting_type = FittingType::None;
            if viewport.document.is_none() {
                return;
            }

            let default_zoom = viewport.config.default_zoom;
            let zoom = viewport.fit_width_zoom().map_or(default_zoom, |fit| fit.min(default_zoom));
            viewport.set_zoom_internal(zoom);
        });
    }

    /// Reacts to a change of the window size. Fitting modes are re-applied
    /// without jumping back to the top of the page.
    pub fn handle_resize(&mut self) {
        tracing::debug!(size = ?self.window.inner_size(), fitting = ?self.fitting_type, "resize");

        match self.fitting_type {
            FittingType::None => self.viewport_changed(),
            _ => self.might_zoom(Self::refit),
        }
    }

    /// Reacts to the host window having been scrolled.
    pub fn handle_scroll(&mut self) {
        self.viewport_changed();
    }

    /// Scrolls to the given screen position; a `None` coordinate is kept.
    pub fn scroll_to(&mut self, x: Option<f64>, y: Option<f64>) {
        let current = self.position();
        let target = Point::new(x.unwrap_or(current.x), y.unwrap_or(current.y));

        if target != current {
            self.set_position(target);
        }
    }

    pub fn scroll_by(&mut self, delta: Point) {
        let current = self.position();
        self.scroll_to(Some(current.x + delta.x), Some(current.y + delta.y));
    }

    /// Index of the page taking up most of the view. The topmost visible page
    /// counts while more than half of its height is on screen; otherwise the
    /// page below it takes over. Returns 0 when there are no pages.
    pub fn most_visible_page(&self) -> usize {
        self.most_visible_page_index().unwrap_or(0)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.go_to_page_and_xy(page, Some(0.0), Some(0.0));
    }

    /// Scrolls to a point inside `page`, in unzoomed page coordinates. A
    /// missing coordinate keeps the current in-page offset. Out-of-range page
    /// indices are clamped to the last page.
    pub fn go_to_page_and_xy(&mut self, page: usize, x: Option<f64>, y: Option<f64>) {
        let Some(target) = self.document.as_ref().and_then(|document| {
            let last = document.page_count().checked_sub(1)?;
            document.page(page.min(last)).copied()
        }) else {
            return;
        };

        let current = self.current_page_coordinates();
        let x = x.filter(|value| !value.is_nan()).unwrap_or(current.x);
        let y = y.filter(|value| !value.is_nan()).unwrap_or(current.y);

        // Outside paged mode the page top is placed just below the toolbar.
        let toolbar_offset =
            if self.is_paged_mode() { 0.0 } else { self.config.top_toolbar_height };

        self.write_position(Point::new(
            (target.x + x) * self.zoom,
            (target.y + y) * self.zoom - toolbar_offset,
        ));
        self.viewport_changed();
    }

    pub fn go_to_next_page(&mut self) {
        self.go_to_page(self.most_visible_page() + 1);
    }

    pub fn go_to_previous_page(&mut self) {
        self.go_to_page(self.most_visible_page().saturating_sub(1));
    }

    /// Page bounds without the drop shadow, in unzoomed document units.
    pub fn page_inset_dimensions(&self, page: usize) -> Option<Rect> {
        let document = self.document.as_ref()?;
        document.page(page).map(|rect| rect.inset(PAGE_SHADOW))
    }

    /// Page content (shadow excluded) relative to the top-left of the
    /// visible area, in screen pixels. Pages narrower than the document are
    /// centered within it, and a document narrower than the view is centered
    /// in the view.
    pub fn page_screen_rect(&self, page: usize) -> Rect {
        let Some(document) = self.document.as_ref() else {
            return Rect::ZERO;
        };
        let Some(last) = document.page_count().checked_sub(1) else {
            return Rect::ZERO;
        };

        let page = document.pages()[page.min(last)];
        let inset = page.inset(PAGE_SHADOW);
        let zoom = self.zoom;

        let x = (document.width() - page.width) / 2.0 + PAGE_SHADOW.left;
        let space_on_left = ((self.size().width - document.width() * zoom) / 2.0).max(0.0);
        let position = self.position();

        Rect::new(
            x * zoom + space_on_left - position.x,
            inset.y * zoom - position.y,
            inset.width * zoom,
            inset.height * zoom,
        )
    }

    /// Whether a point in screen pixels, relative to the visible area, lies
    /// over the horizontal extent of the page under it.
    pub fn is_point_inside_page(&self, point: Point) -> bool {
        let Some(document) = self.document.as_ref() else {
            return false;
        };
        if !document.has_pages() {
            return false;
        }

        let zoom = self.zoom;
        let position = self.position();
        let page = &document.pages()[page_at_y(document.pages(), (position.y + point.y) / zoom)];

        let page_width = page.width * zoom;
        let outer_width = self.size().width.max(document.width() * zoom);
        if page_width >= outer_width {
            return true;
        }

        let x = point.x + position.x;
        let min_x = (outer_width - page_width) / 2.0;
        let max_x = outer_width - min_x;

        x >= min_x && x <= max_x
    }

    fn might_zoom(&mut self, change: impl FnOnce(&mut Self)) {
        let before = self.snapshot();
        self.callbacks.notify_before_zoom(&before);

        change(self);

        let after = self.snapshot();
        self.callbacks.notify_after_zoom(&after);
        self.publish(after);
    }

    fn viewport_changed(&mut self) {
        let snapshot = self.snapshot();
        self.publish(snapshot);
    }

    fn publish(&mut self, snapshot: ViewportSnapshot) {
        self.callbacks.notify_viewport_changed(&snapshot);

        if self.reported_size != Some(snapshot.size) {
            self.reported_size = Some(snapshot.size);
            self.callbacks.notify_content_resized(snapshot.size);
        }
    }

    fn write_position(&mut self, position: Point) {
        tracing::trace!(x = position.x, y = position.y, "scroll");
        self.window.scroll_to(position.x, position.y + self.config.top_toolbar_height);
    }

    /// Zooms while keeping the document point at the top-left of the view
    /// fixed. Without a document only the zoom value changes.
    fn set_zoom_internal(&mut self, zoom: f64) {
        tracing::debug!(from = self.zoom, to = zoom, "zoom");

        let anchor = self.document_position();
        self.zoom = zoom;

        if self.document.is_none() {
            return;
        }

        self.content_size_changed();
        self.write_position(anchor.scale(zoom));
    }

    fn content_size_changed(&mut self) {
        if let Some(size) = self.zoomed_document_size(self.zoom) {
            self.sizer.resize(size.width, size.height + self.config.top_toolbar_height);
        }
    }

    /// Zoomed document size rounded to whole pixels.
    fn zoomed_document_size(&self, zoom: f64) -> Option<Size> {
        let document = self.document.as_ref()?;
        Some(Size::new((document.width() * zoom).round(), (document.height() * zoom).round()))
    }

    fn refit(&mut self) {
        match self.fitting_type {
            FittingType::None => {}
            FittingType::FitToWidth => self.fit_to_width_internal(),
            FittingType::FitToHeight => self.fit_to_height_internal(false),
            FittingType::FitToPage => self.fit_to_page_internal(false),
        }
    }

    fn fit_to_width_internal(&mut self) {
        self.fitting_type = FittingType::FitToWidth;

        let Some(zoom) = self.fit_width_zoom() else {
            return;
        };
        self.set_zoom_internal(zoom);

        let y = self.position().y;
        self.write_position(Point::new(0.0, y));
    }

    fn fit_to_page_internal(&mut self, scroll_to_top_of_page: bool) {
        self.fitting_type = FittingType::FitToPage;

        let Some(document_width) = self.document.as_ref().map(DocumentDimensions::width) else {
            return;
        };
        let Some(page) = self.current_page_rect() else {
            return;
        };

        let target = Size::new(document_width, page.height);
        if let Some(zoom) = self.compute_fitting_zoom(target, true, true) {
            self.set_zoom_internal(zoom);
        }

        if scroll_to_top_of_page {
            self.write_position(Point::new(0.0, page.y * self.zoom));
        }
    }

    fn fit_to_height_internal(&mut self, scroll_to_top_of_page: bool) {
        self.fitting_type = FittingType::FitToHeight;

        let Some(page) = self.current_page_rect() else {
            return;
        };

        let target = Size::new(0.0, page.height);
        if let Some(zoom) = self.compute_fitting_zoom(target, false, true) {
            self.set_zoom_internal(zoom);
        }

        if scroll_to_top_of_page {
            self.write_position(Point::new(0.0, page.y * self.zoom));
        }
    }

    fn fit_width_zoom(&self) -> Option<f64> {
        let document = self.document.as_ref()?.size();
        self.compute_fitting_zoom(document, true, false)
    }

    /// Zoom that fits `page` into the window, shrinking the available area by
    /// the scrollbars that zoom would bring in. `None` for degenerate pages.
    fn compute_fitting_zoom(&self, page: Size, fit_width: bool, fit_height: bool) -> Option<f64> {
        let window = self.window.inner_size();
        let zoom = fitting_zoom_for(fit_width, fit_height, window, page)?;

        let mut needs = self.document_needs_scrollbars(zoom);
        if !needs.horizontal && !needs.vertical {
            return Some(zoom);
        }

        let zoomed = self.zoomed_document_size(zoom)?;
        let bar = self.config.scrollbar_width;

        // One scrollbar may push the document into needing the other one.
        if needs.horizontal && zoomed.height > window.height - bar {
            needs.vertical = true;
        }
        if needs.vertical && zoomed.width > window.width - bar {
            needs.horizontal = true;
        }

        let mut available = window;
        if needs.horizontal {
            available.height -= bar;
        }
        if needs.vertical {
            available.width -= bar;
        }

        fitting_zoom_for(fit_width, fit_height, available, page)
    }

    /// Visible area in unzoomed document units.
    fn document_viewport_rect(&self) -> Rect {
        let position = self.document_position();
        let size = self.size().scale(1.0 / self.zoom);

        Rect::new(position.x, position.y, size.width, size.height)
    }

    fn most_visible_page_index(&self) -> Option<usize> {
        let pages = self.document.as_ref()?.pages();
        if pages.is_empty() {
            return None;
        }

        let view = self.document_viewport_rect();
        let first = page_at_y(pages, view.y);
        let Some(next) = pages.get(first + 1) else {
            return Some(first);
        };

        let visible_fraction = |page: &Rect| {
            if page.height > 0.0 {
                page.intersection_height(&view) / page.height
            } else {
                0.0
            }
        };

        let first_visible = visible_fraction(&pages[first]);
        let next_visible = visible_fraction(next);

        if first_visible > 0.5 || next_visible <= 0.0 {
            Some(first)
        } else {
            Some(first + 1)
        }
    }

    /// The most visible page, or the whole document when it has no pages.
    fn current_page_rect(&self) -> Option<Rect> {
        let document = self.document.as_ref()?;

        match self.most_visible_page_index() {
            Some(index) => document.page(index).copied(),
            None => Some(Rect::new(0.0, 0.0, document.width(), document.height())),
        }
    }

    /// Current scroll position relative to the origin of the most visible page.
    fn current_page_coordinates(&self) -> Point {
        let position = self.document_position();
        let origin = self.current_page_rect().map_or(Point::ORIGIN, |page| page.origin());

        Point::new(position.x - origin.x, position.y - origin.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: f64, height: f64) -> Size {
        Size::new(width, height)
    }

    #[test]
    fn equal_sizes_need_no_scrollbars() {
        let needs = scrollbars_needed(size(100.0, 100.0), size(100.0, 100.0), 10.0);
        assert_eq!(needs, ScrollbarNeeds::NONE);
    }

    #[test]
    fn vertical_scrollbar_can_induce_horizontal() {
        let needs = scrollbars_needed(size(95.0, 150.0), size(100.0, 100.0), 10.0);
        assert_eq!(needs, ScrollbarNeeds { horizontal: true, vertical: true });

        let needs = scrollbars_needed(size(90.0, 150.0), size(100.0, 100.0), 10.0);
        assert_eq!(needs, ScrollbarNeeds { horizontal: false, vertical: true });
    }

    #[test]
    fn horizontal_scrollbar_can_induce_vertical() {
        let needs = scrollbars_needed(size(150.0, 95.0), size(100.0, 100.0), 10.0);
        assert_eq!(needs, ScrollbarNeeds { horizontal: true, vertical: true });

        let needs = scrollbars_needed(size(150.0, 90.0), size(100.0, 100.0), 10.0);
        assert_eq!(needs, ScrollbarNeeds { horizontal: true, vertical: false });
    }

    #[test]
    fn page_lookup_is_bottom_exclusive_and_clamped() {
        let pages = DocumentDimensions::from_pages([(100.0, 100.0), (100.0, 200.0)]);
        let pages = pages.pages();

        assert_eq!(page_at_y(pages, -5.0), 0);
        assert_eq!(page_at_y(pages, 99.5), 0);
        assert_eq!(page_at_y(pages, 100.0), 1);
        assert_eq!(page_at_y(pages, 1000.0), 1);
    }

    #[test]
    fn fitting_zoom_rejects_degenerate_pages() {
        assert_eq!(fitting_zoom_for(true, false, size(100.0, 100.0), size(0.0, 10.0)), None);
        assert_eq!(fitting_zoom_for(true, true, size(100.0, 100.0), size(50.0, 0.0)), Some(2.0));
        assert_eq!(fitting_zoom_for(false, true, size(100.0, 0.0), size(50.0, 50.0)), None);
    }
}
