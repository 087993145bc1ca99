use proptest::prelude::*;
use viewer_core::{
    scrollbars_needed, DocumentDimensions, InMemorySizer, InMemoryWindow, ScrollWindow, Size,
    Viewport, ViewportCallbacks, ViewportConfig,
};

fn dimension() -> impl Strategy<Value = f64> {
    1.0..2000.0f64
}

proptest! {
    #[test]
    fn larger_documents_never_drop_a_scrollbar(
        width in dimension(),
        height in dimension(),
        grow_width in 0.0..500.0f64,
        grow_height in 0.0..500.0f64,
        window_width in dimension(),
        window_height in dimension(),
        scrollbar in 0.0..30.0f64,
    ) {
        let window = Size::new(window_width, window_height);
        let small = scrollbars_needed(Size::new(width, height), window, scrollbar);
        let large = scrollbars_needed(
            Size::new(width + grow_width, height + grow_height),
            window,
            scrollbar,
        );

        prop_assert!(!small.horizontal || large.horizontal);
        prop_assert!(!small.vertical || large.vertical);
    }

    #[test]
    fn document_matching_window_needs_no_scrollbars(
        width in dimension(),
        height in dimension(),
        scrollbar in 0.0..30.0f64,
    ) {
        let size = Size::new(width, height);
        let needs = scrollbars_needed(size, size, scrollbar);

        prop_assert!(!needs.horizontal);
        prop_assert!(!needs.vertical);
    }

    #[test]
    fn zoom_round_trip_restores_document_position(
        first in 0.25..5.0f64,
        second in 0.25..5.0f64,
        scroll_y in 0.0..1000.0f64,
    ) {
        let mut viewport = Viewport::new(
            InMemoryWindow::new(200.0, 200.0),
            InMemorySizer::new(),
            ViewportConfig::default(),
            ViewportCallbacks::new(),
        )
        .expect("default config should be valid");
        viewport.set_document_dimensions(DocumentDimensions::from_pages([(400.0, 2000.0)]));

        viewport.set_zoom(first);
        viewport.window_mut().scroll_to(0.0, scroll_y);
        viewport.handle_scroll();
        let anchor = viewport.document_position();

        viewport.set_zoom(second);
        viewport.set_zoom(first);

        prop_assert!((viewport.zoom() - first).abs() < 1e-12);
        prop_assert!((viewport.document_position().y - anchor.y).abs() < 1e-6);
        prop_assert!((viewport.document_position().x - anchor.x).abs() < 1e-6);
    }
}
