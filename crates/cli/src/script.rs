//! Scripted viewport sessions replayed by `viewport-cli simulate`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use viewer_core::{
    DocumentDimensions, FittingType, InMemorySizer, InMemoryWindow, NavigationKey, Point,
    ScrollWindow, Viewport, ViewportMessage, ViewportSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub window: Extent,
    /// Size of a document without discrete pages; ignored when `pages` is set.
    #[serde(default)]
    pub document: Option<Extent>,
    #[serde(default)]
    pub pages: Vec<Extent>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    SetZoom { zoom: f64 },
    ZoomIn,
    ZoomOut,
    FitToWidth,
    FitToPage,
    FitToHeight,
    FitToNone,
    SetFittingType { fitting_type: FittingType },
    ScrollTo {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
    ScrollBy {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    /// Scrolls the window directly, as a user dragging the scrollbar would.
    ScrollWindow { x: f64, y: f64 },
    GoToPage {
        page: usize,
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
    NextPage,
    PreviousPage,
    Resize { width: f64, height: f64 },
    Key { key: NavigationKey },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetZoom { .. } => "set_zoom",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::FitToWidth => "fit_to_width",
            Self::FitToPage => "fit_to_page",
            Self::FitToHeight => "fit_to_height",
            Self::FitToNone => "fit_to_none",
            Self::SetFittingType { .. } => "set_fitting_type",
            Self::ScrollTo { .. } => "scroll_to",
            Self::ScrollBy { .. } => "scroll_by",
            Self::ScrollWindow { .. } => "scroll_window",
            Self::GoToPage { .. } => "go_to_page",
            Self::NextPage => "next_page",
            Self::PreviousPage => "previous_page",
            Self::Resize { .. } => "resize",
            Self::Key { .. } => "key",
        }
    }

    /// Applies the step. Values the viewport cannot take are rejected
    /// before it sees them.
    pub fn apply(&self, viewport: &mut Viewport<InMemoryWindow, InMemorySizer>) -> Result<()> {
        match *self {
            Self::SetZoom { zoom } => {
                if !(zoom.is_finite() && zoom > 0.0) {
                    anyhow::bail!("zoom must be a positive number, got {zoom}");
                }
                viewport.set_zoom(zoom);
            }
            Self::ZoomIn => viewport.zoom_in(),
            Self::ZoomOut => viewport.zoom_out(),
            Self::FitToWidth => viewport.fit_to_width(),
            Self::FitToPage => viewport.fit_to_page(),
            Self::FitToHeight => viewport.fit_to_height(),
            Self::FitToNone => viewport.fit_to_none(),
            Self::SetFittingType { fitting_type } => viewport.set_fitting_type(fitting_type),
            Self::ScrollTo { x, y } => viewport.scroll_to(x, y),
            Self::ScrollBy { x, y } => viewport.scroll_by(Point::new(x, y)),
            Self::ScrollWindow { x, y } => {
                viewport.window_mut().scroll_to(x, y);
                viewport.handle_scroll();
            }
            Self::GoToPage { page, x, y } => match (x, y) {
                (None, None) => viewport.go_to_page(page),
                _ => viewport.go_to_page_and_xy(page, x, y),
            },
            Self::NextPage => viewport.go_to_next_page(),
            Self::PreviousPage => viewport.go_to_previous_page(),
            Self::Resize { width, height } => {
                viewport.window_mut().set_size(width, height);
                viewport.handle_resize();
            }
            Self::Key { key } => {
                viewport.handle_navigation(key);
            }
        }

        Ok(())
    }
}

impl Script {
    pub fn document(&self) -> Option<DocumentDimensions> {
        if !self.pages.is_empty() {
            let pages = self.pages.iter().map(|page| (page.width, page.height));
            return Some(DocumentDimensions::from_pages(pages));
        }

        self.document.map(|extent| DocumentDimensions::new(extent.width, extent.height))
    }
}

/// State reported after one script step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub op: &'static str,
    #[serde(flatten)]
    pub snapshot: ViewportSnapshot,
    pub sizer: SizerReport,
    pub message: Option<ViewportMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizerReport {
    pub width: String,
    pub height: String,
}

impl StepReport {
    pub fn capture(
        step: usize,
        op: &'static str,
        viewport: &Viewport<InMemoryWindow, InMemorySizer>,
    ) -> Self {
        Self {
            step,
            op,
            snapshot: viewport.snapshot(),
            sizer: SizerReport {
                width: viewport.sizer().width().to_owned(),
                height: viewport.sizer().height().to_owned(),
            },
            message: viewport.viewport_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewer_core::{Size, ViewportCallbacks, ViewportConfig};

    #[test]
    fn parses_tagged_steps() {
        let script: Script = serde_json::from_str(
            r#"{
                "window": {"width": 100, "height": 100},
                "pages": [{"width": 100, "height": 100}, {"width": 200, "height": 400}],
                "steps": [
                    {"op": "scroll_window", "x": 0, "y": 100},
                    {"op": "fit_to_page"},
                    {"op": "go_to_page", "page": 1, "y": 20},
                    {"op": "key", "key": "page_down"}
                ]
            }"#,
        )
        .expect("script should parse");

        assert_eq!(script.steps.len(), 4);
        assert_eq!(script.steps[1], Step::FitToPage);
        assert_eq!(script.steps[2], Step::GoToPage { page: 1, x: None, y: Some(20.0) });
        assert_eq!(script.steps[3].name(), "key");
        assert_eq!(script.document().map(|document| document.page_count()), Some(2));
    }

    #[test]
    fn pageless_document_uses_explicit_size() {
        let script: Script = serde_json::from_str(
            r#"{"window": {"width": 10, "height": 10}, "document": {"width": 30, "height": 40}}"#,
        )
        .expect("script should parse");

        let document = script.document().expect("document should be set");
        assert!(!document.has_pages());
        assert_eq!(document.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn non_positive_zoom_is_an_error() {
        let mut viewport = Viewport::new(
            InMemoryWindow::new(100.0, 100.0),
            InMemorySizer::new(),
            ViewportConfig::default(),
            ViewportCallbacks::new(),
        )
        .expect("default config should be valid");

        for zoom in [0.0, -1.5, f64::NAN] {
            let error = Step::SetZoom { zoom }
                .apply(&mut viewport)
                .expect_err("zoom should be rejected");
            assert!(error.to_string().contains("zoom must be a positive number"));
        }
        assert_eq!(viewport.zoom(), 1.0);

        Step::SetZoom { zoom: 2.0 }.apply(&mut viewport).expect("zoom 2 should apply");
        assert_eq!(viewport.zoom(), 2.0);
    }

    #[test]
    fn rejects_unknown_ops() {
        let error = serde_json::from_str::<Step>(r#"{"op": "rotate"}"#)
            .expect_err("unknown op should be rejected");
        assert!(error.to_string().contains("rotate"));
    }
}
