use serde::{Deserialize, Serialize};

use crate::host::{ScrollWindow, Sizer};
use crate::viewport::Viewport;

/// Geometry of the most visible page, posted to an embedding page whenever
/// the view changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "viewport", rename_all = "camelCase")]
pub struct ViewportMessage {
    pub page_x: f64,
    pub page_y: f64,
    pub page_width: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl<W: ScrollWindow, S: Sizer> Viewport<W, S> {
    /// `None` until a document has been laid out.
    pub fn viewport_message(&self) -> Option<ViewportMessage> {
        self.document_dimensions()?;

        let page = self.page_screen_rect(self.most_visible_page());
        let size = self.size();

        Some(ViewportMessage {
            page_x: page.x,
            page_y: page.y,
            page_width: page.width,
            viewport_width: size.width,
            viewport_height: size.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use doc_model::DocumentDimensions;

    use super::*;
    use crate::callbacks::ViewportCallbacks;
    use crate::config::ViewportConfig;
    use crate::host::{InMemorySizer, InMemoryWindow};

    #[test]
    fn describes_the_most_visible_page() {
        let mut viewport = Viewport::new(
            InMemoryWindow::new(100.0, 100.0),
            InMemorySizer::new(),
            ViewportConfig::default(),
            ViewportCallbacks::new(),
        )
        .expect("default config should be valid");
        assert_eq!(viewport.viewport_message(), None);

        viewport.set_document_dimensions(DocumentDimensions::from_pages([(100.0, 100.0)]));

        let message = viewport.viewport_message().expect("document is loaded");
        assert_eq!(
            message,
            ViewportMessage {
                page_x: 5.0,
                page_y: 3.0,
                page_width: 90.0,
                viewport_width: 100.0,
                viewport_height: 100.0,
            }
        );

        let json = serde_json::to_value(message).expect("message should serialize");
        assert_eq!(json["type"], "viewport");
        assert_eq!(json["pageWidth"], 90.0);
        assert_eq!(json["viewportHeight"], 100.0);
    }
}
