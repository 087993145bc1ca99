//! Keyboard navigation on top of [`Viewport`].

use doc_model::Point;
use serde::{Deserialize, Serialize};

use crate::host::{ScrollWindow, Sizer};
use crate::viewport::Viewport;

/// Pixels scrolled by a single arrow key press.
pub const SCROLL_INCREMENT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKey {
    PageUp,
    PageDown,
    Space {
        #[serde(default)]
        shift: bool,
    },
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

impl<W: ScrollWindow, S: Sizer> Viewport<W, S> {
    /// Applies a navigation key. Returns whether the view moved.
    pub fn handle_navigation(&mut self, key: NavigationKey) -> bool {
        let before = self.position();

        match key {
            NavigationKey::PageUp | NavigationKey::Space { shift: true } => {
                self.page_step(Direction::Backward)
            }
            NavigationKey::PageDown | NavigationKey::Space { shift: false } => {
                self.page_step(Direction::Forward)
            }
            NavigationKey::ArrowLeft => self.horizontal_step(Direction::Backward),
            NavigationKey::ArrowRight => self.horizontal_step(Direction::Forward),
            NavigationKey::ArrowUp => self.scroll_by(Point::new(0.0, -SCROLL_INCREMENT)),
            NavigationKey::ArrowDown => self.scroll_by(Point::new(0.0, SCROLL_INCREMENT)),
        }

        let moved = self.position() != before;
        tracing::trace!(?key, moved, "navigation key");
        moved
    }

    fn page_step(&mut self, direction: Direction) {
        if self.is_paged_mode() {
            self.turn_page(direction);
            return;
        }

        let height = self.size().height;
        let delta = match direction {
            Direction::Backward => -height,
            Direction::Forward => height,
        };
        self.scroll_by(Point::new(0.0, delta));
    }

    fn horizontal_step(&mut self, direction: Direction) {
        if !self.document_has_scrollbars().horizontal {
            self.turn_page(direction);
            return;
        }

        let delta = match direction {
            Direction::Backward => -SCROLL_INCREMENT,
            Direction::Forward => SCROLL_INCREMENT,
        };
        self.scroll_by(Point::new(delta, 0.0));
    }

    fn turn_page(&mut self, direction: Direction) {
        match direction {
            Direction::Backward => self.go_to_previous_page(),
            Direction::Forward => self.go_to_next_page(),
        }
    }
}
