//! Construction parameters for a [`Viewport`](crate::Viewport).

use serde::{Deserialize, Serialize};

/// Preset zoom steps used by zoom in/out; the first and last entries bound
/// every zoom the viewport accepts.
pub const DEFAULT_ZOOM_FACTORS: [f64; 16] =
    [0.25, 0.333, 0.5, 0.666, 0.75, 0.9, 1.0, 1.1, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0, 4.0, 5.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Thickness of both scrollbars in screen pixels.
    pub scrollbar_width: f64,
    /// Zoom applied before the first document layout arrives.
    pub default_zoom: f64,
    /// Height of the toolbar overlaying the top of the window, in pixels.
    pub top_toolbar_height: f64,
    /// Ascending preset zoom factors.
    pub zoom_factors: Vec<f64>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            scrollbar_width: 0.0,
            default_zoom: 1.0,
            top_toolbar_height: 0.0,
            zoom_factors: DEFAULT_ZOOM_FACTORS.to_vec(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("scrollbar width must be a finite, non-negative number (got {0})")]
    InvalidScrollbarWidth(f64),
    #[error("toolbar height must be a finite, non-negative number (got {0})")]
    InvalidToolbarHeight(f64),
    #[error("default zoom must be a finite, positive number (got {0})")]
    InvalidDefaultZoom(f64),
    #[error("at least one zoom factor is required")]
    NoZoomFactors,
    #[error("zoom factors must be positive and strictly ascending (offending value {0})")]
    InvalidZoomFactors(f64),
}

impl ViewportConfig {
    pub fn with_scrollbar_width(mut self, width: f64) -> Self {
        self.scrollbar_width = width;
        self
    }

    pub fn with_default_zoom(mut self, zoom: f64) -> Self {
        self.default_zoom = zoom;
        self
    }

    pub fn with_top_toolbar_height(mut self, height: f64) -> Self {
        self.top_toolbar_height = height;
        self
    }

    pub fn with_zoom_factors(mut self, factors: Vec<f64>) -> Self {
        self.zoom_factors = factors;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_non_negative(self.scrollbar_width) {
            return Err(ConfigError::InvalidScrollbarWidth(self.scrollbar_width));
        }

        if !is_non_negative(self.top_toolbar_height) {
            return Err(ConfigError::InvalidToolbarHeight(self.top_toolbar_height));
        }

        if !(self.default_zoom.is_finite() && self.default_zoom > 0.0) {
            return Err(ConfigError::InvalidDefaultZoom(self.default_zoom));
        }

        if self.zoom_factors.is_empty() {
            return Err(ConfigError::NoZoomFactors);
        }

        let mut previous = 0.0;
        for &factor in &self.zoom_factors {
            if !factor.is_finite() || factor <= previous {
                return Err(ConfigError::InvalidZoomFactors(factor));
            }
            previous = factor;
        }

        Ok(())
    }

    pub fn min_zoom(&self) -> f64 {
        self.zoom_factors.first().copied().unwrap_or(self.default_zoom)
    }

    pub fn max_zoom(&self) -> f64 {
        self.zoom_factors.last().copied().unwrap_or(self.default_zoom)
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom(), self.max_zoom())
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ViewportConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.min_zoom(), 0.25);
        assert_eq!(config.max_zoom(), 5.0);
    }

    #[test]
    fn zoom_is_clamped_to_preset_range() {
        let config = ViewportConfig::default();
        assert_eq!(config.clamp_zoom(0.1), 0.25);
        assert_eq!(config.clamp_zoom(9.0), 5.0);
        assert_eq!(config.clamp_zoom(1.3), 1.3);
    }

    #[test]
    fn rejects_bad_values() {
        let config = ViewportConfig::default().with_zoom_factors(vec![1.0, 0.5]);
        assert_eq!(config.validate(), Err(ConfigError::InvalidZoomFactors(0.5)));

        let config = ViewportConfig::default().with_zoom_factors(Vec::new());
        assert_eq!(config.validate(), Err(ConfigError::NoZoomFactors));

        let config = ViewportConfig::default().with_default_zoom(0.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidDefaultZoom(0.0)));

        let config = ViewportConfig::default().with_scrollbar_width(-1.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidScrollbarWidth(-1.0)));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ViewportConfig =
            serde_json::from_str(r#"{"scrollbar_width": 16}"#).expect("config should parse");

        assert_eq!(config.scrollbar_width, 16.0);
        assert_eq!(config.default_zoom, 1.0);
        assert_eq!(config.zoom_factors, DEFAULT_ZOOM_FACTORS.to_vec());
    }
}
