//! Configuration surface exposed to hosts.
//!
//! Field names are camelCase on the wire so a host can ship the same JSON
//! config it shows in its own settings UI.

use serde::{Deserialize, Serialize};

use crate::outline::DEFAULT_MAX_OUTLINE_DEPTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MindmapConfig {
    /// Diagram pixel size.
    pub diagram_width: f64,
    pub diagram_height: f64,
    /// Maximum label width in pixels before wrapping.
    pub wrap_width: f64,
    /// Zoom scale clamp.
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Root marker accent color (`#rrggbb`), user-adjustable.
    pub root_color: String,
    /// Depth color ramp endpoints; depth 1 starts near `rampDark` and
    /// lightens toward `rampLight`.
    pub ramp_dark: String,
    pub ramp_light: String,
    /// Depths at or beyond this render at `rampLight`.
    pub ramp_span: usize,
    pub font_size: f64,
    pub marker_radius: f64,
    /// Horizontal gap between a marker and its label.
    pub label_offset: f64,
    /// Nesting guard applied while validating incoming outlines.
    pub max_outline_depth: usize,
}

impl Default for MindmapConfig {
    fn default() -> Self {
        Self {
            diagram_width: 800.0,
            diagram_height: 800.0,
            wrap_width: 100.0,
            min_zoom: 0.5,
            max_zoom: 2.0,
            root_color: "#1f77b4".to_string(),
            ramp_dark: "#08306b".to_string(),
            ramp_light: "#f7fbff".to_string(),
            ramp_span: 5,
            font_size: 12.0,
            marker_radius: 10.0,
            label_offset: 12.0,
            max_outline_depth: DEFAULT_MAX_OUTLINE_DEPTH,
        }
    }
}

impl MindmapConfig {
    /// Radius of the outermost ring: the deepest visible node lands here.
    pub fn canvas_radius(&self) -> f64 {
        (self.diagram_width.min(self.diagram_height) / 2.0).max(0.0)
    }

    /// Diagram center in screen coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.diagram_width / 2.0, self.diagram_height / 2.0)
    }
}
