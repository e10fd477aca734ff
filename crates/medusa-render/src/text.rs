//! Text measurement. Wrapping lives in [`wrap`]; it only ever talks to the
//! [`TextMeasurer`] trait so the algorithm is testable without any rendering
//! surface.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

pub mod wrap;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 12.0,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Width/height oracle for a single line of text. Actual font metrics are a
/// rendering-surface concern; hosts with a real canvas can plug their own.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Estimates metrics from Unicode column widths. Deterministic across
/// platforms, which keeps layout and wrapping reproducible in tests and on
/// servers with no font stack at all.
#[derive(Debug, Clone)]
pub struct DeterministicTextMeasurer {
    /// Advance of one ASCII column as a fraction of the font size.
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            line_height_factor: 1.1,
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let font_size = style.font_size.max(1.0);
        let columns = UnicodeWidthStr::width(text);
        TextMetrics {
            width: columns as f64 * font_size * self.char_width_factor,
            height: font_size * self.line_height_factor,
        }
    }
}
