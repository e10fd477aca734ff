//! Viewport transform and pointer overlay state.
//!
//! Zoom/pan is a single affine transform applied to the whole drawing; it
//! never re-runs layout. Coordinates here are relative to the diagram
//! center (the host subtracts the canvas center before calling in).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    scale: f64,
    translate: (f64, f64),
    min_scale: f64,
    max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.5, 2.0)
    }
}

impl Viewport {
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        let lo = min_scale.min(max_scale).max(f64::MIN_POSITIVE);
        let hi = min_scale.max(max_scale);
        Self {
            scale: 1.0f64.clamp(lo, hi),
            translate: (0.0, 0.0),
            min_scale: lo,
            max_scale: hi,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> (f64, f64) {
        self.translate
    }

    pub fn scale_bounds(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translate.0 += dx;
        self.translate.1 += dy;
    }

    /// Scales by `factor` keeping the diagram point under `origin` fixed on
    /// screen. The resulting scale is clamped; at the clamp boundary the
    /// translation is left untouched.
    pub fn zoom_by(&mut self, factor: f64, origin: (f64, f64)) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let next = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if next == self.scale {
            return;
        }
        let k = next / self.scale;
        self.translate = (
            origin.0 - k * (origin.0 - self.translate.0),
            origin.1 - k * (origin.1 - self.translate.1),
        );
        self.scale = next;
    }

    pub fn reset(&mut self) {
        self.scale = 1.0f64.clamp(self.min_scale, self.max_scale);
        self.translate = (0.0, 0.0);
    }

    /// Screen (center-relative) → diagram coordinates.
    pub fn to_diagram(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.translate.0) / self.scale,
            (y - self.translate.1) / self.scale,
        )
    }

    /// Diagram → screen (center-relative) coordinates.
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.translate.0,
            y * self.scale + self.translate.1,
        )
    }
}

/// Hover overlay; positioned at the pointer, not the node, so it stays
/// under the cursor while the diagram pans underneath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Offset between the pointer and the tooltip corner, in pixels.
pub const TOOLTIP_OFFSET: f64 = 10.0;

impl Tooltip {
    pub fn at_pointer(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x: x + TOOLTIP_OFFSET,
            y: y + TOOLTIP_OFFSET,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_stays_clamped_through_gesture_sequences() {
        let mut vp = Viewport::new(0.5, 2.0);
        for _ in 0..20 {
            vp.zoom_by(1.7, (13.0, -4.0));
        }
        assert_eq!(vp.scale(), 2.0);
        for _ in 0..40 {
            vp.zoom_by(0.3, (-100.0, 250.0));
            vp.pan_by(5.0, -3.0);
        }
        assert_eq!(vp.scale(), 0.5);
        vp.set_scale(10.0);
        assert_eq!(vp.scale(), 2.0);
    }

    #[test]
    fn zoom_keeps_the_anchor_point_fixed() {
        let mut vp = Viewport::new(0.5, 2.0);
        let anchor = (40.0, -25.0);
        let before = vp.to_diagram(anchor.0, anchor.1);
        vp.zoom_by(1.5, anchor);
        let after = vp.to_diagram(anchor.0, anchor.1);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn round_trips_between_spaces() {
        let mut vp = Viewport::new(0.5, 2.0);
        vp.zoom_by(1.25, (10.0, 10.0));
        vp.pan_by(-7.0, 3.5);
        let (sx, sy) = vp.to_screen(12.0, -8.0);
        let (dx, dy) = vp.to_diagram(sx, sy);
        assert!((dx - 12.0).abs() < 1e-9);
        assert!((dy + 8.0).abs() < 1e-9);
    }
}
