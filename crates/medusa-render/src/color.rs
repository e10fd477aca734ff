//! Marker colors: hex parsing and the per-depth ramp.

use medusa_core::MindmapConfig;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb` (case-insensitive).
    pub fn parse_hex(literal: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor {
            literal: literal.to_string(),
        };
        let hex = literal.trim().strip_prefix('#').ok_or_else(invalid)?;
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let mut it = hex.chars();
                let mut next = || -> Result<u8> {
                    let c = it.next().ok_or_else(invalid)?;
                    let v = channel(&c.to_string())?;
                    Ok(v * 17)
                };
                Ok(Self::new(next()?, next()?, next()?))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation per channel; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Perceived luminance in `[0, 255]`, used to keep the ramp monotonic.
    pub fn luminance(self) -> f64 {
        0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64
    }
}

/// Sequential ramp for non-root depths: depth 1 sits one step away from
/// `dark` and later depths lighten toward `light`, clamped at `span`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRamp {
    pub dark: Rgb,
    pub light: Rgb,
    pub span: usize,
}

impl DepthRamp {
    pub fn sample(&self, depth: usize) -> Rgb {
        let span = self.span.max(1);
        let t = depth.min(span) as f64 / span as f64;
        self.dark.lerp(self.light, t)
    }
}

/// Resolved fill colors for the whole diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub root: Rgb,
    pub ramp: DepthRamp,
    pub link_stroke: Rgb,
}

impl Theme {
    pub fn from_config(config: &MindmapConfig) -> Result<Self> {
        Ok(Self {
            root: Rgb::parse_hex(&config.root_color)?,
            ramp: DepthRamp {
                dark: Rgb::parse_hex(&config.ramp_dark)?,
                light: Rgb::parse_hex(&config.ramp_light)?,
                span: config.ramp_span,
            },
            link_stroke: Rgb::new(0xcc, 0xcc, 0xcc),
        })
    }

    /// Root gets the accent; every other depth samples the ramp.
    pub fn fill_for_depth(&self, depth: usize) -> Rgb {
        if depth == 0 {
            self.root
        } else {
            self.ramp.sample(depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_hex_forms() {
        assert_eq!(Rgb::parse_hex("#1f77b4").unwrap(), Rgb::new(31, 119, 180));
        assert_eq!(Rgb::parse_hex("#fff").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::parse_hex("  #08306B ").unwrap(), Rgb::new(8, 48, 107));
    }

    #[test]
    fn rejects_malformed_literals() {
        for bad in ["1f77b4", "#1f77b", "#xyzxyz", "", "#"] {
            assert!(Rgb::parse_hex(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn ramp_lightens_monotonically_with_depth() {
        let ramp = DepthRamp {
            dark: Rgb::parse_hex("#08306b").unwrap(),
            light: Rgb::parse_hex("#f7fbff").unwrap(),
            span: 5,
        };
        let mut prev = ramp.sample(1).luminance();
        for depth in 2..=6 {
            let lum = ramp.sample(depth).luminance();
            assert!(lum >= prev, "depth {depth} got darker");
            prev = lum;
        }
        // Clamped beyond the span.
        assert_eq!(ramp.sample(5), ramp.sample(9));
    }

    #[test]
    fn theme_reserves_the_accent_for_the_root() {
        let theme = Theme::from_config(&MindmapConfig::default()).unwrap();
        assert_eq!(theme.fill_for_depth(0).to_hex(), "#1f77b4");
        assert_ne!(theme.fill_for_depth(1), theme.fill_for_depth(0));
    }
}
