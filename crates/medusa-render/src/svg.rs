//! SVG writer.
//!
//! Pure functions from scene + viewport to an SVG document string. The
//! writer draws whatever the scene holds; an empty scene produces a frame
//! with no nodes and no links.

use std::fmt::Write as _;

use medusa_core::MindmapConfig;

use crate::layout::LayoutPoint;
use crate::scene::{LabelAnchor, Scene, SceneLink, SceneNode};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use crate::view::{Tooltip, Viewport};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    pub diagram_id: Option<String>,
    pub width: f64,
    pub height: f64,
    pub background: Option<String>,
    pub font_size: f64,
    pub marker_radius: f64,
    /// Horizontal gap between a marker and the first label character.
    pub label_offset: f64,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self::from_config(&MindmapConfig::default())
    }
}

impl SvgRenderOptions {
    pub fn from_config(config: &MindmapConfig) -> Self {
        Self {
            diagram_id: None,
            width: config.diagram_width,
            height: config.diagram_height,
            background: None,
            font_size: config.font_size,
            marker_radius: config.marker_radius,
            label_offset: config.label_offset,
        }
    }
}

/// Renders the current frame: links first, then markers and labels, then
/// the pointer tooltip overlay (screen space, above everything).
pub fn render_scene_svg(
    scene: &Scene,
    viewport: &Viewport,
    tooltip: Option<&Tooltip>,
    options: &SvgRenderOptions,
) -> String {
    let mut out = String::new();
    open_document(&mut out, options);

    let (cx, cy) = (options.width / 2.0, options.height / 2.0);
    let (tx, ty) = viewport.translate();
    let _ = write!(
        &mut out,
        r#"<g class="viewport" transform="translate({x} {y}) scale({s})">"#,
        x = fmt(cx + tx),
        y = fmt(cy + ty),
        s = fmt(viewport.scale()),
    );

    out.push_str(r#"<g class="links">"#);
    for link in scene.links() {
        write_link(&mut out, link);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in scene.nodes() {
        write_node(&mut out, node, options);
    }
    out.push_str("</g>");

    out.push_str("</g>");

    if let Some(tooltip) = tooltip {
        write_tooltip(&mut out, tooltip, options);
    }

    out.push_str("</svg>");
    out
}

/// Error banner frame: no diagram content, one centered message block.
/// `title` distinguishes the failure class (invalid data vs. collaborator
/// failure) so hosts and tests can tell them apart.
pub fn render_error_svg(title: &str, message: &str, options: &SvgRenderOptions) -> String {
    let mut out = String::new();
    open_document(&mut out, options);

    let (cx, cy) = (options.width / 2.0, options.height / 2.0);
    let _ = write!(
        &mut out,
        r#"<g class="error-banner" transform="translate({x} {y})">"#,
        x = fmt(cx),
        y = fmt(cy),
    );
    let _ = write!(
        &mut out,
        r##"<text class="error-title" text-anchor="middle" y="-10" font-size="{size}" fill="#b91c1c">{title}</text>"##,
        size = fmt(options.font_size * 1.5),
        title = escape_xml(title),
    );
    let _ = write!(
        &mut out,
        r##"<text class="error-detail" text-anchor="middle" y="14" font-size="{size}" fill="#7f1d1d">{message}</text>"##,
        size = fmt(options.font_size),
        message = escape_xml(message),
    );
    out.push_str("</g></svg>");
    out
}

fn open_document(out: &mut String, options: &SvgRenderOptions) {
    let id_attr = match options.diagram_id.as_deref() {
        Some(id) => format!(r#" id="{}""#, escape_xml(id)),
        None => String::new(),
    };
    let style = match options.background.as_deref() {
        Some(bg) => format!(r#" style="background-color: {};""#, escape_xml(bg)),
        None => String::new(),
    };
    let _ = write!(
        out,
        r#"<svg{id_attr} xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" class="medusa-mindmap" role="graphics-document document" aria-roledescription="mindmap"{style}>"#,
        w = fmt(options.width),
        h = fmt(options.height),
    );
    // Shared marker shadow; referenced by every node circle.
    out.push_str(
        r#"<defs><filter id="medusa-drop-shadow" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="2" dy="2" stdDeviation="1.5" flood-opacity="0.3"/></filter></defs>"#,
    );
}

fn write_link(out: &mut String, link: &SceneLink) {
    let _ = write!(
        out,
        r##"<path class="link" data-child="{child}" d="{d}" fill="none" stroke="#cccccc" stroke-width="2"/>"##,
        child = link.child,
        d = radial_link_path(link.from, link.to),
    );
}

/// Cubic curve through the two polar endpoints with both control points at
/// the mid radius; collapses to a straight segment when parent and child
/// share an angle.
fn radial_link_path(from: LayoutPoint, to: LayoutPoint) -> String {
    let mid_radius = (from.radius + to.radius) / 2.0;
    let c1 = LayoutPoint::at(from.angle, mid_radius);
    let c2 = LayoutPoint::at(to.angle, mid_radius);
    format!(
        "M{} {}C{} {} {} {} {} {}",
        fmt(from.x),
        fmt(from.y),
        fmt(c1.x),
        fmt(c1.y),
        fmt(c2.x),
        fmt(c2.y),
        fmt(to.x),
        fmt(to.y),
    )
}

fn write_node(out: &mut String, node: &SceneNode, options: &SvgRenderOptions) {
    let _ = write!(
        out,
        r#"<g class="node" data-id="{id}" data-depth="{depth}" transform="translate({x} {y})">"#,
        id = node.id,
        depth = node.depth,
        x = fmt(node.x),
        y = fmt(node.y),
    );
    let _ = write!(
        out,
        r#"<circle class="marker" r="{r}" fill="{fill}" filter="url(#medusa-drop-shadow)"/>"#,
        r = fmt(options.marker_radius),
        fill = node.fill.to_hex(),
    );

    let (x, anchor) = match node.anchor {
        LabelAnchor::Start => (options.label_offset, "start"),
        LabelAnchor::End => (-options.label_offset, "end"),
    };
    let _ = write!(
        out,
        r#"<text font-size="{size}" text-anchor="{anchor}">"#,
        size = fmt(options.font_size),
    );
    for (index, line) in node.label_lines.iter().enumerate() {
        // First line hangs at 0.31em for vertical centering against the
        // marker; subsequent lines advance by 1.1em each.
        let dy = if index == 0 { "0.31em" } else { "1.1em" };
        let _ = write!(
            out,
            r#"<tspan x="{x}" dy="{dy}">{line}</tspan>"#,
            x = fmt(x),
            line = escape_xml(line),
        );
    }
    out.push_str("</text></g>");
}

fn write_tooltip(out: &mut String, tooltip: &Tooltip, options: &SvgRenderOptions) {
    let style = TextStyle::sized(options.font_size);
    let metrics = DeterministicTextMeasurer::default().measure(&tooltip.text, &style);
    let pad = 5.0;
    let _ = write!(
        out,
        r#"<g class="tooltip" transform="translate({x} {y})">"#,
        x = fmt(tooltip.x),
        y = fmt(tooltip.y),
    );
    let _ = write!(
        out,
        r##"<rect width="{w}" height="{h}" rx="3" fill="#ffffff" stroke="#cccccc"/>"##,
        w = fmt(metrics.width + 2.0 * pad),
        h = fmt(metrics.height + 2.0 * pad),
    );
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" font-size="{size}">{text}</text>"#,
        x = fmt(pad),
        y = fmt(pad + options.font_size * 0.85),
        size = fmt(options.font_size),
        text = escape_xml(&tooltip.text),
    );
    out.push_str("</g>");
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Compact attribute formatting: two decimal places, trailing zeros and
/// negative zero dropped.
fn fmt(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded == rounded.trunc() && rounded.abs() < 1e12 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::fmt;

    #[test]
    fn fmt_trims_trailing_zeros() {
        assert_eq!(fmt(400.0), "400");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1.5), "1.5");
        assert_eq!(fmt(0.125), "0.13");
        assert_eq!(fmt(-12.3456), "-12.35");
        assert_eq!(fmt(f64::NAN), "0");
    }
}
