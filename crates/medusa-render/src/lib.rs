#![forbid(unsafe_code)]

//! Headless layout + SVG rendering for medusa mind maps.
//!
//! The pipeline is split into independently testable stages:
//! [`layout::layout_radial`] (pure function of the visible node set),
//! [`scene::Scene::sync`] (reconciliation keyed by stable node ids) and
//! [`svg::render_scene_svg`] (pure writer). [`view::Viewport`] holds the
//! zoom/pan transform, which never touches layout.

pub mod color;
pub mod layout;
pub mod scene;
pub mod svg;
pub mod text;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid color literal: {literal:?} (expected #rgb or #rrggbb)")]
    InvalidColor { literal: String },
}

pub type Result<T> = std::result::Result<T, Error>;
