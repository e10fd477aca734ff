#![forbid(unsafe_code)]

//! `medusa` renders topic outlines as interactive radial mind maps,
//! headlessly: every interaction is an explicit method call on a
//! [`MindmapSession`] and every frame is an SVG string.
//!
//! The heavy lifting lives in `medusa-core` (outline validation, tree
//! model) and `medusa-render` (layout, scene reconciliation, SVG); this
//! crate ties them into a session a host can drive from any event loop.

pub use medusa_core::{
    ChildState, Error as CoreError, MindmapConfig, MindmapTree, NodeId, Outline, ToggleOutcome,
    TreeNode,
};
pub use medusa_render::{
    Error as RenderError,
    scene::{Scene, ScenePatch},
    svg::SvgRenderOptions,
    text::{DeterministicTextMeasurer, TextMeasurer, TextStyle},
    view::{Tooltip, Viewport},
};

pub mod session;

pub use session::{DisplayError, MindmapSession, SessionState};
