//! The interactive session: one mind map, its viewport, and its error
//! state, driven entirely by explicit method calls.
//!
//! The pipeline stays in three separately testable steps — toggle mutates
//! the tree, layout recomputes points for the visible set, scene sync
//! reconciles by id — and the session is the only place that chains them.

use std::sync::Arc;

use medusa_core::{MindmapConfig, MindmapTree, NodeId, Outline, ToggleOutcome};
use medusa_render::color::Theme;
use medusa_render::layout::{RadialLayout, layout_radial};
use medusa_render::scene::{Scene, ScenePatch, SceneStyle};
use medusa_render::svg::{SvgRenderOptions, render_error_svg, render_scene_svg};
use medusa_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use medusa_render::view::{Tooltip, Viewport};
use serde_json::Value;

/// User-visible failure classes. The two render as visually distinct
/// banners so a bad outline is never mistaken for a dead collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("{0}")]
    InvalidData(String),
    #[error("{0}")]
    CollaboratorFailure(String),
}

impl DisplayError {
    pub fn title(&self) -> &'static str {
        match self {
            DisplayError::InvalidData(_) => "Invalid mind map data",
            DisplayError::CollaboratorFailure(_) => "Mind map generation failed",
        }
    }
}

/// Observable session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Failed,
    Ready,
}

struct ReadyState {
    tree: MindmapTree,
    layout: RadialLayout,
    scene: Scene,
    viewport: Viewport,
    tooltip: Option<Tooltip>,
}

enum State {
    Empty,
    Failed(DisplayError),
    Ready(Box<ReadyState>),
}

pub struct MindmapSession {
    config: MindmapConfig,
    theme: Theme,
    text: TextStyle,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    state: State,
}

impl MindmapSession {
    /// Fails only when the configured colors do not parse.
    pub fn new(config: MindmapConfig) -> medusa_render::Result<Self> {
        let theme = Theme::from_config(&config)?;
        let text = TextStyle::sized(config.font_size);
        Ok(Self {
            config,
            theme,
            text,
            measurer: Arc::new(DeterministicTextMeasurer::default()),
            state: State::Empty,
        })
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn config(&self) -> &MindmapConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        match self.state {
            State::Empty => SessionState::Empty,
            State::Failed(_) => SessionState::Failed,
            State::Ready(_) => SessionState::Ready,
        }
    }

    pub fn error(&self) -> Option<&DisplayError> {
        match &self.state {
            State::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn tree(&self) -> Option<&MindmapTree> {
        self.ready().map(|r| &r.tree)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.ready().map(|r| &r.scene)
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.ready().map(|r| &r.viewport)
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.ready().and_then(|r| r.tooltip.as_ref())
    }

    /// Replaces the whole dataset. `None` is the collaborator's failure
    /// signal: the prior diagram (if any) is cleared so a stale frame can
    /// never pose as the answer to the latest prompt.
    pub fn set_outline(&mut self, outline: Option<Outline>) {
        match outline {
            None => {
                tracing::debug!("collaborator returned no outline");
                self.state = State::Failed(DisplayError::CollaboratorFailure(
                    "the outline service returned no data".to_string(),
                ));
            }
            Some(outline) => {
                let tree = MindmapTree::build(&outline);
                let mut ready = ReadyState {
                    tree,
                    layout: RadialLayout::default(),
                    scene: Scene::new(),
                    viewport: Viewport::new(self.config.min_zoom, self.config.max_zoom),
                    tooltip: None,
                };
                sync_ready(&mut ready, &self.config, &self.theme, &self.text, &*self.measurer);
                self.state = State::Ready(Box::new(ready));
            }
        }
    }

    /// JSON entry point: validates against the configured nesting limit
    /// before anything is built.
    pub fn set_outline_json(&mut self, value: Option<&Value>) {
        match value {
            None => self.set_outline(None),
            Some(value) => {
                match Outline::from_value_bounded(value, self.config.max_outline_depth) {
                    Ok(outline) => self.set_outline(Some(outline)),
                    Err(err) => {
                        tracing::debug!(%err, "rejected outline");
                        self.state = State::Failed(DisplayError::InvalidData(err.to_string()));
                    }
                }
            }
        }
    }

    /// Collapses/expands a node by id and, on any actual change, re-runs
    /// layout and scene reconciliation. Returns the resulting patch.
    pub fn toggle_node(&mut self, id: NodeId) -> (ToggleOutcome, ScenePatch) {
        let State::Ready(ready) = &mut self.state else {
            return (ToggleOutcome::NoOp, ScenePatch::default());
        };
        let outcome = ready.tree.toggle(id);
        if outcome == ToggleOutcome::NoOp {
            return (outcome, ScenePatch::default());
        }
        let patch = sync_ready(ready, &self.config, &self.theme, &self.text, &*self.measurer);
        (outcome, patch)
    }

    /// Click in screen coordinates. Only marker hits toggle; labels and
    /// edges are inert.
    pub fn click(&mut self, x: f64, y: f64) -> Option<(NodeId, ToggleOutcome)> {
        let id = self.node_at(x, y)?;
        let (outcome, _) = self.toggle_node(id);
        Some((id, outcome))
    }

    /// Pointer hover in screen coordinates; shows the full node name in a
    /// tooltip that follows the pointer.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let hit = self.node_at(x, y);
        let State::Ready(ready) = &mut self.state else {
            return;
        };
        ready.tooltip = hit.map(|id| Tooltip::at_pointer(x, y, ready.tree.node(id).name.clone()));
    }

    pub fn pointer_leave(&mut self) {
        if let State::Ready(ready) = &mut self.state {
            ready.tooltip = None;
        }
    }

    pub fn wheel_zoom(&mut self, factor: f64, x: f64, y: f64) {
        let (cx, cy) = self.config.center();
        if let State::Ready(ready) = &mut self.state {
            ready.viewport.zoom_by(factor, (x - cx, y - cy));
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if let State::Ready(ready) = &mut self.state {
            ready.viewport.pan_by(dx, dy);
        }
    }

    /// Changes the root accent and re-renders; layout and tree state are
    /// untouched (the patch updates the root fill only).
    pub fn set_root_color(&mut self, literal: &str) -> medusa_render::Result<ScenePatch> {
        let mut config = self.config.clone();
        config.root_color = literal.trim().to_string();
        let theme = Theme::from_config(&config)?;
        self.config = config;
        self.theme = theme;

        let State::Ready(ready) = &mut self.state else {
            return Ok(ScenePatch::default());
        };
        let style = SceneStyle {
            theme: &self.theme,
            measurer: &*self.measurer,
            text: &self.text,
            wrap_width: self.config.wrap_width,
        };
        Ok(ready.scene.sync(&ready.tree, &ready.layout, &style))
    }

    /// Current frame as SVG: the diagram, an error banner, or an empty
    /// placeholder before any data arrived.
    pub fn svg(&self) -> String {
        let options = self.svg_options();
        match &self.state {
            State::Empty => render_scene_svg(
                &Scene::new(),
                &Viewport::new(self.config.min_zoom, self.config.max_zoom),
                None,
                &options,
            ),
            State::Failed(err) => render_error_svg(err.title(), &err.to_string(), &options),
            State::Ready(ready) => render_scene_svg(
                &ready.scene,
                &ready.viewport,
                ready.tooltip.as_ref(),
                &options,
            ),
        }
    }

    pub fn svg_options(&self) -> SvgRenderOptions {
        SvgRenderOptions::from_config(&self.config)
    }

    fn ready(&self) -> Option<&ReadyState> {
        match &self.state {
            State::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    /// Screen coordinates → marker hit, honoring the viewport transform.
    fn node_at(&self, x: f64, y: f64) -> Option<NodeId> {
        let ready = self.ready()?;
        let (cx, cy) = self.config.center();
        let (dx, dy) = ready.viewport.to_diagram(x - cx, y - cy);
        ready.scene.hit_test(dx, dy, self.config.marker_radius)
    }
}

fn sync_ready(
    ready: &mut ReadyState,
    config: &MindmapConfig,
    theme: &Theme,
    text: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> ScenePatch {
    ready.layout = layout_radial(&ready.tree, config.canvas_radius());
    let style = SceneStyle {
        theme,
        measurer,
        text,
        wrap_width: config.wrap_width,
    };
    let patch = ready.scene.sync(&ready.tree, &ready.layout, &style);
    ready.tree.clear_dirty();
    tracing::trace!(
        created = patch.created.len(),
        updated = patch.updated.len(),
        removed = patch.removed.len(),
        "scene synced"
    );
    patch
}
