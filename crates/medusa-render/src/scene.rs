//! Retained scene with id-keyed reconciliation.
//!
//! [`Scene::sync`] diffs the previous visible-id set against the freshly
//! laid-out one and reports exactly what a drawing surface must do:
//! create, update, or remove. The key is the stable [`NodeId`], never an
//! array index, so identity survives any collapse/expand cycle.

use indexmap::IndexMap;
use medusa_core::{MindmapTree, NodeId};
use serde::Serialize;

use crate::color::{Rgb, Theme};
use crate::layout::{LayoutPoint, RadialLayout};
use crate::text::{TextMeasurer, TextStyle, wrap};

/// Which side of the marker the label sits on. Flips by children-presence
/// so labels point away from descendant edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelAnchor {
    /// Label to the right of the marker (leaves and collapsed nodes).
    Start,
    /// Label to the left of the marker (nodes with visible children).
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub depth: usize,
    pub fill: Rgb,
    pub anchor: LabelAnchor,
    /// Wrapped label lines; computed once when the node enters the scene.
    pub label_lines: Vec<String>,
    /// Full untruncated name, used by the hover tooltip.
    pub name: String,
}

/// One curved edge per (parent, visible child) pair, keyed by the child id
/// since every visible non-root node has exactly one incoming link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLink {
    pub parent: NodeId,
    pub child: NodeId,
    pub from: LayoutPoint,
    pub to: LayoutPoint,
}

/// Instructions for a drawing surface after a sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenePatch {
    pub created: Vec<NodeId>,
    pub updated: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

impl ScenePatch {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Inputs that shape scene entries but are not per-node state.
pub struct SceneStyle<'a> {
    pub theme: &'a Theme,
    pub measurer: &'a dyn TextMeasurer,
    pub text: &'a TextStyle,
    pub wrap_width: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: IndexMap<NodeId, SceneNode>,
    links: IndexMap<NodeId, SceneLink>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the scene against a layout pass.
    ///
    /// Nodes that remain visible keep their entry (labels are not
    /// re-wrapped) and are repositioned/restyled in place; they appear in
    /// the patch only when something actually changed, so a second sync
    /// with unchanged inputs yields an empty patch.
    pub fn sync(
        &mut self,
        tree: &MindmapTree,
        layout: &RadialLayout,
        style: &SceneStyle<'_>,
    ) -> ScenePatch {
        let mut patch = ScenePatch::default();
        let mut next: IndexMap<NodeId, SceneNode> = IndexMap::with_capacity(layout.len());

        for (id, point) in layout.iter() {
            let node = tree.node(id);
            let anchor = if tree.visible_children(id).is_empty() {
                LabelAnchor::Start
            } else {
                LabelAnchor::End
            };
            let fill = style.theme.fill_for_depth(node.depth);

            match self.nodes.shift_remove(&id) {
                Some(mut entry) => {
                    let before = entry.clone();
                    entry.x = point.x;
                    entry.y = point.y;
                    entry.fill = fill;
                    entry.anchor = anchor;
                    if entry != before {
                        patch.updated.push(id);
                    }
                    next.insert(id, entry);
                }
                None => {
                    next.insert(
                        id,
                        SceneNode {
                            id,
                            x: point.x,
                            y: point.y,
                            depth: node.depth,
                            fill,
                            anchor,
                            label_lines: wrap::wrap_label(
                                &node.name,
                                style.measurer,
                                style.text,
                                style.wrap_width,
                            ),
                            name: node.name.clone(),
                        },
                    );
                    patch.created.push(id);
                }
            }
        }

        // Whatever is still in the old map fell out of the visible set.
        patch.removed.extend(self.nodes.keys().copied());
        self.nodes = next;

        self.links.clear();
        for (id, point) in layout.iter() {
            let Some(parent) = tree.node(id).parent else {
                continue;
            };
            let Some(from) = layout.point(parent) else {
                continue;
            };
            self.links.insert(
                id,
                SceneLink {
                    parent,
                    child: id,
                    from,
                    to: point,
                },
            );
        }

        patch
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    pub fn links(&self) -> impl Iterator<Item = &SceneLink> {
        self.links.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hit-tests markers only (not labels, not edges) in diagram
    /// coordinates. Later-drawn nodes win ties.
    pub fn hit_test(&self, x: f64, y: f64, marker_radius: f64) -> Option<NodeId> {
        let r2 = marker_radius * marker_radius;
        self.nodes
            .values()
            .rev()
            .find(|n| {
                let dx = n.x - x;
                let dy = n.y - y;
                dx * dx + dy * dy <= r2
            })
            .map(|n| n.id)
    }
}
