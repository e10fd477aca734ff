//! Collapsible tree model.
//!
//! Nodes live in a flat arena; [`NodeId`] is the arena index, assigned once
//! at construction in preorder. Nodes are never removed, so an id stays
//! valid (and keeps meaning the same logical node) across any sequence of
//! expand/collapse toggles. That stability is what the renderer keys its
//! reconciliation on.

use serde::{Deserialize, Serialize};

use crate::outline::Outline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a node's children currently live.
///
/// Exactly one list exists per non-leaf node; collapsing moves it aside
/// without reordering, expanding moves it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildState {
    Leaf,
    Expanded(Vec<NodeId>),
    Collapsed(Vec<NodeId>),
}

impl ChildState {
    pub fn visible(&self) -> &[NodeId] {
        match self {
            ChildState::Expanded(ids) => ids,
            ChildState::Leaf | ChildState::Collapsed(_) => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ChildState::Leaf)
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    pub name: String,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: ChildState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Collapsed,
    Expanded,
    NoOp,
}

#[derive(Debug, Clone)]
pub struct MindmapTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
    dirty: bool,
}

impl MindmapTree {
    /// Materializes a validated outline. Ids and depths are fixed here and
    /// never reassigned.
    pub fn build(outline: &Outline) -> Self {
        let mut nodes = Vec::with_capacity(outline.node_count());
        let root = insert(&mut nodes, outline, None, 0);
        tracing::debug!(nodes = nodes.len(), "mindmap tree built");
        Self {
            nodes,
            root,
            dirty: false,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// First node (preorder/id order) whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Children that currently take part in layout; empty for leaves and
    /// collapsed nodes.
    pub fn visible_children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.visible())
            .unwrap_or(&[])
    }

    /// Collapses an expanded node, expands a collapsed one; leaves are a
    /// no-op. Any state change marks the tree dirty: the caller is expected
    /// to re-run layout and rendering.
    pub fn toggle(&mut self, id: NodeId) -> ToggleOutcome {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return ToggleOutcome::NoOp;
        };
        let outcome = match std::mem::replace(&mut node.children, ChildState::Leaf) {
            ChildState::Leaf => ToggleOutcome::NoOp,
            ChildState::Expanded(ids) => {
                node.children = ChildState::Collapsed(ids);
                ToggleOutcome::Collapsed
            }
            ChildState::Collapsed(ids) => {
                node.children = ChildState::Expanded(ids);
                ToggleOutcome::Expanded
            }
        };
        if outcome != ToggleOutcome::NoOp {
            self.dirty = true;
            tracing::debug!(id = id.0, ?outcome, "toggled node");
        }
        outcome
    }

    /// Whether the tree changed since the last [`Self::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Visible nodes in preorder: a node is visible when every ancestor is
    /// expanded. The root is always visible.
    pub fn visible_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.visible_children(id).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    pub fn visible_count(&self) -> usize {
        self.visible_ids().len()
    }

    /// Deepest visible level; 0 when only the root shows.
    pub fn visible_depth_max(&self) -> usize {
        self.visible_ids()
            .iter()
            .map(|id| self.node(*id).depth)
            .max()
            .unwrap_or(0)
    }
}

fn insert(
    nodes: &mut Vec<TreeNode>,
    outline: &Outline,
    parent: Option<NodeId>,
    depth: usize,
) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(TreeNode {
        id,
        name: outline.name.clone(),
        depth,
        parent,
        children: ChildState::Leaf,
    });
    if !outline.children.is_empty() {
        let mut child_ids = Vec::with_capacity(outline.children.len());
        for child in &outline.children {
            child_ids.push(insert(nodes, child, Some(id), depth + 1));
        }
        nodes[id.0].children = ChildState::Expanded(child_ids);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level() -> Outline {
        Outline::with_children(
            "root",
            vec![
                Outline::with_children("a", vec![Outline::new("a1")]),
                Outline::new("b"),
            ],
        )
    }

    #[test]
    fn ids_follow_preorder_and_survive_toggles() {
        let mut tree = MindmapTree::build(&two_level());
        assert_eq!(tree.node(NodeId(0)).name, "root");
        assert_eq!(tree.node(NodeId(1)).name, "a");
        assert_eq!(tree.node(NodeId(2)).name, "a1");
        assert_eq!(tree.node(NodeId(3)).name, "b");

        let a = tree.find_by_name("a").unwrap();
        tree.toggle(a);
        tree.toggle(a);
        assert_eq!(tree.node(NodeId(2)).name, "a1");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn toggle_sets_dirty_only_on_change() {
        let mut tree = MindmapTree::build(&two_level());
        let leaf = tree.find_by_name("b").unwrap();
        assert_eq!(tree.toggle(leaf), ToggleOutcome::NoOp);
        assert!(!tree.is_dirty());

        let a = tree.find_by_name("a").unwrap();
        assert_eq!(tree.toggle(a), ToggleOutcome::Collapsed);
        assert!(tree.is_dirty());
        tree.clear_dirty();
        assert_eq!(tree.toggle(a), ToggleOutcome::Expanded);
        assert!(tree.is_dirty());
    }
}
