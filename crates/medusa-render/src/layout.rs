//! Radial layout over the visible subset of a mindmap tree.
//!
//! Collapsed subtrees contribute nothing: the layout is a pure function of
//! the visible node set, so two passes over an unchanged tree produce
//! identical points.

use medusa_core::{MindmapTree, NodeId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Polar slot plus its Cartesian projection for one visible node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    /// Radians in `[0, 2π)`.
    pub angle: f64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    /// Projects a polar slot with the fixed −π/2 rotation, so angle 0 opens
    /// at the top of the diagram.
    pub fn at(angle: f64, radius: f64) -> Self {
        let rotated = angle - FRAC_PI_2;
        Self {
            angle,
            radius,
            x: radius * rotated.cos(),
            y: radius * rotated.sin(),
        }
    }
}

/// Layout result: one point per visible node, iterable in preorder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadialLayout {
    points: FxHashMap<NodeId, LayoutPoint>,
    order: Vec<NodeId>,
}

impl RadialLayout {
    pub fn point(&self, id: NodeId) -> Option<LayoutPoint> {
        self.points.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.points.contains_key(&id)
    }

    /// Visible nodes with their points, in tree preorder.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, LayoutPoint)> + '_ {
        self.order.iter().map(|id| (*id, self.points[id]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Computes the radial layout for every visible node.
///
/// Visible leaves are evenly spaced over `[0, 2π)` in traversal order;
/// an internal node's angle is the mean of its visible children's angles.
/// Radius grows linearly with depth, scaled so the deepest visible node
/// lands exactly at `canvas_radius`. A root with no visible children sits
/// alone at the origin.
pub fn layout_radial(tree: &MindmapTree, canvas_radius: f64) -> RadialLayout {
    let order = tree.visible_ids();
    let leaf_count = order
        .iter()
        .filter(|id| tree.visible_children(**id).is_empty())
        .count();
    let max_depth = tree.visible_depth_max();

    let angle_step = TAU / leaf_count.max(1) as f64;
    let ring_step = if max_depth == 0 {
        0.0
    } else {
        canvas_radius.max(0.0) / max_depth as f64
    };

    let mut angles = FxHashMap::with_capacity_and_hasher(order.len(), Default::default());
    let mut next_leaf = 0usize;
    assign_angles(tree, tree.root(), angle_step, &mut next_leaf, &mut angles);

    let mut points = FxHashMap::with_capacity_and_hasher(order.len(), Default::default());
    for &id in &order {
        let depth = tree.node(id).depth;
        points.insert(
            id,
            LayoutPoint::at(angles[&id], ring_step * depth as f64),
        );
    }
    RadialLayout { points, order }
}

fn assign_angles(
    tree: &MindmapTree,
    id: NodeId,
    angle_step: f64,
    next_leaf: &mut usize,
    out: &mut FxHashMap<NodeId, f64>,
) -> f64 {
    let children = tree.visible_children(id);
    let angle = if children.is_empty() {
        let slot = *next_leaf as f64 * angle_step;
        *next_leaf += 1;
        slot
    } else {
        let mut sum = 0.0;
        for &child in children {
            sum += assign_angles(tree, child, angle_step, next_leaf, out);
        }
        sum / children.len() as f64
    };
    out.insert(id, angle);
    angle
}
