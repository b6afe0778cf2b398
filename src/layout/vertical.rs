use crate::config::LayoutOptions;
use crate::model::{Edge, LayoutResult, Node, Side};

use super::sides;
use super::tree::{Axis, Subtree};

/// Geometry of one vertical growth direction.
#[derive(Debug, Clone, Copy)]
pub(super) struct VerticalConfig {
    pub child_side: Side,
    /// +1 grows downward, -1 upward.
    pub y_direction: f32,
}

pub(super) const BOTTOM_ONLY: VerticalConfig = VerticalConfig {
    child_side: Side::Bottom,
    y_direction: 1.0,
};

pub(super) const TOP_ONLY: VerticalConfig = VerticalConfig {
    child_side: Side::Top,
    y_direction: -1.0,
};

/// Positions every node of a vertical tree: children sit one vertical step
/// from their parent and spread horizontally in subtree-extent slots
/// centered on the parent, each node centered within its own slot. Assumes
/// extents are already computed on X.
pub(super) fn position_vertical(
    subtree: &mut Subtree,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    y_direction: f32,
) {
    for idx in 1..subtree.nodes.len() {
        let parent = subtree.nodes[idx].parent.expect("non-root has a parent");
        let parent_node = &subtree.nodes[parent];
        let (parent_x, parent_y) = (parent_node.x, parent_node.y);
        let (parent_width, parent_height) = (parent_node.width, parent_node.height);
        let siblings = parent_node.children.clone();

        let y = if y_direction > 0.0 {
            parent_y + parent_height + vertical_spacing
        } else {
            parent_y - subtree.nodes[idx].height - vertical_spacing
        };

        let sibling_index = siblings
            .iter()
            .position(|&child| child == idx)
            .expect("node listed under its parent");
        let mut cumulative = 0.0;
        for &prior in &siblings[..sibling_index] {
            cumulative += subtree.nodes[prior].extent + horizontal_spacing;
        }
        let total_extents: f32 = siblings.iter().map(|&s| subtree.nodes[s].extent).sum();
        let total_width = total_extents + horizontal_spacing * (siblings.len() as f32 - 1.0);

        let x = if siblings.len() == 1 {
            parent_x + parent_width / 2.0 - subtree.nodes[idx].width / 2.0
        } else {
            let parent_center = parent_x + parent_width / 2.0;
            let layout_start = parent_center - total_width / 2.0;
            // Center the node within its subtree slot.
            let slot_offset = subtree.nodes[idx].extent / 2.0 - subtree.nodes[idx].width / 2.0;
            layout_start + cumulative + slot_offset
        };

        subtree.nodes[idx].x = x;
        subtree.nodes[idx].y = y;
    }
}

/// Upward layouts line siblings up on a shared bottom edge so rows read as
/// rows even when node heights differ.
pub(super) fn align_siblings_by_bottom_edge(subtree: &mut Subtree, idx: usize) {
    let children = subtree.nodes[idx].children.clone();
    if children.is_empty() {
        return;
    }

    let max_bottom = children
        .iter()
        .map(|&child| subtree.nodes[child].y + subtree.nodes[child].height)
        .fold(f32::MIN, f32::max);
    for &child in &children {
        subtree.nodes[child].y = max_bottom - subtree.nodes[child].height;
    }
    for child in children {
        align_siblings_by_bottom_edge(subtree, child);
    }
}

fn emit_nodes(subtree: &Subtree, child_side: Side, skip_root: bool, out: &mut Vec<Node>) {
    for (idx, entry) in subtree.nodes.iter().enumerate() {
        if skip_root && idx == 0 {
            continue;
        }
        let mut node = entry.node.clone();
        node.position.x = entry.x;
        node.position.y = entry.y;
        node.side = if node.is_root() { Side::Mid } else { child_side };
        out.push(node);
    }
}

fn layout_side(subtree: &mut Subtree, options: &LayoutOptions, y_direction: f32) {
    subtree.compute_extents(Axis::X, options.horizontal_spacing);
    position_vertical(
        subtree,
        options.horizontal_spacing,
        options.vertical_spacing,
        y_direction,
    );
    if y_direction < 0.0 {
        align_siblings_by_bottom_edge(subtree, 0);
    }
    subtree.correct_spacing(0, Axis::X, options.horizontal_spacing);
}

/// Top-Only / Bottom-Only layout: all descendants above or below the root.
pub(super) fn compute_vertical_layout(
    root: &Node,
    descendants: &[Node],
    edges: &[Edge],
    options: &LayoutOptions,
    config: VerticalConfig,
) -> LayoutResult {
    if descendants.is_empty() {
        return LayoutResult {
            nodes: vec![root.clone()],
            edges: edges.to_vec(),
        };
    }

    let mut subtree = Subtree::build(root, descendants);
    layout_side(&mut subtree, options, config.y_direction);

    let mut nodes = Vec::with_capacity(subtree.nodes.len());
    emit_nodes(&subtree, config.child_side, false, &mut nodes);
    LayoutResult {
        nodes,
        edges: edges.to_vec(),
    }
}

/// Vertical-Balanced layout: the root's children alternate between top and
/// bottom, each half laid out with the vertical core in its own direction.
pub(super) fn compute_vertical_balanced_layout(
    root: &Node,
    descendants: &[Node],
    edges: &[Edge],
    options: &LayoutOptions,
) -> LayoutResult {
    if descendants.is_empty() {
        return LayoutResult {
            nodes: vec![root.clone()],
            edges: edges.to_vec(),
        };
    }

    let mut all: Vec<Node> = Vec::with_capacity(descendants.len() + 1);
    all.push(root.clone());
    all.extend_from_slice(descendants);
    let assigned = sides::assign_sides(&all, crate::model::LayoutType::VerticalBalanced);
    let root_assigned = &assigned[0];
    let descendants_assigned = &assigned[1..];

    let mut nodes = Vec::with_capacity(assigned.len());
    for (side, direction, skip_root) in [(Side::Bottom, 1.0, false), (Side::Top, -1.0, true)] {
        let mut subtree = Subtree::build_for_side(root_assigned, descendants_assigned, side);
        layout_side(&mut subtree, options, direction);
        emit_nodes(&subtree, side, skip_root, &mut nodes);
    }

    LayoutResult {
        nodes,
        edges: edges.to_vec(),
    }
}
