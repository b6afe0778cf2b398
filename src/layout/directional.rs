use crate::config::LayoutOptions;
use crate::model::{Edge, LayoutResult, Node, Side};

use super::sides;
use super::tree::{Axis, Subtree};

/// Geometry of one horizontal growth direction.
#[derive(Debug, Clone, Copy)]
pub(super) struct HorizontalConfig {
    pub child_side: Side,
    /// +1 grows rightward, -1 leftward.
    pub x_direction: f32,
}

pub(super) const RIGHT_ONLY: HorizontalConfig = HorizontalConfig {
    child_side: Side::Right,
    x_direction: 1.0,
};

pub(super) const LEFT_ONLY: HorizontalConfig = HorizontalConfig {
    child_side: Side::Left,
    x_direction: -1.0,
};

/// Positions every node of a horizontal tree: children sit one horizontal
/// step from their parent and stack vertically in subtree-extent slots
/// centered on the parent. Assumes extents are already computed on Y.
pub(super) fn position_horizontal(
    subtree: &mut Subtree,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    x_direction: f32,
) {
    // Arena order puts parents before children, so one forward pass works.
    for idx in 1..subtree.nodes.len() {
        let parent = subtree.nodes[idx].parent.expect("non-root has a parent");
        let parent_node = &subtree.nodes[parent];
        let (parent_x, parent_y) = (parent_node.x, parent_node.y);
        let (parent_width, parent_height) = (parent_node.width, parent_node.height);
        let siblings = parent_node.children.clone();

        let x = if x_direction > 0.0 {
            parent_x + parent_width + horizontal_spacing
        } else {
            parent_x - subtree.nodes[idx].width - horizontal_spacing
        };

        let sibling_index = siblings
            .iter()
            .position(|&child| child == idx)
            .expect("node listed under its parent");
        let mut cumulative = 0.0;
        for &prior in &siblings[..sibling_index] {
            cumulative += subtree.nodes[prior].extent + vertical_spacing;
        }
        let total_extents: f32 = siblings.iter().map(|&s| subtree.nodes[s].extent).sum();
        let total_height = total_extents + vertical_spacing * (siblings.len() as f32 - 1.0);

        let y = if siblings.len() == 1 {
            parent_y + parent_height / 2.0 - subtree.nodes[idx].height / 2.0
        } else {
            parent_y + parent_height / 2.0 - total_height / 2.0 + cumulative
        };

        subtree.nodes[idx].x = x;
        subtree.nodes[idx].y = y;
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

/// Right-Only / Left-Only layout: all descendants on one side of the root.
pub(super) fn compute_horizontal_layout(
    root: &Node,
    descendants: &[Node],
    edges: &[Edge],
    options: &LayoutOptions,
    config: HorizontalConfig,
) -> LayoutResult {
    if descendants.is_empty() {
        return LayoutResult {
            nodes: vec![root.clone()],
            edges: edges.to_vec(),
        };
    }

    let mut subtree = Subtree::build(root, descendants);
    subtree.compute_extents(Axis::Y, options.vertical_spacing);
    position_horizontal(
        &mut subtree,
        options.horizontal_spacing,
        options.vertical_spacing,
        config.x_direction,
    );
    subtree.correct_spacing(0, Axis::Y, options.vertical_spacing);

    let mut nodes = Vec::with_capacity(subtree.nodes.len());
    emit_nodes(&subtree, config.child_side, false, &mut nodes);
    LayoutResult {
        nodes,
        edges: edges.to_vec(),
    }
}

/// Horizontal-Balanced layout: the root's children are split across left
/// and right (alternating by sibling order), and each half is laid out with
/// the directional core in its own direction.
pub(super) fn compute_horizontal_balanced_layout(
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
    let assigned = sides::assign_sides(&all, crate::model::LayoutType::HorizontalBalanced);
    let root_assigned = &assigned[0];
    let descendants_assigned = &assigned[1..];

    let mut nodes = Vec::with_capacity(assigned.len());
    for (side, direction, skip_root) in [(Side::Right, 1.0, false), (Side::Left, -1.0, true)] {
        let mut subtree = Subtree::build_for_side(root_assigned, descendants_assigned, side);
        subtree.compute_extents(Axis::Y, options.vertical_spacing);
        position_horizontal(
            &mut subtree,
            options.horizontal_spacing,
            options.vertical_spacing,
            direction,
        );
        subtree.correct_spacing(0, Axis::Y, options.vertical_spacing);
        emit_nodes(&subtree, side, skip_root, &mut nodes);
    }

    LayoutResult {
        nodes,
        edges: edges.to_vec(),
    }
}
