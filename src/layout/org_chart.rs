use crate::config::LayoutOptions;
use crate::model::{Edge, LayoutResult, Node, Side};

use super::tree::{Axis, Subtree};
use super::vertical;

/// Org-chart layout: a traditional top-to-bottom chart. Children sit below
/// their parent, spread left to right and centered under it; sibling order
/// reads left to right.
pub(super) fn compute_org_chart_layout(
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

    let mut subtree = Subtree::build(root, descendants);
    subtree.compute_extents(Axis::X, options.horizontal_spacing);
    vertical::position_vertical(
        &mut subtree,
        options.horizontal_spacing,
        options.vertical_spacing,
        1.0,
    );
    subtree.correct_spacing(0, Axis::X, options.horizontal_spacing);

    let nodes = subtree
        .nodes
        .iter()
        .map(|entry| {
            let mut node = entry.node.clone();
            node.position.x = entry.x;
            node.position.y = entry.y;
            node.side = if node.is_root() { Side::Mid } else { Side::Bottom };
            node
        })
        .collect();

    LayoutResult {
        nodes,
        edges: edges.to_vec(),
    }
}
