//! Layout engine: turns a flat node/edge snapshot into a fully positioned
//! mind map for a chosen layout type.
//!
//! The engine is stateless and synchronous. Each call takes a snapshot of
//! nodes and edges, lays out every tree in the forest, and returns a new
//! snapshot; it never creates or deletes nodes or edges and only rewrites
//! positions, sides, sibling orders, and edge handles. Roots anchor their
//! trees and are never moved.

mod directional;
pub mod error;
mod org_chart;
pub mod order;
mod radial;
pub mod sides;
mod tree;
mod vertical;

pub use error::LayoutError;

use std::collections::{HashMap, HashSet};

use crate::config::{self, LayoutOptions};
use crate::model::{Edge, HandlePosition, LayoutResult, LayoutType, Node, Point, Side};

/// Handles connecting a parent to a child under the given layout: balanced
/// layouts pick by the child's side, radial picks by the parent-to-child
/// angle, single-side layouts are fixed.
pub fn edge_handles(
    layout: LayoutType,
    parent: &Node,
    child: &Node,
) -> (HandlePosition, HandlePosition) {
    match layout {
        LayoutType::HorizontalBalanced | LayoutType::FreeForm => match child.side {
            Side::Left => (HandlePosition::Left, HandlePosition::Right),
            _ => (HandlePosition::Right, HandlePosition::Left),
        },
        LayoutType::VerticalBalanced => match child.side {
            Side::Top => (HandlePosition::Top, HandlePosition::Bottom),
            _ => (HandlePosition::Bottom, HandlePosition::Top),
        },
        LayoutType::Radial => radial::edge_handles(parent, child),
        _ => {
            let profile = config::profile(layout);
            (profile.source_handles[0], profile.target_handles[0])
        }
    }
}

/// Side a newly created child should take under the given layout.
pub fn default_child_side(
    layout: LayoutType,
    _parent: &Node,
    existing_children: &[Node],
) -> Side {
    match layout {
        LayoutType::Radial => {
            // Keep the ring roughly balanced between the two halves.
            let left = existing_children
                .iter()
                .filter(|child| child.side == Side::Left)
                .count();
            let right = existing_children
                .iter()
                .filter(|child| child.side == Side::Right)
                .count();
            if left <= right { Side::Left } else { Side::Right }
        }
        _ => sides::next_child_side(existing_children, layout),
    }
}

fn dispatch(
    layout: LayoutType,
    root: &Node,
    descendants: &[Node],
    edges: &[Edge],
    options: &LayoutOptions,
) -> LayoutResult {
    match layout {
        LayoutType::HorizontalBalanced => {
            directional::compute_horizontal_balanced_layout(root, descendants, edges, options)
        }
        LayoutType::RightOnly => directional::compute_horizontal_layout(
            root,
            descendants,
            edges,
            options,
            directional::RIGHT_ONLY,
        ),
        LayoutType::LeftOnly => directional::compute_horizontal_layout(
            root,
            descendants,
            edges,
            options,
            directional::LEFT_ONLY,
        ),
        LayoutType::VerticalBalanced => {
            vertical::compute_vertical_balanced_layout(root, descendants, edges, options)
        }
        LayoutType::TopOnly => {
            vertical::compute_vertical_layout(root, descendants, edges, options, vertical::TOP_ONLY)
        }
        LayoutType::BottomOnly => vertical::compute_vertical_layout(
            root,
            descendants,
            edges,
            options,
            vertical::BOTTOM_ONLY,
        ),
        LayoutType::OrgChart => {
            org_chart::compute_org_chart_layout(root, descendants, edges, options)
        }
        LayoutType::Radial => radial::compute_radial_layout(root, descendants, edges, options),
        // FreeForm never reaches the per-tree dispatch; keep it a
        // passthrough all the same.
        LayoutType::FreeForm => LayoutResult {
            nodes: std::iter::once(root.clone())
                .chain(descendants.iter().cloned())
                .collect(),
            edges: edges.to_vec(),
        },
    }
}

/// Lays out every tree in the snapshot.
///
/// Sibling orders are refreshed from current positions first (in every mode,
/// `FreeForm` included), then each root's tree is positioned by the layout's
/// strategy. Nodes whose parent chain dangles pass through untouched; a
/// parent chain that loops back on itself is a [`LayoutError::CyclicHierarchy`].
/// Finally every edge between two laid-out nodes gets fresh handles.
pub fn layout_all_trees(
    layout: LayoutType,
    nodes: &[Node],
    edges: &[Edge],
    options: &LayoutOptions,
) -> Result<LayoutResult, LayoutError> {
    let parent_centers: HashMap<String, Point> = nodes
        .iter()
        .map(|node| (node.id.clone(), node.center()))
        .collect();
    let orders = order::infer_order_for_all(nodes, layout, &parent_centers);
    let refreshed: Vec<Node> = nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if let Some(&order) = orders.get(&node.id) {
                node.sibling_order = Some(order);
            }
            node
        })
        .collect();

    if layout == LayoutType::FreeForm {
        return Ok(LayoutResult {
            nodes: refreshed,
            edges: edges.to_vec(),
        });
    }

    let roots: Vec<Node> = tree::find_roots(&refreshed).into_iter().cloned().collect();
    if roots.is_empty() {
        log::warn!("no root nodes in snapshot; returning positions unchanged");
        return Ok(LayoutResult {
            nodes: refreshed,
            edges: edges.to_vec(),
        });
    }

    let mut laid_by_id: HashMap<String, Node> = HashMap::with_capacity(refreshed.len());
    for root in &roots {
        let descendants = tree::collect_descendants(&root.id, &refreshed)?;
        let tree_ids: HashSet<&str> = std::iter::once(root.id.as_str())
            .chain(descendants.iter().map(|node| node.id.as_str()))
            .collect();
        let tree_edges: Vec<Edge> = edges
            .iter()
            .filter(|edge| {
                tree_ids.contains(edge.source.as_str()) && tree_ids.contains(edge.target.as_str())
            })
            .cloned()
            .collect();

        let result = dispatch(layout, root, &descendants, &tree_edges, options);
        for node in result.nodes {
            laid_by_id.insert(node.id.clone(), node);
        }
    }

    let positioned: HashSet<String> = laid_by_id.keys().cloned().collect();

    // Stitch back in input order; unreached nodes either dangle (pass
    // through) or sit on a cycle (error).
    let by_id: HashMap<&str, &Node> = refreshed
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();
    let mut laid_nodes: Vec<Node> = Vec::with_capacity(refreshed.len());
    for node in &refreshed {
        match laid_by_id.remove(&node.id) {
            Some(laid) => laid_nodes.push(laid),
            None => {
                tree::ensure_acyclic_chain(node, &by_id)?;
                laid_nodes.push(node.clone());
            }
        }
    }

    let node_map: HashMap<&str, &Node> = laid_nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();
    let final_edges: Vec<Edge> = edges
        .iter()
        .map(|edge| {
            let mut edge = edge.clone();
            if positioned.contains(&edge.source) && positioned.contains(&edge.target) {
                let source = node_map[edge.source.as_str()];
                let target = node_map[edge.target.as_str()];
                let (source_handle, target_handle) = edge_handles(layout, source, target);
                edge.source_handle = source_handle;
                edge.target_handle = target_handle;
            }
            edge
        })
        .collect();

    Ok(LayoutResult {
        nodes: laid_nodes,
        edges: final_edges,
    })
}
