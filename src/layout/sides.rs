use std::collections::HashMap;

use crate::config;
use crate::model::{LayoutType, Node, Side};

use super::tree::children_by_parent;

/// Whether a side is legal for child nodes under the given layout type.
pub fn is_valid_side(side: Side, layout: LayoutType) -> bool {
    config::profile(layout).allowed_sides.contains(&side)
}

/// Stamps every node's `side` for the target layout. Roots are always
/// `Mid`. Balanced layouts alternate the root's direct children across the
/// two valid sides (by sibling order) and propagate each level-1 side down
/// its whole subtree; single-side layouts stamp the default side everywhere.
pub fn assign_sides(nodes: &[Node], layout: LayoutType) -> Vec<Node> {
    let profile = config::profile(layout);

    if profile.balanced && profile.allowed_sides.len() >= 2 {
        let children = children_by_parent(nodes);
        let mut subtree_side: HashMap<&str, Side> = HashMap::new();

        for root in nodes.iter().filter(|node| node.is_root()) {
            let Some(direct) = children.get(&root.id) else {
                continue;
            };
            // children_by_parent already sorted these by sibling order.
            for (index, &child_idx) in direct.iter().enumerate() {
                let side = profile.allowed_sides[index % profile.allowed_sides.len()];
                propagate_side(&nodes[child_idx].id, side, nodes, &children, &mut subtree_side);
            }
        }

        return nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                node.side = if node.is_root() {
                    Side::Mid
                } else {
                    subtree_side
                        .get(node.id.as_str())
                        .copied()
                        .unwrap_or(profile.default_side)
                };
                node
            })
            .collect();
    }

    nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            node.side = if node.is_root() {
                Side::Mid
            } else {
                profile.default_side
            };
            node
        })
        .collect()
}

fn propagate_side<'a>(
    node_id: &'a str,
    side: Side,
    nodes: &'a [Node],
    children: &HashMap<String, Vec<usize>>,
    subtree_side: &mut HashMap<&'a str, Side>,
) {
    if subtree_side.insert(node_id, side).is_some() {
        // Already stamped; malformed data, stop rather than loop.
        return;
    }
    if let Some(child_indices) = children.get(node_id) {
        for &idx in child_indices {
            propagate_side(&nodes[idx].id, side, nodes, children, subtree_side);
        }
    }
}

/// Side for a child about to be created under `_parent`. Balanced layouts
/// pick the valid side with the fewest existing children (first valid side
/// wins ties); everything else uses the layout's default side.
pub fn next_child_side(existing_children: &[Node], layout: LayoutType) -> Side {
    let profile = config::profile(layout);
    if !profile.balanced || profile.allowed_sides.len() < 2 {
        return profile.default_side;
    }

    let mut best = profile.default_side;
    let mut best_count = usize::MAX;
    for &side in profile.allowed_sides {
        let count = existing_children
            .iter()
            .filter(|child| child.side == side)
            .count();
        if count < best_count {
            best = side;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    fn root(id: &str) -> Node {
        Node::new(id, NodeKind::Root)
    }

    fn child(id: &str, parent: &str, order: u32) -> Node {
        let mut node = Node::new(id, NodeKind::Text);
        node.parent_id = Some(parent.to_string());
        node.sibling_order = Some(order);
        node
    }

    #[test]
    fn balanced_alternates_root_children_and_propagates() {
        let nodes = vec![
            root("r"),
            child("a", "r", 0),
            child("b", "r", 1),
            child("c", "r", 2),
            child("a1", "a", 0),
        ];
        let assigned = assign_sides(&nodes, LayoutType::HorizontalBalanced);
        let side_of = |id: &str| assigned.iter().find(|n| n.id == id).unwrap().side;

        assert_eq!(side_of("r"), Side::Mid);
        assert_eq!(side_of("a"), Side::Left);
        assert_eq!(side_of("b"), Side::Right);
        assert_eq!(side_of("c"), Side::Left);
        // Grandchild follows its level-1 ancestor.
        assert_eq!(side_of("a1"), Side::Left);
    }

    #[test]
    fn vertical_balanced_uses_top_and_bottom() {
        let nodes = vec![root("r"), child("a", "r", 0), child("b", "r", 1)];
        let assigned = assign_sides(&nodes, LayoutType::VerticalBalanced);
        let side_of = |id: &str| assigned.iter().find(|n| n.id == id).unwrap().side;
        assert_eq!(side_of("a"), Side::Top);
        assert_eq!(side_of("b"), Side::Bottom);
    }

    #[test]
    fn single_side_layout_stamps_default_everywhere() {
        let nodes = vec![root("r"), child("a", "r", 0), child("a1", "a", 0)];
        let assigned = assign_sides(&nodes, LayoutType::RightOnly);
        assert!(
            assigned
                .iter()
                .filter(|n| !n.is_root())
                .all(|n| n.side == Side::Right)
        );
    }

    #[test]
    fn next_child_side_balances_counts() {
        let mut left = child("l", "r", 0);
        left.side = Side::Left;
        let mut right_a = child("ra", "r", 1);
        right_a.side = Side::Right;
        let mut right_b = child("rb", "r", 2);
        right_b.side = Side::Right;

        let side = next_child_side(&[left, right_a, right_b], LayoutType::HorizontalBalanced);
        assert_eq!(side, Side::Left);

        // Tie: first valid side wins.
        assert_eq!(
            next_child_side(&[], LayoutType::HorizontalBalanced),
            Side::Left
        );
        // Non-balanced layouts always use the default.
        assert_eq!(next_child_side(&[], LayoutType::RightOnly), Side::Right);
    }

    #[test]
    fn validity_follows_the_profile() {
        assert!(is_valid_side(Side::Right, LayoutType::RightOnly));
        assert!(!is_valid_side(Side::Left, LayoutType::RightOnly));
        assert!(is_valid_side(Side::Top, LayoutType::VerticalBalanced));
    }
}
