use std::collections::{HashMap, HashSet, VecDeque};

use crate::model::{Node, Side};

use super::error::LayoutError;

/// Tolerance for the residual gap between adjacent sibling subtrees after
/// positioning. Gaps off by more than this get a correction pass.
pub(crate) const SPACING_EPSILON: f32 = 0.1;

/// All nodes tagged with the root variant.
pub(crate) fn find_roots(nodes: &[Node]) -> Vec<&Node> {
    nodes.iter().filter(|node| node.is_root()).collect()
}

fn order_key(node: &Node) -> u32 {
    node.sibling_order.unwrap_or(u32::MAX)
}

/// Groups node indices by parent id, each group sorted by sibling order
/// (unordered nodes last, input order preserved among equals).
pub(crate) fn children_by_parent(nodes: &[Node]) -> HashMap<String, Vec<usize>> {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        if let Some(parent_id) = &node.parent_id {
            groups.entry(parent_id.clone()).or_default().push(idx);
        }
    }
    for children in groups.values_mut() {
        children.sort_by_key(|&idx| order_key(&nodes[idx]));
    }
    groups
}

/// Collects every node whose parent chain reaches `root_id`, in breadth-first
/// order. A node encountered twice means the child links are malformed
/// (duplicate ids or a self-referential chain) and fails with a typed error
/// instead of looping.
pub(crate) fn collect_descendants(root_id: &str, nodes: &[Node]) -> Result<Vec<Node>, LayoutError> {
    let children = children_by_parent(nodes);
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(root_id);

    let mut result = Vec::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(root_id);

    while let Some(current) = queue.pop_front() {
        let Some(child_indices) = children.get(current) else {
            continue;
        };
        for &idx in child_indices {
            let child = &nodes[idx];
            if !visited.insert(child.id.as_str()) {
                return Err(LayoutError::CyclicHierarchy {
                    node_id: child.id.clone(),
                });
            }
            result.push(child.clone());
            queue.push_back(child.id.as_str());
        }
    }

    Ok(result)
}

/// Walks a node's parent chain upward. A chain that revisits a node is
/// cyclic and fails; a chain that dangles or terminates is fine (the node is
/// an orphan or reachable, respectively).
pub(crate) fn ensure_acyclic_chain(
    node: &Node,
    by_id: &HashMap<&str, &Node>,
) -> Result<(), LayoutError> {
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(node.id.as_str());

    let mut current = node;
    while let Some(parent_id) = &current.parent_id {
        let Some(parent) = by_id.get(parent_id.as_str()) else {
            return Ok(());
        };
        if !visited.insert(parent.id.as_str()) {
            return Err(LayoutError::CyclicHierarchy {
                node_id: parent.id.clone(),
            });
        }
        current = parent;
    }
    Ok(())
}

/// Perpendicular axis used for subtree extents and spacing correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

/// One node of a rooted hierarchy flattened into an index arena. `x`/`y`
/// start at the node's current position and are rewritten by the strategies.
#[derive(Debug, Clone)]
pub(crate) struct SubtreeNode {
    pub node: Node,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub children: Vec<usize>,
    pub parent: Option<usize>,
    /// Memoized subtree extent along the layout's perpendicular axis.
    pub extent: f32,
}

/// A rooted hierarchy built from the flat node list. Index 0 is the root;
/// children are sorted by sibling order.
#[derive(Debug)]
pub(crate) struct Subtree {
    pub nodes: Vec<SubtreeNode>,
}

impl Subtree {
    pub fn build(root: &Node, descendants: &[Node]) -> Self {
        Self::build_filtered(root, descendants, |_| true)
    }

    /// Builds the hierarchy keeping only the root's direct children on the
    /// given side. Deeper descendants follow their level-1 ancestor.
    pub fn build_for_side(root: &Node, descendants: &[Node], side: Side) -> Self {
        Self::build_filtered(root, descendants, |child| child.side == side)
    }

    fn build_filtered(
        root: &Node,
        descendants: &[Node],
        keep_direct_child: impl Fn(&Node) -> bool,
    ) -> Self {
        let children_map = children_by_parent(descendants);

        let mut nodes = vec![SubtreeNode {
            node: root.clone(),
            x: root.position.x,
            y: root.position.y,
            width: root.size.width,
            height: root.size.height,
            children: Vec::new(),
            parent: None,
            extent: 0.0,
        }];

        let direct: Vec<usize> = children_map
            .get(&root.id)
            .map(|indices| {
                indices
                    .iter()
                    .copied()
                    .filter(|&idx| keep_direct_child(&descendants[idx]))
                    .collect()
            })
            .unwrap_or_default();

        // Reverse so the stack pops siblings in order, same as deeper levels.
        let mut frontier: Vec<(usize, usize)> =
            direct.into_iter().rev().map(|idx| (idx, 0usize)).collect();
        while let Some((desc_idx, parent_arena)) = frontier.pop() {
            let node = &descendants[desc_idx];
            let arena_idx = nodes.len();
            nodes.push(SubtreeNode {
                node: node.clone(),
                x: node.position.x,
                y: node.position.y,
                width: node.size.width,
                height: node.size.height,
                children: Vec::new(),
                parent: Some(parent_arena),
                extent: 0.0,
            });
            nodes[parent_arena].children.push(arena_idx);

            if let Some(child_indices) = children_map.get(&node.id) {
                // Reverse so the stack pops siblings in order.
                for &child_idx in child_indices.iter().rev() {
                    frontier.push((child_idx, arena_idx));
                }
            }
        }

        // Stack-based expansion appends children out of order; restore
        // sibling order per parent.
        let descendant_rank: HashMap<&str, usize> = descendants
            .iter()
            .enumerate()
            .map(|(rank, node)| (node.id.as_str(), rank))
            .collect();
        let mut subtree = Self { nodes };
        for idx in 0..subtree.nodes.len() {
            let mut children = std::mem::take(&mut subtree.nodes[idx].children);
            children.sort_by_key(|&child| {
                let child_node = &subtree.nodes[child].node;
                (
                    order_key(child_node),
                    descendant_rank
                        .get(child_node.id.as_str())
                        .copied()
                        .unwrap_or(usize::MAX),
                )
            });
            subtree.nodes[idx].children = children;
        }
        subtree
    }

    pub fn size_along(&self, idx: usize, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.nodes[idx].width,
            Axis::Y => self.nodes[idx].height,
        }
    }

    pub fn coord(&self, idx: usize, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.nodes[idx].x,
            Axis::Y => self.nodes[idx].y,
        }
    }

    /// Subtree extent along `axis`:
    /// `max(node_size, sum(child_extents) + (n - 1) * spacing)`, memoized
    /// into each node.
    pub fn compute_extents(&mut self, axis: Axis, spacing: f32) {
        self.extent_of(0, axis, spacing);
    }

    fn extent_of(&mut self, idx: usize, axis: Axis, spacing: f32) -> f32 {
        let children = self.nodes[idx].children.clone();
        let own = self.size_along(idx, axis);

        let extent = if children.is_empty() {
            own
        } else {
            let mut total = 0.0;
            for &child in &children {
                total += self.extent_of(child, axis, spacing);
            }
            total += spacing * (children.len() as f32 - 1.0);
            own.max(total)
        };
        self.nodes[idx].extent = extent;
        extent
    }

    /// Leading edge of a subtree's occupied span along `axis`. Leaves report
    /// their own coordinate; interior nodes report their children's span.
    pub fn subtree_min(&self, idx: usize, axis: Axis) -> f32 {
        let children = &self.nodes[idx].children;
        if children.is_empty() {
            return self.coord(idx, axis);
        }
        children
            .iter()
            .map(|&child| self.subtree_min(child, axis))
            .fold(f32::MAX, f32::min)
    }

    pub fn subtree_max(&self, idx: usize, axis: Axis) -> f32 {
        let children = &self.nodes[idx].children;
        if children.is_empty() {
            return self.coord(idx, axis) + self.size_along(idx, axis);
        }
        children
            .iter()
            .map(|&child| self.subtree_max(child, axis))
            .fold(f32::MIN, f32::max)
    }

    pub fn shift_subtree(&mut self, idx: usize, axis: Axis, offset: f32) {
        match axis {
            Axis::X => self.nodes[idx].x += offset,
            Axis::Y => self.nodes[idx].y += offset,
        }
        let children = self.nodes[idx].children.clone();
        for child in children {
            self.shift_subtree(child, axis, offset);
        }
    }

    /// Corrects residual gaps between adjacent sibling subtrees so the
    /// actual spacing matches the configured spacing, distributing the mean
    /// error so the group stays centered, then recurses into children.
    pub fn correct_spacing(&mut self, idx: usize, axis: Axis, spacing: f32) {
        let children = self.nodes[idx].children.clone();
        if children.len() > 1 {
            let mut errors = Vec::with_capacity(children.len() - 1);
            for pair in children.windows(2) {
                let prev_edge = self.subtree_max(pair[0], axis);
                let current_edge = self.subtree_min(pair[1], axis);
                errors.push(spacing - (current_edge - prev_edge));
            }

            if errors.iter().any(|error| error.abs() > SPACING_EPSILON) {
                let total: f32 = errors.iter().sum();
                let average = total / children.len() as f32;
                let mut cumulative = -average;
                for (i, &child) in children.iter().enumerate() {
                    if i > 0 {
                        cumulative += errors[i - 1];
                    }
                    self.shift_subtree(child, axis, cumulative);
                }
            }
        }
        for child in children {
            self.correct_spacing(child, axis, spacing);
        }
    }
}
