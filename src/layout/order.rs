use std::collections::HashMap;

use crate::config::{self, OrderAxis};
use crate::model::{LayoutType, Node, Point, Side};

/// Position snapshot of one sibling, as handed in by the caller or taken
/// from the current node set.
#[derive(Debug, Clone, Copy)]
pub struct SiblingPosition<'a> {
    pub id: &'a str,
    pub x: f32,
    pub y: f32,
}

impl<'a> SiblingPosition<'a> {
    pub fn of(node: &'a Node) -> Self {
        Self {
            id: &node.id,
            x: node.position.x,
            y: node.position.y,
        }
    }
}

/// Angle in degrees from a parent position to a child position: 0 at
/// 12 o'clock, increasing clockwise, normalized to `[0, 360)`. The single
/// angle formula shared by ordering and handle selection.
pub fn position_angle(parent: Point, child: Point) -> f32 {
    let dx = child.x - parent.x;
    let dy = child.y - parent.y;
    let mut angle = dx.atan2(-dy).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    angle
}

fn axis_value(sibling: &SiblingPosition<'_>, axis: OrderAxis, parent: Option<Point>) -> f32 {
    match axis {
        OrderAxis::X => sibling.x,
        OrderAxis::Y => sibling.y,
        OrderAxis::Angle => match parent {
            Some(parent) => position_angle(parent, Point::new(sibling.x, sibling.y)),
            // Without a parent there is no angle; fall back to Y.
            None => sibling.y,
        },
    }
}

/// Infers a total order among siblings from their current positions, along
/// the axis the layout type orders by. Single-sibling groups get order 0.
pub fn infer_order(
    siblings: &[SiblingPosition<'_>],
    layout: LayoutType,
    parent_position: Option<Point>,
) -> HashMap<String, u32> {
    let mut orders = HashMap::with_capacity(siblings.len());
    if siblings.is_empty() {
        return orders;
    }
    if siblings.len() == 1 {
        orders.insert(siblings[0].id.to_string(), 0);
        return orders;
    }

    let profile = config::profile(layout);
    let mut sorted: Vec<&SiblingPosition<'_>> = siblings.iter().collect();
    sorted.sort_by(|a, b| {
        let va = axis_value(a, profile.order_axis, parent_position);
        let vb = axis_value(b, profile.order_axis, parent_position);
        let ordering = va.total_cmp(&vb);
        if profile.ascending { ordering } else { ordering.reverse() }
    });

    for (index, sibling) in sorted.into_iter().enumerate() {
        orders.insert(sibling.id.to_string(), index as u32);
    }
    orders
}

/// Infers order for every `(parent, side)` sibling group in one pass.
/// `parent_centers` supplies the reference point for angle ordering.
///
/// Angle-ordered layouts group by parent alone: the ring is one ordered
/// sequence, and splitting it per side would hand out colliding ranks.
pub fn infer_order_for_all(
    nodes: &[Node],
    layout: LayoutType,
    parent_centers: &HashMap<String, Point>,
) -> HashMap<String, u32> {
    let split_by_side = config::profile(layout).order_axis != OrderAxis::Angle;
    let mut groups: HashMap<(&str, Side), Vec<SiblingPosition<'_>>> = HashMap::new();
    for node in nodes {
        if let Some(parent_id) = &node.parent_id {
            let side = if split_by_side { node.side } else { Side::Mid };
            groups
                .entry((parent_id.as_str(), side))
                .or_default()
                .push(SiblingPosition::of(node));
        }
    }

    let mut orders = HashMap::new();
    for ((parent_id, _side), siblings) in groups {
        let parent_position = parent_centers.get(parent_id).copied();
        orders.extend(infer_order(&siblings, layout, parent_position));
    }
    orders
}

/// Whether moving one node to `new_position` changes its rank among its
/// siblings, plus the resulting order map. Lets callers make a drag into a
/// reorder only when it actually crosses a neighbor.
pub fn detect_reorder(
    node_id: &str,
    new_position: Point,
    siblings: &[SiblingPosition<'_>],
    layout: LayoutType,
    parent_position: Option<Point>,
) -> (bool, HashMap<String, u32>) {
    let moved: Vec<SiblingPosition<'_>> = siblings
        .iter()
        .map(|sibling| {
            if sibling.id == node_id {
                SiblingPosition {
                    id: sibling.id,
                    x: new_position.x,
                    y: new_position.y,
                }
            } else {
                *sibling
            }
        })
        .collect();

    let new_orders = infer_order(&moved, layout, parent_position);
    let old_orders = infer_order(siblings, layout, parent_position);
    let changed = siblings.iter().any(|s| s.id == node_id)
        && old_orders.get(node_id) != new_orders.get(node_id);
    (changed, new_orders)
}

/// Order for a newly created sibling: one past the current maximum.
pub fn next_order(existing: &[Node]) -> u32 {
    existing
        .iter()
        .filter_map(|node| node.sibling_order)
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

/// Re-sequences sibling orders to contiguous `0..n`, sorting by previous
/// order with unordered nodes last. Closes gaps left by removals.
pub fn normalize_orders(siblings: &[Node]) -> HashMap<String, u32> {
    let mut sorted: Vec<&Node> = siblings.iter().collect();
    sorted.sort_by_key(|node| node.sibling_order.unwrap_or(u32::MAX));

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, node)| (node.id.clone(), index as u32))
        .collect()
}
