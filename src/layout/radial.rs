use std::collections::HashMap;

use crate::config::LayoutOptions;
use crate::model::{Edge, HandlePosition, LayoutResult, Node, Point, Side};

use super::tree::children_by_parent;

/// Widest wedge a non-root node may hand to its own children, in degrees.
const MAX_CHILD_SPREAD: f32 = 120.0;

/// Angle for the child at `index` within a wedge: children split the spread
/// into equal steps and sit at step centers. A single child sits exactly at
/// the wedge start. Degrees, 0 at 12 o'clock, clockwise.
fn child_angle(index: usize, total: usize, start_angle: f32, spread_angle: f32) -> f32 {
    if total == 1 {
        return start_angle;
    }
    let step = spread_angle / total as f32;
    start_angle + index as f32 * step + step / 2.0
}

/// Screen offset of a point `radius` away from the origin at `angle`
/// degrees. Screen Y grows downward, so 0 degrees maps to (0, -radius).
fn angle_to_offset(angle: f32, radius: f32) -> (f32, f32) {
    let math_angle = (90.0 - angle).to_radians();
    (math_angle.cos() * radius, -math_angle.sin() * radius)
}

fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

/// Which of the four cardinal handles faces `angle`. Quadrants are centered
/// on the cardinal directions: top covers [315, 45), right [45, 135),
/// bottom [135, 225), left [225, 315).
pub(super) fn handle_from_angle(angle: f32) -> HandlePosition {
    let degrees = normalize_degrees(angle);
    if !(45.0..315.0).contains(&degrees) {
        HandlePosition::Top
    } else if degrees < 135.0 {
        HandlePosition::Right
    } else if degrees < 225.0 {
        HandlePosition::Bottom
    } else {
        HandlePosition::Left
    }
}

/// Right half of the circle (0 through 180 inclusive) is `Right`, the rest
/// `Left`.
fn side_from_angle(angle: f32) -> Side {
    if normalize_degrees(angle) > 180.0 {
        Side::Left
    } else {
        Side::Right
    }
}

/// Handles for a radial edge, picked from the parent-to-child angle. The
/// source handle faces the child; the target handle is its opposite.
pub(super) fn edge_handles(parent: &Node, child: &Node) -> (HandlePosition, HandlePosition) {
    let angle = super::order::position_angle(parent.center(), child.center());
    let source = handle_from_angle(angle);
    (source, source.opposite())
}

struct RadialPlacement {
    position: Point,
    angle: f32,
}

#[allow(clippy::too_many_arguments)]
fn place_children(
    parent_center: Point,
    children: &[usize],
    descendants: &[Node],
    children_map: &HashMap<String, Vec<usize>>,
    depth: u32,
    options: &LayoutOptions,
    start_angle: f32,
    spread_angle: f32,
    placed: &mut HashMap<String, RadialPlacement>,
) {
    if children.is_empty() {
        return;
    }

    let radius = options.base_radius + (depth as f32 - 1.0) * options.radius_increment;

    for (index, &child_idx) in children.iter().enumerate() {
        let child = &descendants[child_idx];
        let angle = child_angle(index, children.len(), start_angle, spread_angle);
        let (dx, dy) = angle_to_offset(angle, radius);

        let center = Point::new(parent_center.x + dx, parent_center.y + dy);
        let position = Point::new(
            center.x - child.size.width / 2.0,
            center.y - child.size.height / 2.0,
        );
        placed.insert(child.id.clone(), RadialPlacement { position, angle });

        if let Some(grandchildren) = children_map.get(&child.id) {
            // Deeper rings get a narrower wedge centered on this child.
            let child_spread =
                (spread_angle / children.len() as f32 * 1.5).min(MAX_CHILD_SPREAD);
            let child_start = angle - child_spread / 2.0;
            place_children(
                center,
                grandchildren,
                descendants,
                children_map,
                depth + 1,
                options,
                child_start,
                child_spread,
                placed,
            );
        }
    }
}

/// Radial layout: the root's children ring it on a full circle, each deeper
/// generation on a larger ring inside a wedge centered on its parent.
pub(super) fn compute_radial_layout(
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

    let children_map = children_by_parent(descendants);
    let mut placed: HashMap<String, RadialPlacement> = HashMap::new();

    if let Some(root_children) = children_map.get(&root.id) {
        place_children(
            root.center(),
            root_children,
            descendants,
            &children_map,
            1,
            options,
            0.0,
            360.0,
            &mut placed,
        );
    }

    let mut nodes = Vec::with_capacity(descendants.len() + 1);
    let mut laid_root = root.clone();
    laid_root.side = Side::Mid;
    nodes.push(laid_root);
    for node in descendants {
        let mut node = node.clone();
        if let Some(placement) = placed.get(&node.id) {
            node.position = placement.position;
            node.side = side_from_angle(placement.angle);
        }
        nodes.push(node);
    }

    LayoutResult {
        nodes,
        edges: edges.to_vec(),
    }
}
