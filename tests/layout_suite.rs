use std::collections::HashMap;

use mindmap_layout::{
    Edge, LayoutError, LayoutOptions, LayoutResult, LayoutType, Node, NodeKind, Point, Side, Size,
    layout_all_trees,
};

fn root(id: &str, x: f32, y: f32, width: f32, height: f32) -> Node {
    let mut node = Node::new(id, NodeKind::Root);
    node.position = Point::new(x, y);
    node.size = Size::new(width, height);
    node
}

fn child(id: &str, parent: &str, order: u32, width: f32, height: f32) -> Node {
    let mut node = Node::new(id, NodeKind::Text);
    node.parent_id = Some(parent.to_string());
    node.sibling_order = Some(order);
    node.size = Size::new(width, height);
    node
}

fn find<'a>(result: &'a LayoutResult, id: &str) -> &'a Node {
    result
        .nodes
        .iter()
        .find(|node| node.id == id)
        .unwrap_or_else(|| panic!("node {id} missing from result"))
}

fn sample_forest() -> Vec<Node> {
    vec![
        root("r", 0.0, 0.0, 100.0, 40.0),
        child("a", "r", 0, 80.0, 30.0),
        child("b", "r", 1, 80.0, 30.0),
        child("c", "r", 2, 80.0, 30.0),
        child("a1", "a", 0, 60.0, 24.0),
        child("a2", "a", 1, 60.0, 24.0),
        child("b1", "b", 0, 60.0, 24.0),
    ]
}

const ALL_LAYOUTS: [LayoutType; 9] = [
    LayoutType::HorizontalBalanced,
    LayoutType::VerticalBalanced,
    LayoutType::RightOnly,
    LayoutType::LeftOnly,
    LayoutType::TopOnly,
    LayoutType::BottomOnly,
    LayoutType::OrgChart,
    LayoutType::Radial,
    LayoutType::FreeForm,
];

#[test]
fn relayout_of_own_output_is_stable() {
    let options = LayoutOptions::default();
    for layout in ALL_LAYOUTS {
        let first = layout_all_trees(layout, &sample_forest(), &[], &options).unwrap();
        let second = layout_all_trees(layout, &first.nodes, &first.edges, &options).unwrap();

        let positions: HashMap<&str, Point> = first
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node.position))
            .collect();
        for node in &second.nodes {
            let previous = positions[node.id.as_str()];
            assert!(
                (node.position.x - previous.x).abs() < 1e-3
                    && (node.position.y - previous.y).abs() < 1e-3,
                "{layout:?}/{}: {:?} drifted from {:?}",
                node.id,
                node.position,
                previous,
            );
        }
    }
}

#[test]
fn roots_never_move() {
    let options = LayoutOptions::default();
    for layout in ALL_LAYOUTS {
        let mut nodes = sample_forest();
        nodes[0].position = Point::new(37.0, -11.0);
        let result = layout_all_trees(layout, &nodes, &[], &options).unwrap();
        assert_eq!(
            find(&result, "r").position,
            Point::new(37.0, -11.0),
            "{layout:?}",
        );
    }
}

#[test]
fn adjacent_sibling_subtrees_keep_the_configured_gap() {
    let options = LayoutOptions {
        horizontal_spacing: 120.0,
        vertical_spacing: 48.0,
        ..LayoutOptions::default()
    };
    let result =
        layout_all_trees(LayoutType::RightOnly, &sample_forest(), &[], &options).unwrap();

    // Leaf-to-leaf bounds of each root child's subtree along Y.
    let bounds = |ids: &[&str]| -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for id in ids {
            let node = find(&result, id);
            min = min.min(node.position.y);
            max = max.max(node.position.y + node.size.height);
        }
        (min, max)
    };
    let (_, a_max) = bounds(&["a1", "a2"]);
    let (b_min, b_max) = bounds(&["b1"]);
    let (c_min, _) = bounds(&["c"]);

    assert!((b_min - a_max - 48.0).abs() <= 0.1);
    assert!((c_min - b_max - 48.0).abs() <= 0.1);
}

#[test]
fn right_only_stamps_every_descendant_right() {
    let result = layout_all_trees(
        LayoutType::RightOnly,
        &sample_forest(),
        &[],
        &LayoutOptions::default(),
    )
    .unwrap();
    for node in result.nodes.iter().filter(|node| !node.is_root()) {
        assert_eq!(node.side, Side::Right, "{}", node.id);
    }
    assert_eq!(find(&result, "r").side, Side::Mid);
}

#[test]
fn radial_sides_match_the_angle_halves() {
    let result = layout_all_trees(
        LayoutType::Radial,
        &sample_forest(),
        &[],
        &LayoutOptions::default(),
    )
    .unwrap();

    let parent_of: HashMap<&str, &str> = result
        .nodes
        .iter()
        .filter_map(|node| {
            node.parent_id
                .as_deref()
                .map(|parent| (node.id.as_str(), parent))
        })
        .collect();

    for node in result.nodes.iter().filter(|node| !node.is_root()) {
        let parent = find(&result, parent_of[node.id.as_str()]);
        let delta_x = node.center().x - parent.center().x;
        let delta_y = node.center().y - parent.center().y;
        let mut angle = delta_x.atan2(-delta_y).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        let expected = if angle > 180.0 { Side::Left } else { Side::Right };
        assert_eq!(node.side, expected, "{} at {angle}", node.id);
    }
}

#[test]
fn spatial_order_survives_a_relayout() {
    // Positions imply top-to-bottom order [b, c, a]; stale sibling_order
    // fields say otherwise and must lose.
    let mut nodes = vec![
        root("r", 0.0, 0.0, 100.0, 40.0),
        child("a", "r", 0, 80.0, 30.0),
        child("b", "r", 1, 80.0, 30.0),
        child("c", "r", 2, 80.0, 30.0),
    ];
    nodes[1].position = Point::new(200.0, 300.0);
    nodes[2].position = Point::new(200.0, -100.0);
    nodes[3].position = Point::new(200.0, 100.0);

    let result = layout_all_trees(
        LayoutType::RightOnly,
        &nodes,
        &[],
        &LayoutOptions::default(),
    )
    .unwrap();

    let b = find(&result, "b");
    let c = find(&result, "c");
    let a = find(&result, "a");
    assert!(b.position.y < c.position.y);
    assert!(c.position.y < a.position.y);
    assert_eq!(b.sibling_order, Some(0));
    assert_eq!(c.sibling_order, Some(1));
    assert_eq!(a.sibling_order, Some(2));
}

#[test]
fn orphans_keep_their_position_and_side() {
    let mut orphan = child("stray", "nobody", 0, 40.0, 20.0);
    orphan.position = Point::new(640.0, 480.0);
    orphan.side = Side::Left;
    let mut nodes = sample_forest();
    nodes.push(orphan);

    for layout in ALL_LAYOUTS {
        let result = layout_all_trees(layout, &nodes, &[], &LayoutOptions::default()).unwrap();
        let stray = find(&result, "stray");
        assert_eq!(stray.position, Point::new(640.0, 480.0), "{layout:?}");
        assert_eq!(stray.side, Side::Left, "{layout:?}");
    }
}

#[test]
fn cyclic_chains_fail_instead_of_looping() {
    let mut nodes = sample_forest();
    nodes.push(child("x", "y", 0, 10.0, 10.0));
    nodes.push(child("y", "x", 0, 10.0, 10.0));

    let err = layout_all_trees(
        LayoutType::OrgChart,
        &nodes,
        &[],
        &LayoutOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LayoutError::CyclicHierarchy { .. }));
}

#[test]
fn right_only_pair_stacks_beside_the_root() {
    let mut c1 = child("c1", "r", 0, 80.0, 30.0);
    c1.side = Side::Right;
    let mut c2 = child("c2", "r", 1, 80.0, 30.0);
    c2.side = Side::Right;
    let nodes = vec![root("r", 0.0, 0.0, 100.0, 40.0), c1, c2];
    let options = LayoutOptions {
        horizontal_spacing: 20.0,
        vertical_spacing: 20.0,
        ..LayoutOptions::default()
    };

    let result = layout_all_trees(LayoutType::RightOnly, &nodes, &[], &options).unwrap();
    let c1 = find(&result, "c1");
    let c2 = find(&result, "c2");
    assert_eq!(c1.position.x, 120.0);
    assert_eq!(c2.position.x, 120.0);
    assert!((c2.position.y - (c1.position.y + 30.0) - 20.0).abs() < 1e-3);
    // Vertically centered on the root.
    let pair_center = (c1.position.y + c2.position.y + 30.0) / 2.0;
    assert!((pair_center - 20.0).abs() < 1e-3);
}

#[test]
fn radial_triple_rings_the_root_at_base_radius() {
    let nodes = vec![
        root("r", 0.0, 0.0, 0.0, 0.0),
        child("c0", "r", 0, 0.0, 0.0),
        child("c1", "r", 1, 0.0, 0.0),
        child("c2", "r", 2, 0.0, 0.0),
    ];
    let options = LayoutOptions {
        base_radius: 100.0,
        ..LayoutOptions::default()
    };

    let result = layout_all_trees(LayoutType::Radial, &nodes, &[], &options).unwrap();
    for (id, expected_angle) in [("c0", 60.0_f32), ("c1", 180.0), ("c2", 300.0)] {
        let node = find(&result, id);
        let mut angle = node.position.x.atan2(-node.position.y).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        assert!((angle - expected_angle).abs() < 1e-2, "{id}: {angle}");
        let distance = (node.position.x.powi(2) + node.position.y.powi(2)).sqrt();
        assert!((distance - 100.0).abs() < 1e-2, "{id}: {distance}");
    }
}

#[test]
fn org_chart_centers_the_children_span_under_the_root() {
    let nodes = vec![
        root("r", 0.0, 0.0, 100.0, 40.0),
        child("left", "r", 0, 50.0, 30.0),
        child("right", "r", 1, 70.0, 30.0),
    ];
    let options = LayoutOptions {
        horizontal_spacing: 10.0,
        vertical_spacing: 60.0,
        ..LayoutOptions::default()
    };

    let result = layout_all_trees(LayoutType::OrgChart, &nodes, &[], &options).unwrap();
    // Span 50 + 10 + 70 = 130 centered on root center 50.
    assert!((find(&result, "left").position.x - (-15.0)).abs() < 1e-3);
    assert!((find(&result, "right").position.x - 45.0).abs() < 1e-3);
}

#[test]
fn json_snapshot_round_trips_through_a_layout_pass() {
    let raw = include_str!("fixtures/forest.json");
    let snapshot: LayoutResult = serde_json::from_str(raw).expect("fixture parse failed");

    let result = layout_all_trees(
        LayoutType::HorizontalBalanced,
        &snapshot.nodes,
        &snapshot.edges,
        &LayoutOptions::default(),
    )
    .unwrap();

    assert_eq!(result.nodes.len(), snapshot.nodes.len());
    assert_eq!(result.edges.len(), snapshot.edges.len());
    // Root anchored, both sides populated.
    assert_eq!(find(&result, "root").position, Point::new(0.0, 0.0));
    let sides: Vec<Side> = result
        .nodes
        .iter()
        .filter(|node| node.parent_id.as_deref() == Some("root"))
        .map(|node| node.side)
        .collect();
    assert!(sides.contains(&Side::Left));
    assert!(sides.contains(&Side::Right));

    // And the output survives serialization.
    let serialized = serde_json::to_string(&result).unwrap();
    let reparsed: LayoutResult = serde_json::from_str(&serialized).unwrap();
    assert_eq!(reparsed.nodes.len(), result.nodes.len());
}

#[test]
fn two_trees_and_their_edges_lay_out_independently() {
    let nodes = vec![
        root("r1", 0.0, 0.0, 100.0, 40.0),
        child("a", "r1", 0, 80.0, 30.0),
        root("r2", 2000.0, 0.0, 100.0, 40.0),
        child("b", "r2", 0, 80.0, 30.0),
    ];
    let edges = vec![
        Edge::new("e1", "r1", "a"),
        Edge::new("e2", "r2", "b"),
        Edge::new("e3", "a", "b"),
    ];

    let result = layout_all_trees(
        LayoutType::BottomOnly,
        &nodes,
        &edges,
        &LayoutOptions::default(),
    )
    .unwrap();

    assert!(find(&result, "a").position.y > 0.0);
    assert!(find(&result, "b").position.y > 0.0);
    assert!(find(&result, "b").position.x > 1000.0);
    // The cross-tree edge still exists and was re-handled from positions.
    assert_eq!(result.edges.len(), 3);
}
