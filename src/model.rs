use serde::{Deserialize, Serialize};

/// Top-left screen coordinate of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Externally measured node size. Missing measurements are treated as 0x0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The half-plane or canonical direction a node occupies relative to its
/// root. Roots are always `Mid`; every layout pass recomputes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    Mid,
}

impl Side {
    /// The side an edge enters a child from, given the side the child sits
    /// on relative to its parent. `Mid` has no opposite and maps to itself.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Mid => Self::Mid,
        }
    }
}

/// Cardinal attachment point where a connector meets a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl HandlePosition {
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Node variant tag. `Root` anchors a tree and never has a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Text,
    Shape,
    Image,
}

/// A positioned, sized item in the forest. The layout engine mutates only
/// `position`, `side` and `sibling_order`; everything else is caller input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub position: Point,
    #[serde(default)]
    pub size: Size,
    /// Depth from the owning root (0 for the root itself). Caller-supplied
    /// metadata; the engine derives depth from traversal and never writes it.
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub side: Side,
    /// Last-known relative order among same-parent, same-side siblings.
    /// Recomputed from on-screen positions before every layout pass.
    #[serde(default)]
    pub sibling_order: Option<u32>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Point::default(),
            size: Size::default(),
            level: 0,
            parent_id: None,
            side: Side::Mid,
            sibling_order: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.size.width / 2.0,
            self.position.y + self.size.height / 2.0,
        )
    }
}

/// A directed parent-to-child connector. Handles are recomputed by the
/// active strategy whenever positions or sides change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: HandlePosition,
    pub target_handle: HandlePosition,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: HandlePosition::Right,
            target_handle: HandlePosition::Left,
        }
    }
}

/// The layout policies the engine knows. `FreeForm` is the designated
/// no-layout mode: a pure passthrough apart from the sibling-order refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    HorizontalBalanced,
    VerticalBalanced,
    RightOnly,
    LeftOnly,
    TopOnly,
    BottomOnly,
    OrgChart,
    Radial,
    FreeForm,
}

/// Full replacement snapshot returned by a layout pass. Same identities as
/// the input, with updated positions, sides and handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
