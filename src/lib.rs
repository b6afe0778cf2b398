pub mod config;
pub mod layout;
pub mod model;

pub use config::{LayoutOptions, LayoutProfile, OrderAxis, profile};
pub use layout::{LayoutError, default_child_side, edge_handles, layout_all_trees};
pub use model::{
    Edge, HandlePosition, LayoutResult, LayoutType, Node, NodeKind, Point, Side, Size,
};
