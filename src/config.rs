use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::model::{HandlePosition, LayoutType, Side};

/// Spacing knobs for a layout pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Gap between a parent and its children along the growth axis.
    pub horizontal_spacing: f32,
    /// Gap between adjacent sibling subtrees along the perpendicular axis.
    pub vertical_spacing: f32,
    /// Radial layouts: distance from a root to its first ring of children.
    pub base_radius: f32,
    /// Radial layouts: additional distance per tree level.
    pub radius_increment: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            horizontal_spacing: 200.0,
            vertical_spacing: 80.0,
            base_radius: 200.0,
            radius_increment: 150.0,
        }
    }
}

/// Axis used when reconstructing sibling order from on-screen positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAxis {
    X,
    Y,
    Angle,
}

/// Static behavior profile of one layout type: which handles it connects,
/// how it orders siblings, and which sides children may occupy.
#[derive(Debug, Clone)]
pub struct LayoutProfile {
    pub source_handles: &'static [HandlePosition],
    pub target_handles: &'static [HandlePosition],
    pub order_axis: OrderAxis,
    pub ascending: bool,
    pub allowed_sides: &'static [Side],
    pub default_side: Side,
    /// Whether children are split across two opposing sides.
    pub balanced: bool,
    pub radial: bool,
}

static LAYOUT_PROFILES: Lazy<HashMap<LayoutType, LayoutProfile>> = Lazy::new(|| {
    use HandlePosition::{Bottom, Left, Right, Top};

    let mut profiles = HashMap::new();
    profiles.insert(
        LayoutType::HorizontalBalanced,
        LayoutProfile {
            source_handles: &[Left, Right],
            target_handles: &[Left, Right],
            order_axis: OrderAxis::Y,
            ascending: true,
            allowed_sides: &[Side::Left, Side::Right],
            default_side: Side::Right,
            balanced: true,
            radial: false,
        },
    );
    profiles.insert(
        LayoutType::VerticalBalanced,
        LayoutProfile {
            source_handles: &[Top, Bottom],
            target_handles: &[Top, Bottom],
            order_axis: OrderAxis::X,
            ascending: true,
            allowed_sides: &[Side::Top, Side::Bottom],
            default_side: Side::Bottom,
            balanced: true,
            radial: false,
        },
    );
    profiles.insert(
        LayoutType::RightOnly,
        LayoutProfile {
            source_handles: &[Right],
            target_handles: &[Left],
            order_axis: OrderAxis::Y,
            ascending: true,
            allowed_sides: &[Side::Right],
            default_side: Side::Right,
            balanced: false,
            radial: false,
        },
    );
    profiles.insert(
        LayoutType::LeftOnly,
        LayoutProfile {
            source_handles: &[Left],
            target_handles: &[Right],
            order_axis: OrderAxis::Y,
            ascending: true,
            allowed_sides: &[Side::Left],
            default_side: Side::Left,
            balanced: false,
            radial: false,
        },
    );
    profiles.insert(
        LayoutType::TopOnly,
        LayoutProfile {
            source_handles: &[Top],
            target_handles: &[Bottom],
            order_axis: OrderAxis::X,
            ascending: true,
            allowed_sides: &[Side::Top],
            default_side: Side::Top,
            balanced: false,
            radial: false,
        },
    );
    profiles.insert(
        LayoutType::BottomOnly,
        LayoutProfile {
            source_handles: &[Bottom],
            target_handles: &[Top],
            order_axis: OrderAxis::X,
            ascending: true,
            allowed_sides: &[Side::Bottom],
            default_side: Side::Bottom,
            balanced: false,
            radial: false,
        },
    );
    profiles.insert(
        LayoutType::OrgChart,
        LayoutProfile {
            source_handles: &[Bottom],
            target_handles: &[Top],
            order_axis: OrderAxis::X,
            ascending: true,
            allowed_sides: &[Side::Bottom],
            default_side: Side::Bottom,
            balanced: false,
            radial: false,
        },
    );
    profiles.insert(
        LayoutType::Radial,
        LayoutProfile {
            source_handles: &[Top, Bottom, Left, Right],
            target_handles: &[Top, Bottom, Left, Right],
            // Clockwise from 12 o'clock.
            order_axis: OrderAxis::Angle,
            ascending: true,
            allowed_sides: &[Side::Left, Side::Right],
            default_side: Side::Right,
            balanced: false,
            radial: true,
        },
    );
    profiles.insert(
        LayoutType::FreeForm,
        LayoutProfile {
            source_handles: &[Left, Right],
            target_handles: &[Left, Right],
            order_axis: OrderAxis::Y,
            ascending: true,
            allowed_sides: &[Side::Left, Side::Right],
            default_side: Side::Right,
            balanced: false,
            radial: false,
        },
    );
    profiles
});

/// The behavior profile for a layout type.
pub fn profile(layout: LayoutType) -> &'static LayoutProfile {
    &LAYOUT_PROFILES[&layout]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layout_type_has_a_profile() {
        for layout in [
            LayoutType::HorizontalBalanced,
            LayoutType::VerticalBalanced,
            LayoutType::RightOnly,
            LayoutType::LeftOnly,
            LayoutType::TopOnly,
            LayoutType::BottomOnly,
            LayoutType::OrgChart,
            LayoutType::Radial,
            LayoutType::FreeForm,
        ] {
            let profile = profile(layout);
            assert!(!profile.allowed_sides.is_empty(), "{layout:?}");
        }
    }

    #[test]
    fn balanced_profiles_span_two_sides() {
        assert_eq!(
            profile(LayoutType::HorizontalBalanced).allowed_sides,
            &[Side::Left, Side::Right]
        );
        assert_eq!(
            profile(LayoutType::VerticalBalanced).allowed_sides,
            &[Side::Top, Side::Bottom]
        );
    }

    #[test]
    fn radial_orders_by_angle() {
        assert_eq!(profile(LayoutType::Radial).order_axis, OrderAxis::Angle);
    }
}
