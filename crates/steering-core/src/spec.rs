use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Task geometry family, used to select the checker pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TunnelKind {
    Curved,
    Corner,
    Sequential,
    Lasso,
    CascadingMenu,
}

/// Description of one trial's geometry. Tagged by `kind` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TunnelSpec {
    Curved(CurvedSpec),
    Corner(CornerSpec),
    Sequential(SequentialSpec),
    Lasso(LassoSpec),
    CascadingMenu(MenuSpec),
}

impl TunnelSpec {
    pub fn kind(&self) -> TunnelKind {
        match self {
            Self::Curved(_) => TunnelKind::Curved,
            Self::Corner(_) => TunnelKind::Corner,
            Self::Sequential(_) => TunnelKind::Sequential,
            Self::Lasso(_) => TunnelKind::Lasso,
            Self::CascadingMenu(_) => TunnelKind::CascadingMenu,
        }
    }
}

/// Sine-curved tunnel: `y = y_base + curvature * sin(2π x / wavelength)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvedSpec {
    pub width: f64,
    pub curvature: f64,
    /// Overrides the scene's default wavelength.
    #[serde(default)]
    pub wavelength: Option<f64>,
}

/// Fixed-width corridor of horizontal runs joined by sharp 90° turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerSpec {
    pub width: f64,
    pub num_corners: u32,
    pub corner_offset: f64,
}

/// Tunnel split into equal x-ranges, one width per segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequentialSpec {
    pub segment_widths: Vec<f64>,
    #[serde(default)]
    pub variation: SegmentVariation,
}

/// What changes between sequential segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "segment_type", rename_all = "snake_case")]
pub enum SegmentVariation {
    /// Flat centerline; only the per-segment width differs.
    #[default]
    Width,
    /// First segment flat, each later segment a single quadratic bump of
    /// height `amplitude`.
    Curvature { amplitude: f64 },
}

/// Lasso selection grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LassoSpec {
    /// Rows of whitespace-separated symbols: `X` target, `O` distractor,
    /// `.` blank.
    pub grid_layout: Vec<String>,
    pub icon_radius: f64,
    pub icon_spacing: f64,
    /// Center of the cell at row 0, column 0.
    pub grid_origin: Point,
    /// Overrides `icon_spacing - 2 * icon_radius` as the loop margin.
    #[serde(default)]
    pub margin: Option<f64>,
}

/// Two-level cascading menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSpec {
    pub main_menu_size: usize,
    pub sub_menu_size: usize,
    pub target_main_index: usize,
    pub target_sub_index: usize,
    /// `[width, height]` of the main menu window.
    pub main_menu_window_size: [f64; 2],
    /// `[width, height]` of the submenu window.
    pub sub_menu_window_size: [f64; 2],
    /// Top-left corner of the main menu window.
    pub main_menu_origin: Point,
}
