use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Outcome of testing one cursor sample against the allowed region.
///
/// Produced fresh per sample and never mutated; the caller decides whether
/// to persist it as an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcursionResult {
    pub is_excursion: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_outside: Option<f64>,
}

impl ExcursionResult {
    /// The cursor is inside the allowed region.
    pub const CLEAR: Self = Self {
        is_excursion: false,
        boundary_point: None,
        distance_outside: None,
    };

    pub fn outside(boundary_point: Point, distance_outside: f64) -> Self {
        Self {
            is_excursion: true,
            boundary_point: Some(boundary_point),
            distance_outside: Some(distance_outside),
        }
    }
}

/// Which gate produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcursionKind {
    /// Cursor came within the clearance radius of a lasso icon.
    IconProximity,
    /// Cursor cut through the target cluster or took the straight bar.
    Shortcut,
    /// Cursor left a tunnel corridor.
    Boundary,
    /// Cursor left the active cascading-menu windows.
    Menu,
}

impl ExcursionKind {
    /// Anti-cheat violations fail the attempt even in mark-only phases.
    pub fn is_anti_cheat(self) -> bool {
        matches!(self, Self::IconProximity | Self::Shortcut)
    }
}

/// A positive excursion tagged with the gate that fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ExcursionKind,
    pub boundary_point: Point,
    pub distance_outside: f64,
}

impl Violation {
    /// Tag a checker result; `None` when the result is not an excursion.
    pub fn from_result(kind: ExcursionKind, result: ExcursionResult) -> Option<Self> {
        if !result.is_excursion {
            return None;
        }
        Some(Self {
            kind,
            boundary_point: result.boundary_point.unwrap_or_default(),
            distance_outside: result.distance_outside.unwrap_or_default(),
        })
    }

    pub fn to_result(self) -> ExcursionResult {
        ExcursionResult::outside(self.boundary_point, self.distance_outside)
    }
}
