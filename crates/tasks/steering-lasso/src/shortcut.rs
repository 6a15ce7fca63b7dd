use steering_core::excursion::ExcursionResult;
use steering_core::geometry::{BOUNDARY_EPSILON, Point, Rect, nearest_point_on_polygon, point_in_polygon};

use crate::layout::LassoLayout;

/// Thin horizontal tripwire between `start` and `end`, reaching `icon_radius`
/// past both in x and centered on their mid height.
pub fn straight_bar(start: Point, end: Point, icon_radius: f64, height: f64) -> Rect {
    let mid_y = (start.y + end.y) / 2.0;
    Rect::new(
        Point::new(start.x.min(end.x) - icon_radius, mid_y - height / 2.0),
        Point::new(start.x.max(end.x) + icon_radius, mid_y + height / 2.0),
    )
}

/// Interior-cut check. Each cluster forbids its outline polygon plus a band
/// of `half_width` around the outline, so single-row clusters and one-cell
/// arms still have an interior. The band's outer edge is allowed.
///
/// The boundary point is where the cursor would leave the forbidden region
/// across the nearest outline edge.
pub fn check_interior_cut(cursor: Point, polygons: &[Vec<Point>], half_width: f64) -> ExcursionResult {
    for polygon in polygons {
        let Some(edge) = nearest_point_on_polygon(cursor, polygon) else {
            continue;
        };
        let d = cursor.distance(edge);
        if point_in_polygon(cursor, polygon) && d > BOUNDARY_EPSILON {
            // Out through the edge, then across the band beyond it
            let outward = (edge - cursor).normalized_or_zero();
            return ExcursionResult::outside(edge + outward * half_width, d + half_width);
        }
        if d < half_width - BOUNDARY_EPSILON {
            let mut away = (cursor - edge).normalized_or_zero();
            if away == Point::ZERO {
                away = Point::new(0.0, -1.0);
            }
            return ExcursionResult::outside(edge + away * half_width, half_width - d);
        }
    }
    ExcursionResult::CLEAR
}

/// Straight-bar check: is the cursor inside the tripwire rectangle?
pub fn check_straight_bar(cursor: Point, bar: &Rect) -> ExcursionResult {
    if !bar.contains(cursor) {
        return ExcursionResult::CLEAR;
    }
    let edge = bar.nearest_edge_point(cursor);
    ExcursionResult::outside(edge, cursor.distance(edge))
}

/// Both shortcut gates, interior cut first. The first positive result wins.
pub fn check_lasso_shortcut(
    cursor: Point,
    layout: &LassoLayout,
    start: Point,
    end: Point,
    bar_height: f64,
) -> ExcursionResult {
    if !cursor.is_finite() {
        return ExcursionResult::CLEAR;
    }
    let cut = check_interior_cut(cursor, &layout.polygons, layout.cut_half_width);
    if cut.is_excursion {
        return cut;
    }
    let bar = straight_bar(start, end, layout.icon_radius, bar_height);
    check_straight_bar(cursor, &bar)
}
