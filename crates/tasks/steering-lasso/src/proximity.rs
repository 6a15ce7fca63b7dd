use steering_core::excursion::ExcursionResult;
use steering_core::geometry::{BOUNDARY_EPSILON, Point};

use crate::layout::LassoLayout;

/// Minimum-clearance gate: the cursor must keep `clearance_factor *
/// icon_radius` away from every icon center, target or distractor.
///
/// The boundary point is on the clearance circle of the closest offending
/// icon; `distance_outside` is how far the cursor has intruded.
pub fn check_lasso_collision(
    cursor: Point,
    layout: &LassoLayout,
    clearance_factor: f64,
) -> ExcursionResult {
    if !cursor.is_finite() {
        return ExcursionResult::CLEAR;
    }
    let clearance = clearance_factor * layout.icon_radius;

    let mut closest: Option<(Point, f64)> = None;
    for &icon in &layout.icons {
        let d = icon.distance(cursor);
        if d < clearance - BOUNDARY_EPSILON && closest.is_none_or(|(_, best)| d < best) {
            closest = Some((icon, d));
        }
    }

    match closest {
        Some((icon, d)) => {
            let away = (cursor - icon).normalized_or_zero();
            // Dead center has no direction; report the top of the circle.
            let away = if away == Point::ZERO {
                Point::new(0.0, -1.0)
            } else {
                away
            };
            ExcursionResult::outside(icon + away * clearance, clearance - d)
        },
        None => ExcursionResult::CLEAR,
    }
}
