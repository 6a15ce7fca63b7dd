use steering_core::error::{
    SpecError, ensure_finite, ensure_non_negative, ensure_positive, ensure_sample_budget,
};
use steering_core::geometry::{Point, Rect};
use steering_core::spec::LassoSpec;

use crate::grid::{LassoGrid, Target};
use crate::perimeter::target_polygons;

/// Everything derived from a lasso spec: icons, the guide loop, the explicit
/// start and end points and the anti-cheat polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct LassoLayout {
    pub targets: Vec<Target>,
    /// Centers of all visible icons (targets and distractors).
    pub icons: Vec<Point>,
    pub icon_radius: f64,
    pub icon_spacing: f64,
    pub margin: f64,
    /// Target bounding box inflated by `icon_radius + margin`.
    pub bounds: Rect,
    /// Clockwise closed loop around `bounds`; first point equals last.
    pub path: Vec<Point>,
    pub start: Point,
    pub end: Point,
    /// One clockwise outline of target centers per connected cluster.
    pub polygons: Vec<Vec<Point>>,
    /// Reach of the forbidden band around each outline. Never exceeds
    /// `icon_radius + margin`, so the guide loop stays outside it.
    pub cut_half_width: f64,
}

impl LassoLayout {
    /// Build the layout. `margin_override` applies when the `LassoSpec` carries no
    /// margin of its own; otherwise the margin is `icon_spacing - 2 * icon_radius`.
    pub fn generate(
        spec: &LassoSpec,
        step: f64,
        margin_override: Option<f64>,
    ) -> Result<Self, SpecError> {
        let icon_radius = ensure_positive("icon_radius", spec.icon_radius)?;
        let icon_spacing = ensure_positive("icon_spacing", spec.icon_spacing)?;
        let step = ensure_positive("step_size", step)?;
        ensure_finite("grid_origin.x", spec.grid_origin.x)?;
        ensure_finite("grid_origin.y", spec.grid_origin.y)?;
        let margin = ensure_non_negative(
            "margin",
            spec.margin
                .or(margin_override)
                .unwrap_or(icon_spacing - 2.0 * icon_radius),
        )?;

        let grid = LassoGrid::parse(&spec.grid_layout)?;
        let targets = grid.targets(spec.grid_origin, icon_spacing);
        let Some(&first) = targets.first() else {
            return Err(SpecError::NoTargets);
        };

        let inflate = icon_radius + margin;
        let bounds = target_bounds(&targets, inflate);
        ensure_sample_budget(2.0 * (bounds.width() + bounds.height()) / step + 4.0)?;
        let path = rect_loop(&bounds, step);

        // Start sits on the loop's top edge above the gap right of the
        // top-left target; end is its mirror image above the loop, so the
        // straight bar between them never touches the loop.
        let gap_x = targets
            .iter()
            .skip(1)
            .find(|t| t.row == first.row)
            .map_or(first.x + icon_spacing / 2.0, |next| (first.x + next.x) / 2.0);
        let start = Point::new(gap_x, bounds.top());
        let end = Point::new(gap_x, bounds.top() - inflate);

        let polygons = target_polygons(&grid, spec.grid_origin, icon_spacing);
        tracing::debug!(
            targets = targets.len(),
            points = path.len(),
            clusters = polygons.len(),
            margin,
            "Generated lasso layout"
        );

        Ok(Self {
            icons: grid.icon_centers(spec.grid_origin, icon_spacing),
            targets,
            icon_radius,
            icon_spacing,
            margin,
            bounds,
            path,
            start,
            end,
            polygons,
            cut_half_width: (icon_spacing / 2.0).min(inflate),
        })
    }
}

fn target_bounds(targets: &[Target], inflate: f64) -> Rect {
    let (mut min, mut max) = (
        Point::new(f64::INFINITY, f64::INFINITY),
        Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    );
    for t in targets {
        min = Point::new(min.x.min(t.x), min.y.min(t.y));
        max = Point::new(max.x.max(t.x), max.y.max(t.y));
    }
    Rect::new(
        Point::new(min.x - inflate, min.y - inflate),
        Point::new(max.x + inflate, max.y + inflate),
    )
}

/// Clockwise loop from the top-left corner: top edge left to right, right
/// edge downwards, bottom edge right to left, left edge upwards, closed on
/// the starting corner. Each edge is divided evenly so corners land exactly.
fn rect_loop(rect: &Rect, step: f64) -> Vec<Point> {
    let corners = [
        rect.min,
        Point::new(rect.right(), rect.top()),
        rect.max,
        Point::new(rect.left(), rect.bottom()),
    ];
    let mut path = Vec::new();
    for i in 0..4 {
        let (from, to) = (corners[i], corners[(i + 1) % 4]);
        let divisions = (from.distance(to) / step).ceil().max(1.0) as usize;
        path.extend((0..divisions).map(|k| from.lerp(to, k as f64 / divisions as f64)));
    }
    path.push(corners[0]);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(rows: &[&str]) -> LassoSpec {
        LassoSpec {
            grid_layout: rows.iter().map(|r| r.to_string()).collect(),
            icon_radius: 0.015,
            icon_spacing: 0.035,
            grid_origin: Point::new(0.1, 0.05),
            margin: None,
        }
    }

    #[test]
    fn loop_is_closed() {
        let layout = LassoLayout::generate(&spec(&[". X X .", ". X X ."]), 0.002, None).unwrap();
        assert_eq!(layout.path[0], *layout.path.last().unwrap());
        assert!(layout.path.len() > 4);
    }

    #[test]
    fn loop_runs_clockwise_from_top_left() {
        let layout = LassoLayout::generate(&spec(&["X X"]), 0.002, None).unwrap();
        let b = layout.bounds;
        assert_eq!(layout.path[0], b.min);
        // First edge moves right along the top
        assert_eq!(layout.path[1].y, b.top());
        assert!(layout.path[1].x > b.left());
        assert!(layout.path.contains(&Point::new(b.right(), b.top())));
        assert!(layout.path.contains(&b.max));
        // Shoelace area is positive for clockwise on a +y-down screen
        let area: f64 = layout
            .path
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum();
        assert!(area > 0.0);
    }

    #[test]
    fn bounds_inflated_by_radius_plus_margin() {
        let layout = LassoLayout::generate(&spec(&["X X"]), 0.002, None).unwrap();
        // margin = 0.035 - 0.03 = 0.005, inflate = 0.02
        assert!((layout.margin - 0.005).abs() < 1e-12);
        assert!((layout.bounds.left() - 0.08).abs() < 1e-12);
        assert!((layout.bounds.right() - 0.155).abs() < 1e-12);
        assert!((layout.bounds.top() - 0.03).abs() < 1e-12);
        assert!((layout.bounds.bottom() - 0.07).abs() < 1e-12);
    }

    #[test]
    fn margin_precedence() {
        let mut s = spec(&["X X"]);
        let layout = LassoLayout::generate(&s, 0.002, Some(0.01)).unwrap();
        assert_eq!(layout.margin, 0.01);
        s.margin = Some(0.02);
        let layout = LassoLayout::generate(&s, 0.002, Some(0.01)).unwrap();
        assert_eq!(layout.margin, 0.02);
    }

    #[test]
    fn start_and_end_straddle_top_edge_above_gap() {
        let layout = LassoLayout::generate(&spec(&[". X X ."]), 0.002, None).unwrap();
        let gap_x = 0.1 + 1.5 * 0.035;
        assert!((layout.start.x - gap_x).abs() < 1e-12);
        assert_eq!(layout.start.y, layout.bounds.top());
        assert_eq!(layout.end.x, layout.start.x);
        assert!((layout.start.y - layout.end.y - 0.02).abs() < 1e-12);
        assert_ne!(layout.start, layout.path[0]);
    }

    #[test]
    fn lone_top_target_uses_half_spacing_gap() {
        let layout = LassoLayout::generate(&spec(&["X . .", "X X X"]), 0.002, None).unwrap();
        assert!((layout.start.x - (0.1 + 0.0175)).abs() < 1e-12);
    }

    #[test]
    fn cut_band_stays_inside_loop() {
        let layout = LassoLayout::generate(&spec(&["X X"]), 0.002, None).unwrap();
        assert!((layout.cut_half_width - 0.0175).abs() < 1e-12);
        // A zero margin pulls the loop in to one radius from the centers
        let layout = LassoLayout::generate(&spec(&["X X"]), 0.002, Some(0.0)).unwrap();
        assert_eq!(layout.cut_half_width, 0.015);
    }

    #[test]
    fn distractors_are_icons_but_not_targets() {
        let layout = LassoLayout::generate(&spec(&["O X X O"]), 0.002, None).unwrap();
        assert_eq!(layout.targets.len(), 2);
        assert_eq!(layout.icons.len(), 4);
    }

    #[test]
    fn invalid_specs_rejected() {
        assert_eq!(
            LassoLayout::generate(&spec(&[". O ."]), 0.002, None),
            Err(SpecError::NoTargets)
        );
        assert_eq!(
            LassoLayout::generate(&spec(&[]), 0.002, None),
            Err(SpecError::EmptyGrid)
        );
        let mut s = spec(&["X"]);
        s.icon_radius = 0.0;
        assert!(matches!(
            LassoLayout::generate(&s, 0.002, None),
            Err(SpecError::InvalidDimension { name: "icon_radius", .. })
        ));
        assert!(matches!(
            LassoLayout::generate(&spec(&["X X"]), 1e-300, None),
            Err(SpecError::TooManySamples { .. })
        ));
        // Icons wider than their spacing leave a negative margin
        let mut s = spec(&["X"]);
        s.icon_spacing = 0.02;
        assert!(matches!(
            LassoLayout::generate(&s, 0.002, None),
            Err(SpecError::InvalidDimension { name: "margin", .. })
        ));
    }
}
