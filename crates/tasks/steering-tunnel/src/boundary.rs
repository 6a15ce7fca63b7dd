use steering_core::excursion::ExcursionResult;
use steering_core::geometry::{BOUNDARY_EPSILON, Point};
use steering_core::spec::TunnelKind;

use crate::sequential::segment_index;

/// Unit tangent at sample `index`: forward difference at the first sample,
/// backward at the last, central elsewhere. Coincident neighbours yield a zero
/// vector, never NaN.
pub fn tangent_at(path: &[Point], index: usize) -> Point {
    let n = path.len();
    if n < 2 || index >= n {
        return Point::ZERO;
    }
    let delta = if index == 0 {
        path[1] - path[0]
    } else if index == n - 1 {
        path[n - 1] - path[n - 2]
    } else {
        path[index + 1] - path[index - 1]
    };
    delta.normalized_or_zero()
}

/// Tangent rotated by 90 degrees.
pub fn normal_at(path: &[Point], index: usize) -> Point {
    tangent_at(path, index).perp()
}

/// Index of the sample with the smallest Euclidean distance to `cursor`.
/// Ties keep the earliest sample.
pub fn closest_sample(path: &[Point], cursor: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in path.iter().enumerate() {
        let d = p.distance(cursor);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Half of the corridor width that applies at sample `index`.
///
/// Sequential tunnels look up the width of the segment containing the sample;
/// every other kind (and a sequential tunnel given no segment widths) uses the
/// uniform `width`.
pub fn half_width_at(
    index: usize,
    path_len: usize,
    kind: TunnelKind,
    width: f64,
    segment_widths: Option<&[f64]>,
) -> f64 {
    match (kind, segment_widths) {
        (TunnelKind::Sequential, Some(widths)) if !widths.is_empty() => {
            widths[segment_index(index, path_len, widths.len())] / 2.0
        },
        _ => width / 2.0,
    }
}

/// Test one cursor sample against a tunnel corridor.
///
/// The closest sample is picked by Euclidean distance; the cursor's offset is
/// then measured along that sample's normal and compared to the half-width.
/// On an excursion the boundary point sits on the wall the cursor crossed.
pub fn check_boundary(
    cursor: Point,
    path: &[Point],
    kind: TunnelKind,
    width: f64,
    segment_widths: Option<&[f64]>,
) -> ExcursionResult {
    if !cursor.is_finite() {
        return ExcursionResult::CLEAR;
    }
    let Some(index) = closest_sample(path, cursor) else {
        return ExcursionResult::CLEAR;
    };

    let sample = path[index];
    let normal = normal_at(path, index);
    let offset = (cursor - sample).dot(normal);
    let perpendicular = offset.abs();
    let half = half_width_at(index, path.len(), kind, width, segment_widths);

    if perpendicular <= half + BOUNDARY_EPSILON {
        return ExcursionResult::CLEAR;
    }
    let side = if offset < 0.0 { -1.0 } else { 1.0 };
    ExcursionResult::outside(sample + normal * (side * half), perpendicular - half)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use steering_core::config::SceneConfig;
    use steering_core::spec::{CurvedSpec, SegmentVariation, SequentialSpec};
    use steering_core::test_helpers::straight_path;

    use super::*;
    use crate::curved::curved_path;
    use crate::sequential::sequential_path;

    fn curved(curvature: f64) -> Vec<Point> {
        curved_path(
            &CurvedSpec {
                width: 0.02,
                curvature,
                wavelength: None,
            },
            &SceneConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn tangent_matches_analytic_derivative() {
        let (c, w) = (0.025, 0.15);
        let path = curved(c);
        for i in 1..path.len() - 1 {
            let x = path[i].x;
            let analytic = Point::new(1.0, c * TAU / w * (TAU * x / w).cos()).normalized_or_zero();
            let t = tangent_at(&path, i);
            assert!(
                t.distance(analytic) < 5e-3,
                "tangent at {i} is {t:?}, expected {analytic:?}"
            );
        }
    }

    #[test]
    fn tangent_uses_one_sided_difference_at_ends() {
        let path = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(tangent_at(&path, 0), Point::new(1.0, 0.0));
        assert_eq!(tangent_at(&path, 2), Point::new(0.0, 1.0));
        assert_eq!(normal_at(&path, 0), Point::new(0.0, 1.0));
    }

    #[test]
    fn half_width_offset_is_inside_on_both_sides() {
        let path = curved(0.025);
        let half = 0.01;
        for i in 0..path.len() {
            let n = normal_at(&path, i);
            for side in [1.0, -1.0] {
                let on_wall = path[i] + n * (side * half);
                let r = check_boundary(on_wall, &path, TunnelKind::Curved, 0.02, None);
                assert!(!r.is_excursion, "index {i} side {side} flagged on the wall");

                let eps = 1e-4;
                let past = path[i] + n * (side * (half + eps));
                let r = check_boundary(past, &path, TunnelKind::Curved, 0.02, None);
                assert!(r.is_excursion, "index {i} side {side} not flagged past the wall");
                assert!((r.distance_outside.unwrap() - eps).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn boundary_point_lies_on_crossed_wall() {
        let path = curved(0.025);
        let n = normal_at(&path, 50);
        let cursor = path[50] + n * 0.02;
        let r = check_boundary(cursor, &path, TunnelKind::Curved, 0.02, None);
        assert!(r.is_excursion);
        assert!((r.distance_outside.unwrap() - 0.01).abs() < 1e-9);
        let expected = path[50] + n * 0.01;
        assert!(r.boundary_point.unwrap().distance(expected) < 1e-12);

        let below = path[50] - n * 0.02;
        let r = check_boundary(below, &path, TunnelKind::Curved, 0.02, None);
        assert!(r.boundary_point.unwrap().distance(path[50] - n * 0.01) < 1e-12);
    }

    #[test]
    fn sequential_width_follows_segment() {
        let path = sequential_path(
            &SequentialSpec {
                segment_widths: vec![0.02, 0.08],
                variation: SegmentVariation::Width,
            },
            &SceneConfig::default(),
        )
        .unwrap();
        let widths = [0.02, 0.08];
        let quarter = path[path.len() / 4] + Point::new(0.0, 0.011);
        let three_quarters = path[path.len() * 3 / 4] + Point::new(0.0, 0.011);

        let r = check_boundary(quarter, &path, TunnelKind::Sequential, 0.02, Some(&widths));
        assert!(r.is_excursion);
        assert!((r.distance_outside.unwrap() - 0.001).abs() < 1e-9);
        let r = check_boundary(three_quarters, &path, TunnelKind::Sequential, 0.02, Some(&widths));
        assert!(!r.is_excursion);
    }

    #[test]
    fn segment_widths_ignored_for_other_kinds() {
        let path = straight_path(10, 0.01, 0.1);
        let cursor = Point::new(0.05, 0.12);
        let r = check_boundary(cursor, &path, TunnelKind::Curved, 0.02, Some(&[0.1]));
        assert!(r.is_excursion);
    }

    #[test]
    fn coincident_samples_degrade_to_zero_offset() {
        let path = vec![Point::new(0.1, 0.1); 3];
        let r = check_boundary(Point::new(0.5, 0.5), &path, TunnelKind::Curved, 0.0, None);
        assert_eq!(r, ExcursionResult::CLEAR);
        assert_eq!(tangent_at(&path, 1), Point::ZERO);
    }

    #[test]
    fn zero_width_allows_only_the_centerline() {
        let path = straight_path(10, 0.01, 0.1);
        assert!(!check_boundary(Point::new(0.03, 0.1), &path, TunnelKind::Corner, 0.0, None).is_excursion);
        assert!(check_boundary(Point::new(0.03, 0.1001), &path, TunnelKind::Corner, 0.0, None).is_excursion);
    }

    #[test]
    fn empty_path_and_non_finite_cursor_are_clear() {
        assert_eq!(
            check_boundary(Point::new(0.1, 0.1), &[], TunnelKind::Curved, 0.02, None),
            ExcursionResult::CLEAR
        );
        let path = straight_path(10, 0.01, 0.1);
        assert_eq!(
            check_boundary(Point::new(f64::NAN, 0.1), &path, TunnelKind::Curved, 0.02, None),
            ExcursionResult::CLEAR
        );
    }

    #[test]
    fn closest_sample_prefers_earliest_on_tie() {
        let path = vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)];
        assert_eq!(closest_sample(&path, Point::new(1.0, 0.0)), Some(0));
        assert_eq!(closest_sample(&[], Point::ZERO), None);
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn result_is_always_finite(
                x in -1.0f64..1.5,
                y in -1.0f64..1.5,
                curvature in 0.0f64..0.05,
                width in 0.0f64..0.1,
            ) {
                let path = curved(curvature);
                let r = check_boundary(Point::new(x, y), &path, TunnelKind::Curved, width, None);
                if r.is_excursion {
                    prop_assert!(r.boundary_point.unwrap().is_finite());
                    let d = r.distance_outside.unwrap();
                    prop_assert!(d.is_finite() && d > 0.0);
                } else {
                    prop_assert!(r.boundary_point.is_none());
                }
            }

            #[test]
            fn straight_corridor_matches_vertical_offset(
                x in 0.0f64..0.09,
                dy in -0.05f64..0.05,
            ) {
                let path = straight_path(10, 0.01, 0.1);
                let r = check_boundary(Point::new(x, 0.1 + dy), &path, TunnelKind::Curved, 0.04, None);
                prop_assert_eq!(r.is_excursion, dy.abs() > 0.02 + BOUNDARY_EPSILON);
            }
        }
    }
}
