use steering_core::config::SceneConfig;
use steering_core::error::{SpecError, ensure_finite, ensure_non_negative, ensure_sample_budget};
use steering_core::geometry::Point;
use steering_core::spec::CornerSpec;

use crate::sampling::{ensure_step, push_run};

/// Corridor of `num_corners + 1` equal horizontal runs joined by vertical runs
/// of exactly `corner_offset`. The first vertical run moves towards +y and
/// the direction alternates per corner. Corners are sharp (no chamfer) and the
/// final run ends exactly at `end_x`.
pub fn corner_path(spec: &CornerSpec, scene: &SceneConfig) -> Result<Vec<Point>, SpecError> {
    let offset = ensure_non_negative("corner_offset", spec.corner_offset)?;
    let step = ensure_step(scene.step_size)?;
    let start_x = ensure_finite("start_x", scene.start_x)?;
    let end_x = ensure_finite("end_x", scene.end_x)?;
    let y_base = ensure_finite("y_base", scene.y_base)?;
    if end_x <= start_x {
        return Err(SpecError::InvalidRange {
            start: start_x,
            end: end_x,
            step,
        });
    }

    let corners = spec.num_corners as f64;
    // Every run emits about length/step points plus its snapped end
    ensure_sample_budget(((end_x - start_x) + corners * offset) / step + 2.0 * corners + 2.0)?;
    let run = (end_x - start_x) / (corners + 1.0);
    let mut path = Vec::new();
    let mut at = Point::new(start_x, y_base);

    for corner in 0..spec.num_corners {
        let run_end = Point::new(at.x + run, at.y);
        push_run(&mut path, at, run_end, step, corner == 0);
        let direction = if corner % 2 == 0 { 1.0 } else { -1.0 };
        let turn_end = Point::new(run_end.x, run_end.y + direction * offset);
        push_run(&mut path, run_end, turn_end, step, false);
        at = turn_end;
    }

    // Final run is clipped to end exactly on end_x.
    push_run(
        &mut path,
        at,
        Point::new(end_x, at.y),
        step,
        spec.num_corners == 0,
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Run {
        Horizontal { dx: f64 },
        Vertical { dy: f64 },
    }

    /// Collapse consecutive deltas into axis-aligned runs; panics on a
    /// diagonal step.
    fn runs(path: &[Point]) -> Vec<Run> {
        let mut out: Vec<Run> = Vec::new();
        for w in path.windows(2) {
            let d = w[1] - w[0];
            match (d.x == 0.0, d.y == 0.0) {
                (false, true) => match out.last_mut() {
                    Some(Run::Horizontal { dx }) => *dx += d.x,
                    _ => out.push(Run::Horizontal { dx: d.x }),
                },
                (true, false) => match out.last_mut() {
                    Some(Run::Vertical { dy }) => *dy += d.y,
                    _ => out.push(Run::Vertical { dy: d.y }),
                },
                _ => panic!("non axis-aligned or zero step {d:?}"),
            }
        }
        out
    }

    fn spec(num_corners: u32, corner_offset: f64) -> CornerSpec {
        CornerSpec {
            width: 0.02,
            num_corners,
            corner_offset,
        }
    }

    #[test]
    fn two_corners_are_right_angles_of_exact_offset() {
        let path = corner_path(&spec(2, 0.1), &SceneConfig::default()).unwrap();
        let runs = runs(&path);
        assert_eq!(runs.len(), 5, "H V H V H expected, got {runs:?}");
        let verticals: Vec<f64> = runs
            .iter()
            .filter_map(|r| match r {
                Run::Vertical { dy } => Some(*dy),
                Run::Horizontal { .. } => None,
            })
            .collect();
        assert_eq!(verticals.len(), 2);
        assert!((verticals[0] - 0.1).abs() < 1e-9);
        assert!((verticals[1] + 0.1).abs() < 1e-9);
        for r in &runs {
            if let Run::Horizontal { dx } = r {
                assert!((dx - 0.46 / 3.0).abs() < 1e-9, "unequal run {dx}");
            }
        }
    }

    #[test]
    fn final_point_is_exactly_end_x() {
        for n in 0..5 {
            let path = corner_path(&spec(n, 0.05), &SceneConfig::default()).unwrap();
            assert_eq!(path.last().unwrap().x, 0.46);
            assert_eq!(path[0], Point::new(0.0, 0.13));
        }
    }

    #[test]
    fn zero_corners_is_single_run() {
        let path = corner_path(&spec(0, 0.1), &SceneConfig::default()).unwrap();
        assert_eq!(runs(&path).len(), 1);
        assert!(path.iter().all(|p| p.y == 0.13));
    }

    #[test]
    fn zero_offset_degenerates_to_straight_corridor() {
        let path = corner_path(&spec(3, 0.0), &SceneConfig::default()).unwrap();
        assert!(path.iter().all(|p| p.y == 0.13));
        assert!(path.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn oversized_corridors_rejected_before_sampling() {
        assert!(matches!(
            corner_path(&spec(100_000_000, 0.1), &SceneConfig::default()),
            Err(SpecError::TooManySamples { .. })
        ));
        // Many zero-offset corners still cost a point per run
        assert!(matches!(
            corner_path(&spec(u32::MAX, 0.0), &SceneConfig::default()),
            Err(SpecError::TooManySamples { .. })
        ));
        let scene = SceneConfig {
            step_size: 1e-300,
            ..SceneConfig::default()
        };
        assert!(matches!(
            corner_path(&spec(2, 0.1), &scene),
            Err(SpecError::TooManySamples { .. })
        ));
    }

    #[test]
    fn negative_offset_rejected() {
        assert!(corner_path(&spec(2, -0.1), &SceneConfig::default()).is_err());
    }
}
