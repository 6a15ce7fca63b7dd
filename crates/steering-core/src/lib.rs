pub mod attempt;
pub mod conditions;
pub mod config;
pub mod error;
pub mod excursion;
pub mod geometry;
pub mod spec;
pub mod task_trait;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::attempt::AttemptState;
    use crate::excursion::Violation;
    use crate::geometry::Point;
    use crate::task_trait::SteeringTask;

    /// Straight horizontal path of `n` points spaced `step` apart at height `y`.
    pub fn straight_path(n: usize, step: f64, y: f64) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64 * step, y)).collect()
    }

    /// Linearly interpolated cursor samples from `from` to `to`, inclusive.
    pub fn sweep(from: Point, to: Point, samples: usize) -> Vec<Point> {
        let last = samples.max(2) - 1;
        (0..=last)
            .map(|i| from.lerp(to, i as f64 / last as f64))
            .collect()
    }

    /// Feed `cursor` samples through `task` with one shared attempt state,
    /// returning the per-sample check results.
    pub fn trace(task: &dyn SteeringTask, cursor: &[Point]) -> Vec<Option<Violation>> {
        let mut attempt = AttemptState::new();
        cursor
            .iter()
            .map(|&p| {
                task.observe(p, &mut attempt);
                task.check(p, &attempt)
            })
            .collect()
    }

    /// First violation in a trace, with the sample index it fired at.
    pub fn first_violation(task: &dyn SteeringTask, cursor: &[Point]) -> Option<(usize, Violation)> {
        trace(task, cursor)
            .into_iter()
            .enumerate()
            .find_map(|(i, v)| v.map(|v| (i, v)))
    }

    // ================================================================
    // Task Trait Contract Tests
    // ================================================================
    // Every SteeringTask implementation must pass these. Task crates call
    // them from their own #[cfg(test)] modules with a concrete geometry.

    /// The start point must never be an excursion on a fresh attempt.
    pub fn contract_start_is_clear(task: &dyn SteeringTask) {
        let attempt = AttemptState::new();
        assert!(
            task.check(task.start(), &attempt).is_none(),
            "start point {:?} must not be an excursion",
            task.start()
        );
    }

    /// Tracing the generated path exactly must produce no violation.
    pub fn contract_path_is_clear(task: &dyn SteeringTask) {
        if let Some((i, v)) = first_violation(task, task.path()) {
            panic!("path sample {i} produced {v:?}");
        }
    }

    /// `check` must be a pure function of its inputs.
    pub fn contract_check_is_pure(task: &dyn SteeringTask, cursor: Point) {
        let attempt = AttemptState::new();
        let a = task.check(cursor, &attempt);
        let b = task.check(cursor, &attempt);
        assert_eq!(a, b, "check() must return the same result for the same input");
    }

    /// After observing `approach`, the end point must count as on target.
    pub fn contract_end_reachable(task: &dyn SteeringTask, approach: &[Point], target_radius: f64) {
        let mut attempt = AttemptState::new();
        for &p in approach {
            task.observe(p, &mut attempt);
        }
        task.observe(task.end(), &mut attempt);
        assert!(
            task.is_on_target(task.end(), &attempt, target_radius),
            "end point {:?} must be on target",
            task.end()
        );
    }

    /// A violation's boundary point and distance must be finite.
    pub fn contract_violation_is_finite(violation: &Violation) {
        assert!(
            violation.boundary_point.is_finite() && violation.distance_outside.is_finite(),
            "violation must not carry NaN/inf: {violation:?}"
        );
    }
}
