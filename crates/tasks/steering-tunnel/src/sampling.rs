use steering_core::error::{SpecError, ensure_finite, ensure_sample_budget};
use steering_core::geometry::Point;

/// Distance within which the last sample of a run is snapped onto the run's end.
const SNAP_TOLERANCE: f64 = 1e-6;

pub(crate) fn ensure_step(step: f64) -> Result<f64, SpecError> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(SpecError::InvalidStep(step))
    }
}

/// `start + k * step` for every `k` with the value strictly below `end`.
///
/// Indexing by `k` instead of accumulating keeps long paths free of drift.
/// At least two samples are required.
pub(crate) fn sample_range(start: f64, end: f64, step: f64) -> Result<Vec<f64>, SpecError> {
    ensure_finite("start_x", start)?;
    ensure_finite("end_x", end)?;
    ensure_step(step)?;
    let invalid = || SpecError::InvalidRange { start, end, step };
    if end <= start {
        return Err(invalid());
    }
    ensure_sample_budget((end - start) / step)?;
    let xs: Vec<f64> = (0u64..)
        .map(|k| start + k as f64 * step)
        .take_while(|&x| x < end)
        .collect();
    if xs.len() < 2 {
        return Err(invalid());
    }
    Ok(xs)
}

/// Append a straight run from `from` to `to` sampled every `step`, ending
/// exactly on `to`. `from` itself is only emitted when `include_start` is set,
/// so consecutive runs never duplicate their shared joint.
pub(crate) fn push_run(path: &mut Vec<Point>, from: Point, to: Point, step: f64, include_start: bool) {
    let len = from.distance(to);
    let dir = (to - from).normalized_or_zero();
    let first: u64 = if include_start { 0 } else { 1 };
    path.extend(
        (first..)
            .map(|k| k as f64 * step)
            .take_while(|&d| d <= len + SNAP_TOLERANCE)
            .map(|d| from + dir * d),
    );
    match path.last_mut() {
        Some(last) if last.distance(to) <= SNAP_TOLERANCE => *last = to,
        _ => path.push(to),
    }
}
