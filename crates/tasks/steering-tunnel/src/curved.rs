use std::f64::consts::TAU;

use steering_core::config::SceneConfig;
use steering_core::error::{SpecError, ensure_finite, ensure_positive};
use steering_core::geometry::Point;
use steering_core::spec::CurvedSpec;

use crate::sampling::sample_range;

/// Centerline height of a sine tunnel at `x`.
pub fn curve_y(x: f64, y_base: f64, curvature: f64, wavelength: f64) -> f64 {
    y_base + curvature * (TAU * x / wavelength).sin()
}

/// Sample the sine centerline from `start_x` to `end_x` (exclusive of the
/// final partial step). Zero curvature yields a straight corridor.
pub fn curved_path(spec: &CurvedSpec, scene: &SceneConfig) -> Result<Vec<Point>, SpecError> {
    let curvature = ensure_finite("curvature", spec.curvature)?;
    let wavelength = ensure_positive("wavelength", spec.wavelength.unwrap_or(scene.wavelength))?;
    let xs = sample_range(scene.start_x, scene.end_x, scene.step_size)?;
    Ok(xs
        .into_iter()
        .map(|x| Point::new(x, curve_y(x, scene.y_base, curvature, wavelength)))
        .collect())
}
