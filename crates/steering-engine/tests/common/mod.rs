use steering_core::attempt::BoundaryPolicy;
use steering_core::conditions::TrialCondition;
use steering_core::config::{EngineConfig, SAMPLE_INTERVAL_MS};
use steering_core::geometry::Point;
use steering_core::spec::{CurvedSpec, LassoSpec, TunnelSpec};

use steering_engine::{SampleOutcome, Trial};

pub const DT: f64 = SAMPLE_INTERVAL_MS as f64;

pub fn curved_condition(width: f64, curvature: f64) -> TrialCondition {
    TrialCondition::new(
        1,
        TunnelSpec::Curved(CurvedSpec {
            width,
            curvature,
            wavelength: None,
        }),
        "curved",
    )
}

pub fn lasso_condition(rows: &[&str]) -> TrialCondition {
    TrialCondition::new(
        101,
        TunnelSpec::Lasso(LassoSpec {
            grid_layout: rows.iter().map(|r| r.to_string()).collect(),
            icon_radius: 0.015,
            icon_spacing: 0.035,
            grid_origin: Point::new(0.1, 0.05),
            margin: None,
        }),
        "lasso",
    )
}

/// Build a trial and press its start button at t = 0.
pub fn start_trial(condition: TrialCondition, policy: BoundaryPolicy) -> Trial {
    let mut trial = Trial::new(condition, EngineConfig::default(), policy).unwrap();
    let start = trial.geometry().start();
    assert!(trial.click(start, 0.0), "click on the start point must start");
    trial
}

/// Feed `points` one sampling interval apart, stopping once the attempt
/// finishes. Returns every outcome produced.
pub fn feed(trial: &mut Trial, points: &[Point]) -> Vec<SampleOutcome> {
    let t0 = trial.trajectory().last().map_or(0.0, |s| s.timestamp);
    let mut outcomes = Vec::new();
    for (i, &p) in points.iter().enumerate() {
        outcomes.push(trial.sample(p, t0 + (i + 1) as f64 * DT));
        if trial.state().is_finished() {
            break;
        }
    }
    outcomes
}

/// The closed lasso loop re-ordered to begin at the sample nearest `from`.
pub fn loop_from(path: &[Point], from: Point) -> Vec<Point> {
    // Drop the duplicated closing point before rotating
    let open = &path[..path.len() - 1];
    let k = open
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.distance(from).total_cmp(&b.1.distance(from)))
        .map_or(0, |(i, _)| i);
    open[k..].iter().chain(open[..k].iter()).copied().collect()
}
