use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use steering_core::attempt::BoundaryPolicy;
use steering_core::conditions::TrialCondition;
use steering_core::config::EngineConfig;
use steering_core::error::SpecError;
use steering_core::geometry::Point;

use crate::trial::{Trial, TrialRecord};

/// Failure while loading or replaying recorded input.
#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid condition file: {0}")]
    Condition(#[from] toml::de::Error),

    #[error("invalid trajectory: {0}")]
    Trajectory(#[from] serde_json::Error),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error("trajectory is empty")]
    EmptyTrajectory,

    #[error("first sample {0:?} is not on the start button")]
    MissedStart(Point),
}

/// One raw cursor sample as captured by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorSample {
    pub x: f64,
    pub y: f64,
    /// Milliseconds on the capture clock.
    pub t: f64,
}

impl CursorSample {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

pub fn load_condition(path: &Path) -> Result<TrialCondition, ReplayError> {
    let content = read(path)?;
    Ok(TrialCondition::from_toml_str(&content)?)
}

pub fn load_trajectory(path: &Path) -> Result<Vec<CursorSample>, ReplayError> {
    let content = read(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Drive a fresh [`Trial`] with recorded samples. The first sample is the
/// start-button click; the rest are fed until the attempt finishes. A final
/// tick at the last timestamp applies the time limit.
pub fn replay(
    condition: TrialCondition,
    config: EngineConfig,
    policy: BoundaryPolicy,
    samples: &[CursorSample],
) -> Result<TrialRecord, ReplayError> {
    let Some((first, rest)) = samples.split_first() else {
        return Err(ReplayError::EmptyTrajectory);
    };
    let mut trial = Trial::new(condition, config, policy)?;
    if !trial.click(first.position(), first.t) {
        return Err(ReplayError::MissedStart(first.position()));
    }
    for s in rest {
        trial.sample(s.position(), s.t);
        if trial.state().is_finished() {
            break;
        }
    }
    if let Some(last) = samples.last() {
        trial.tick(last.t);
    }
    Ok(trial.into_record())
}

fn read(path: &Path) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })
}
