use serde::{Deserialize, Serialize};

use steering_core::attempt::{AttemptState, BoundaryPolicy};
use steering_core::conditions::{TrialCondition, condition_key};
use steering_core::config::EngineConfig;
use steering_core::error::SpecError;
use steering_core::excursion::{ExcursionKind, Violation};
use steering_core::geometry::Point;
use steering_core::spec::TunnelKind;

use crate::geometry::{TaskGeometry, generate_path};

/// Where an attempt is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrialState {
    WaitingForStart,
    InProgress,
    Completed,
    Failed { reason: FailReason },
}

impl TrialState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailReason {
    Excursion { kind: ExcursionKind },
    Timeout,
}

/// One recorded cursor sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub position: Point,
    /// Scene units per second since the previous sample.
    pub speed: f64,
    /// Milliseconds on the caller's clock.
    pub timestamp: f64,
}

/// An excursion persisted for the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcursionEvent {
    /// Index into the trajectory of the offending sample.
    pub time_index: usize,
    pub position: Point,
    pub distance_outside: f64,
    pub timestamp: f64,
    pub boundary_point: Point,
    pub kind: ExcursionKind,
}

/// Result of feeding one sample to a [`Trial`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// The attempt is not running; nothing was recorded.
    Ignored,
    Continue,
    /// First excursion of a mark-only attempt; the attempt continues.
    Marked(ExcursionEvent),
    Failed(FailReason),
    Completed,
}

/// Everything the persistence layer needs from an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub condition_id: u32,
    pub condition_key: String,
    pub kind: TunnelKind,
    pub policy: BoundaryPolicy,
    pub state: TrialState,
    pub trajectory: Vec<TrajectorySample>,
    pub excursions: Vec<ExcursionEvent>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

impl TrialRecord {
    pub fn duration_ms(&self) -> Option<f64> {
        Some(self.end_time? - self.start_time?)
    }
}

/// Controller for one trial attempt: start-button gating, the per-sample
/// check pipeline under a [`BoundaryPolicy`], trajectory recording and the
/// optional time limit.
///
/// Geometry is generated on construction and regenerated on [`restart`].
///
/// [`restart`]: Trial::restart
#[derive(Debug, Clone)]
pub struct Trial {
    condition: TrialCondition,
    config: EngineConfig,
    policy: BoundaryPolicy,
    geometry: TaskGeometry,
    attempt: AttemptState,
    state: TrialState,
    trajectory: Vec<TrajectorySample>,
    excursions: Vec<ExcursionEvent>,
    start_time: Option<f64>,
    end_time: Option<f64>,
}

impl Trial {
    pub fn new(
        condition: TrialCondition,
        config: EngineConfig,
        policy: BoundaryPolicy,
    ) -> Result<Self, SpecError> {
        let geometry = generate_path(&condition.spec, &config)?;
        Ok(Self {
            condition,
            config,
            policy,
            geometry,
            attempt: AttemptState::new(),
            state: TrialState::WaitingForStart,
            trajectory: Vec::new(),
            excursions: Vec::new(),
            start_time: None,
            end_time: None,
        })
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn geometry(&self) -> &TaskGeometry {
        &self.geometry
    }

    pub fn attempt(&self) -> &AttemptState {
        &self.attempt
    }

    pub fn condition(&self) -> &TrialCondition {
        &self.condition
    }

    pub fn trajectory(&self) -> &[TrajectorySample] {
        &self.trajectory
    }

    pub fn excursions(&self) -> &[ExcursionEvent] {
        &self.excursions
    }

    /// Press on the start button. Starts the attempt when `position` is within
    /// the button radius of the start point; returns whether it did.
    pub fn click(&mut self, position: Point, now_ms: f64) -> bool {
        if self.state != TrialState::WaitingForStart {
            return false;
        }
        let start = self.geometry.start();
        if position.distance(start) > self.config.trial.start_button_radius {
            return false;
        }
        self.state = TrialState::InProgress;
        self.start_time = Some(now_ms);
        self.trajectory.push(TrajectorySample {
            position: start,
            speed: 0.0,
            timestamp: now_ms,
        });
        tracing::info!(
            condition = self.condition.id,
            kind = ?self.geometry.task().kind(),
            "Trial started"
        );
        true
    }

    /// Feed one cursor sample: time limit, recording, sticky-state update,
    /// gates under the current policy, then completion.
    pub fn sample(&mut self, position: Point, now_ms: f64) -> SampleOutcome {
        if self.state != TrialState::InProgress {
            return SampleOutcome::Ignored;
        }
        if self.timed_out(now_ms) {
            self.fail(FailReason::Timeout, now_ms);
            return SampleOutcome::Failed(FailReason::Timeout);
        }

        let speed = match self.trajectory.last() {
            Some(prev) if now_ms > prev.timestamp => {
                position.distance(prev.position) / ((now_ms - prev.timestamp) / 1000.0)
            },
            _ => 0.0,
        };
        self.trajectory.push(TrajectorySample {
            position,
            speed,
            timestamp: now_ms,
        });
        let time_index = self.trajectory.len() - 1;

        let task = self.geometry.task();
        task.observe(position, &mut self.attempt);

        let mut outcome = SampleOutcome::Continue;
        if self.policy.should_check()
            && let Some(violation) = task.check(position, &self.attempt)
        {
            let event = excursion_event(time_index, position, now_ms, violation);
            if self.policy.should_enforce() || violation.kind.is_anti_cheat() {
                self.excursions.push(event);
                let reason = FailReason::Excursion {
                    kind: violation.kind,
                };
                self.fail(reason, now_ms);
                return SampleOutcome::Failed(reason);
            }
            if self.attempt.mark_excursion() {
                tracing::debug!(
                    condition = self.condition.id,
                    time_index,
                    distance_outside = violation.distance_outside,
                    "Excursion marked"
                );
                self.excursions.push(event);
                outcome = SampleOutcome::Marked(event);
            }
        }

        if task.is_on_target(position, &self.attempt, self.config.trial.target_radius) {
            self.state = TrialState::Completed;
            self.end_time = Some(now_ms);
            tracing::info!(
                condition = self.condition.id,
                samples = self.trajectory.len(),
                "Trial completed"
            );
            return SampleOutcome::Completed;
        }
        outcome
    }

    /// Enforce the time limit between samples. Returns the failure when the
    /// attempt times out on this tick.
    pub fn tick(&mut self, now_ms: f64) -> Option<FailReason> {
        if self.state == TrialState::InProgress && self.timed_out(now_ms) {
            self.fail(FailReason::Timeout, now_ms);
            return Some(FailReason::Timeout);
        }
        None
    }

    /// Seconds left before the time limit, clamped at zero. `None` without a
    /// limit; the full limit before the attempt starts.
    pub fn time_remaining(&self, now_ms: f64) -> Option<f64> {
        let limit = self.condition.time_limit?;
        let elapsed = match self.start_time {
            Some(start) => (now_ms - start) / 1000.0,
            None => 0.0,
        };
        Some((limit - elapsed).max(0.0))
    }

    /// Discard the attempt and regenerate geometry from the condition.
    pub fn restart(&mut self) -> Result<(), SpecError> {
        self.geometry = generate_path(&self.condition.spec, &self.config)?;
        self.attempt.reset();
        self.state = TrialState::WaitingForStart;
        self.trajectory.clear();
        self.excursions.clear();
        self.start_time = None;
        self.end_time = None;
        tracing::info!(condition = self.condition.id, "Trial restarted");
        Ok(())
    }

    pub fn record(&self) -> TrialRecord {
        TrialRecord {
            condition_id: self.condition.id,
            condition_key: condition_key(&self.condition),
            kind: self.geometry.task().kind(),
            policy: self.policy,
            state: self.state,
            trajectory: self.trajectory.clone(),
            excursions: self.excursions.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    pub fn into_record(self) -> TrialRecord {
        TrialRecord {
            condition_id: self.condition.id,
            condition_key: condition_key(&self.condition),
            kind: self.geometry.task().kind(),
            policy: self.policy,
            state: self.state,
            trajectory: self.trajectory,
            excursions: self.excursions,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    fn timed_out(&self, now_ms: f64) -> bool {
        match (self.condition.time_limit, self.start_time) {
            (Some(limit), Some(start)) => (now_ms - start) / 1000.0 > limit,
            _ => false,
        }
    }

    fn fail(&mut self, reason: FailReason, now_ms: f64) {
        self.state = TrialState::Failed { reason };
        self.end_time = Some(now_ms);
        tracing::info!(condition = self.condition.id, ?reason, "Trial failed");
    }
}

fn excursion_event(time_index: usize, position: Point, timestamp: f64, v: Violation) -> ExcursionEvent {
    ExcursionEvent {
        time_index,
        position,
        distance_outside: v.distance_outside,
        timestamp,
        boundary_point: v.boundary_point,
        kind: v.kind,
    }
}
