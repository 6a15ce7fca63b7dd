use crate::attempt::AttemptState;
use crate::excursion::Violation;
use crate::geometry::Point;
use crate::spec::TunnelKind;

/// Core trait every generated task geometry implements.
///
/// The trial controller owns sampling cadence, policy and recording; the task
/// only answers geometric questions about one cursor sample. All methods are
/// pure except `observe`, which may update per-attempt sticky state.
pub trait SteeringTask: Send + Sync {
    fn kind(&self) -> TunnelKind;

    /// Where the attempt starts (the start button).
    fn start(&self) -> Point;

    /// Where the attempt ends. For lasso tasks this is not the last path point.
    fn end(&self) -> Point;

    /// Centerline or guide loop to draw; empty when the task has none.
    fn path(&self) -> &[Point];

    /// Update per-attempt state from a cursor sample before checks run.
    fn observe(&self, _cursor: Point, _attempt: &mut AttemptState) {}

    /// Run this task's gates in their fixed order. The first positive result
    /// is returned and no later gate runs.
    fn check(&self, cursor: Point, attempt: &AttemptState) -> Option<Violation>;

    /// Whether the cursor has reached the end of the task.
    fn is_on_target(&self, cursor: Point, _attempt: &AttemptState, target_radius: f64) -> bool {
        cursor.distance(self.end()) < target_radius
    }
}
