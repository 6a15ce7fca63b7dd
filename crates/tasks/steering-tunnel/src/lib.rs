pub mod boundary;
pub mod corner;
pub mod curved;
mod sampling;
pub mod sequential;

use steering_core::attempt::AttemptState;
use steering_core::config::SceneConfig;
use steering_core::error::{SpecError, ensure_non_negative};
use steering_core::excursion::{ExcursionKind, Violation};
use steering_core::geometry::Point;
use steering_core::spec::{CornerSpec, CurvedSpec, SequentialSpec, TunnelKind};
use steering_core::task_trait::SteeringTask;

pub use boundary::check_boundary;
pub use sequential::{segment_index, segment_ranges};

/// A generated corridor: centerline samples plus the width(s) the cursor must
/// stay within. Start and end are the first and last samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TunnelTask {
    kind: TunnelKind,
    path: Vec<Point>,
    width: f64,
    segment_widths: Option<Vec<f64>>,
}

impl TunnelTask {
    pub fn curved(spec: &CurvedSpec, scene: &SceneConfig) -> Result<Self, SpecError> {
        let width = ensure_non_negative("width", spec.width)?;
        let path = curved::curved_path(spec, scene)?;
        tracing::debug!(
            points = path.len(),
            width,
            curvature = spec.curvature,
            "Generated curved tunnel"
        );
        Ok(Self {
            kind: TunnelKind::Curved,
            path,
            width,
            segment_widths: None,
        })
    }

    pub fn corner(spec: &CornerSpec, scene: &SceneConfig) -> Result<Self, SpecError> {
        let width = ensure_non_negative("width", spec.width)?;
        let path = corner::corner_path(spec, scene)?;
        tracing::debug!(
            points = path.len(),
            width,
            corners = spec.num_corners,
            "Generated corner tunnel"
        );
        Ok(Self {
            kind: TunnelKind::Corner,
            path,
            width,
            segment_widths: None,
        })
    }

    /// Sequential tunnels report the first segment's width as their nominal
    /// width; checks use the per-segment widths.
    pub fn sequential(spec: &SequentialSpec, scene: &SceneConfig) -> Result<Self, SpecError> {
        let path = sequential::sequential_path(spec, scene)?;
        let width = spec.segment_widths.first().copied().unwrap_or_default();
        tracing::debug!(
            points = path.len(),
            segments = spec.segment_widths.len(),
            "Generated sequential tunnel"
        );
        Ok(Self {
            kind: TunnelKind::Sequential,
            path,
            width,
            segment_widths: Some(spec.segment_widths.clone()),
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn segment_widths(&self) -> Option<&[f64]> {
        self.segment_widths.as_deref()
    }

    /// Per-segment sample ranges, one range covering the whole path for
    /// single-width tunnels.
    pub fn segment_ranges(&self) -> Vec<std::ops::Range<usize>> {
        let count = self.segment_widths.as_ref().map_or(1, Vec::len);
        segment_ranges(self.path.len(), count)
    }
}

impl SteeringTask for TunnelTask {
    fn kind(&self) -> TunnelKind {
        self.kind
    }

    fn start(&self) -> Point {
        self.path.first().copied().unwrap_or_default()
    }

    fn end(&self) -> Point {
        self.path.last().copied().unwrap_or_default()
    }

    fn path(&self) -> &[Point] {
        &self.path
    }

    fn check(&self, cursor: Point, _attempt: &AttemptState) -> Option<Violation> {
        let result = check_boundary(
            cursor,
            &self.path,
            self.kind,
            self.width,
            self.segment_widths(),
        );
        Violation::from_result(ExcursionKind::Boundary, result)
    }
}
