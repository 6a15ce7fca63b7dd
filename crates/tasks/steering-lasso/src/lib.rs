pub mod grid;
pub mod layout;
pub mod perimeter;
pub mod proximity;
pub mod shortcut;

use steering_core::attempt::AttemptState;
use steering_core::config::{SceneConfig, TrialConfig};
use steering_core::error::SpecError;
use steering_core::excursion::{ExcursionKind, Violation};
use steering_core::geometry::Point;
use steering_core::spec::{LassoSpec, TunnelKind};
use steering_core::task_trait::SteeringTask;

pub use grid::{CellMarker, LassoGrid, Target};
pub use layout::LassoLayout;
pub use proximity::check_lasso_collision;
pub use shortcut::{check_lasso_shortcut, straight_bar};

/// Lasso selection task. Gates run in a fixed order: icon clearance, then
/// interior cut, then the straight bar.
#[derive(Debug, Clone, PartialEq)]
pub struct LassoTask {
    layout: LassoLayout,
    clearance_factor: f64,
    bar_height: f64,
}

impl LassoTask {
    pub fn new(spec: &LassoSpec, scene: &SceneConfig, trial: &TrialConfig) -> Result<Self, SpecError> {
        let layout = LassoLayout::generate(spec, scene.step_size, trial.lasso_margin)?;
        Ok(Self {
            layout,
            clearance_factor: trial.icon_clearance_factor,
            bar_height: trial.shortcut_bar_height,
        })
    }

    pub fn layout(&self) -> &LassoLayout {
        &self.layout
    }
}

impl SteeringTask for LassoTask {
    fn kind(&self) -> TunnelKind {
        TunnelKind::Lasso
    }

    fn start(&self) -> Point {
        self.layout.start
    }

    fn end(&self) -> Point {
        self.layout.end
    }

    fn path(&self) -> &[Point] {
        &self.layout.path
    }

    fn check(&self, cursor: Point, _attempt: &AttemptState) -> Option<Violation> {
        let collision = check_lasso_collision(cursor, &self.layout, self.clearance_factor);
        if let Some(v) = Violation::from_result(ExcursionKind::IconProximity, collision) {
            return Some(v);
        }
        let shortcut = check_lasso_shortcut(
            cursor,
            &self.layout,
            self.layout.start,
            self.layout.end,
            self.bar_height,
        );
        Violation::from_result(ExcursionKind::Shortcut, shortcut)
    }
}
