pub mod geometry;
pub mod region;

use steering_core::attempt::AttemptState;
use steering_core::error::SpecError;
use steering_core::excursion::{ExcursionKind, Violation};
use steering_core::geometry::Point;
use steering_core::spec::{MenuSpec, TunnelKind};
use steering_core::task_trait::SteeringTask;

pub use geometry::MenuGeometry;
pub use region::{check_menu_excursion, is_on_target, update_hover};

/// Cascading-menu task. Has no guide path; the allowed region is the main
/// window plus, once the target row has been hovered, the submenu window.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuTask {
    geometry: MenuGeometry,
}

impl MenuTask {
    pub fn new(spec: &MenuSpec) -> Result<Self, SpecError> {
        Ok(Self {
            geometry: MenuGeometry::from_spec(spec)?,
        })
    }

    pub fn geometry(&self) -> &MenuGeometry {
        &self.geometry
    }
}

impl SteeringTask for MenuTask {
    fn kind(&self) -> TunnelKind {
        TunnelKind::CascadingMenu
    }

    fn start(&self) -> Point {
        self.geometry.start()
    }

    fn end(&self) -> Point {
        self.geometry.end()
    }

    fn path(&self) -> &[Point] {
        &[]
    }

    fn observe(&self, cursor: Point, attempt: &mut AttemptState) {
        update_hover(cursor, &self.geometry, attempt);
    }

    fn check(&self, cursor: Point, attempt: &AttemptState) -> Option<Violation> {
        let result = check_menu_excursion(cursor, &self.geometry, attempt.submenu_visible());
        Violation::from_result(ExcursionKind::Menu, result)
    }

    fn is_on_target(&self, cursor: Point, attempt: &AttemptState, _target_radius: f64) -> bool {
        is_on_target(cursor, &self.geometry, attempt.submenu_visible())
    }
}
