use steering_core::attempt::AttemptState;
use steering_core::excursion::ExcursionResult;
use steering_core::geometry::Point;

use crate::geometry::MenuGeometry;

/// Latch the sticky submenu flag when the cursor is over the target row.
pub fn update_hover(cursor: Point, menu: &MenuGeometry, attempt: &mut AttemptState) {
    if menu.target_main_item().contains(cursor) {
        attempt.note_submenu_hover();
    }
}

/// Test one cursor sample against the active menu windows.
///
/// The main window is always active; the submenu only once `submenu_visible`.
/// Outside every active window, the boundary point is the closest clamped
/// point over the active windows.
pub fn check_menu_excursion(cursor: Point, menu: &MenuGeometry, submenu_visible: bool) -> ExcursionResult {
    if !cursor.is_finite() {
        return ExcursionResult::CLEAR;
    }
    if menu.main.contains(cursor) || (submenu_visible && menu.sub.contains(cursor)) {
        return ExcursionResult::CLEAR;
    }

    let mut boundary = menu.main.clamp(cursor);
    if submenu_visible {
        let on_sub = menu.sub.clamp(cursor);
        if cursor.distance(on_sub) < cursor.distance(boundary) {
            boundary = on_sub;
        }
    }
    ExcursionResult::outside(boundary, cursor.distance(boundary))
}

/// On target only inside the target submenu row while the submenu is shown.
pub fn is_on_target(cursor: Point, menu: &MenuGeometry, submenu_visible: bool) -> bool {
    submenu_visible && menu.target_sub_item().contains(cursor)
}
