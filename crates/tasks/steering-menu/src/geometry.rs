use steering_core::error::{SpecError, ensure_finite, ensure_positive};
use steering_core::geometry::{Point, Rect};
use steering_core::spec::MenuSpec;

/// Hit regions of a two-level cascading menu.
///
/// Item rows tile their window exactly. The submenu abuts the main menu's
/// right edge and its top is aligned with the target main-menu row.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuGeometry {
    pub main: Rect,
    pub main_items: Vec<Rect>,
    pub sub: Rect,
    pub sub_items: Vec<Rect>,
    pub target_main_index: usize,
    pub target_sub_index: usize,
}

impl MenuGeometry {
    pub fn from_spec(spec: &MenuSpec) -> Result<Self, SpecError> {
        if spec.main_menu_size == 0 {
            return Err(SpecError::InvalidMenuSize { which: "main" });
        }
        if spec.sub_menu_size == 0 {
            return Err(SpecError::InvalidMenuSize { which: "sub" });
        }
        if spec.target_main_index >= spec.main_menu_size {
            return Err(SpecError::MenuIndexOutOfRange {
                which: "main",
                index: spec.target_main_index,
                size: spec.main_menu_size,
            });
        }
        if spec.target_sub_index >= spec.sub_menu_size {
            return Err(SpecError::MenuIndexOutOfRange {
                which: "sub",
                index: spec.target_sub_index,
                size: spec.sub_menu_size,
            });
        }
        let [main_w, main_h] = spec.main_menu_window_size;
        let [sub_w, sub_h] = spec.sub_menu_window_size;
        ensure_positive("main_menu_width", main_w)?;
        ensure_positive("main_menu_height", main_h)?;
        ensure_positive("sub_menu_width", sub_w)?;
        ensure_positive("sub_menu_height", sub_h)?;
        ensure_finite("main_menu_origin.x", spec.main_menu_origin.x)?;
        ensure_finite("main_menu_origin.y", spec.main_menu_origin.y)?;

        let main = Rect::from_origin_size(spec.main_menu_origin, main_w, main_h);
        let main_items = main.split_rows(spec.main_menu_size);
        let target_row = main_items[spec.target_main_index];
        let sub = Rect::from_origin_size(Point::new(main.right(), target_row.top()), sub_w, sub_h);
        let sub_items = sub.split_rows(spec.sub_menu_size);

        tracing::debug!(
            main_items = main_items.len(),
            sub_items = sub_items.len(),
            target_main = spec.target_main_index,
            target_sub = spec.target_sub_index,
            "Generated cascading menu"
        );
        Ok(Self {
            main,
            main_items,
            sub,
            sub_items,
            target_main_index: spec.target_main_index,
            target_sub_index: spec.target_sub_index,
        })
    }

    /// The main-menu row that opens the submenu.
    pub fn target_main_item(&self) -> Rect {
        self.main_items[self.target_main_index]
    }

    /// The submenu row that completes the trial.
    pub fn target_sub_item(&self) -> Rect {
        self.sub_items[self.target_sub_index]
    }

    /// Center of the first main-menu row.
    pub fn start(&self) -> Point {
        self.main_items[0].center()
    }

    /// Center of the target submenu row.
    pub fn end(&self) -> Point {
        self.target_sub_item().center()
    }

    /// Index of the main-menu row under `p`. A point on a shared row edge
    /// belongs to the upper row.
    pub fn main_item_at(&self, p: Point) -> Option<usize> {
        self.main_items.iter().position(|r| r.contains(p))
    }

    pub fn sub_item_at(&self, p: Point) -> Option<usize> {
        self.sub_items.iter().position(|r| r.contains(p))
    }
}
