//! Trial condition catalog.
//!
//! Each condition pairs a [`TunnelSpec`] with an id, an optional time limit
//! and a description. Condition sets are repeated per participant according
//! to the repetition constants below.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::spec::{
    CurvedSpec, LassoSpec, MenuSpec, SegmentVariation, SequentialSpec, TunnelSpec,
};

/// Repetitions of each basic (curved tunnel) condition.
pub const BASIC_TRIAL_REPETITIONS: usize = 5;
/// Repetitions of each lasso condition.
pub const LASSO_TRIAL_REPETITIONS: usize = 2;
/// Repetitions of each cascading-menu condition.
pub const CASCADING_MENU_TRIAL_REPETITIONS: usize = 2;

/// One entry in a condition set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialCondition {
    pub id: u32,
    pub spec: TunnelSpec,
    /// Seconds allowed for the attempt; `None` means unlimited.
    #[serde(default)]
    pub time_limit: Option<f64>,
    #[serde(default)]
    pub description: String,
}

impl TrialCondition {
    pub fn new(id: u32, spec: TunnelSpec, description: &str) -> Self {
        Self {
            id,
            spec,
            time_limit: None,
            description: description.to_string(),
        }
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn fmt_limit(limit: Option<f64>) -> String {
    limit.map_or_else(|| "null".to_string(), |l| l.to_string())
}

/// Key identifying a condition for practice tracking. Conditions that share
/// a key only need to be practiced once.
pub fn condition_key(condition: &TrialCondition) -> String {
    let limit = fmt_limit(condition.time_limit);
    match &condition.spec {
        TunnelSpec::Sequential(seq) => {
            let widths = seq
                .segment_widths
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join("-");
            match seq.variation {
                SegmentVariation::Width => format!("sequential-width-{widths}-{limit}"),
                SegmentVariation::Curvature { amplitude } => {
                    format!("sequential-curvature-{widths}-0-{amplitude}-{limit}")
                },
            }
        },
        TunnelSpec::Curved(c) => format!("{}-{}-{limit}", c.width, c.curvature),
        TunnelSpec::Corner(c) => format!(
            "corner-{}-{}-{}-{limit}",
            c.width, c.num_corners, c.corner_offset
        ),
        TunnelSpec::Lasso(_) => format!("lasso-{}-{limit}", condition.id),
        TunnelSpec::CascadingMenu(_) => format!("cascading_menu-{}-{limit}", condition.id),
    }
}

/// Repeat every condition `repetitions` times, keeping set order within each
/// pass.
pub fn with_repetitions(conditions: &[TrialCondition], repetitions: usize) -> Vec<TrialCondition> {
    (0..repetitions)
        .flat_map(|_| conditions.iter().cloned())
        .collect()
}

fn curved(id: u32, width: f64, curvature: f64, description: &str) -> TrialCondition {
    TrialCondition::new(
        id,
        TunnelSpec::Curved(CurvedSpec {
            width,
            curvature,
            wavelength: None,
        }),
        description,
    )
}

/// Basic curved-tunnel conditions.
pub fn basic_conditions() -> Vec<TrialCondition> {
    vec![
        curved(1, 0.02, 0.025, "narrow tunnel, gentle curve"),
        curved(2, 0.04, 0.025, "wide tunnel, gentle curve"),
    ]
}

fn sequential(id: u32, widths: [f64; 2], variation: SegmentVariation, description: &str) -> TrialCondition {
    TrialCondition::new(
        id,
        TunnelSpec::Sequential(SequentialSpec {
            segment_widths: widths.to_vec(),
            variation,
        }),
        description,
    )
}

/// Two-segment sequential conditions (width changes and straight-to-curved).
pub fn sequential_conditions() -> Vec<TrialCondition> {
    let bump = SegmentVariation::Curvature { amplitude: 0.05 };
    vec![
        sequential(5, [0.08, 0.01], SegmentVariation::Width, "wide-to-narrow segments"),
        sequential(6, [0.01, 0.08], SegmentVariation::Width, "narrow-to-wide segments"),
        sequential(7, [0.02, 0.02], bump, "straight-to-curved segments, narrow"),
        sequential(8, [0.05, 0.05], bump, "straight-to-curved segments, wide"),
    ]
}

const L_CLUSTER: [&str; 5] = [
    ". . . . . . . . .",
    ". X X . . . . . .",
    ". X X X X X X X .",
    ". X X X X X X X .",
    ". . . . . . . . .",
];

const L_CLUSTER_WITH_DISTRACTORS: [&str; 4] = [
    "O O O O O O O O O",
    "O X X O O O O O O",
    "O X X X X X X X O",
    "O X X X X X X X O",
];

fn lasso(id: u32, rows: &[&str], icon_radius: f64, icon_spacing: f64) -> TrialCondition {
    TrialCondition::new(
        id,
        TunnelSpec::Lasso(LassoSpec {
            grid_layout: rows.iter().map(|r| r.to_string()).collect(),
            icon_radius,
            icon_spacing,
            grid_origin: Point::new(0.1, 0.05),
            margin: None,
        }),
        "L-shaped target cluster",
    )
}

/// Lasso selection conditions.
pub fn lasso_conditions() -> Vec<TrialCondition> {
    vec![
        lasso(101, &L_CLUSTER, 0.015, 0.035),
        lasso(102, &L_CLUSTER, 0.01, 0.0375),
        lasso(103, &L_CLUSTER, 0.005, 0.04),
        lasso(104, &L_CLUSTER[..4], 0.015, 0.035),
        lasso(105, &L_CLUSTER_WITH_DISTRACTORS, 0.015, 0.035),
    ]
}

fn menu(
    id: u32,
    size: usize,
    target: usize,
    sub_window: [f64; 2],
    origin_y: f64,
) -> TrialCondition {
    TrialCondition::new(
        id,
        TunnelSpec::CascadingMenu(MenuSpec {
            main_menu_size: size,
            sub_menu_size: size,
            target_main_index: target,
            target_sub_index: target,
            main_menu_window_size: [0.12, 0.12],
            sub_menu_window_size: sub_window,
            main_menu_origin: Point::new(0.1, origin_y),
        }),
        &format!("{size}-item menus, target at main[{target}] sub[{target}]"),
    )
}

/// Cascading-menu conditions.
pub fn cascading_menu_conditions() -> Vec<TrialCondition> {
    vec![
        menu(201, 12, 11, [0.1, 0.12], 0.02),
        menu(202, 12, 5, [0.1, 0.12], 0.02),
        menu(203, 8, 7, [0.12, 0.12], 0.01),
        menu(204, 8, 3, [0.12, 0.12], 0.01),
        menu(205, 4, 3, [0.12, 0.12], 0.02),
        menu(206, 4, 1, [0.12, 0.12], 0.02),
    ]
}

/// Look up a condition by id across every catalog set.
pub fn find_condition(id: u32) -> Option<TrialCondition> {
    basic_conditions()
        .into_iter()
        .chain(sequential_conditions())
        .chain(lasso_conditions())
        .chain(cascading_menu_conditions())
        .find(|c| c.id == id)
}
