use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Width of the reference scene in scene units.
pub const SCENE_WIDTH: f64 = 0.46;
/// Height of the reference scene in scene units.
pub const SCENE_HEIGHT: f64 = 0.26;
/// Default sine wavelength for curved tunnels.
pub const DEFAULT_WAVELENGTH: f64 = 0.15;
/// Sample spacing for curved, corner and lasso-loop paths.
pub const DEFAULT_STEP: f64 = 0.002;
/// Sample spacing for sequential tunnels.
pub const SEQUENTIAL_STEP: f64 = 0.001;
/// Clickable radius of the start button.
pub const START_BUTTON_RADIUS: f64 = 0.008;
/// Completion radius around the end point.
pub const TARGET_RADIUS: f64 = 0.01;
/// Upper bound on samples in any generated path or loop.
pub const MAX_PATH_SAMPLES: usize = 1_000_000;
/// Position sampling interval (20 Hz).
pub const SAMPLE_INTERVAL_MS: u64 = 50;
/// Height of the forbidden straight bar between lasso start and end.
pub const SHORTCUT_BAR_HEIGHT: f64 = 0.004;
/// Minimum icon clearance as a fraction of the icon radius.
pub const ICON_CLEARANCE_FACTOR: f64 = 2.0 / 3.0;

/// Placement of generated tunnels in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub start_x: f64,
    pub end_x: f64,
    /// Centerline y for flat tunnel sections.
    pub y_base: f64,
    pub wavelength: f64,
    pub step_size: f64,
    pub sequential_step: f64,
    pub scene_width: f64,
    pub scene_height: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            end_x: SCENE_WIDTH,
            y_base: 0.13,
            wavelength: DEFAULT_WAVELENGTH,
            step_size: DEFAULT_STEP,
            sequential_step: SEQUENTIAL_STEP,
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,
        }
    }
}

impl SceneConfig {
    /// Pixels per scene unit for a canvas of the given pixel width.
    pub fn pixels_per_unit(&self, canvas_width_px: f64) -> f64 {
        canvas_width_px / self.scene_width
    }

    /// Convert a pointer position relative to the canvas origin into scene
    /// coordinates.
    pub fn to_scene(&self, px: f64, py: f64, pixels_per_unit: f64) -> Point {
        Point::new(px / pixels_per_unit, py / pixels_per_unit)
    }
}

/// Per-trial thresholds used by the controller and the checkers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    pub start_button_radius: f64,
    pub target_radius: f64,
    pub sample_interval_ms: u64,
    pub shortcut_bar_height: f64,
    pub icon_clearance_factor: f64,
    /// Overrides every lasso condition's loop margin when set.
    pub lasso_margin: Option<f64>,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            start_button_radius: START_BUTTON_RADIUS,
            target_radius: TARGET_RADIUS,
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            shortcut_bar_height: SHORTCUT_BAR_HEIGHT,
            icon_clearance_factor: ICON_CLEARANCE_FACTOR,
            lasso_margin: None,
        }
    }
}

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scene: SceneConfig,
    pub trial: TrialConfig,
}

impl EngineConfig {
    /// Load config from a TOML file. Checks `STEERING_CONFIG`, then
    /// `config/steering.toml`, falling back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("STEERING_CONFIG")
            .unwrap_or_else(|_| "config/steering.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [trial]
            target_radius = 0.02
            "#,
        )
        .unwrap();
        assert_eq!(cfg.trial.target_radius, 0.02);
        assert_eq!(cfg.trial.start_button_radius, START_BUTTON_RADIUS);
        assert_eq!(cfg.scene.end_x, SCENE_WIDTH);
    }

    #[test]
    fn pixel_conversion_uses_scene_width() {
        let scene = SceneConfig::default();
        let scale = scene.pixels_per_unit(460.0);
        assert!((scale - 1000.0).abs() < 1e-9);
        let p = scene.to_scene(230.0, 130.0, scale);
        assert!((p.x - 0.23).abs() < 1e-12);
        assert!((p.y - 0.13).abs() < 1e-12);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(EngineConfig::from_toml_str("[trial\ntarget_radius = 1").is_err());
    }
}
