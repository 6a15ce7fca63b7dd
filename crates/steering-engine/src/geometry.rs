use serde::Serialize;

use steering_core::config::EngineConfig;
use steering_core::error::SpecError;
use steering_core::geometry::Point;
use steering_core::spec::TunnelSpec;
use steering_core::task_trait::SteeringTask;
use steering_lasso::LassoTask;
use steering_menu::MenuTask;
use steering_tunnel::TunnelTask;

/// Geometry generated for one trial attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskGeometry {
    Tunnel(TunnelTask),
    Lasso(LassoTask),
    Menu(MenuTask),
}

impl TaskGeometry {
    pub fn task(&self) -> &dyn SteeringTask {
        match self {
            Self::Tunnel(t) => t,
            Self::Lasso(t) => t,
            Self::Menu(t) => t,
        }
    }

    pub fn path(&self) -> &[Point] {
        self.task().path()
    }

    /// Corridor width; only tunnels have one.
    pub fn width(&self) -> Option<f64> {
        match self {
            Self::Tunnel(t) => Some(t.width()),
            Self::Lasso(_) | Self::Menu(_) => None,
        }
    }

    /// Always read start and end from here: for lasso tasks they are not the
    /// path endpoints.
    pub fn start(&self) -> Point {
        self.task().start()
    }

    pub fn end(&self) -> Point {
        self.task().end()
    }

    /// Plain view for renderers and persistence.
    pub fn summary(&self) -> GeneratedPath {
        GeneratedPath {
            path: self.path().to_vec(),
            width: self.width(),
            start: self.start(),
            end: self.end(),
        }
    }
}

/// Serializable output of [`generate_path`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPath {
    pub path: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    pub start: Point,
    pub end: Point,
}

/// Build the geometry for `spec`. Deterministic and free of side effects
/// apart from debug logging.
pub fn generate_path(spec: &TunnelSpec, config: &EngineConfig) -> Result<TaskGeometry, SpecError> {
    let scene = &config.scene;
    Ok(match spec {
        TunnelSpec::Curved(s) => TaskGeometry::Tunnel(TunnelTask::curved(s, scene)?),
        TunnelSpec::Corner(s) => TaskGeometry::Tunnel(TunnelTask::corner(s, scene)?),
        TunnelSpec::Sequential(s) => TaskGeometry::Tunnel(TunnelTask::sequential(s, scene)?),
        TunnelSpec::Lasso(s) => TaskGeometry::Lasso(LassoTask::new(s, scene, &config.trial)?),
        TunnelSpec::CascadingMenu(s) => TaskGeometry::Menu(MenuTask::new(s)?),
    })
}

#[cfg(test)]
mod tests {
    use steering_core::conditions::{
        basic_conditions, cascading_menu_conditions, lasso_conditions, sequential_conditions,
    };
    use steering_core::spec::{CurvedSpec, TunnelKind};

    use super::*;

    #[test]
    fn every_catalog_condition_generates() {
        let config = EngineConfig::default();
        for c in basic_conditions()
            .into_iter()
            .chain(sequential_conditions())
            .chain(lasso_conditions())
            .chain(cascading_menu_conditions())
        {
            let g = generate_path(&c.spec, &config)
                .unwrap_or_else(|e| panic!("condition {} failed: {e}", c.id));
            assert_eq!(g.task().kind(), c.spec.kind());
            if c.spec.kind() != TunnelKind::CascadingMenu {
                assert!(g.path().len() >= 2, "condition {} path too short", c.id);
            }
        }
    }

    #[test]
    fn tunnel_start_end_are_path_endpoints() {
        let g = generate_path(
            &TunnelSpec::Curved(CurvedSpec {
                width: 0.02,
                curvature: 0.025,
                wavelength: None,
            }),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(g.start(), g.path()[0]);
        assert_eq!(g.end(), *g.path().last().unwrap());
        assert_eq!(g.width(), Some(0.02));
    }

    #[test]
    fn lasso_loop_closes_and_start_is_explicit() {
        let spec = &lasso_conditions()[0].spec;
        let g = generate_path(spec, &EngineConfig::default()).unwrap();
        assert_eq!(g.path()[0], *g.path().last().unwrap());
        assert_ne!(g.start(), g.path()[0]);
        assert_eq!(g.width(), None);
    }

    #[test]
    fn summary_serializes_without_width_for_menus() {
        let spec = &cascading_menu_conditions()[0].spec;
        let g = generate_path(spec, &EngineConfig::default()).unwrap();
        let json = serde_json::to_value(g.summary()).unwrap();
        assert!(json.get("width").is_none());
        assert_eq!(json["path"].as_array().unwrap().len(), 0);
    }
}
