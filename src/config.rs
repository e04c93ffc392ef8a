//! Scene configuration.
//!
//! Every field has a default, so a JSON file only needs the values it wants
//! to change:
//!
//! ```json
//! {
//!   "foliage": { "count": 30000 },
//!   "rates": { "ornaments": 3.0 },
//!   "sync": "shared"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::field::{ChaosShell, FieldLayout, TreeShape};
use crate::particle::ParticleClass;

/// Size and chaos cloud of one population.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub count: usize,
    /// Overrides the class's default chaos shell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chaos: Option<ChaosShell>,
}

impl PopulationConfig {
    fn with_count(count: usize) -> Self {
        Self { count, chaos: None }
    }
}

/// Smoothing rate constants. Larger is snappier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
    pub foliage: f32,
    pub ornaments: f32,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            foliage: 1.5,
            ornaments: 2.0,
        }
    }
}

/// Whether the two animated groups share one progress value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Each group smooths its own progress from the same mode.
    #[default]
    Independent,
    /// One controller (foliage rate) drives every group.
    Shared,
}

/// Everything needed to build a [`Scene`](crate::Scene).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub tree: TreeShape,
    pub foliage: PopulationConfig,
    pub balls: PopulationConfig,
    pub boxes: PopulationConfig,
    pub lights: PopulationConfig,
    pub rates: Rates,
    pub sync: SyncPolicy,
    /// Half-width of a needle quad in world units before size variance.
    pub point_size: f32,
    /// Fraction of needles showing a gold sparkle at any instant.
    pub sparkle_rate: f32,
    /// Camera orbit speed around the tree axis, rad/s.
    pub auto_rotate: f32,
    /// Clock multiplier.
    pub time_scale: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree: TreeShape::default(),
            foliage: PopulationConfig::with_count(15_000),
            balls: PopulationConfig::with_count(300),
            boxes: PopulationConfig::with_count(120),
            lights: PopulationConfig::with_count(400),
            rates: Rates::default(),
            sync: SyncPolicy::default(),
            point_size: 0.06,
            sparkle_rate: 0.015,
            auto_rotate: 0.12,
            time_scale: 1.0,
        }
    }
}

impl SceneConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn population(&self, class: ParticleClass) -> &PopulationConfig {
        match class {
            ParticleClass::Foliage => &self.foliage,
            ParticleClass::Ball => &self.balls,
            ParticleClass::Box => &self.boxes,
            ParticleClass::Light => &self.lights,
        }
    }

    /// Placement inputs for the field generator.
    pub fn layout(&self, class: ParticleClass) -> FieldLayout {
        FieldLayout {
            tree: self.tree,
            chaos: self
                .population(class)
                .chaos
                .unwrap_or_else(|| ChaosShell::for_class(class)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = SceneConfig::from_json(r#"{ "rates": { "ornaments": 3.5 }, "sync": "shared" }"#).unwrap();
        assert_eq!(cfg.rates.ornaments, 3.5);
        assert_eq!(cfg.rates.foliage, 1.5);
        assert_eq!(cfg.sync, SyncPolicy::Shared);
        assert_eq!(cfg.foliage.count, 15_000);
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = SceneConfig::default();
        let back = SceneConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = SceneConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_layout_uses_population_shell() {
        let cfg = SceneConfig::default();
        assert_eq!(
            cfg.layout(ParticleClass::Light).chaos,
            ChaosShell::for_class(ParticleClass::Light)
        );
        assert_eq!(cfg.layout(ParticleClass::Foliage).tree, cfg.tree);

        let custom = SceneConfig::from_json(
            r#"{ "balls": { "count": 10, "chaos": { "inner_radius": 1.0, "outer_radius": 2.0, "lift": 0.0 } } }"#,
        )
        .unwrap();
        assert_eq!(custom.layout(ParticleClass::Ball).chaos.outer_radius, 2.0);
    }

    #[test]
    fn test_count_only_population() {
        let cfg = SceneConfig::from_json(r#"{ "foliage": { "count": 30000 } }"#).unwrap();
        assert_eq!(cfg.foliage.count, 30_000);
        assert_eq!(cfg.balls.count, 300);
    }
}
