// Data-driven enclosure configuration.
//
// Every tunable of the generator lives in `EnclosureConfig`, loadable from
// JSON. The defaults reproduce the stock pit: a 6x6 candidate window, a 9x9
// clearance column, 4-5 layers deep, 6-10 growth rounds, and an acceptance
// bound of 49 (which keeps practical radii near 7 cells).
//
// Decoration stamping is grouped in `DecorationConfig` and ships disabled.
// `companion_content` unlocks the spore-sack camp variant; hosts set it when
// the content it depends on is available.
//
// See also: `feature.rs` which reads the config on every placement,
// `error.rs` for `ConfigError`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decoration pass parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    pub enabled: bool,
    /// How far past an edge cell, along a direction, to look for an anchor.
    pub probe_distance: i32,
    /// Sideways reach of the clearance rectangle on each side of the anchor.
    pub lateral_reach: i32,
    /// Maximum number of structures stamped per placement.
    pub max_anchors: usize,
    /// Unlocks the spore-sack camp variant.
    pub companion_content: bool,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            probe_distance: 4,
            lateral_reach: 2,
            max_anchors: 3,
            companion_content: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclosureConfig {
    /// Candidate centres span `[c - search_radius, c + search_radius)` on X and Z.
    pub search_radius: i32,
    /// Half-width of the clearance column checked around each candidate.
    pub clearance_radius: i32,
    /// Pit floor sits `min_depth + [0, depth_variance)` below the surface layer.
    pub min_depth: i32,
    pub depth_variance: u32,
    /// Growth runs `min_rounds + [0, round_variance)` rounds.
    pub min_rounds: u32,
    pub round_variance: u32,
    /// A frontier cell expands only when `next_below(acceptance_bound)`
    /// exceeds its squared distance from the centre.
    pub acceptance_bound: u32,
    /// Chance that the ground under a final edge cell is removed.
    pub drop_off_chance: f32,
    /// Chance that a pit column gets surface cover on its floor.
    pub cover_chance: f32,
    /// Share of cover that is grass rather than dead bush.
    pub grass_chance: f32,
    /// Chance per pit column of spawning a creeper-family mob.
    pub pit_spawn_chance: f32,
    /// Share of pit mobs that are full creepers rather than creepies.
    pub creeper_chance: f32,
    /// Chance per outline cell of starting a fence pair.
    pub fence_chance: f32,
    pub decorations: DecorationConfig,
}

impl Default for EnclosureConfig {
    fn default() -> Self {
        Self {
            search_radius: 3,
            clearance_radius: 4,
            min_depth: 4,
            depth_variance: 2,
            min_rounds: 6,
            round_variance: 5,
            acceptance_bound: 49,
            drop_off_chance: 0.6,
            cover_chance: 0.4,
            grass_chance: 0.7,
            pit_spawn_chance: 0.3,
            creeper_chance: 0.5,
            fence_chance: 0.2,
            decorations: DecorationConfig::default(),
        }
    }
}

impl EnclosureConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("drop_off_chance", self.drop_off_chance),
            ("cover_chance", self.cover_chance),
            ("grass_chance", self.grass_chance),
            ("pit_spawn_chance", self.pit_spawn_chance),
            ("creeper_chance", self.creeper_chance),
            ("fence_chance", self.fence_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidChance { field, value });
            }
        }

        let bounds: [(&'static str, i64, i64); 9] = [
            ("search_radius", 1, self.search_radius as i64),
            ("clearance_radius", 0, self.clearance_radius as i64),
            ("min_depth", 2, self.min_depth as i64),
            ("depth_variance", 1, self.depth_variance as i64),
            ("min_rounds", 0, self.min_rounds as i64),
            ("round_variance", 1, self.round_variance as i64),
            ("acceptance_bound", 1, self.acceptance_bound as i64),
            ("decorations.probe_distance", 1, self.decorations.probe_distance as i64),
            ("decorations.lateral_reach", 0, self.decorations.lateral_reach as i64),
        ];
        for (field, min, value) in bounds {
            if value < min {
                return Err(ConfigError::InvalidBound { field, min, value });
            }
        }
        Ok(())
    }
}
