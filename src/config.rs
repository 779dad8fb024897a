//! Game configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Loaded from JSON (a file on native, a string handed over by the
//! page on the web).

use serde::{Deserialize, Serialize};

use crate::consts::COLLISION_RADIUS;
use crate::error::{ConfigError, SetupError};
use crate::sim::{ClockConfig, PlacementConfig, RoadConfig, VehicleTuning};

/// Full configuration for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed seed for reproducible levels; a fresh random seed when unset
    pub seed: Option<u64>,
    pub road: RoadConfig,
    pub vehicle: VehicleTuning,
    pub clock: ClockConfig,

    // === Placement layers ===
    /// Traffic to dodge
    pub other_cars: PlacementConfig,
    /// Pickups
    pub bonuses: PlacementConfig,
    /// Cones and barriers hugging the road edge
    pub barriers: PlacementConfig,
    /// Trees, benches, bins further out
    pub decorations: PlacementConfig,

    /// Planar hit radius for cars and bonuses
    pub collision_radius: f32,
    /// Clamp for a single frame's dt; unclamped when unset
    pub max_frame_dt: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            road: RoadConfig::default(),
            vehicle: VehicleTuning::default(),
            clock: ClockConfig::default(),

            other_cars: PlacementConfig {
                sample_divisions: 8000,
                max_objects: 60,
                // slightly above the road
                height_offset: 0.1,
                ..Default::default()
            },
            bonuses: PlacementConfig {
                sample_divisions: 8000,
                max_objects: 1000,
                height_offset: 1.0,
                ..Default::default()
            },
            barriers: PlacementConfig {
                sample_divisions: 8000,
                min_spacing: 15.0,
                // saturated: try every sample, spacing alone decides
                base_probability: 10.0,
                max_objects: 200,
                height_offset: 0.0,
                lateral_offset_from_center: Some(6.0),
                ..Default::default()
            },
            decorations: PlacementConfig {
                sample_divisions: 8000,
                min_spacing: 30.0,
                max_objects: 200,
                height_offset: 0.0,
                lateral_offset_from_center: Some(20.0),
                ..Default::default()
            },

            collision_radius: COLLISION_RADIUS,
            max_frame_dt: None,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check everything the world relies on before a level is built.
    /// Placement layers are checked when they are spawned.
    pub fn validate(&self) -> Result<(), SetupError> {
        self.road.validate()?;
        self.vehicle.validate()?;
        self.clock.validate()?;
        if !(self.collision_radius.is_finite() && self.collision_radius >= 0.0) {
            return Err(SetupError::InvalidConfig("collision_radius must be finite and >= 0"));
        }
        if self.max_frame_dt.is_some_and(|max| !(max.is_finite() && max >= 0.0)) {
            return Err(SetupError::InvalidConfig("max_frame_dt must be finite and >= 0"));
        }
        Ok(())
    }

    /// Load a JSON config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
