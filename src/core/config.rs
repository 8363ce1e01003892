//=========================================================================
// Interaction Configuration
//=========================================================================
//
// Every tunable of the interaction core, loadable from JSON.
//
// Each section falls back to its defaults, so a file only needs the
// fields it overrides:
//
//   { "pinch": { "priority_threshold": 14.0 },
//     "arbiter": { "carousel_offsets": [-4.0, 0.0, 4.0], "carousel_start_index": 1 } }
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::camera::CameraConfig;
use crate::core::focus_memory::FocusMemoryConfig;
use crate::core::gesture::{DoubleTapConfig, DragConfig, PinchConfig, SwipeConfig};
use crate::core::interaction::ArbiterConfig;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

//=== InteractionConfig ===================================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub swipe: SwipeConfig,
    pub pinch: PinchConfig,
    pub double_tap: DoubleTapConfig,
    pub drag: DragConfig,
    pub camera: CameraConfig,
    pub arbiter: ArbiterConfig,
    pub focus_memory: FocusMemoryConfig,
}

impl InteractionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(target: "config", "Loaded interaction config from {}", path.display());
        Ok(config)
    }

    /// Rejects values no frame of input could satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |what: &str| Err(ConfigError::Invalid(what.to_string()));

        if self.swipe.min_distance <= 0.0 || self.swipe.max_duration <= 0.0 {
            return invalid("swipe thresholds must be positive");
        }
        if self.pinch.min_distance_change < 0.0 || self.pinch.priority_threshold < 0.0 {
            return invalid("pinch thresholds must not be negative");
        }
        if self.double_tap.time_window <= 0.0 || self.double_tap.distance_threshold <= 0.0 {
            return invalid("double tap window must be positive");
        }
        if self.drag.hold_time <= 0.0 {
            return invalid("drag hold_time must be positive");
        }
        if !(0.0..=1.0).contains(&self.drag.velocity_smoothing) {
            return invalid("drag velocity_smoothing must lie in [0, 1]");
        }
        if self.camera.default_duration < 0.0
            || self.camera.fast_duration < 0.0
            || self.camera.carousel_duration < 0.0
        {
            return invalid("camera durations must not be negative");
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return invalid("camera clip planes must satisfy 0 < near < far");
        }
        if self.arbiter.carousel_offsets.is_empty() {
            return invalid("carousel needs at least one offset");
        }
        if self.arbiter.carousel_start_index >= self.arbiter.carousel_offsets.len() {
            return Err(ConfigError::Invalid(format!(
                "carousel_start_index {} out of range for {} offsets",
                self.arbiter.carousel_start_index,
                self.arbiter.carousel_offsets.len()
            )));
        }
        if self.arbiter.post_transition_block < 0.0 {
            return invalid("post_transition_block must not be negative");
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
