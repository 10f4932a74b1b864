//! Gameplay tuning
//!
//! Every balance knob of the controller, loadable from JSON so designers can
//! iterate without a rebuild. Gravities are signed (negative = downward).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    /// A field holds a value the simulation cannot run with
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    /// JSON parse/encode failure
    #[error("tuning JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lateral control ===
    /// World units per unit of drag delta
    pub sliding_speed: f32,
    /// Ball x-position is clamped to [-x_pos_limit, x_pos_limit]
    pub x_pos_limit: f32,
    /// Whether keyboard axis input is read when no drag is active
    pub use_keyboard: bool,

    // === Jump arc ===
    /// Forward distance covered by one hop (tile spacing)
    pub jump_distance: f32,
    /// Apex height of one hop above the launch point
    pub jump_height: f32,

    // === Difficulty ===
    /// Gravity applied at game start
    pub min_gravity: f32,
    /// Strongest gravity difficulty can reach
    pub max_gravity: f32,
    /// Landings between gravity steps
    pub gravity_rate: i32,
    /// Magnitude added to gravity per step
    pub gravity_step: f32,

    // === Geometry ===
    /// Vertical extent of the ball's collision bounds
    pub agent_extent_y: f32,
    /// Height at which gem pickup bursts spawn
    pub gem_effect_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sliding_speed: 0.03,
            x_pos_limit: 5.0,
            use_keyboard: true,

            jump_distance: 4.0,
            jump_height: 2.0,

            min_gravity: -35.0,
            max_gravity: -85.0,
            gravity_rate: 10,
            gravity_step: 10.0,

            agent_extent_y: 1.0,
            gem_effect_height: 1.0,
        }
    }
}

impl Tuning {
    /// Gravity override applied when the ball falls through the floor
    pub fn terminal_gravity(&self) -> f32 {
        self.max_gravity - crate::consts::TERMINAL_GRAVITY_OFFSET
    }

    /// Check every field is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.min_gravity.is_finite() && self.min_gravity < 0.0) {
            return invalid("min_gravity", "must be finite and negative");
        }
        if !(self.max_gravity.is_finite() && self.max_gravity < 0.0) {
            return invalid("max_gravity", "must be finite and negative");
        }
        if self.max_gravity > self.min_gravity {
            return invalid("max_gravity", "must be at least as strong as min_gravity");
        }
        if self.gravity_rate <= 0 {
            return invalid("gravity_rate", "must be positive");
        }
        if !(self.gravity_step.is_finite() && self.gravity_step > 0.0) {
            return invalid("gravity_step", "must be finite and positive");
        }
        if !(self.jump_height.is_finite() && self.jump_height > 0.0) {
            return invalid("jump_height", "must be finite and positive");
        }
        if !(self.jump_distance.is_finite() && self.jump_distance > 0.0) {
            return invalid("jump_distance", "must be finite and positive");
        }
        if !(self.x_pos_limit.is_finite() && self.x_pos_limit >= 0.0) {
            return invalid("x_pos_limit", "must be finite and non-negative");
        }
        if !(self.sliding_speed.is_finite() && self.sliding_speed >= 0.0) {
            return invalid("sliding_speed", "must be finite and non-negative");
        }
        if !(self.agent_extent_y.is_finite() && self.agent_extent_y > 0.0) {
            return invalid("agent_extent_y", "must be finite and positive");
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Save tuning as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TuningError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Tuning saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.terminal_gravity(), -135.0);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity_rate": 5, "use_keyboard": false }"#).unwrap();
        assert_eq!(tuning.gravity_rate, 5);
        assert!(!tuning.use_keyboard);
        assert_eq!(tuning.min_gravity, -35.0);
    }

    #[test]
    fn test_rejects_positive_gravity() {
        let err = Tuning::from_json(r#"{ "min_gravity": 10.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "min_gravity", .. }));
    }

    #[test]
    fn test_rejects_inverted_gravity_bounds() {
        let tuning = Tuning {
            min_gravity: -90.0,
            max_gravity: -40.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "max_gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_rate() {
        let tuning = Tuning {
            gravity_rate: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Json(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        let tuning = Tuning {
            x_pos_limit: 3.5,
            ..Default::default()
        };
        tuning.save(&path).unwrap();
        assert_eq!(Tuning::load(&path).unwrap(), tuning);
    }
}
