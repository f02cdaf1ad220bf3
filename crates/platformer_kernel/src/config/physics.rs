//! Physics tuning shared by the integrator, resolver and world step

use super::{Config, ConfigError};
use crate::foundation::time::clamp_delta;
use serde::{Deserialize, Serialize};

/// Physics configuration
///
/// Every field has a default, so a config file only needs to list the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in units/s² (positive)
    pub gravity: f32,

    /// Fastest allowed fall speed in units/s (positive; velocity.y is
    /// clamped to its negation)
    pub terminal_fall_speed: f32,

    /// Distance from a goal's center below which the goal counts as reached
    pub goal_radius: f32,

    /// Height below which the actor has fallen out of the level
    pub kill_floor: f32,

    /// Upward velocity applied by a jump
    pub jump_impulse: f32,

    /// Nominal fixed step in seconds
    pub nominal_dt: f32,

    /// Largest step handed to the kernel, as a multiple of `nominal_dt`
    pub max_dt_multiple: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 20.0,
            terminal_fall_speed: 50.0,
            goal_radius: 2.0,
            kill_floor: -10.0,
            jump_impulse: 12.0,
            nominal_dt: 1.0 / 60.0,
            max_dt_multiple: 4.0,
        }
    }
}

impl Config for PhysicsConfig {}

impl PhysicsConfig {
    /// Check that every value is usable by the kernel
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("gravity", self.gravity),
            ("terminal_fall_speed", self.terminal_fall_speed),
            ("goal_radius", self.goal_radius),
            ("jump_impulse", self.jump_impulse),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }

        if !self.kill_floor.is_finite() {
            return Err(ConfigError::Invalid("kill_floor must be finite".to_string()));
        }

        if !self.nominal_dt.is_finite() || self.nominal_dt <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "nominal_dt must be finite and > 0, got {}",
                self.nominal_dt
            )));
        }

        if !self.max_dt_multiple.is_finite() || self.max_dt_multiple < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "max_dt_multiple must be finite and >= 1, got {}",
                self.max_dt_multiple
            )));
        }

        Ok(())
    }

    /// Clamp a raw frame delta to what the kernel should be stepped with
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        clamp_delta(dt, self.nominal_dt, self.max_dt_multiple)
    }
}
