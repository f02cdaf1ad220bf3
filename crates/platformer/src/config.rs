//! Game configuration
//!
//! Loaded from a `.toml` or `.ron` file through the kernel's [`Config`]
//! trait. Every field is defaulted, so a file only lists what it changes:
//!
//! ```toml
//! start_level = "level1"
//!
//! [physics]
//! gravity = 18.0
//!
//! [controls]
//! move_speed = 6.0
//! ```

use platformer_kernel::config::{Config, ConfigError, PhysicsConfig};
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Kernel tuning
    pub physics: PhysicsConfig,

    /// Movement settings
    pub controls: ControlsConfig,

    /// Distance below which a pickup is collected
    pub pickup_radius: f32,

    /// Half size of an enemy's box
    pub enemy_half_extent: f32,

    /// Built-in level name or path to a level file
    pub start_level: String,

    /// Number of frames the headless runner simulates
    pub frames: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            controls: ControlsConfig::default(),
            pickup_radius: 1.0,
            enemy_half_extent: 0.5,
            start_level: "tutorial".to_string(),
            frames: 3600,
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Check every value the game depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.controls.validate()?;

        for (name, value) in [
            ("pickup_radius", self.pickup_radius),
            ("enemy_half_extent", self.enemy_half_extent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }

        if self.start_level.trim().is_empty() {
            return Err(ConfigError::Invalid("start_level is empty".to_string()));
        }

        Ok(())
    }
}

/// Movement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Horizontal speed while a direction is held
    pub move_speed: f32,

    /// Per-frame velocity multiplier once a direction is released
    pub friction: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            friction: 0.8,
        }
    }
}

impl ControlsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.move_speed.is_finite() || self.move_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "move_speed must be finite and >= 0, got {}",
                self.move_speed
            )));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::Invalid(format!(
                "friction must be within [0, 1], got {}",
                self.friction
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_game_tuning() {
        let config = GameConfig::default();
        assert_relative_eq!(config.controls.move_speed, 8.0);
        assert_relative_eq!(config.controls.friction, 0.8);
        assert_relative_eq!(config.physics.gravity, 20.0);
        assert_relative_eq!(config.physics.jump_impulse, 12.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.toml");
        let contents = "start_level = \"level2\"\n\n[controls]\nmove_speed = 6.0\n";
        std::fs::write(&path, contents).unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.start_level, "level2");
        assert_relative_eq!(config.controls.move_speed, 6.0);
        assert_relative_eq!(config.controls.friction, 0.8);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.ron");

        let config = GameConfig {
            pickup_radius: 1.5,
            ..GameConfig::default()
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(GameConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_friction_out_of_range() {
        let mut config = GameConfig::default();
        config.controls.friction = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
