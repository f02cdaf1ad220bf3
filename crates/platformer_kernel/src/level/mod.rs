//! Level descriptors
//!
//! A level lists its platforms, moving platforms, collectibles and enemies
//! with flat `x/y/z` coordinates and `w/h/d` sizes. The kernel only cares
//! about the volumes derived from it ([`LevelDesc::volume_descs`]); pickups
//! and enemies are interpreted by the game on top.

mod builtin;

pub use builtin::{builtin_names, next_level, LEVEL_ORDER};

use crate::config::Format;
use crate::foundation::math::Vec3;
use crate::physics::{ActorPose, MotionDesc, VolumeDesc, VolumeError, Waveform};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Edge length of the player cube
pub const PLAYER_SIZE: f32 = 1.0;

/// Size of the goal trigger placed at a level's goal point
pub const GOAL_DIMENSIONS: [f32; 3] = [1.0, 2.0, 1.0];

/// A point in level space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Point {
    /// As a vector
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Cosmetic role of a static platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Spawn platform
    Start,
    /// Plain platform
    Normal,
    /// Platform in a timed sequence
    Rhythm,
    /// Platform under the goal
    Goal,
}

/// Static platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDesc {
    /// Center x
    pub x: f32,
    /// Center y
    pub y: f32,
    /// Center z
    pub z: f32,
    /// Width (x)
    pub w: f32,
    /// Height (y)
    pub h: f32,
    /// Depth (z)
    pub d: f32,
    /// Role; all kinds collide the same way
    pub kind: PlatformKind,
}

/// Platform that follows a waveform around its origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatformDesc {
    /// Origin x
    pub x: f32,
    /// Origin y
    pub y: f32,
    /// Origin z
    pub z: f32,
    /// Width (x)
    pub w: f32,
    /// Height (y)
    pub h: f32,
    /// Depth (z)
    pub d: f32,
    /// Path shape
    pub waveform: Waveform,
    /// Angular speed
    pub speed: f32,
    /// Peak displacement
    pub range: f32,
}

/// Enemy behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Never moves
    Static,
    /// Walks back and forth along x
    Patrol {
        /// Peak displacement
        range: f32,
        /// Angular speed
        speed: f32,
    },
    /// Sways along x while bobbing above its spawn height
    Flying {
        /// Peak horizontal displacement
        range: f32,
        /// Angular speed
        speed: f32,
        /// Hover height above the spawn point
        height: f32,
    },
    /// Moves toward the player once it comes close
    Chaser {
        /// Linear speed in units per second
        speed: f32,
        /// Distance at which the chase starts
        chase_radius: f32,
    },
}

/// Enemy spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyDesc {
    /// Spawn x
    pub x: f32,
    /// Spawn y
    pub y: f32,
    /// Spawn z
    pub z: f32,
    /// Behaviour
    pub kind: EnemyKind,
}

impl EnemyDesc {
    /// Spawn point as a vector
    pub fn spawn(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Complete description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDesc {
    /// Display name
    pub name: String,
    /// Static platforms
    pub platforms: Vec<PlatformDesc>,
    /// Kinematic platforms
    #[serde(default)]
    pub moving_platforms: Vec<MovingPlatformDesc>,
    /// Pickups
    #[serde(default)]
    pub collectibles: Vec<Point>,
    /// Enemies
    #[serde(default)]
    pub enemies: Vec<EnemyDesc>,
    /// Player spawn point
    pub player_start: Point,
    /// Center of the goal trigger
    pub goal: Point,
}

impl LevelDesc {
    /// Parse a level from RON text
    pub fn from_ron_str(source: &str) -> Result<Self, LevelError> {
        let level: Self = ron::from_str(source).map_err(|e| LevelError::Parse(e.to_string()))?;
        level.validate()?;
        Ok(level)
    }

    /// Parse a level from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self, LevelError> {
        let level: Self = toml::from_str(source).map_err(|e| LevelError::Parse(e.to_string()))?;
        level.validate()?;
        Ok(level)
    }

    /// Load a level file, `.ron` or `.toml`
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let format = Format::from_path(path)
            .map_err(|_| LevelError::UnsupportedFormat(path.display().to_string()))?;
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading level from {}", path.display());

        match format {
            Format::Ron => Self::from_ron_str(&contents),
            Format::Toml => Self::from_toml_str(&contents),
        }
    }

    /// One of the levels shipped with the game
    pub fn builtin(name: &str) -> Result<Self, LevelError> {
        let source = builtin::source(name)
            .ok_or_else(|| LevelError::UnknownLevel(name.to_string()))?;
        Self::from_ron_str(source)
    }

    /// Kernel volumes: static platforms, then moving platforms, then the goal
    pub fn volume_descs(&self) -> Vec<VolumeDesc> {
        let statics = self
            .platforms
            .iter()
            .map(|p| VolumeDesc::platform(Vec3::new(p.x, p.y, p.z), Vec3::new(p.w, p.h, p.d)));

        let moving = self.moving_platforms.iter().map(|p| {
            let motion = MotionDesc {
                waveform: p.waveform,
                speed: p.speed,
                amplitude: p.range,
                phase: 0.0,
            };
            VolumeDesc::moving(Vec3::new(p.x, p.y, p.z), Vec3::new(p.w, p.h, p.d), motion)
        });

        let goal = VolumeDesc::goal(self.goal.to_vec3(), Vec3::from(GOAL_DIMENSIONS));

        statics.chain(moving).chain(std::iter::once(goal)).collect()
    }

    /// Where the player spawns
    pub fn player_pose(&self) -> ActorPose {
        ActorPose::cube(self.player_start.to_vec3(), PLAYER_SIZE)
    }

    /// Check that every derived volume would be accepted by the world
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, desc) in self.volume_descs().iter().enumerate() {
            desc.build(index)?;
        }
        Ok(())
    }
}

/// Level loading errors
#[derive(Error, Debug)]
pub enum LevelError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported file extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// No built-in level with that name
    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    /// A derived volume was rejected
    #[error("Invalid volume: {0}")]
    Volume(#[from] VolumeError),
}
