//! Volumes: the axis-aligned boxes the actor collides with
//!
//! A volume is either a static platform, a kinematic (scripted) platform,
//! or a goal trigger. Kinematic volumes own their [`Motion`] and their
//! center is recomputed from it every step; nothing else moves them.

use crate::foundation::math::{utils, AABB, Vec3};
use crate::physics::motion::{Motion, Waveform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

slotmap::new_key_type! {
    /// Stable identity of a volume for the lifetime of a level
    pub struct VolumeKey;
}

/// What a volume is, without its motion data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeKind {
    /// Fixed platform
    Static,
    /// Platform following a scripted path
    Kinematic,
    /// Trigger the actor has to reach; never collided with
    Goal,
}

/// Per-kind data of a volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeBehavior {
    /// Fixed platform
    Static,
    /// Scripted platform and its motion state
    Kinematic(Motion),
    /// Goal trigger
    Goal,
}

/// A live volume in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    center: Vec3,
    half_extents: Vec3,
    behavior: VolumeBehavior,
}

impl Volume {
    /// Create a static platform
    pub fn new_static(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
            behavior: VolumeBehavior::Static,
        }
    }

    /// Create a goal trigger
    pub fn new_goal(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
            behavior: VolumeBehavior::Goal,
        }
    }

    /// Create a kinematic platform placed at its motion's current position
    pub fn new_kinematic(motion: Motion, half_extents: Vec3) -> Self {
        Self {
            center: motion.position(),
            half_extents,
            behavior: VolumeBehavior::Kinematic(motion),
        }
    }

    /// Current world-space box
    pub fn bounds(&self) -> AABB {
        AABB::from_center_extents(self.center, self.half_extents)
    }

    /// Current world-space center
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Half size of the box
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Height of the top face
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Kind tag
    pub fn kind(&self) -> VolumeKind {
        match self.behavior {
            VolumeBehavior::Static => VolumeKind::Static,
            VolumeBehavior::Kinematic(_) => VolumeKind::Kinematic,
            VolumeBehavior::Goal => VolumeKind::Goal,
        }
    }

    /// Kind-specific data
    pub fn behavior(&self) -> &VolumeBehavior {
        &self.behavior
    }

    /// Motion state, for kinematic volumes
    pub fn motion(&self) -> Option<&Motion> {
        match &self.behavior {
            VolumeBehavior::Kinematic(motion) => Some(motion),
            _ => None,
        }
    }

    /// True for volumes the actor can stand on or be pushed by
    pub fn is_solid(&self) -> bool {
        !matches!(self.behavior, VolumeBehavior::Goal)
    }

    /// Advance a kinematic volume's phase and move it; no-op for other kinds
    pub(crate) fn advance(&mut self, dt: f32) {
        if let VolumeBehavior::Kinematic(motion) = &mut self.behavior {
            self.center = motion.advance(dt);
        }
    }
}

/// Motion part of a volume descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionDesc {
    /// Path shape
    pub waveform: Waveform,
    /// Angular speed
    pub speed: f32,
    /// Peak displacement
    pub amplitude: f32,
    /// Starting phase time
    #[serde(default)]
    pub phase: f32,
}

/// Volume as supplied by a level loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDesc {
    /// Kind of volume
    pub kind: VolumeKind,
    /// Center for static and goal volumes; motion origin for kinematic ones
    pub origin: Vec3,
    /// Full size of the box (width, height, depth)
    pub dimensions: Vec3,
    /// Required for kinematic volumes, rejected for the others
    #[serde(default)]
    pub motion: Option<MotionDesc>,
}

impl VolumeDesc {
    /// Static platform descriptor
    pub fn platform(origin: Vec3, dimensions: Vec3) -> Self {
        Self {
            kind: VolumeKind::Static,
            origin,
            dimensions,
            motion: None,
        }
    }

    /// Goal trigger descriptor
    pub fn goal(origin: Vec3, dimensions: Vec3) -> Self {
        Self {
            kind: VolumeKind::Goal,
            origin,
            dimensions,
            motion: None,
        }
    }

    /// Kinematic platform descriptor
    pub fn moving(origin: Vec3, dimensions: Vec3, motion: MotionDesc) -> Self {
        Self {
            kind: VolumeKind::Kinematic,
            origin,
            dimensions,
            motion: Some(motion),
        }
    }

    /// Validate and build the live volume
    ///
    /// `index` is the descriptor's position in the list being loaded and is
    /// only used for error reporting.
    pub fn build(&self, index: usize) -> Result<Volume, VolumeError> {
        if !utils::is_finite(&self.origin) {
            return Err(VolumeError::NonFinite { index, field: "origin" });
        }
        if !utils::is_finite(&self.dimensions) {
            return Err(VolumeError::NonFinite { index, field: "dimensions" });
        }
        if self.dimensions.iter().any(|d| *d < 0.0) {
            return Err(VolumeError::NegativeDimensions {
                index,
                dimensions: self.dimensions,
            });
        }

        let half_extents = self.dimensions * 0.5;
        match (self.kind, self.motion) {
            (VolumeKind::Static, None) => Ok(Volume::new_static(self.origin, half_extents)),
            (VolumeKind::Goal, None) => Ok(Volume::new_goal(self.origin, half_extents)),
            (VolumeKind::Kinematic, Some(desc)) => {
                let fields = [
                    ("speed", desc.speed),
                    ("amplitude", desc.amplitude),
                    ("phase", desc.phase),
                ];
                for (field, value) in fields {
                    if !value.is_finite() {
                        return Err(VolumeError::NonFinite { index, field });
                    }
                }
                let motion = Motion::new(
                    desc.waveform,
                    desc.speed,
                    desc.amplitude,
                    self.origin,
                    desc.phase,
                );
                Ok(Volume::new_kinematic(motion, half_extents))
            }
            (VolumeKind::Kinematic, None) => Err(VolumeError::MissingMotion { index }),
            (kind, Some(_)) => Err(VolumeError::UnexpectedMotion { index, kind }),
        }
    }
}

/// Rejected volume descriptor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolumeError {
    /// A box side is negative
    #[error("volume {index}: negative dimensions {dimensions:?}")]
    NegativeDimensions {
        /// Descriptor index
        index: usize,
        /// Offending dimensions
        dimensions: Vec3,
    },

    /// NaN or infinity in a field
    #[error("volume {index}: {field} is not finite")]
    NonFinite {
        /// Descriptor index
        index: usize,
        /// Field name
        field: &'static str,
    },

    /// Kinematic volume without a motion descriptor
    #[error("volume {index}: kinematic volume has no motion")]
    MissingMotion {
        /// Descriptor index
        index: usize,
    },

    /// Motion supplied for a volume that cannot move
    #[error("volume {index}: {kind:?} volume cannot have motion")]
    UnexpectedMotion {
        /// Descriptor index
        index: usize,
        /// Declared kind
        kind: VolumeKind,
    },
}
