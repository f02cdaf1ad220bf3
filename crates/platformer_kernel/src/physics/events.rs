//! Discrete events produced by a world step
//!
//! The kernel never calls into presentation code. Everything the game,
//! camera, HUD or audio may want to react to is reported here and returned
//! from [`World::step`](crate::physics::world::World::step).

use crate::foundation::math::Axis;
use crate::physics::volume::VolumeKey;

/// Something that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelEvent {
    /// The actor came to rest on a new support volume
    Landed {
        /// The new support
        volume: VolumeKey,
    },
    /// A side contact pushed the actor out along an axis
    Pushed {
        /// Volume that pushed
        volume: VolumeKey,
        /// Separation axis (X or Z)
        axis: Axis,
    },
    /// The actor entered a goal's radius
    GoalReached {
        /// The goal volume
        volume: VolumeKey,
    },
    /// The actor dropped below the kill floor
    FellOutOfBounds,
}
