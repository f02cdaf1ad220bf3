//! The controlled actor and its ride relation
//!
//! The actor always keeps a world-space `position`. While it rides a
//! kinematic volume it additionally owns an offset relative to that
//! volume's center; the world step re-derives `position` from the offset
//! after the volume moves, so the actor never lags behind the platform.

use crate::foundation::math::{AABB, Vec3};
use crate::physics::volume::VolumeKey;
use serde::{Deserialize, Serialize};

/// Ride state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ride {
    /// Position is world-absolute
    #[default]
    Unattached,
    /// Position is carried by a kinematic volume
    Attached {
        /// The volume being ridden
        volume: VolumeKey,
        /// Actor center minus volume center
        offset: Vec3,
    },
}

impl Ride {
    /// The ridden volume, if any
    pub fn volume(&self) -> Option<VolumeKey> {
        match self {
            Ride::Unattached => None,
            Ride::Attached { volume, .. } => Some(*volume),
        }
    }

    /// True while attached to `key`
    pub fn is_riding(&self, key: VolumeKey) -> bool {
        self.volume() == Some(key)
    }
}

/// Initial placement of the actor, as supplied by the level loader
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorPose {
    /// World-space center
    pub position: Vec3,
    /// Half size of the actor's box
    pub half_extents: Vec3,
}

impl ActorPose {
    /// Pose for a cube with the given edge length
    pub fn cube(position: Vec3, size: f32) -> Self {
        Self {
            position,
            half_extents: Vec3::repeat(size * 0.5),
        }
    }
}

/// The single dynamic body
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// World-space center
    pub position: Vec3,
    /// Velocity in units per second
    pub velocity: Vec3,
    half_extents: Vec3,
    grounded: bool,
    ride: Ride,
}

impl Actor {
    /// Create an actor at rest
    pub fn new(pose: ActorPose) -> Self {
        Self {
            position: pose.position,
            velocity: Vec3::zeros(),
            half_extents: pose.half_extents,
            grounded: false,
            ride: Ride::Unattached,
        }
    }

    /// Put the actor back at a pose: zero velocity, not grounded, not riding
    pub fn reset(&mut self, pose: ActorPose) {
        *self = Self::new(pose);
    }

    /// World-space box around the current position
    pub fn bounds(&self) -> AABB {
        AABB::from_center_extents(self.position, self.half_extents)
    }

    /// Half size of the actor's box
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// True if the actor landed on something during the last step
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Current ride state
    pub fn ride(&self) -> &Ride {
        &self.ride
    }

    pub(crate) fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Leave any ride and jump
    ///
    /// World position is preserved; the integrator picks up the new
    /// vertical velocity on the next step.
    pub fn jump(&mut self, impulse: f32) {
        self.detach();
        self.velocity.y = impulse;
        self.grounded = false;
    }

    /// Start riding `volume` whose center is currently `volume_center`
    pub(crate) fn attach(&mut self, volume: VolumeKey, volume_center: Vec3) {
        self.ride = Ride::Attached {
            volume,
            offset: self.position - volume_center,
        };
        log::debug!("Actor attached to {:?} at offset {:?}", volume, self.position - volume_center);
    }

    /// Return to world-absolute positioning
    ///
    /// `position` is kept in world space throughout a ride, so the world
    /// position at the moment of detach is simply the current one.
    pub(crate) fn detach(&mut self) -> Option<VolumeKey> {
        let previous = self.ride.volume();
        if let Some(volume) = previous {
            log::debug!("Actor detached from {:?} at {:?}", volume, self.position);
        }
        self.ride = Ride::Unattached;
        previous
    }

    /// Re-derive world position from the ridden volume's current center
    pub(crate) fn carry(&mut self, volume_center: Vec3) {
        if let Ride::Attached { offset, .. } = self.ride {
            self.position = volume_center + offset;
        }
    }

    /// Re-derive the ride offset after the actor moved in world space
    pub(crate) fn sync_offset(&mut self, volume_center: Vec3) {
        if let Ride::Attached { offset, .. } = &mut self.ride {
            *offset = self.position - volume_center;
        }
    }

    /// Glue the actor to the top of the ridden volume
    ///
    /// Only the vertical offset is recomputed; x/z stay as input left them.
    pub(crate) fn settle_on_ride(&mut self, volume_center: Vec3, volume_half_height: f32) {
        let half_height = self.half_extents.y;
        if let Ride::Attached { offset, .. } = &mut self.ride {
            offset.y = volume_half_height + half_height;
            self.position = volume_center + *offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn key() -> VolumeKey {
        let mut keys: SlotMap<VolumeKey, ()> = SlotMap::with_key();
        keys.insert(())
    }

    #[test]
    fn test_new_actor_is_unattached_and_airborne() {
        let actor = Actor::new(ActorPose::cube(Vec3::new(0.0, 5.0, 0.0), 1.0));
        assert_eq!(*actor.ride(), Ride::Unattached);
        assert!(!actor.is_grounded());
        assert_relative_eq!(actor.bounds().min, Vec3::new(-0.5, 4.5, -0.5));
    }

    #[test]
    fn test_attach_then_carry_tracks_volume() {
        let volume = key();
        let mut actor = Actor::new(ActorPose::cube(Vec3::new(1.0, 2.0, 0.0), 1.0));
        actor.attach(volume, Vec3::new(0.0, 1.0, 0.0));
        assert!(actor.ride().is_riding(volume));

        actor.carry(Vec3::new(3.0, 4.0, -1.0));
        assert_relative_eq!(actor.position, Vec3::new(4.0, 5.0, -1.0));
    }

    #[test]
    fn test_sync_offset_keeps_horizontal_motion() {
        let volume = key();
        let mut actor = Actor::new(ActorPose::cube(Vec3::new(0.0, 1.0, 0.0), 1.0));
        actor.attach(volume, Vec3::zeros());
        actor.position.x += 0.25;
        actor.sync_offset(Vec3::zeros());
        actor.carry(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(actor.position.x, 1.25);
    }

    #[test]
    fn test_settle_only_rewrites_height() {
        let volume = key();
        let mut actor = Actor::new(ActorPose::cube(Vec3::new(0.5, 0.9, 0.2), 1.0));
        actor.attach(volume, Vec3::zeros());
        actor.settle_on_ride(Vec3::new(0.0, 2.0, 0.0), 0.5);
        assert_relative_eq!(actor.position, Vec3::new(0.5, 3.0, 0.2));
    }

    #[test]
    fn test_jump_detaches_and_preserves_position() {
        let volume = key();
        let mut actor = Actor::new(ActorPose::cube(Vec3::new(2.0, 3.0, 0.0), 1.0));
        actor.attach(volume, Vec3::new(2.0, 2.0, 0.0));
        actor.set_grounded(true);

        actor.jump(12.0);
        assert_eq!(*actor.ride(), Ride::Unattached);
        assert!(!actor.is_grounded());
        assert_relative_eq!(actor.velocity.y, 12.0);
        assert_relative_eq!(actor.position, Vec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let volume = key();
        let pose = ActorPose::cube(Vec3::new(0.0, 2.0, 0.0), 1.0);
        let mut actor = Actor::new(pose);
        actor.velocity = Vec3::new(3.0, -4.0, 0.0);
        actor.attach(volume, Vec3::zeros());
        actor.set_grounded(true);

        actor.reset(pose);
        assert_eq!(actor, Actor::new(pose));
    }
}
