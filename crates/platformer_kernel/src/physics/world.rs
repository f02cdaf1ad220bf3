//! World step: the kernel's command surface
//!
//! One [`World::step`] runs, strictly in order:
//!
//! 1. jump request (only while grounded)
//! 2. motion model for every kinematic volume
//! 3. rider carry (an attached actor follows its volume)
//! 4. integrator
//! 5. collision resolver
//! 6. goal and kill-floor checks
//!
//! Level transitions (`load_volumes`, `clear_volumes`, `reset_actor`) are
//! separate calls and therefore always land between two steps.

use crate::config::PhysicsConfig;
use crate::foundation::math::Vec2;
use crate::physics::actor::{Actor, ActorPose};
use crate::physics::events::KernelEvent;
use crate::physics::integrator::integrate;
use crate::physics::resolver::resolve;
use crate::physics::triggers::{goal_reached, out_of_bounds};
use crate::physics::volume::{Volume, VolumeDesc, VolumeError, VolumeKey, VolumeKind};
use crate::physics::volume_set::VolumeSet;
use std::collections::HashSet;

/// What a single step produced
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Simulated time after the step
    pub elapsed: f32,
    /// Step length actually used
    pub dt: f32,
    /// Events in the order they occurred
    pub events: Vec<KernelEvent>,
    /// Support volume chosen this step
    pub support: Option<VolumeKey>,
    /// Whether the actor ended the step grounded
    pub grounded: bool,
}

impl StepReport {
    /// True if the step produced the given event
    pub fn contains(&self, event: &KernelEvent) -> bool {
        self.events.contains(event)
    }
}

/// The physics world: one actor and the volumes of the current level
#[derive(Debug, Clone)]
pub struct World {
    config: PhysicsConfig,
    actor: Actor,
    volumes: VolumeSet,
    elapsed: f32,
    support: Option<VolumeKey>,
    out_of_bounds: bool,
    goals_inside: HashSet<VolumeKey>,
}

impl World {
    /// Create an empty world with the actor at `pose`
    pub fn new(config: PhysicsConfig, pose: ActorPose) -> Self {
        Self {
            config,
            actor: Actor::new(pose),
            volumes: VolumeSet::new(),
            elapsed: 0.0,
            support: None,
            out_of_bounds: false,
            goals_inside: HashSet::new(),
        }
    }

    /// Validate and append volumes
    ///
    /// Either every descriptor is accepted or none is: a single bad entry
    /// leaves the world untouched.
    pub fn load_volumes(&mut self, descs: &[VolumeDesc]) -> Result<Vec<VolumeKey>, VolumeError> {
        let built = descs
            .iter()
            .enumerate()
            .map(|(index, desc)| desc.build(index))
            .collect::<Result<Vec<_>, _>>()?;

        let keys: Vec<_> = built.into_iter().map(|volume| self.volumes.insert(volume)).collect();
        log::info!("Loaded {} volume(s), {} total", keys.len(), self.volumes.len());
        Ok(keys)
    }

    /// Remove every volume
    ///
    /// An actor riding one of them is detached where it stands.
    pub fn clear_volumes(&mut self) {
        self.actor.detach();
        self.volumes.clear();
        self.support = None;
        self.goals_inside.clear();
        log::info!("Cleared all volumes");
    }

    /// Remove a single volume
    ///
    /// The actor is left alone: if it was riding this volume, the next step
    /// finds the ride dangling and detaches it.
    pub fn remove_volume(&mut self, key: VolumeKey) -> Option<Volume> {
        let removed = self.volumes.remove(key)?;
        self.goals_inside.remove(&key);
        if self.support == Some(key) {
            self.support = None;
        }
        log::debug!("Removed volume {:?}", key);
        Some(removed)
    }

    /// Respawn the actor at `pose`
    pub fn reset_actor(&mut self, pose: ActorPose) {
        self.actor.reset(pose);
        self.support = None;
        self.out_of_bounds = false;
        self.goals_inside.clear();
        log::debug!("Actor reset to {:?}", pose.position);
    }

    /// Jump immediately, regardless of ride state or grounding
    pub fn jump(&mut self, impulse: f32) {
        self.actor.jump(impulse);
    }

    /// Advance the world by `dt` seconds
    ///
    /// `input_xz` is the horizontal velocity intent (x, z). A jump request is
    /// honoured only if the actor was grounded at the end of the previous
    /// step. Non-positive or NaN `dt` makes the step a no-op.
    pub fn step(&mut self, dt: f32, input_xz: Vec2, jump_requested: bool) -> StepReport {
        let mut events = Vec::new();

        if dt.is_nan() || dt <= 0.0 {
            log::trace!("Skipping step with dt {}", dt);
            return self.report(0.0, events);
        }

        if jump_requested && self.actor.is_grounded() {
            self.actor.jump(self.config.jump_impulse);
        }

        for volume in self.volumes.values_mut() {
            volume.advance(dt);
        }
        self.elapsed += dt;

        self.carry_rider();

        integrate(&mut self.actor, input_xz, &self.config, dt);
        if let Some(center) = self.ridden().map(Volume::center) {
            self.actor.sync_offset(center);
        }

        let support = resolve(&mut self.actor, &self.volumes, &mut events);
        if let Some(volume) = support {
            if self.support != Some(volume) {
                events.push(KernelEvent::Landed { volume });
            }
        }
        self.support = support;

        self.check_goals(&mut events);
        self.check_bounds(&mut events);

        log::trace!(
            "t={:.3} pos={:?} vel={:?} grounded={} events={}",
            self.elapsed,
            self.actor.position,
            self.actor.velocity,
            self.actor.is_grounded(),
            events.len()
        );

        self.report(dt, events)
    }

    /// Move an attached actor along with its volume
    fn carry_rider(&mut self) {
        let Some(key) = self.actor.ride().volume() else {
            return;
        };

        match self.volumes.get(key) {
            Some(volume) => self.actor.carry(volume.center()),
            None => {
                log::warn!("Ridden volume {:?} no longer exists; detaching actor", key);
                self.actor.detach();
            }
        }
    }

    fn ridden(&self) -> Option<&Volume> {
        self.actor.ride().volume().and_then(|key| self.volumes.get(key))
    }

    fn check_goals(&mut self, events: &mut Vec<KernelEvent>) {
        let position = self.actor.position;
        let radius = self.config.goal_radius;

        for (key, volume) in self.volumes.iter() {
            if volume.kind() != VolumeKind::Goal {
                continue;
            }
            if goal_reached(position, volume.center(), radius) {
                if self.goals_inside.insert(key) {
                    events.push(KernelEvent::GoalReached { volume: key });
                }
            } else {
                self.goals_inside.remove(&key);
            }
        }
    }

    fn check_bounds(&mut self, events: &mut Vec<KernelEvent>) {
        let below = out_of_bounds(self.actor.position, self.config.kill_floor);
        if below && !self.out_of_bounds {
            events.push(KernelEvent::FellOutOfBounds);
        }
        self.out_of_bounds = below;
    }

    fn report(&self, dt: f32, events: Vec<KernelEvent>) -> StepReport {
        StepReport {
            elapsed: self.elapsed,
            dt,
            events,
            support: self.support,
            grounded: self.actor.is_grounded(),
        }
    }

    /// The actor
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// A volume by key
    pub fn volume(&self, key: VolumeKey) -> Option<&Volume> {
        self.volumes.get(key)
    }

    /// All volumes in load order
    pub fn volumes(&self) -> impl Iterator<Item = (VolumeKey, &Volume)> + '_ {
        self.volumes.iter()
    }

    /// Support chosen by the last step
    pub fn support(&self) -> Option<VolumeKey> {
        self.support
    }

    /// Simulated time since creation
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }
}
