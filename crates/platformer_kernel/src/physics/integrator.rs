//! Semi-implicit Euler integration of the actor
//!
//! The integrator only produces a tentative pose; the resolver corrects it
//! against the world afterwards.

use crate::config::PhysicsConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::physics::actor::Actor;

/// Apply input, gravity and velocity for one step
///
/// `input_xz` replaces the horizontal velocity (x, z). Gravity is applied
/// to `velocity.y`, which is then clamped to the terminal fall speed before
/// the position is advanced. Callers must pass `dt >= 0`.
pub fn integrate(actor: &mut Actor, input_xz: Vec2, config: &PhysicsConfig, dt: f32) {
    actor.velocity.x = input_xz.x;
    actor.velocity.z = input_xz.y;

    actor.velocity.y -= config.gravity * dt;
    actor.velocity.y = actor.velocity.y.max(-config.terminal_fall_speed);

    let displacement: Vec3 = actor.velocity * dt;
    actor.position += displacement;
}
