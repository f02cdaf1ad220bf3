//! # Platformer Kernel
//!
//! Physics, collision and platform-riding kernel for a 3D cube platformer.
//!
//! ## Features
//!
//! - **Volumes**: static platforms, scripted kinematic platforms and goal triggers
//! - **Ride relation**: an actor standing on a moving platform is carried by it
//! - **Fixed-order step**: motion, carry, integrate, resolve, then triggers
//! - **Events**: landings, side pushes, goals and falls reported per step
//! - **Levels**: descriptors loadable from RON or TOML
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platformer_kernel::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let level = LevelDesc::builtin("tutorial")?;
//!     let mut world = World::new(PhysicsConfig::default(), level.player_pose());
//!     world.load_volumes(&level.volume_descs())?;
//!
//!     let report = world.step(1.0 / 60.0, Vec2::new(8.0, 0.0), false);
//!     for event in &report.events {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod foundation;
pub mod level;
pub mod physics;

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PhysicsConfig},
        foundation::{
            math::{Axis, Vec2, Vec3, AABB},
            time::FrameClock,
        },
        level::{LevelDesc, LevelError},
        physics::{
            Actor, ActorPose, KernelEvent, Ride, StepReport, VolumeDesc, VolumeError, VolumeKey,
            VolumeKind, World,
        },
    };
}
