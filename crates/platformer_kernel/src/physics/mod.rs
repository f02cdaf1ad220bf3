//! Physics module: volumes, the actor and the fixed-order world step
//!
//! Broad-phase is a linear scan over the level's volumes; levels are small
//! enough that a spatial structure buys nothing.

pub mod actor;
pub mod events;
pub mod integrator;
pub mod motion;
pub mod resolver;
pub mod triggers;
pub mod volume;
pub mod volume_set;
pub mod world;

pub use actor::{Actor, ActorPose, Ride};
pub use events::KernelEvent;
pub use motion::{Motion, Waveform};
pub use resolver::Contact;
pub use volume::{
    MotionDesc, Volume, VolumeBehavior, VolumeDesc, VolumeError, VolumeKey, VolumeKind,
};
pub use volume_set::VolumeSet;
pub use world::{StepReport, World};
