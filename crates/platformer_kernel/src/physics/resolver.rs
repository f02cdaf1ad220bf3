//! Collision resolution between the actor and the solid volumes
//!
//! Each step the tentative pose from the integrator is reconciled against
//! every solid volume, in load order:
//!
//! - **Broad test**: strict AABB overlap between the actor and the volume.
//! - **Classification**: if the actor's horizontal center lies over the
//!   volume it is a *support* candidate, otherwise a *side* contact.
//! - **Landing**: a support candidate while descending snaps the actor onto
//!   the top face, zeroes vertical velocity and manages the ride relation.
//!   Only the first landing in a step counts.
//! - **Side push**: minimum-translation-vector separation along the axis of
//!   shallowest overlap. Y-axis separations (ceilings, corners caught from
//!   below) are detected but not resolved.
//!
//! A volume is classified exactly once per step, so landing and side
//! resolution never both apply to the same volume.

use crate::foundation::math::Axis;
use crate::physics::actor::{Actor, Ride};
use crate::physics::events::KernelEvent;
use crate::physics::volume::{Volume, VolumeKey, VolumeKind};
use crate::physics::volume_set::VolumeSet;

/// How an overlapping volume relates to the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Actor is over the volume's top face
    Support,
    /// Actor overlaps from the side
    Side,
}

/// Classify an overlapping volume
///
/// When the actor rides `key` the test runs in the volume's own frame using
/// the stored offset; otherwise in world space against the current box.
pub fn classify(actor: &Actor, key: VolumeKey, volume: &Volume) -> Contact {
    let over_top = match actor.ride() {
        Ride::Attached { volume: ridden, offset } if *ridden == key => {
            let half = volume.half_extents();
            offset.x.abs() <= half.x && offset.z.abs() <= half.z
        }
        _ => volume.bounds().contains_xz(actor.position),
    };

    if over_top {
        Contact::Support
    } else {
        Contact::Side
    }
}

/// Resolve the actor against all solid volumes for one step
///
/// Clears and recomputes `grounded`, updates the ride relation and pushes
/// side-contact events. Returns the support volume chosen this step.
pub fn resolve(
    actor: &mut Actor,
    volumes: &VolumeSet,
    events: &mut Vec<KernelEvent>,
) -> Option<VolumeKey> {
    actor.set_grounded(false);
    let mut support = None;

    for (key, volume) in volumes.iter() {
        if !volume.is_solid() {
            continue;
        }

        // Recomputed per volume: earlier contacts may have moved the actor
        if !actor.bounds().intersects(&volume.bounds()) {
            continue;
        }

        match classify(actor, key, volume) {
            Contact::Support => {
                if support.is_some() || actor.velocity.y >= 0.0 {
                    continue;
                }
                land(actor, key, volume);
                support = Some(key);
            }
            Contact::Side => {
                if let Some(axis) = push_out(actor, volume) {
                    resync_ride(actor, volumes);
                    events.push(KernelEvent::Pushed { volume: key, axis });
                }
            }
        }
    }

    if support.is_none() {
        actor.detach();
    }

    support
}

/// Snap the actor onto the top face of `volume`
fn land(actor: &mut Actor, key: VolumeKey, volume: &Volume) {
    actor.velocity.y = 0.0;
    actor.set_grounded(true);

    match volume.kind() {
        VolumeKind::Kinematic if actor.ride().is_riding(key) => {
            actor.settle_on_ride(volume.center(), volume.half_extents().y);
        }
        VolumeKind::Kinematic => {
            actor.detach();
            actor.position.y = volume.top() + actor.half_extents().y;
            actor.attach(key, volume.center());
        }
        VolumeKind::Static => {
            actor.detach();
            actor.position.y = volume.top() + actor.half_extents().y;
        }
        VolumeKind::Goal => {}
    }
}

/// Push the actor out of `volume` along the axis of least overlap
///
/// Returns the axis that was resolved, or `None` when the shallowest axis
/// is vertical and the contact is left alone.
fn push_out(actor: &mut Actor, volume: &Volume) -> Option<Axis> {
    let depth = actor.bounds().overlap(&volume.bounds());
    let axis = Axis::ALL
        .into_iter()
        .min_by(|a, b| depth[a.index()].total_cmp(&depth[b.index()]))
        .unwrap_or(Axis::X);

    if axis == Axis::Y {
        log::trace!("Vertical side contact left unresolved (depth {})", depth.y);
        return None;
    }

    let i = axis.index();
    let direction = if actor.position[i] < volume.center()[i] { -1.0 } else { 1.0 };
    actor.position[i] += direction * depth[i];
    actor.velocity[i] = 0.0;
    Some(axis)
}

/// Keep a ride offset consistent after the actor was moved in world space
fn resync_ride(actor: &mut Actor, volumes: &VolumeSet) {
    let ridden = actor.ride().volume().and_then(|key| volumes.get(key));
    if let Some(center) = ridden.map(Volume::center) {
        actor.sync_offset(center);
    }
}
