//! Motion model for kinematic volumes
//!
//! A kinematic volume's position is a pure function of its origin, its
//! waveform and an accumulated phase time. Nothing here knows about the
//! world, so each waveform can be checked in isolation.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Shape of a kinematic volume's scripted path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    /// Sine oscillation along X
    Horizontal,
    /// Sine oscillation along Y
    Vertical,
    /// Circle in the XZ plane around the origin
    Circular,
}

/// Evaluate a waveform at the given phase time
pub fn position_at(
    origin: Vec3,
    waveform: Waveform,
    speed: f32,
    amplitude: f32,
    time: f32,
) -> Vec3 {
    let angle = time * speed;
    let offset = match waveform {
        Waveform::Horizontal => Vec3::new(angle.sin() * amplitude, 0.0, 0.0),
        Waveform::Vertical => Vec3::new(0.0, angle.sin() * amplitude, 0.0),
        Waveform::Circular => Vec3::new(angle.cos() * amplitude, 0.0, angle.sin() * amplitude),
    };
    origin + offset
}

/// Motion descriptor carried by every kinematic volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Path shape
    pub waveform: Waveform,
    /// Angular speed in radians per second of phase time
    pub speed: f32,
    /// Peak displacement from the origin
    pub amplitude: f32,
    /// Rest position the waveform oscillates around
    pub origin: Vec3,
    /// Accumulated phase time in seconds
    pub phase: f32,
}

impl Motion {
    /// Create a motion starting at the given phase
    pub fn new(waveform: Waveform, speed: f32, amplitude: f32, origin: Vec3, phase: f32) -> Self {
        Self {
            waveform,
            speed,
            amplitude,
            origin,
            phase,
        }
    }

    /// Position at the current phase
    pub fn position(&self) -> Vec3 {
        position_at(self.origin, self.waveform, self.speed, self.amplitude, self.phase)
    }

    /// Advance the phase accumulator and return the new position
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.phase += dt;
        self.position()
    }
}
