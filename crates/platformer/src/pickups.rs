//! Collectibles

use platformer_kernel::foundation::math::Vec3;
use platformer_kernel::level::Point;

/// Pickups of the current level
#[derive(Debug, Clone)]
pub struct Pickups {
    positions: Vec<Vec3>,
    collected: Vec<bool>,
    radius: f32,
}

impl Pickups {
    /// Place every pickup of a level
    pub fn new(points: &[Point], radius: f32) -> Self {
        Self {
            positions: points.iter().map(|p| p.to_vec3()).collect(),
            collected: vec![false; points.len()],
            radius,
        }
    }

    /// Collect everything strictly within the radius of `position`
    ///
    /// Returns the indices collected by this call; a pickup is only ever
    /// returned once.
    pub fn collect(&mut self, position: Vec3) -> Vec<usize> {
        let mut picked = Vec::new();
        let items = self.positions.iter().zip(self.collected.iter_mut());
        for (index, (item, taken)) in items.enumerate() {
            if !*taken && (item - position).norm() < self.radius {
                *taken = true;
                picked.push(index);
            }
        }
        picked
    }

    /// Number collected so far
    pub fn collected(&self) -> usize {
        self.collected.iter().filter(|taken| **taken).count()
    }

    /// Total number of pickups in the level
    pub fn total(&self) -> usize {
        self.positions.len()
    }
}
