//! Enemies
//!
//! Scripted enemies are a pure function of level time; chasers keep their
//! own position and close in on the player once it is within range.

use platformer_kernel::foundation::math::{Vec3, AABB};
use platformer_kernel::level::{EnemyDesc, EnemyKind};

/// Position of a scripted enemy at `time`, or `None` for chasers
pub fn scripted_position(spawn: Vec3, kind: &EnemyKind, time: f32) -> Option<Vec3> {
    match *kind {
        EnemyKind::Static => Some(spawn),
        EnemyKind::Patrol { range, speed } => {
            Some(spawn + Vec3::new((time * speed).sin() * range, 0.0, 0.0))
        }
        EnemyKind::Flying { range, speed, height } => Some(
            spawn
                + Vec3::new(
                    (time * speed).sin() * range,
                    height + (time * speed * 2.0).sin() * 0.5,
                    0.0,
                ),
        ),
        EnemyKind::Chaser { .. } => None,
    }
}

/// One live enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    spawn: Vec3,
    kind: EnemyKind,
    position: Vec3,
}

impl Enemy {
    /// Spawn an enemy from its level descriptor
    pub fn new(desc: &EnemyDesc) -> Self {
        let spawn = desc.spawn();
        let position = scripted_position(spawn, &desc.kind, 0.0).unwrap_or(spawn);
        Self {
            spawn,
            kind: desc.kind,
            position,
        }
    }

    /// Move the enemy for level time `time`
    pub fn update(&mut self, time: f32, dt: f32, target: Vec3) {
        if let Some(position) = scripted_position(self.spawn, &self.kind, time) {
            self.position = position;
            return;
        }

        if let EnemyKind::Chaser { speed, chase_radius } = self.kind {
            let to_target = target - self.position;
            let distance = to_target.norm();
            if distance < chase_radius && distance > f32::EPSILON {
                let travel = (speed * dt).min(distance);
                self.position += to_target / distance * travel;
            }
        }
    }

    /// Put the enemy back at its spawn state
    pub fn reset(&mut self) {
        self.position = scripted_position(self.spawn, &self.kind, 0.0).unwrap_or(self.spawn);
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Behaviour
    pub fn kind(&self) -> &EnemyKind {
        &self.kind
    }
}

/// All enemies of the current level
#[derive(Debug, Clone)]
pub struct Enemies {
    enemies: Vec<Enemy>,
    half_extent: f32,
}

impl Enemies {
    /// Spawn every enemy of a level
    pub fn new(descs: &[EnemyDesc], half_extent: f32) -> Self {
        Self {
            enemies: descs.iter().map(Enemy::new).collect(),
            half_extent,
        }
    }

    /// Advance all enemies
    pub fn update(&mut self, time: f32, dt: f32, target: Vec3) {
        for enemy in &mut self.enemies {
            enemy.update(time, dt, target);
        }
    }

    /// Index of the first enemy touching `actor`
    pub fn hit(&self, actor: &AABB) -> Option<usize> {
        self.enemies.iter().position(|enemy| {
            AABB::from_center_extents(enemy.position, Vec3::repeat(self.half_extent))
                .intersects(actor)
        })
    }

    /// Return every enemy to its spawn state
    pub fn reset(&mut self) {
        for enemy in &mut self.enemies {
            enemy.reset();
        }
    }

    /// Iterate over the enemies
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    /// Number of enemies
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// True if the level has no enemies
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
