//! Goal and kill-floor predicates
//!
//! Both are pure functions of the resolved pose. Edge detection (firing
//! once per entry) is the world step's job.

use crate::foundation::math::Vec3;

/// True when `position` is strictly closer than `radius` to `center`
pub fn goal_reached(position: Vec3, center: Vec3, radius: f32) -> bool {
    (position - center).norm() < radius
}

/// True when `position` is strictly below the kill floor
pub fn out_of_bounds(position: Vec3, floor: f32) -> bool {
    position.y < floor
}
