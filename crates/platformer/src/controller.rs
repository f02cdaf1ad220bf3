//! Input intent: turns held keys into the horizontal velocity and jump
//! request the kernel consumes

use crate::config::ControlsConfig;
use platformer_kernel::foundation::math::Vec2;

/// Keys held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Move toward -X
    pub left: bool,
    /// Move toward +X
    pub right: bool,
    /// Move toward -Z
    pub forward: bool,
    /// Move toward +Z
    pub back: bool,
    /// Jump key
    pub jump: bool,
}

impl InputState {
    /// Nothing held
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        forward: false,
        back: false,
        jump: false,
    };
}

/// What the kernel is asked to do this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intent {
    /// Horizontal velocity (x, z)
    pub velocity: Vec2,
    /// Jump edge
    pub jump: bool,
}

/// Stateful input mapping
///
/// Releasing a direction does not stop the cube dead: the previous velocity
/// decays by `friction` every frame. A held jump key fires once and must be
/// released before it can fire again.
#[derive(Debug, Clone)]
pub struct Controller {
    move_speed: f32,
    friction: f32,
    velocity: Vec2,
    can_jump: bool,
}

impl Controller {
    /// Create a controller at rest
    pub fn new(controls: &ControlsConfig) -> Self {
        Self {
            move_speed: controls.move_speed,
            friction: controls.friction,
            velocity: Vec2::zeros(),
            can_jump: true,
        }
    }

    /// Map this frame's keys; `grounded` is the actor state after the last step
    pub fn update(&mut self, input: &InputState, grounded: bool) -> Intent {
        let (speed, friction) = (self.move_speed, self.friction);
        self.velocity.x = Self::axis(input.left, input.right, self.velocity.x, speed, friction);
        self.velocity.y = Self::axis(input.forward, input.back, self.velocity.y, speed, friction);

        let jump = input.jump && grounded && self.can_jump;
        if jump {
            self.can_jump = false;
        }
        if !input.jump {
            self.can_jump = true;
        }

        Intent {
            velocity: self.velocity,
            jump,
        }
    }

    /// Forget any carried velocity
    pub fn reset(&mut self) {
        self.velocity = Vec2::zeros();
        self.can_jump = true;
    }

    fn axis(negative: bool, positive: bool, current: f32, speed: f32, friction: f32) -> f32 {
        if negative {
            -speed
        } else if positive {
            speed
        } else {
            current * friction
        }
    }
}

/// Fixed input track for headless runs
#[derive(Debug, Clone)]
pub struct InputScript {
    segments: Vec<(u32, InputState)>,
    length: u32,
}

impl InputScript {
    /// Build a looping script from `(frames, input)` segments
    pub fn new(segments: Vec<(u32, InputState)>) -> Self {
        let length = segments.iter().map(|(frames, _)| frames).sum();
        Self { segments, length }
    }

    /// One attempt at the tutorial, played from the moment the player spawns
    ///
    /// Hops across the rhythm platforms, clears the static enemy by walking
    /// under it, climbs the steps onto the moving platform and leaps for
    /// the goal.
    pub fn demo() -> Self {
        let idle = InputState::IDLE;
        let right = InputState {
            right: true,
            ..InputState::IDLE
        };
        let hop = InputState { jump: true, ..right };

        Self::new(vec![
            (30, idle),
            (22, right),
            (2, hop),
            (48, right),
            (20, idle),
            (25, right),
            (2, hop),
            (30, right),
            (40, idle),
            (3, right),
            (2, hop),
            (6, right),
            (40, idle),
            (10, right),
            (2, hop),
            (4, right),
            (90, idle),
            (9, right),
            (2, hop),
            (16, right),
            (20, idle),
            (2, hop),
            (80, right),
        ])
    }

    /// Input held at `frame`; the script repeats once exhausted
    pub fn input_at(&self, frame: u32) -> InputState {
        if self.length == 0 {
            return InputState::IDLE;
        }

        let mut remaining = frame % self.length;
        for (frames, input) in &self.segments {
            if remaining < *frames {
                return *input;
            }
            remaining -= frames;
        }
        InputState::IDLE
    }
}
