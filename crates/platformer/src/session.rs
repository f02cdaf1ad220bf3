//! Level session: owns the world and everything the game layers on top of
//! the kernel (input, pickups, enemies, respawn, level progression)
//!
//! Level transitions requested during a frame are applied after the step
//! has completed, never in the middle of one.

use crate::config::GameConfig;
use crate::controller::{Controller, InputState};
use crate::enemies::Enemies;
use crate::pickups::Pickups;
use platformer_kernel::config::ConfigError;
use platformer_kernel::level::{next_level, LevelDesc, LevelError};
use platformer_kernel::physics::{KernelEvent, VolumeError, World};
use std::path::Path;
use thiserror::Error;

/// Game-level errors
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration failed to load or validate
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Level failed to load
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    /// Level volumes were rejected by the world
    #[error("Volume error: {0}")]
    Volume(#[from] VolumeError),
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Event forwarded from the kernel
    Kernel(KernelEvent),
    /// A pickup was collected
    PickupCollected {
        /// Pickup index within the level
        index: usize,
    },
    /// The player touched an enemy
    EnemyHit {
        /// Enemy index within the level
        index: usize,
    },
    /// The player was put back at the level start
    Respawned {
        /// Deaths so far in this run
        deaths: u32,
    },
    /// The current level was finished and the next one loaded
    LevelStarted {
        /// Name of the new level
        name: String,
    },
    /// The last level was finished
    RunComplete,
}

/// Change to apply once the step is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Respawn,
    Advance,
}

/// One playthrough
pub struct Session {
    config: GameConfig,
    world: World,
    level_id: String,
    level: LevelDesc,
    controller: Controller,
    pickups: Pickups,
    enemies: Enemies,
    level_time: f32,
    deaths: u32,
    collected: usize,
    complete: bool,
}

impl Session {
    /// Start a run at `config.start_level`
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let level_id = config.start_level.clone();
        let level = load_level(&level_id)?;
        let mut world = World::new(config.physics.clone(), level.player_pose());
        world.load_volumes(&level.volume_descs())?;

        log::info!("Starting level '{}' ({})", level.name, level_id);

        Ok(Self {
            controller: Controller::new(&config.controls),
            pickups: Pickups::new(&level.collectibles, config.pickup_radius),
            enemies: Enemies::new(&level.enemies, config.enemy_half_extent),
            config,
            world,
            level_id,
            level,
            level_time: 0.0,
            deaths: 0,
            collected: 0,
            complete: false,
        })
    }

    /// Run one frame with a raw (unclamped) delta
    pub fn update(
        &mut self,
        raw_dt: f32,
        input: &InputState,
    ) -> Result<Vec<SessionEvent>, GameError> {
        let mut events = Vec::new();
        if self.complete {
            return Ok(events);
        }

        let dt = self.config.physics.clamp_dt(raw_dt);
        if dt <= 0.0 {
            return Ok(events);
        }

        let intent = self.controller.update(input, self.world.actor().is_grounded());
        let report = self.world.step(dt, intent.velocity, intent.jump);
        self.level_time += dt;

        let mut transition = None;
        for event in report.events {
            match event {
                KernelEvent::GoalReached { .. } => transition = Some(Transition::Advance),
                KernelEvent::FellOutOfBounds if transition.is_none() => {
                    transition = Some(Transition::Respawn);
                }
                _ => {}
            }
            events.push(SessionEvent::Kernel(event));
        }

        let actor = self.world.actor();
        let (position, bounds) = (actor.position, actor.bounds());

        self.enemies.update(self.level_time, dt, position);
        if let Some(index) = self.enemies.hit(&bounds) {
            events.push(SessionEvent::EnemyHit { index });
            if transition.is_none() {
                transition = Some(Transition::Respawn);
            }
        }

        for index in self.pickups.collect(position) {
            self.collected += 1;
            events.push(SessionEvent::PickupCollected { index });
        }

        match transition {
            Some(Transition::Respawn) => {
                self.respawn();
                events.push(SessionEvent::Respawned { deaths: self.deaths });
            }
            Some(Transition::Advance) => events.push(self.advance()?),
            None => {}
        }

        Ok(events)
    }

    /// Put the player back at the start of the current level
    ///
    /// Enemies restart their scripts along with the player. Moving platforms
    /// belong to the world and keep going.
    fn respawn(&mut self) {
        self.deaths += 1;
        self.world.reset_actor(self.level.player_pose());
        self.controller.reset();
        self.enemies.reset();
        self.level_time = 0.0;
        log::info!("Respawned in '{}' (deaths: {})", self.level.name, self.deaths);
    }

    /// Load the next level, or finish the run after the last one
    fn advance(&mut self) -> Result<SessionEvent, GameError> {
        let Some(next) = next_level(&self.level_id) else {
            self.complete = true;
            log::info!(
                "Run complete: {} deaths, {} pickups, final attempt took {:.1}s",
                self.deaths,
                self.collected,
                self.level_time
            );
            return Ok(SessionEvent::RunComplete);
        };

        let level = LevelDesc::builtin(next)?;

        self.world.clear_volumes();
        self.world.load_volumes(&level.volume_descs())?;
        self.world.reset_actor(level.player_pose());
        self.controller.reset();
        self.pickups = Pickups::new(&level.collectibles, self.config.pickup_radius);
        self.enemies = Enemies::new(&level.enemies, self.config.enemy_half_extent);
        self.level_time = 0.0;
        self.level_id = next.to_string();
        self.level = level;

        log::info!("Starting level '{}' ({})", self.level.name, self.level_id);
        Ok(SessionEvent::LevelStarted {
            name: self.level.name.clone(),
        })
    }

    /// The physics world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The current level
    pub fn level(&self) -> &LevelDesc {
        &self.level
    }

    /// Enemies of the current level
    pub fn enemies(&self) -> &Enemies {
        &self.enemies
    }

    /// Pickups of the current level
    pub fn pickups(&self) -> &Pickups {
        &self.pickups
    }

    /// Deaths so far
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Pickups collected over the whole run
    pub fn collected(&self) -> usize {
        self.collected
    }

    /// True once the last level was finished
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Resolve a level id: a built-in name, or a path to a level file
fn load_level(id: &str) -> Result<LevelDesc, LevelError> {
    match LevelDesc::builtin(id) {
        Err(LevelError::UnknownLevel(_)) if Path::new(id).extension().is_some() => {
            LevelDesc::load_from_file(id)
        }
        result => result,
    }
}
