//! Integration tests for the world step command surface
//!
//! Each test drives a `World` only through its public API, the way a game
//! loop would.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use platformer_kernel::foundation::math::Axis;
use platformer_kernel::physics::motion::position_at;
use platformer_kernel::physics::{MotionDesc, Waveform};
use platformer_kernel::prelude::*;
use std::f32::consts::PI;

const DT: f32 = 1.0 / 60.0;

fn world_at(position: Vec3) -> World {
    World::new(PhysicsConfig::default(), ActorPose::cube(position, 1.0))
}

fn run(world: &mut World, steps: usize) -> Vec<KernelEvent> {
    (0..steps)
        .flat_map(|_| world.step(DT, Vec2::zeros(), false).events)
        .collect()
}

fn riding(world: &World, key: VolumeKey) -> bool {
    world.actor().ride().is_riding(key)
}

#[test]
fn test_settles_on_static_floor() {
    let mut world = world_at(Vec3::new(0.0, 5.0, 0.0));
    let keys = world
        .load_volumes(&[VolumeDesc::platform(Vec3::zeros(), Vec3::new(10.0, 1.0, 10.0))])
        .unwrap();

    let events = run(&mut world, 180);

    assert_eq!(world.actor().position.y, 1.0);
    assert_eq!(world.actor().velocity.y, 0.0);
    assert!(world.actor().is_grounded());
    assert_eq!(world.support(), Some(keys[0]));
    assert_eq!(events, vec![KernelEvent::Landed { volume: keys[0] }]);
}

#[test]
fn test_landing_is_exact_for_any_fall_speed() {
    for fall_speed in [1.0_f32, 10.0, 25.0, 49.0] {
        let mut world = world_at(Vec3::new(0.0, 1.01, 0.0));
        world
            .load_volumes(&[VolumeDesc::platform(Vec3::zeros(), Vec3::new(10.0, 1.0, 10.0))])
            .unwrap();
        world.jump(-fall_speed);

        // One step is enough: the snap leaves no residual penetration
        let report = world.step(DT, Vec2::zeros(), false);
        assert!(report.grounded, "fall speed {fall_speed}");
        assert_eq!(world.actor().position.y, 1.0);
        assert_eq!(world.actor().velocity.y, 0.0);
    }
}

#[test]
fn test_rides_vertical_platform_without_drift() {
    let motion = MotionDesc {
        waveform: Waveform::Vertical,
        speed: 1.5,
        amplitude: 3.0,
        phase: 0.0,
    };
    let mut world = world_at(Vec3::new(0.0, 1.0, 0.0));
    let keys = world
        .load_volumes(&[VolumeDesc::moving(Vec3::zeros(), Vec3::new(4.0, 1.0, 4.0), motion)])
        .unwrap();
    let platform = keys[0];

    let mut landed = 0;
    for _ in 0..600 {
        let report = world.step(DT, Vec2::zeros(), false);
        landed += report.events.iter().filter(|e| matches!(e, KernelEvent::Landed { .. })).count();

        let top = world.volume(platform).unwrap().top();
        assert!(riding(&world, platform));
        assert!(report.grounded);
        assert_abs_diff_eq!(world.actor().position.y, top + 0.5, epsilon = 1e-5);
    }
    assert_eq!(landed, 1);
}

#[test]
fn test_vertical_platform_carries_actor_to_peak() {
    let motion = MotionDesc {
        waveform: Waveform::Vertical,
        speed: 1.5,
        amplitude: 3.0,
        phase: 0.0,
    };
    let mut world = world_at(Vec3::new(0.0, 1.0, 0.0));
    let keys = world
        .load_volumes(&[VolumeDesc::moving(Vec3::zeros(), Vec3::new(4.0, 1.0, 4.0), motion)])
        .unwrap();

    let quarter_period = PI / (2.0 * 1.5);
    let steps = 64;
    let dt = quarter_period / steps as f32;
    for _ in 0..steps {
        world.step(dt, Vec2::zeros(), false);
    }

    let center = world.volume(keys[0]).unwrap().center();
    assert_abs_diff_eq!(center.y, 3.0, epsilon = 1e-3);
    assert_abs_diff_eq!(world.actor().position.y, 3.0 + 0.5 + 0.5, epsilon = 1e-3);
    assert!(riding(&world, keys[0]));
}

#[test]
fn test_horizontal_and_circular_platforms_keep_offset() {
    for waveform in [Waveform::Horizontal, Waveform::Circular] {
        let motion = MotionDesc {
            waveform,
            speed: 1.0,
            amplitude: 3.0,
            phase: 0.0,
        };
        let origin = Vec3::new(5.0, 0.0, 0.0);
        let start = position_at(origin, waveform, motion.speed, motion.amplitude, 0.0);
        let mut world = world_at(start + Vec3::new(0.5, 1.0, 0.5));
        let keys = world
            .load_volumes(&[VolumeDesc::moving(origin, Vec3::new(4.0, 1.0, 4.0), motion)])
            .unwrap();

        world.step(DT, Vec2::zeros(), false);
        let offset = world.actor().position - world.volume(keys[0]).unwrap().center();

        for _ in 0..300 {
            world.step(DT, Vec2::zeros(), false);
            let center = world.volume(keys[0]).unwrap().center();
            assert!(riding(&world, keys[0]), "{waveform:?}");
            assert_abs_diff_eq!(world.actor().position, center + offset, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_walking_on_moving_platform_adds_to_carry() {
    let motion = MotionDesc {
        waveform: Waveform::Horizontal,
        speed: 1.0,
        amplitude: 2.0,
        phase: 0.0,
    };
    let mut world = world_at(Vec3::new(0.0, 1.0, 0.0));
    let keys = world
        .load_volumes(&[VolumeDesc::moving(Vec3::zeros(), Vec3::new(20.0, 1.0, 4.0), motion)])
        .unwrap();
    world.step(DT, Vec2::zeros(), false);
    let start = world.actor().position.x - world.volume(keys[0]).unwrap().center().x;

    for _ in 0..60 {
        world.step(DT, Vec2::new(3.0, 0.0), false);
    }
    let relative = world.actor().position.x - world.volume(keys[0]).unwrap().center().x;
    assert_abs_diff_eq!(relative - start, 3.0, epsilon = 1e-3);
    assert!(riding(&world, keys[0]));
}

#[test]
fn test_earlier_kinematic_support_takes_over_ride() {
    // Rises through the actor's feet from below
    let lift = MotionDesc {
        waveform: Waveform::Vertical,
        speed: 1.0,
        amplitude: 2.0,
        phase: 0.0,
    };
    let parked = MotionDesc {
        waveform: Waveform::Vertical,
        speed: 1.0,
        amplitude: 0.0,
        phase: 0.0,
    };
    let mut world = world_at(Vec3::new(0.0, 1.0, 0.0));
    let keys = world
        .load_volumes(&[
            VolumeDesc::moving(Vec3::new(0.0, -1.0, 0.0), Vec3::new(4.0, 1.0, 4.0), lift),
            VolumeDesc::moving(Vec3::zeros(), Vec3::new(8.0, 1.0, 8.0), parked),
        ])
        .unwrap();
    let (first, second) = (keys[0], keys[1]);

    let report = world.step(DT, Vec2::zeros(), false);
    assert_eq!(report.events, vec![KernelEvent::Landed { volume: second }]);
    assert!(riding(&world, second));

    let mut handover = None;
    for _ in 0..120 {
        let report = world.step(DT, Vec2::zeros(), false);
        if riding(&world, first) {
            handover = Some(report);
            break;
        }
        assert!(riding(&world, second));
    }

    let report = handover.expect("lift never reached the actor");
    assert_eq!(report.events, vec![KernelEvent::Landed { volume: first }]);
    assert_eq!(report.support, Some(first));
    assert!(report.grounded);
    assert!(!riding(&world, second));
    let top = world.volume(first).unwrap().top();
    assert_relative_eq!(world.actor().position.y, top + 0.5, epsilon = 1e-6);
    match world.actor().ride() {
        Ride::Attached { offset, .. } => assert_relative_eq!(offset.y, 1.0, epsilon = 1e-5),
        Ride::Unattached => panic!("expected a ride"),
    }
}

#[test]
fn test_sinking_onto_static_floor_ends_ride() {
    let sink = MotionDesc {
        waveform: Waveform::Vertical,
        speed: 1.0,
        amplitude: 1.5,
        phase: 0.0,
    };
    let mut world = world_at(Vec3::new(0.0, 2.0, 0.0));
    // Floor is listed first so it wins once the platform drops below it
    let keys = world
        .load_volumes(&[
            VolumeDesc::platform(Vec3::zeros(), Vec3::new(8.0, 1.0, 8.0)),
            VolumeDesc::moving(Vec3::new(0.0, 1.0, 0.0), Vec3::new(4.0, 1.0, 4.0), sink),
        ])
        .unwrap();
    let (floor, platform) = (keys[0], keys[1]);

    let report = world.step(DT, Vec2::zeros(), false);
    assert_eq!(report.events, vec![KernelEvent::Landed { volume: platform }]);

    let mut handover = None;
    for _ in 0..400 {
        let report = world.step(DT, Vec2::zeros(), false);
        if report.support == Some(floor) {
            handover = Some(report);
            break;
        }
        assert!(riding(&world, platform));
    }

    let report = handover.expect("platform never sank to the floor");
    assert_eq!(report.events, vec![KernelEvent::Landed { volume: floor }]);
    assert!(report.grounded);
    assert_eq!(*world.actor().ride(), Ride::Unattached);
    assert_relative_eq!(world.actor().position.y, 1.0);

    assert!(run(&mut world, 10).is_empty());
    assert_eq!(world.support(), Some(floor));
    assert_eq!(*world.actor().ride(), Ride::Unattached);
}

#[test]
fn test_side_push_along_x_only() {
    let mut world = world_at(Vec3::new(1.6, 1.0, 0.0));
    let keys = world
        .load_volumes(&[VolumeDesc::platform(Vec3::new(3.0, 1.0, 0.0), Vec3::new(2.0, 4.0, 2.0))])
        .unwrap();

    let report = world.step(DT, Vec2::new(5.0, 0.0), false);

    let actor = world.actor();
    assert_relative_eq!((actor.position.x - 3.0).abs(), 0.5 + 1.0, epsilon = 1e-5);
    assert_eq!(actor.velocity.x, 0.0);
    assert_eq!(actor.position.z, 0.0);
    let fallen = 1.0 + (-20.0 * DT) * DT;
    assert_relative_eq!(actor.position.y, fallen, epsilon = 1e-6);
    assert_eq!(report.events, vec![KernelEvent::Pushed { volume: keys[0], axis: Axis::X }]);
}

#[test]
fn test_first_support_wins_regardless_of_count() {
    let floor = VolumeDesc::platform(Vec3::zeros(), Vec3::new(6.0, 1.0, 6.0));

    let mut single = world_at(Vec3::new(0.0, 3.0, 0.0));
    single.load_volumes(&[floor.clone()]).unwrap();
    run(&mut single, 120);

    let mut stacked = world_at(Vec3::new(0.0, 3.0, 0.0));
    let keys = stacked
        .load_volumes(&[floor.clone(), floor.clone(), floor])
        .unwrap();
    let events = run(&mut stacked, 120);

    assert_eq!(stacked.support(), Some(keys[0]));
    assert_eq!(stacked.actor().position, single.actor().position);
    assert_eq!(events, vec![KernelEvent::Landed { volume: keys[0] }]);
}

#[test]
fn test_goal_threshold_is_strict() {
    let config = PhysicsConfig {
        gravity: 0.0,
        ..PhysicsConfig::default()
    };
    let mut world = World::new(config, ActorPose::cube(Vec3::zeros(), 1.0));
    let keys = world
        .load_volumes(&[VolumeDesc::goal(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 1.0))])
        .unwrap();

    let report = world.step(DT, Vec2::zeros(), false);
    assert!(report.events.is_empty(), "distance == radius must not count");

    let report = world.step(DT, Vec2::new(0.6, 0.0), false);
    assert_eq!(report.events, vec![KernelEvent::GoalReached { volume: keys[0] }]);

    // Staying inside does not repeat the event
    let events = run(&mut world, 30);
    assert!(events.is_empty());
}

#[test]
fn test_kill_floor_threshold_is_strict() {
    let config = PhysicsConfig {
        gravity: 0.0,
        ..PhysicsConfig::default()
    };
    let mut world = World::new(config, ActorPose::cube(Vec3::new(0.0, -10.0, 0.0), 1.0));
    assert!(run(&mut world, 10).is_empty());

    world.jump(-0.6);
    let report = world.step(DT, Vec2::zeros(), false);
    assert_eq!(report.events, vec![KernelEvent::FellOutOfBounds]);
}

#[test]
fn test_fell_out_of_bounds_once_per_crossing() {
    let mut world = world_at(Vec3::new(0.0, -9.0, 0.0));

    let events = run(&mut world, 120);
    let falls = events.iter().filter(|e| **e == KernelEvent::FellOutOfBounds).count();
    assert_eq!(falls, 1);

    // Respawning re-arms the trigger
    world.reset_actor(ActorPose::cube(Vec3::new(0.0, -9.0, 0.0), 1.0));
    let events = run(&mut world, 120);
    assert_eq!(events, vec![KernelEvent::FellOutOfBounds]);
}

#[test]
fn test_climbing_back_above_floor_rearms_trigger() {
    let mut world = world_at(Vec3::new(0.0, -9.9, 0.0));
    let mut falls = run(&mut world, 30).len();
    assert_eq!(falls, 1);
    assert!(world.actor().position.y < -10.0);

    world.jump(15.0);
    falls += run(&mut world, 120).len();
    assert_eq!(falls, 2);
}

#[test]
fn test_removed_ride_detaches_on_next_step() {
    let motion = MotionDesc {
        waveform: Waveform::Horizontal,
        speed: 1.0,
        amplitude: 2.0,
        phase: 0.0,
    };
    let mut world = world_at(Vec3::new(0.0, 1.0, 0.0));
    let keys = world
        .load_volumes(&[VolumeDesc::moving(Vec3::zeros(), Vec3::new(4.0, 1.0, 4.0), motion)])
        .unwrap();
    run(&mut world, 30);
    assert!(riding(&world, keys[0]));
    let before = world.actor().position;

    assert!(world.remove_volume(keys[0]).is_some());
    assert!(riding(&world, keys[0]), "removal alone does not touch the actor");

    let report = world.step(DT, Vec2::zeros(), false);
    assert_eq!(*world.actor().ride(), Ride::Unattached);
    assert_eq!(report.support, None);
    assert!(!report.grounded);
    assert_relative_eq!(world.actor().position.x, before.x);
    assert!(world.actor().position.y < before.y);
}

#[test]
fn test_stale_keys_never_alias_new_level() {
    let mut world = world_at(Vec3::new(0.0, 1.0, 0.0));
    let old = world
        .load_volumes(&[VolumeDesc::platform(Vec3::zeros(), Vec3::new(4.0, 1.0, 4.0))])
        .unwrap();
    run(&mut world, 5);

    world.clear_volumes();
    let new = world
        .load_volumes(&[VolumeDesc::platform(Vec3::zeros(), Vec3::new(4.0, 1.0, 4.0))])
        .unwrap();

    assert_ne!(old[0], new[0]);
    assert!(world.volume(old[0]).is_none());
    let events = run(&mut world, 5);
    assert_eq!(events, vec![KernelEvent::Landed { volume: new[0] }]);
}

#[test]
fn test_rejected_level_leaves_world_untouched() {
    let mut world = world_at(Vec3::new(0.0, 1.0, 0.0));
    let first = world
        .load_volumes(&[VolumeDesc::platform(Vec3::zeros(), Vec3::new(4.0, 1.0, 4.0))])
        .unwrap();

    let mut kinematic_without_motion = VolumeDesc::platform(Vec3::zeros(), Vec3::repeat(1.0));
    kinematic_without_motion.kind = VolumeKind::Kinematic;
    let err = world
        .load_volumes(&[
            VolumeDesc::platform(Vec3::new(5.0, 0.0, 0.0), Vec3::repeat(1.0)),
            kinematic_without_motion,
        ])
        .unwrap_err();

    assert_eq!(err, VolumeError::MissingMotion { index: 1 });
    let keys: Vec<_> = world.volumes().map(|(key, _)| key).collect();
    assert_eq!(keys, first);
}

#[test]
fn test_degenerate_volume_is_never_touched() {
    let mut world = world_at(Vec3::new(0.0, 1.0, 0.0));
    world
        .load_volumes(&[VolumeDesc::platform(Vec3::zeros(), Vec3::new(10.0, 0.0, 10.0))])
        .unwrap();
    let events = run(&mut world, 45);
    assert!(events.is_empty());
    assert!(!world.actor().is_grounded());
    assert!(world.actor().position.y < 0.0);
}

#[test]
fn test_nan_dt_is_ignored() {
    let mut world = world_at(Vec3::new(0.0, 3.0, 0.0));
    let report = world.step(f32::NAN, Vec2::new(1.0, 1.0), false);
    assert_eq!(report.dt, 0.0);
    assert_eq!(world.actor().position, Vec3::new(0.0, 3.0, 0.0));
    assert!(world.actor().velocity.iter().all(|v| v.is_finite()));
}

#[test]
fn test_tutorial_start_platform() {
    let level = LevelDesc::builtin("tutorial").unwrap();
    let mut world = World::new(PhysicsConfig::default(), level.player_pose());
    let keys = world.load_volumes(&level.volume_descs()).unwrap();

    run(&mut world, 120);
    assert_eq!(world.support(), Some(keys[0]));
    assert_eq!(world.actor().position.y, 1.0);
}
