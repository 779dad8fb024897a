//! Property tests for the simulation core

use glam::Vec3;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use road_dash::DriveInput;
use road_dash::sim::{
    ClockConfig, GameClockState, MotionPhase, PlacementConfig, RoadConfig, VehicleState, VehicleTuning,
    advance_vehicle, build_road, find_collision, spawn_along_curve, tick_clock,
};

fn any_input() -> impl Strategy<Value = DriveInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::option::of(0.0f32..=1.0),
    )
        .prop_map(|(accelerate, brake, steer_left, steer_right, analog_magnitude)| DriveInput {
            accelerate,
            brake,
            steer_left,
            steer_right,
            analog_magnitude,
        })
}

proptest! {
    #[test]
    fn velocity_and_steering_stay_in_bounds(
        inputs in prop::collection::vec(
            (any_input(), prop_oneof![4 => 0.0f32..0.5, 1 => 0.0f32..1e9]),
            1..200,
        ),
    ) {
        let tuning = VehicleTuning::default();
        let mut state = VehicleState::default();
        for (input, dt) in &inputs {
            advance_vehicle(&mut state, &tuning, input, *dt);
            prop_assert!(state.velocity <= tuning.max_speed);
            prop_assert!(state.velocity >= tuning.min_velocity());
            prop_assert!(state.steering_angle.abs() <= tuning.max_steering_angle + 1e-6);
            prop_assert!(state.orientation.is_finite());
            prop_assert!(state.orientation >= -std::f32::consts::PI);
            prop_assert!(state.orientation < std::f32::consts::PI);
            prop_assert!(state.position.is_finite());
        }
    }

    #[test]
    fn recovery_bleeds_speed_and_ends(
        speed in -50.0f32..100.0,
        input in any_input(),
        dt in 0.005f32..0.1,
    ) {
        let tuning = VehicleTuning::default();
        let mut state = VehicleState {
            velocity: speed,
            ..Default::default()
        };
        state.notify_collision(&tuning);
        let position = state.position;

        let mut previous = state.velocity.abs();
        let mut steps = 0;
        while state.collided() {
            advance_vehicle(&mut state, &tuning, &input, dt);
            prop_assert!(state.velocity.abs() <= previous);
            prop_assert_eq!(state.position, position);
            previous = state.velocity.abs();
            steps += 1;
            prop_assert!(steps <= (tuning.collision_duration / dt) as usize + 2);
        }
        prop_assert_eq!(state.phase, MotionPhase::Driving);
        prop_assert_eq!(state.tilt, 0.0);
    }

    #[test]
    fn impact_never_speeds_up(
        speed in -50.0f32..100.0,
        retention in 0.0f32..=1.0,
    ) {
        let tuning = VehicleTuning {
            collision_velocity_retention: retention,
            ..Default::default()
        };
        prop_assert!(tuning.validate().is_ok());
        let mut state = VehicleState {
            velocity: speed,
            ..Default::default()
        };
        prop_assert!(state.notify_collision(&tuning));
        prop_assert!(state.velocity.abs() <= speed.abs());
        prop_assert!(state.velocity * speed >= 0.0);
    }

    #[test]
    fn placements_hold_spacing_and_cap(
        seed in any::<u64>(),
        min_spacing in 0.0f32..60.0,
        max_objects in 0usize..40,
        base_probability in 0.0f32..1.0,
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let road_config = RoadConfig {
            segment_count: 10,
            resolution: 400,
            ..Default::default()
        };
        let road = build_road(&road_config, &mut rng).unwrap();
        let config = PlacementConfig {
            sample_divisions: 600,
            min_spacing,
            max_objects,
            base_probability,
            ..Default::default()
        };
        let placed = spawn_along_curve(&road, &['a', 'b', 'c'], &config, road_config.width, &mut rng).unwrap();

        prop_assert!(placed.len() <= max_objects);
        for pair in placed.windows(2) {
            prop_assert!(pair[0].position.distance(pair[1].position) >= min_spacing);
        }
        for obj in &placed {
            prop_assert_eq!(obj.template, ['a', 'b', 'c'][obj.template_index]);
            prop_assert_eq!(obj.position.y, config.height_offset);
        }
    }

    #[test]
    fn first_hit_wins_in_list_order(
        points in prop::collection::vec((-10.0f32..10.0, -5.0f32..5.0, -10.0f32..10.0), 0..20),
        radius in 0.5f32..5.0,
    ) {
        let candidates: Vec<Vec3> = points.iter().map(|&(x, y, z)| Vec3::new(x, y, z)).collect();
        let hit = |p: &Vec3| p.x * p.x + p.z * p.z <= radius * radius;
        let expected = candidates.iter().position(hit);
        prop_assert_eq!(find_collision(Vec3::ZERO, &candidates, radius), expected);
    }

    #[test]
    fn clock_halts_exactly_once(
        steps in prop::collection::vec((0.0f32..3.0, 0u32..3), 1..120),
    ) {
        let config = ClockConfig {
            duration: 30.0,
            ..Default::default()
        };
        let mut state = GameClockState::default();
        let mut elapsed = 0.0;
        let mut bonuses = 0;
        let mut halts = 0;
        let mut frozen_score = None;

        for (dt, gained) in steps {
            elapsed += dt;
            bonuses += gained;
            let (display, halt) = tick_clock(&mut state, &config, elapsed, bonuses);
            if halt {
                halts += 1;
                frozen_score = Some(display.score);
            }
            if let Some(score) = frozen_score {
                prop_assert!(display.game_over);
                prop_assert_eq!(display.score, score);
                prop_assert_eq!(display.timer_label.as_str(), "00:00");
            } else {
                prop_assert!(display.remaining_seconds > 0.0);
                prop_assert_eq!(display.score, bonuses * config.score_multiplier);
            }
        }

        prop_assert!(halts <= 1);
        prop_assert_eq!(halts == 1, elapsed >= config.duration);
    }
}
