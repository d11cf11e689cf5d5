//! Property tests for simulation invariants

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use flappy_piggies::Tuning;
use flappy_piggies::sim::{GamePhase, GameState, ObstacleField, Playfield, TickInput, autopilot, tick};

fn started(seed: u64, width: f32, height: f32) -> GameState {
    let mut state = GameState::new(seed, Tuning::default());
    state.resize(width, height);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );
    state
}

/// Either a scripted flap or the autopilot's choice, so runs last long enough
/// to pass and retire pillars
fn flap_for(state: &GameState, scripted: Option<bool>) -> bool {
    scripted.unwrap_or_else(|| autopilot(state))
}

proptest! {
    #[test]
    fn velocity_never_exceeds_max_fall_speed(
        seed in any::<u64>(),
        flaps in prop::collection::vec(prop::option::of(any::<bool>()), 1..600),
    ) {
        let mut state = started(seed, 900.0, 640.0);
        let max = state.tuning.max_fall_speed;
        for scripted in flaps {
            let input = TickInput { flap: flap_for(&state, scripted), ..Default::default() };
            tick(&mut state, &input);
            prop_assert!(state.player.vel <= max);
        }
    }

    #[test]
    fn score_matches_passed_pillars(
        seed in any::<u64>(),
        width in 400.0f32..1600.0,
        height in 400.0f32..1000.0,
        ticks in 1usize..3000,
    ) {
        let mut state = started(seed, width, height);
        let mut seen_passed: HashSet<u32> = HashSet::new();

        for _ in 0..ticks {
            if state.phase != GamePhase::Playing {
                break;
            }
            let input = TickInput { flap: autopilot(&state), ..Default::default() };
            tick(&mut state, &input);

            // Once passed, a pillar stays passed while it is on screen
            for obstacle in state.obstacles.iter() {
                if seen_passed.contains(&obstacle.id) {
                    prop_assert!(obstacle.passed);
                }
                if obstacle.passed {
                    seen_passed.insert(obstacle.id);
                }
            }
            prop_assert_eq!(state.score, state.passed_count());
            prop_assert_eq!(state.score, seen_passed.len() as u64);
        }
    }

    #[test]
    fn obstacles_stay_in_spawn_order(seed in any::<u64>(), ticks in 1usize..2000) {
        let mut state = started(seed, 1024.0, 768.0);
        for _ in 0..ticks {
            let input = TickInput { flap: autopilot(&state), ..Default::default() };
            tick(&mut state, &input);
            let items = &state.obstacles.items;
            prop_assert!(items.windows(2).all(|w| w[0].id < w[1].id && w[0].x < w[1].x));
            for o in items {
                prop_assert!(o.gap_top >= 0.0);
                prop_assert!(o.gap_bottom <= state.playfield.height);
            }
        }
    }

    #[test]
    fn game_over_freezes_world(
        seed in any::<u64>(),
        inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..50),
    ) {
        let mut state = started(seed, 800.0, 600.0);
        while state.phase == GamePhase::Playing {
            tick(&mut state, &TickInput::default());
        }
        let player_y = state.player.pos.y;
        let player_vel = state.player.vel;
        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        let score = state.score;

        for (flap, start, toggle_music, toggle_sound) in inputs {
            let input = TickInput { flap, start, toggle_music, toggle_sound, ..Default::default() };
            tick(&mut state, &input);
            prop_assert_eq!(state.phase, GamePhase::GameOver);
            prop_assert_eq!(state.player.pos.y, player_y);
            prop_assert_eq!(state.player.vel, player_vel);
            prop_assert_eq!(state.obstacles.iter().map(|o| o.x).collect::<Vec<_>>(), xs.clone());
            prop_assert_eq!(state.score, score);
        }
    }

    #[test]
    fn restart_clears_any_run(seed in any::<u64>(), ticks in 0usize..1500) {
        let mut state = started(seed, 800.0, 600.0);
        for _ in 0..ticks {
            if state.phase != GamePhase::Playing {
                break;
            }
            let input = TickInput { flap: autopilot(&state), ..Default::default() };
            tick(&mut state, &input);
        }
        state.end_run();

        tick(&mut state, &TickInput { restart: true, ..Default::default() });
        prop_assert_eq!(state.phase, GamePhase::Playing);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.obstacles.len(), 1);
        prop_assert_eq!(state.obstacles.retired, 0);
    }

    #[test]
    fn pillar_scrolls_linearly(width in 300.0f32..2000.0, n in 0u32..400) {
        let tuning = Tuning::default();
        let playfield = Playfield::new(width, 700.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::default();
        field.spawn(&mut rng, &tuning, &playfield);
        for _ in 0..n {
            field.advance(tuning.obstacle_speed);
        }
        let expected = width - tuning.obstacle_speed * n as f32;
        prop_assert!((field.items[0].x - expected).abs() < 0.05);
    }
}
