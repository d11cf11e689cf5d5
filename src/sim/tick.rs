//! Per-frame simulation tick
//!
//! Order within a tick: menu commands, flap, physics, pillars (spawn, scroll,
//! score, retire), then the terminal collision check.

use super::collision::{first_hit, out_of_bounds, player_hitbox};
use super::state::{GamePhase, GameState, Player};
use crate::platform::input::Intent;
use crate::tuning::Tuning;

/// Commands gathered between two ticks
///
/// Every field is an idempotent flag; repeated events within a frame collapse
/// into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Upward impulse (click/tap/space)
    pub flap: bool,
    /// Home -> Playing
    pub start: bool,
    /// GameOver -> Playing
    pub restart: bool,
    /// GameOver -> Home
    pub go_home: bool,
    pub toggle_music: bool,
    pub toggle_sound: bool,
}

impl TickInput {
    /// Fold an intent into this frame's input
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Flap => self.flap = true,
            Intent::Start => self.start = true,
            Intent::Restart => self.restart = true,
            Intent::GoHome => self.go_home = true,
            Intent::ToggleMusic => self.toggle_music = true,
            Intent::ToggleSound => self.toggle_sound = true,
        }
    }

    pub fn from_intents(intents: impl IntoIterator<Item = Intent>) -> Self {
        let mut input = Self::default();
        for intent in intents {
            input.apply(intent);
        }
        input
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    apply_commands(state, input);

    // A press that starts a run also flaps in the same tick
    if input.flap {
        state.flap();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    step_physics(&mut state.player, &state.tuning);
    step_obstacles(state);

    if run_is_over(state) {
        state.end_run();
    }
}

/// Phase transitions and audio toggles
fn apply_commands(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Home if input.start => state.begin_run(),
        GamePhase::GameOver if input.restart => state.begin_run(),
        GamePhase::GameOver if input.go_home => state.go_home(),
        _ => {}
    }

    if input.toggle_music {
        state.toggle_music();
    }
    if input.toggle_sound {
        state.toggle_sound();
    }
}

/// Gravity, fall-speed clamp and vertical integration
pub fn step_physics(player: &mut Player, tuning: &Tuning) {
    player.vel = (player.vel + tuning.gravity).min(tuning.max_fall_speed);
    player.pos.y += player.vel;
}

fn step_obstacles(state: &mut GameState) {
    let width = state.tuning.obstacle_width;

    if state
        .obstacles
        .should_spawn(&state.tuning, &state.playfield)
    {
        state
            .obstacles
            .spawn(&mut state.rng, &state.tuning, &state.playfield);
    }

    state.obstacles.advance(state.tuning.obstacle_speed);

    let passed = state
        .obstacles
        .mark_passed(state.player.center().x, width);
    state.score += u64::from(passed);

    state.obstacles.retire(width);
}

fn run_is_over(state: &GameState) -> bool {
    if out_of_bounds(&state.player, &state.playfield) {
        log::debug!("Player left the playfield at y={:.1}", state.player.pos.y);
        return true;
    }

    let hitbox = player_hitbox(&state.player, &state.tuning.hitbox);
    match first_hit(&hitbox, state.obstacles.iter(), state.tuning.obstacle_width) {
        Some(obstacle) => {
            log::debug!("Player hit pillar {}", obstacle.id);
            true
        }
        None => false,
    }
}

/// Simple bot: flap whenever the player sinks below the next gap's aim point.
///
/// Used by the headless demo and long-run tests.
pub fn autopilot(state: &GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let player = &state.player;
    let player_x = player.pos.x;
    let width = state.tuning.obstacle_width;

    let target_y = state
        .obstacles
        .iter()
        .find(|o| o.right(width) >= player_x)
        .map(|o| o.gap_bottom - o.gap_height() * 0.3)
        .unwrap_or(state.playfield.height * 0.55);

    player.pos.y + player.size.y > target_y && player.vel >= 0.0
}
