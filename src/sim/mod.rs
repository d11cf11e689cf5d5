//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit, hits_obstacle, out_of_bounds, player_hitbox};
pub use obstacles::ObstacleField;
pub use state::{
    AudioToggles, GameEvent, GamePhase, GameState, MusicTrack, Obstacle, Player, Playfield,
};
pub use tick::{TickInput, autopilot, step_physics, tick};
