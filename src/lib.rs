//! Flappy Piggies - a tap-to-flap side scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, phases)
//! - `platform`: Browser input translation
//! - `ui`: Menu button layout and hit-testing
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Cue planning and Web Audio playback
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield size used before the first viewport measurement
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 960.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 680.0;

    /// Backdrop scroll speed (pixels per frame)
    pub const BACKDROP_SPEED: f32 = 0.3;

    /// Circle tessellation for the player sprite
    pub const PLAYER_SEGMENTS: u32 = 32;
}
