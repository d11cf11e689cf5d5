//! Game state and core simulation types
//!
//! Everything the tick loop mutates lives in [`GameState`]; collaborators only
//! read it (rendering, HUD) or drain its event queue (audio).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::obstacles::ObstacleField;
use crate::consts::{DEFAULT_PLAYFIELD_HEIGHT, DEFAULT_PLAYFIELD_WIDTH};
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Home,
    /// Active run
    Playing,
    /// Run ended; world frozen under the score overlay
    GameOver,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    Intro,
    Game,
}

/// Fire-and-forget cues for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player flapped
    Flap,
    /// Run ended on a pillar or the playfield edge
    Crash,
    /// Switch background music (`None` = silence)
    Music(Option<MusicTrack>),
}

/// Music/sound switches toggled from the menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioToggles {
    pub music: bool,
    pub sound: bool,
}

impl Default for AudioToggles {
    fn default() -> Self {
        Self {
            music: true,
            sound: true,
        }
    }
}

/// Visible simulation area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT)
    }
}

/// The pig
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the player box; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub vel: f32,
    pub size: Vec2,
}

impl Player {
    /// Player centred vertically in the playfield, at rest
    pub fn spawn(tuning: &Tuning, playfield: &Playfield) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new(tuning.player_x, (playfield.height - size.y) / 2.0),
            vel: 0.0,
            size,
        }
    }

    /// Full sprite box
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Highest valid top edge for the given playfield
    pub fn max_y(&self, playfield: &Playfield) -> f32 {
        playfield.height - self.size.y
    }
}

/// A pillar pair with a passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge of the pillar column
    pub x: f32,
    /// Top of the passable gap
    pub gap_top: f32,
    /// Bottom of the passable gap
    pub gap_bottom: f32,
    /// Set once the trailing edge has moved past the player
    pub passed: bool,
}

impl Obstacle {
    pub fn gap_height(&self) -> f32 {
        self.gap_bottom - self.gap_top
    }

    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Complete game state (single owner: the frame loop)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: GamePhase,
    /// Pillars passed during the current run
    pub score: u64,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub audio: AudioToggles,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Runs started since creation
    pub runs: u32,
    /// Cues raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// New game on the home screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let playfield = Playfield::default();
        let player = Player::spawn(&tuning, &playfield);
        Self {
            seed,
            tuning,
            playfield,
            phase: GamePhase::Home,
            score: 0,
            player,
            obstacles: ObstacleField::default(),
            audio: AudioToggles::default(),
            time_ticks: 0,
            runs: 0,
            events: vec![GameEvent::Music(Some(MusicTrack::Intro))],
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply a new viewport size; takes effect on the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Playfield::new(width, height);
        if self.phase == GamePhase::Home {
            self.player = Player::spawn(&self.tuning, &self.playfield);
        }
    }

    /// Take all pending cues
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of pillars that have ever been passed this run
    pub fn passed_count(&self) -> u64 {
        self.obstacles.passed_in_view() as u64 + self.obstacles.retired
    }

    /// Reset everything run-related and enter Playing
    pub fn begin_run(&mut self) {
        self.player = Player::spawn(&self.tuning, &self.playfield);
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.runs += 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Music(Some(MusicTrack::Game)));
        log::info!("Run {} started", self.runs);
    }

    /// Terminal event for the current run; no-op outside Playing
    pub fn end_run(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::Music(None));
        self.events.push(GameEvent::Crash);
        log::info!(
            "Run {} over: score {} after {} ticks",
            self.runs,
            self.score,
            self.time_ticks
        );
    }

    /// Back to the title screen
    pub fn go_home(&mut self) {
        self.phase = GamePhase::Home;
        self.player = Player::spawn(&self.tuning, &self.playfield);
        self.events.push(GameEvent::Music(Some(MusicTrack::Intro)));
        log::info!("Returned to home screen");
    }

    /// Upward impulse; ignored unless a run is active
    pub fn flap(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.player.vel = self.tuning.flap_impulse;
        self.events.push(GameEvent::Flap);
    }

    pub fn toggle_music(&mut self) {
        self.audio.music = !self.audio.music;
        let cue = self.audio.music.then_some(MusicTrack::Intro);
        self.events.push(GameEvent::Music(cue));
        log::info!("Music {}", if self.audio.music { "on" } else { "off" });
    }

    pub fn toggle_sound(&mut self) {
        self.audio.sound = !self.audio.sound;
        log::info!("Sound {}", if self.audio.sound { "on" } else { "off" });
    }
}
