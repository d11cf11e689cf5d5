//! Game settings and preferences
//!
//! Held in memory for the session. The page URL may override defaults, e.g.
//! `?music=off&sound=off&motion=reduced&volume=0.5`.

use serde::{Deserialize, Serialize};

use crate::sim::AudioToggles;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Background music enabled at startup
    pub music_on: bool,
    /// Sound effects enabled at startup
    pub sound_on: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (freezes the scrolling backdrop)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_on: true,
            sound_on: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Defaults with overrides from a URL query string (leading `?` optional)
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            settings.apply(key, value);
        }
        settings
    }

    /// Apply one `key=value` override; unknown keys are logged and ignored
    pub fn apply(&mut self, key: &str, value: &str) {
        match key {
            "music" => self.music_on = parse_switch(value).unwrap_or(self.music_on),
            "sound" => self.sound_on = parse_switch(value).unwrap_or(self.sound_on),
            "fps" => self.show_fps = parse_switch(value).unwrap_or(self.show_fps),
            "motion" => self.reduced_motion = value.eq_ignore_ascii_case("reduced"),
            "volume" => {
                if let Ok(v) = value.parse::<f32>() {
                    self.master_volume = v.clamp(0.0, 1.0);
                }
            }
            _ => log::warn!("Ignoring unknown setting '{}'", key),
        }
    }

    /// Initial music/sound switches for a new game
    pub fn audio_toggles(&self) -> AudioToggles {
        AudioToggles {
            music: self.music_on,
            sound: self.sound_on,
        }
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    pub fn effective_music_volume(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    /// Whether the backdrop scrolls (respects reduced_motion)
    pub fn backdrop_scroll(&self) -> bool {
        !self.reduced_motion
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Some(true),
        "off" | "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
