//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults are the shipped
//! balance; a JSON document may override any subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-edge insets applied to the player box to get a forgiving hitbox
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HitboxMargins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl HitboxMargins {
    pub const fn uniform(m: f32) -> Self {
        Self {
            left: m,
            right: m,
            top: m,
            bottom: m,
        }
    }
}

impl Default for HitboxMargins {
    fn default() -> Self {
        Self::uniform(4.0)
    }
}

/// Gameplay constants. Velocities and accelerations are per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Downward acceleration added to velocity each tick
    pub gravity: f32,
    /// Velocity assigned on flap (negative = up)
    pub flap_impulse: f32,
    /// Velocity ceiling while falling
    pub max_fall_speed: f32,

    /// Fixed left edge of the player box
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub hitbox: HitboxMargins,

    pub obstacle_width: f32,
    /// Horizontal distance moved by every obstacle per tick
    pub obstacle_speed: f32,
    /// Newest obstacle must be this far from the right edge before the next spawns
    pub obstacle_spacing: f32,

    /// Gap height as a fraction of playfield height, clamped to [min_gap, max_gap]
    pub gap_ratio: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    /// Preferred distance between a gap and the top/bottom of the playfield
    pub gap_edge_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            flap_impulse: -4.3,
            max_fall_speed: 8.0,

            player_x: 94.0,
            player_width: 52.0,
            player_height: 52.0,
            hitbox: HitboxMargins::default(),

            obstacle_width: 60.0,
            obstacle_speed: 2.2,
            obstacle_spacing: 300.0,

            gap_ratio: 0.28,
            min_gap: 150.0,
            max_gap: 220.0,
            gap_edge_margin: 100.0,
        }
    }
}

/// Reasons a tuning document is rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    /// A field that must be strictly positive is not
    NotPositive(&'static str),
    /// Flap must push the player upward
    FlapNotUpward(f32),
    /// Hitbox margins swallow the whole player box
    HitboxTooLarge,
    /// min_gap exceeds max_gap
    GapRange { min: f32, max: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning json: {}", e),
            TuningError::NotPositive(field) => write!(f, "{} must be greater than zero", field),
            TuningError::FlapNotUpward(v) => {
                write!(f, "flap_impulse must be negative (upward), got {}", v)
            }
            TuningError::HitboxTooLarge => {
                write!(f, "hitbox margins leave no area inside the player box")
            }
            TuningError::GapRange { min, max } => {
                write!(f, "min_gap ({}) is larger than max_gap ({})", min, max)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_spacing", self.obstacle_spacing),
            ("gap_ratio", self.gap_ratio),
            ("min_gap", self.min_gap),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive(name));
            }
        }

        if !(self.flap_impulse < 0.0) {
            return Err(TuningError::FlapNotUpward(self.flap_impulse));
        }

        let m = &self.hitbox;
        let negative = m.left < 0.0 || m.right < 0.0 || m.top < 0.0 || m.bottom < 0.0;
        if negative
            || m.left + m.right >= self.player_width
            || m.top + m.bottom >= self.player_height
        {
            return Err(TuningError::HitboxTooLarge);
        }

        if self.min_gap > self.max_gap {
            return Err(TuningError::GapRange {
                min: self.min_gap,
                max: self.max_gap,
            });
        }

        Ok(())
    }

    /// Gap height for a playfield of the given height
    pub fn gap_height(&self, playfield_height: f32) -> f32 {
        (playfield_height * self.gap_ratio).clamp(self.min_gap, self.max_gap)
    }
}
