//! Menu buttons: layout per phase and pointer hit-testing
//!
//! Buttons are drawn by the renderer and labelled by the DOM overlay; both use
//! the same [`layout`] so what the player sees is what gets hit.

use crate::platform::input::Intent;
use crate::sim::{AudioToggles, GamePhase};

/// Screen-space rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive on every edge
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Start,
    Restart,
    Home,
    Music,
    Sound,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 5] = [
        ButtonKind::Start,
        ButtonKind::Restart,
        ButtonKind::Home,
        ButtonKind::Music,
        ButtonKind::Sound,
    ];

    pub fn intent(self) -> Intent {
        match self {
            ButtonKind::Start => Intent::Start,
            ButtonKind::Restart => Intent::Restart,
            ButtonKind::Home => Intent::GoHome,
            ButtonKind::Music => Intent::ToggleMusic,
            ButtonKind::Sound => Intent::ToggleSound,
        }
    }

    /// DOM id of the label element
    pub fn element_id(self) -> &'static str {
        match self {
            ButtonKind::Start => "btn-start",
            ButtonKind::Restart => "btn-restart",
            ButtonKind::Home => "btn-home",
            ButtonKind::Music => "btn-music",
            ButtonKind::Sound => "btn-sound",
        }
    }

    pub fn label(self, audio: AudioToggles) -> &'static str {
        match self {
            ButtonKind::Start => "START",
            ButtonKind::Restart => "Restart",
            ButtonKind::Home => "Home",
            ButtonKind::Music if audio.music => "Music: ON",
            ButtonKind::Music => "Music: OFF",
            ButtonKind::Sound if audio.sound => "Sound: ON",
            ButtonKind::Sound => "Sound: OFF",
        }
    }

    /// Fill color (RGBA, linear)
    pub fn color(self) -> [f32; 4] {
        match self {
            ButtonKind::Start => [0.30, 0.69, 0.31, 1.0],
            ButtonKind::Restart => [1.0, 0.60, 0.0, 1.0],
            ButtonKind::Home => [0.0, 0.59, 0.53, 1.0],
            ButtonKind::Music => [0.13, 0.59, 0.95, 1.0],
            ButtonKind::Sound => [1.0, 0.34, 0.13, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub kind: ButtonKind,
    pub rect: Rect,
}

const WIDE: (f32, f32) = (220.0, 60.0);
const TOGGLE: (f32, f32) = (160.0, 45.0);

/// Buttons visible in `phase` for a playfield of `width` x `height`
pub fn layout(phase: GamePhase, width: f32, height: f32) -> Vec<Button> {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let button = |kind, x, y, (w, h): (f32, f32)| Button {
        kind,
        rect: Rect::new(x, y, w, h),
    };

    match phase {
        GamePhase::Playing => Vec::new(),
        GamePhase::Home => vec![
            button(ButtonKind::Start, cx - 110.0, cy - 20.0, WIDE),
            button(ButtonKind::Music, cx - 180.0, cy + 60.0, TOGGLE),
            button(ButtonKind::Sound, cx + 20.0, cy + 60.0, TOGGLE),
        ],
        GamePhase::GameOver => vec![
            button(ButtonKind::Restart, cx - 240.0, cy, WIDE),
            button(ButtonKind::Home, cx + 20.0, cy, WIDE),
            button(ButtonKind::Music, cx - 180.0, cy + 80.0, TOGGLE),
            button(ButtonKind::Sound, cx + 20.0, cy + 80.0, TOGGLE),
        ],
    }
}

/// Button under the pointer, if any
pub fn hit_test(buttons: &[Button], x: f32, y: f32) -> Option<ButtonKind> {
    buttons
        .iter()
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.kind)
}
