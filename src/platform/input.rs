//! Raw pointer/key events to discrete intents

use crate::sim::{GamePhase, Playfield};
use crate::ui;

/// Discrete player intentions consumed by the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Flap,
    Start,
    Restart,
    GoHome,
    ToggleMusic,
    ToggleSound,
}

/// Browser events after coordinate normalisation
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Mouse down / touch start, in playfield (CSS pixel) coordinates
    PointerDown { x: f32, y: f32 },
    /// `KeyboardEvent.code`
    KeyDown(String),
}

/// Intents for one raw event given the current phase
///
/// A press hits at most one button and always flaps; the tick ignores the
/// flap outside a run.
pub fn translate(raw: &RawInput, phase: GamePhase, playfield: &Playfield) -> Vec<Intent> {
    match raw {
        RawInput::PointerDown { x, y } => {
            let buttons = ui::layout(phase, playfield.width, playfield.height);
            let mut intents: Vec<Intent> = ui::hit_test(&buttons, *x, *y)
                .map(|kind| kind.intent())
                .into_iter()
                .collect();
            intents.push(Intent::Flap);
            intents
        }
        RawInput::KeyDown(code) => key_intent(code).into_iter().collect(),
    }
}

/// Keyboard bindings
pub fn key_intent(code: &str) -> Option<Intent> {
    match code {
        "Space" => Some(Intent::Flap),
        _ => None,
    }
}
