//! Scene assembly: turns a game snapshot into one triangle list per frame

use glam::Vec2;

use super::shapes::{circle, gradient_rect, hill, rect};
use super::vertex::{Vertex, colors};
use crate::consts::{BACKDROP_SPEED, PLAYER_SEGMENTS};
use crate::sim::{GamePhase, GameState, Obstacle, Player};
use crate::ui;

/// Height of one bird stacked in a pillar
const BIRD_TILE: f32 = 40.0;

/// Score panel behind the DOM score text
pub const SCORE_PANEL: ui::Rect = ui::Rect::new(20.0, 20.0, 170.0, 50.0);

/// Parallax backdrop offset; render-only state
#[derive(Debug, Clone, Copy, Default)]
pub struct Backdrop {
    pub offset: f32,
}

impl Backdrop {
    /// Scroll one frame; wraps after a full playfield width
    pub fn advance(&mut self, width: f32, enabled: bool) {
        if !enabled {
            return;
        }
        self.offset -= BACKDROP_SPEED;
        if self.offset <= -width {
            self.offset = 0.0;
        }
    }
}

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState, backdrop: &Backdrop) -> Vec<Vertex> {
    let field = state.playfield;
    let mut out = Vec::with_capacity(4096);

    gradient_rect(
        &mut out,
        0.0,
        0.0,
        field.width,
        field.height,
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    );
    draw_hills(&mut out, backdrop.offset, field.width, field.height);

    if state.phase != GamePhase::Home {
        for obstacle in state.obstacles.iter() {
            draw_pillar(&mut out, obstacle, state.tuning.obstacle_width, field.height);
        }
        draw_player(&mut out, &state.player);
        let p = SCORE_PANEL;
        rect(&mut out, p.x, p.y, p.w, p.h, colors::PANEL);
    }

    if state.phase == GamePhase::GameOver {
        rect(&mut out, 0.0, 0.0, field.width, field.height, colors::OVERLAY);
    }

    for button in ui::layout(state.phase, field.width, field.height) {
        let r = button.rect;
        rect(&mut out, r.x, r.y, r.w, r.h, button.kind.color());
    }

    out
}

/// Two copies of the hill strip so the wrap is seamless
fn draw_hills(out: &mut Vec<Vertex>, offset: f32, width: f32, height: f32) {
    let base_y = height;
    for copy in 0..2 {
        let origin = offset + copy as f32 * width;
        hill(out, origin + width * 0.15, base_y, height * 0.22, colors::HILL_DARK);
        hill(out, origin + width * 0.45, base_y, height * 0.30, colors::HILL);
        hill(out, origin + width * 0.80, base_y, height * 0.18, colors::HILL_DARK);
    }
}

/// Column of stacked birds above and below the gap
fn draw_pillar(out: &mut Vec<Vertex>, obstacle: &Obstacle, width: f32, height: f32) {
    // Upper column grows upward from the gap top
    let mut y = obstacle.gap_top - BIRD_TILE;
    while y > -BIRD_TILE {
        draw_bird(out, obstacle.x, y, width);
        y -= BIRD_TILE;
    }
    // Lower column grows downward from the gap bottom
    let mut y = obstacle.gap_bottom;
    while y < height {
        draw_bird(out, obstacle.x, y, width);
        y += BIRD_TILE;
    }
}

fn draw_bird(out: &mut Vec<Vertex>, x: f32, y: f32, width: f32) {
    rect(out, x, y + 1.0, width, BIRD_TILE - 2.0, colors::BIRD);
    rect(
        out,
        x + width * 0.25,
        y + BIRD_TILE * 0.45,
        width * 0.5,
        BIRD_TILE * 0.4,
        colors::BIRD_BELLY,
    );
}

fn draw_player(out: &mut Vec<Vertex>, player: &Player) {
    let center = player.center();
    let r = player.size.x.min(player.size.y) / 2.0;
    circle(out, center, r, colors::PIG, PLAYER_SEGMENTS);
    circle(
        out,
        center + Vec2::new(r * 0.45, r * 0.15),
        r * 0.35,
        colors::PIG_SNOUT,
        PLAYER_SEGMENTS / 2,
    );
    circle(
        out,
        center + Vec2::new(r * 0.2, -r * 0.35),
        r * 0.12,
        colors::EYE,
        8,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_backdrop_wraps() {
        let mut backdrop = Backdrop::default();
        for _ in 0..10_000 {
            backdrop.advance(300.0, true);
            assert!(backdrop.offset > -300.0 && backdrop.offset <= 0.0);
        }
    }

    #[test]
    fn test_backdrop_frozen_when_disabled() {
        let mut backdrop = Backdrop::default();
        backdrop.advance(300.0, false);
        assert_eq!(backdrop.offset, 0.0);
    }

    #[test]
    fn test_game_over_adds_overlay() {
        let mut state = GameState::new(5, Tuning::default());
        state.resize(800.0, 600.0);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        let playing = build_scene(&state, &Backdrop::default());

        state.end_run();
        let over = build_scene(&state, &Backdrop::default());

        // Overlay plus four buttons
        assert_eq!(over.len(), playing.len() + 6 + 4 * 6);
    }

    #[test]
    fn test_pillars_cover_column_outside_gap() {
        let obstacle = Obstacle {
            id: 0,
            x: 100.0,
            gap_top: 200.0,
            gap_bottom: 400.0,
            passed: false,
        };
        let mut out = Vec::new();
        draw_pillar(&mut out, &obstacle, 60.0, 600.0);
        assert!(!out.is_empty());
        for v in &out {
            let [x, y] = v.position;
            assert!((100.0..=160.0).contains(&x));
            assert!(y <= 200.0 || y >= 400.0);
        }
    }
}
