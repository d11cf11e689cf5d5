//! Collision detection
//!
//! Everything here is axis-aligned: the player is a box shrunk by the hitbox
//! margins, a pillar is a full-height column with a gap cut out of it.

use glam::Vec2;

use super::state::{Obstacle, Player, Playfield};
use crate::tuning::HitboxMargins;

/// Axis-aligned box in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Inset each edge by its margin
    pub fn shrink(&self, m: &HitboxMargins) -> Self {
        Self {
            min: self.min + Vec2::new(m.left, m.top),
            max: self.max - Vec2::new(m.right, m.bottom),
        }
    }

    /// Strict overlap with the horizontal span [x0, x1]
    #[inline]
    pub fn overlaps_x(&self, x0: f32, x1: f32) -> bool {
        self.max.x > x0 && self.min.x < x1
    }
}

/// Forgiving hitbox used against pillars
pub fn player_hitbox(player: &Player, margins: &HitboxMargins) -> Aabb {
    player.bounds().shrink(margins)
}

/// Check a hitbox against one pillar column
///
/// Hits when the box is inside the column horizontally and pokes above the
/// gap top or below the gap bottom.
pub fn hits_obstacle(hitbox: &Aabb, obstacle: &Obstacle, width: f32) -> bool {
    if !hitbox.overlaps_x(obstacle.x, obstacle.right(width)) {
        return false;
    }
    hitbox.min.y < obstacle.gap_top || hitbox.max.y > obstacle.gap_bottom
}

/// Player box left the vertical range [0, height - player_height]
pub fn out_of_bounds(player: &Player, playfield: &Playfield) -> bool {
    player.pos.y < 0.0 || player.pos.y > player.max_y(playfield)
}

/// First pillar the hitbox touches, if any
pub fn first_hit<'a>(
    hitbox: &Aabb,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    width: f32,
) -> Option<&'a Obstacle> {
    obstacles
        .into_iter()
        .find(|o| hits_obstacle(hitbox, o, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 60.0;

    fn pillar(x: f32, top: f32, bottom: f32) -> Obstacle {
        Obstacle {
            id: 0,
            x,
            gap_top: top,
            gap_bottom: bottom,
            passed: false,
        }
    }

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(x + w, y + h))
    }

    #[test]
    fn test_inside_gap_no_collision() {
        let gap = pillar(100.0, 200.0, 400.0);
        assert!(!hits_obstacle(&boxed(110.0, 250.0, 40.0, 40.0), &gap, WIDTH));
        // Touching the gap edges exactly is still inside
        assert!(!hits_obstacle(&boxed(110.0, 200.0, 40.0, 200.0), &gap, WIDTH));
    }

    #[test]
    fn test_one_unit_over_top_edge() {
        let gap = pillar(100.0, 200.0, 400.0);
        assert!(hits_obstacle(&boxed(110.0, 199.0, 40.0, 40.0), &gap, WIDTH));
    }

    #[test]
    fn test_one_unit_over_bottom_edge() {
        let gap = pillar(100.0, 200.0, 400.0);
        assert!(hits_obstacle(&boxed(110.0, 361.0, 40.0, 40.0), &gap, WIDTH));
    }

    #[test]
    fn test_no_horizontal_overlap_no_collision() {
        let gap = pillar(100.0, 200.0, 400.0);
        // Far above the gap but entirely left of the column
        assert!(!hits_obstacle(&boxed(20.0, 0.0, 80.0, 40.0), &gap, WIDTH));
        // Right of the column
        assert!(!hits_obstacle(&boxed(160.0, 0.0, 40.0, 40.0), &gap, WIDTH));
        // One unit inside the column's left edge
        assert!(hits_obstacle(&boxed(21.0, 0.0, 80.0, 40.0), &gap, WIDTH));
    }

    #[test]
    fn test_margins_shrink_each_edge() {
        let margins = HitboxMargins {
            left: 1.0,
            right: 2.0,
            top: 3.0,
            bottom: 4.0,
        };
        let shrunk = boxed(10.0, 10.0, 50.0, 50.0).shrink(&margins);
        assert_eq!(shrunk.min, Vec2::new(11.0, 13.0));
        assert_eq!(shrunk.max, Vec2::new(58.0, 56.0));
    }

    #[test]
    fn test_margins_forgive_graze() {
        let player = Player {
            pos: Vec2::new(110.0, 198.0),
            vel: 0.0,
            size: Vec2::new(40.0, 40.0),
        };
        let gap = pillar(100.0, 200.0, 400.0);
        assert!(hits_obstacle(&player.bounds(), &gap, WIDTH));
        let hitbox = player_hitbox(&player, &HitboxMargins::uniform(4.0));
        assert!(!hits_obstacle(&hitbox, &gap, WIDTH));
    }

    #[test]
    fn test_out_of_bounds() {
        let playfield = Playfield::new(800.0, 600.0);
        let mut player = Player {
            pos: Vec2::new(94.0, 0.0),
            vel: 0.0,
            size: Vec2::new(52.0, 52.0),
        };
        assert!(!out_of_bounds(&player, &playfield));
        player.pos.y = 548.0;
        assert!(!out_of_bounds(&player, &playfield));
        player.pos.y = 548.1;
        assert!(out_of_bounds(&player, &playfield));
        player.pos.y = -0.1;
        assert!(out_of_bounds(&player, &playfield));
    }

    #[test]
    fn test_first_hit_picks_in_order() {
        let pillars = [pillar(0.0, 0.0, 600.0), pillar(100.0, 300.0, 400.0)];
        let hitbox = boxed(110.0, 10.0, 30.0, 30.0);
        let hit = first_hit(&hitbox, pillars.iter(), WIDTH).map(|o| o.x);
        assert_eq!(hit, Some(100.0));
    }
}
