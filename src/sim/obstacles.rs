//! Pillar spawning, scrolling and retirement

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Playfield};
use crate::tuning::Tuning;

/// Active pillars in spawn order (left to right on screen)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    pub items: Vec<Obstacle>,
    /// Pillars dropped off the left edge this run
    pub retired: u64,
    next_id: u32,
}

impl ObstacleField {
    pub fn clear(&mut self) {
        self.items.clear();
        self.retired = 0;
        self.next_id = 0;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.items.iter()
    }

    /// Whether the cadence calls for a new pillar this tick
    pub fn should_spawn(&self, tuning: &Tuning, playfield: &Playfield) -> bool {
        match self.items.last() {
            None => true,
            Some(newest) => newest.x < playfield.width - tuning.obstacle_spacing,
        }
    }

    /// Add a pillar at the right edge with a random gap that fits on screen
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning, playfield: &Playfield) -> &Obstacle {
        let gap = tuning.gap_height(playfield.height).min(playfield.height);
        let (lo, hi) = gap_top_range(gap, tuning.gap_edge_margin, playfield.height);
        let gap_top = if hi > lo { rng.random_range(lo..=hi) } else { lo };

        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Obstacle {
            id,
            x: playfield.width,
            gap_top,
            gap_bottom: gap_top + gap,
            passed: false,
        });
        log::debug!("Spawned pillar {} with gap {:.1}..{:.1}", id, gap_top, gap_top + gap);

        &self.items[self.items.len() - 1]
    }

    /// Scroll every pillar left
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.items {
            obstacle.x -= speed;
        }
    }

    /// Flag pillars whose trailing edge is now left of `player_x`; returns how many flipped
    pub fn mark_passed(&mut self, player_x: f32, width: f32) -> u32 {
        let mut newly_passed = 0;
        for obstacle in self.items.iter_mut().filter(|o| !o.passed) {
            if obstacle.right(width) < player_x {
                obstacle.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    /// Drop pillars fully off the left edge; returns how many were removed
    pub fn retire(&mut self, width: f32) -> usize {
        let before = self.items.len();
        self.items.retain(|o| o.right(width) >= 0.0);
        let removed = before - self.items.len();
        if removed > 0 {
            self.retired += removed as u64;
            log::debug!("Retired {} pillar(s)", removed);
        }
        removed
    }

    /// Pillars still on screen that have been passed
    pub fn passed_in_view(&self) -> usize {
        self.items.iter().filter(|o| o.passed).count()
    }
}

/// Inclusive range for a gap's top edge.
///
/// Keeps `edge_margin` clear above and below the gap when the playfield is
/// tall enough, otherwise shrinks the margin evenly so the gap still fits.
pub fn gap_top_range(gap: f32, edge_margin: f32, height: f32) -> (f32, f32) {
    let slack = (height - gap).max(0.0);
    let margin = edge_margin.min(slack / 2.0).max(0.0);
    (margin, slack - margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field_with_one(x: f32) -> ObstacleField {
        let mut field = ObstacleField::default();
        field.items.push(Obstacle {
            id: 0,
            x,
            gap_top: 100.0,
            gap_bottom: 290.0,
            passed: false,
        });
        field
    }

    #[test]
    fn test_spawns_at_right_edge_with_gap_on_screen() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::default();

        for _ in 0..200 {
            let o = field.spawn(&mut rng, &tuning, &playfield).clone();
            assert_eq!(o.x, 800.0);
            assert!(o.gap_top >= tuning.gap_edge_margin);
            assert!(o.gap_bottom <= 600.0 - tuning.gap_edge_margin);
            assert!((o.gap_height() - tuning.gap_height(600.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_spawn_fits_tiny_playfield() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(300.0, 120.0);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = ObstacleField::default();
        let o = field.spawn(&mut rng, &tuning, &playfield);
        assert!(o.gap_top >= 0.0);
        assert!(o.gap_bottom <= 120.0);
    }

    #[test]
    fn test_spawn_cadence() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(800.0, 600.0);
        let mut field = ObstacleField::default();
        assert!(field.should_spawn(&tuning, &playfield));

        let mut field_at_edge = field_with_one(800.0);
        assert!(!field_at_edge.should_spawn(&tuning, &playfield));
        field_at_edge.items[0].x = 500.0;
        assert!(!field_at_edge.should_spawn(&tuning, &playfield));
        field_at_edge.items[0].x = 499.9;
        assert!(field_at_edge.should_spawn(&tuning, &playfield));

        field.items.clear();
        assert!(field.is_empty());
    }

    #[test]
    fn test_advance_and_retire_after_n_ticks() {
        let width = 60.0;
        let mut field = field_with_one(800.0);
        let n = 100;
        for _ in 0..n {
            field.advance(2.2);
        }
        assert!((field.items[0].x - (800.0 - 2.2 * n as f32)).abs() < 1e-2);

        // Still partly visible until x < -width
        while field.items[0].x >= -width {
            assert_eq!(field.retire(width), 0);
            field.advance(2.2);
        }
        assert_eq!(field.retire(width), 1);
        assert!(field.is_empty());
        assert_eq!(field.retired, 1);
    }

    #[test]
    fn test_mark_passed_only_once() {
        let mut field = field_with_one(100.0);
        assert_eq!(field.mark_passed(120.0, 60.0), 0);
        field.advance(50.0);
        assert_eq!(field.mark_passed(120.0, 60.0), 1);
        assert_eq!(field.mark_passed(120.0, 60.0), 0);
        assert!(field.items[0].passed);
    }

    #[test]
    fn test_order_preserved() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = ObstacleField::default();
        for _ in 0..3 {
            field.spawn(&mut rng, &tuning, &playfield);
            field.advance(310.0);
        }
        let ids: Vec<u32> = field.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(field.items.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_gap_top_range_shrinks_margin() {
        assert_eq!(gap_top_range(190.0, 100.0, 600.0), (100.0, 310.0));
        assert_eq!(gap_top_range(150.0, 100.0, 250.0), (50.0, 50.0));
        assert_eq!(gap_top_range(150.0, 100.0, 100.0), (0.0, 0.0));
    }
}
