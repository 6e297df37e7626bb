//! Gap obstacles (a pipe pair with a passable band between them)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::PlayArea;
use crate::tuning::Tuning;

use super::avatar::Avatar;
use super::rect::Rect;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Horizontal center of the pipe column
    pub x: f32,
    pub width: f32,
    /// Vertical center of the gap
    pub gap_center: f32,
    pub gap_size: f32,
    /// Leftward movement per tick
    pub speed: f32,
    /// Inset from each column edge for collision
    pub hitbox_padding: f32,
    passed: bool,
}

impl Obstacle {
    /// Spawn at the right edge with a uniformly random gap height
    pub fn new(id: u32, area: &PlayArea, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let (min, max) = Self::gap_range(area, tuning);
        let gap_center = rng.random_range(min..=max);
        Self::with_gap(id, area.width, gap_center, tuning)
    }

    /// Obstacle with a known position and gap
    pub fn with_gap(id: u32, x: f32, gap_center: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            x,
            width: tuning.obstacle_width,
            gap_center,
            gap_size: tuning.gap_size(),
            speed: tuning.obstacle_speed,
            hitbox_padding: tuning.obstacle_hitbox_padding,
            passed: false,
        }
    }

    /// Allowed gap centers: one gap size below the top, one above the ground
    ///
    /// When the area is too short for that, both ends collapse to the midpoint.
    pub fn gap_range(area: &PlayArea, tuning: &Tuning) -> (f32, f32) {
        let gap = tuning.gap_size();
        let min = gap;
        let max = area.height - tuning.ground_height - gap;
        if min > max {
            let mid = (min + max) / 2.0;
            log::debug!(
                "Play area {}px too short for gap {}px, centering gap at {}",
                area.height,
                gap,
                mid
            );
            (mid, mid)
        } else {
            (min, max)
        }
    }

    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    #[inline]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Returns true the first time the avatar's center is past the pipe center
    pub fn check_passed(&mut self, avatar: &Avatar) -> bool {
        if !self.passed && avatar.pos.x > self.x {
            self.passed = true;
            return true;
        }
        false
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_size / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_size / 2.0
    }

    /// Collidable column (padding applied to both vertical edges)
    pub fn column_hitbox(&self, area_height: f32) -> Rect {
        let half = self.width / 2.0 - self.hitbox_padding;
        Rect::new(
            Vec2::new(self.x - half, 0.0),
            Vec2::new(self.x + half, area_height),
        )
    }

    pub fn collides_with(&self, avatar: &Avatar) -> bool {
        let bird = avatar.hitbox();
        // Vertical extent is irrelevant to the x test
        let column = self.column_hitbox(0.0);
        bird.overlaps_x(&column) && !bird.within_y(self.gap_top(), self.gap_bottom())
    }

    /// Trailing edge has left the play area
    pub fn is_off_screen(&self) -> bool {
        self.x <= -self.width
    }

    /// Upper pipe, from the top edge down to the gap
    pub fn upper_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x - self.width / 2.0, 0.0),
            Vec2::new(self.x + self.width / 2.0, self.gap_top()),
        )
    }

    /// Lower pipe, from the gap down to the bottom of the area
    pub fn lower_rect(&self, area_height: f32) -> Rect {
        Rect::new(
            Vec2::new(self.x - self.width / 2.0, self.gap_bottom()),
            Vec2::new(self.x + self.width / 2.0, area_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const AREA: PlayArea = PlayArea::new(500.0, 800.0);

    fn avatar_at(x: f32, y: f32) -> Avatar {
        Avatar::new(Vec2::new(x, y), &Tuning::default())
    }

    fn pipe(x: f32, gap_center: f32) -> Obstacle {
        Obstacle::with_gap(1, x, gap_center, &Tuning::default())
    }

    #[test]
    fn test_spawns_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let obstacle = Obstacle::new(1, &AREA, &Tuning::default(), &mut rng);
        assert_eq!(obstacle.x, AREA.width);
        assert!(!obstacle.passed());
        assert!((obstacle.gap_size - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_gap_range_default() {
        let (min, max) = Obstacle::gap_range(&AREA, &Tuning::default());
        assert!((min - 180.0).abs() < 1e-3);
        assert!((max - 520.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_gap_range_clamps_to_midpoint() {
        let short = PlayArea::new(500.0, 400.0);
        // min = 180, max = 400 - 100 - 180 = 120
        let (min, max) = Obstacle::gap_range(&short, &Tuning::default());
        assert!((min - 150.0).abs() < 1e-3);
        assert_eq!(min, max);

        let mut rng = Pcg32::seed_from_u64(1);
        let obstacle = Obstacle::new(1, &short, &Tuning::default(), &mut rng);
        assert!((obstacle.gap_center - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_advance_moves_left_by_speed() {
        let mut obstacle = pipe(500.0, 300.0);
        obstacle.advance();
        obstacle.advance();
        assert_eq!(obstacle.x, 496.0);
    }

    #[test]
    fn test_passed_flips_once() {
        let mut obstacle = pipe(200.0, 300.0);
        let avatar = avatar_at(200.0, 300.0);
        // Equal x is not past
        assert!(!obstacle.check_passed(&avatar));
        obstacle.advance();
        assert!(obstacle.check_passed(&avatar));
        assert!(obstacle.passed());
        assert!(!obstacle.check_passed(&avatar));
        assert!(obstacle.passed());
    }

    #[test]
    fn test_no_collision_when_left_of_column() {
        // Column hitbox starts at 300 - 40 + 15 = 275; avatar hitbox right = x + 33.3
        let obstacle = pipe(300.0, 300.0);
        for y in [0.0, 100.0, 300.0, 650.0, 2000.0] {
            assert!(!obstacle.collides_with(&avatar_at(241.0, y)));
        }
    }

    #[test]
    fn test_collision_above_and_below_gap() {
        // Gap band [210, 390]
        let obstacle = pipe(300.0, 300.0);
        assert!(obstacle.collides_with(&avatar_at(300.0, 200.0)));
        assert!(obstacle.collides_with(&avatar_at(300.0, 400.0)));
        assert!(!obstacle.collides_with(&avatar_at(300.0, 300.0)));
    }

    #[test]
    fn test_padding_forgives_edge_contact() {
        // Sprite edges overlap the pipe sprite but the hitboxes do not
        let obstacle = pipe(300.0, 300.0);
        let avatar = avatar_at(230.0, 100.0);
        assert!(!obstacle.collides_with(&avatar));
    }

    #[test]
    fn test_off_screen_predicate() {
        let mut obstacle = pipe(-78.0, 300.0);
        assert!(!obstacle.is_off_screen());
        obstacle.advance();
        assert!(obstacle.is_off_screen());
    }

    #[test]
    fn test_pipe_rects_frame_the_gap() {
        let obstacle = pipe(300.0, 300.0);
        let upper = obstacle.upper_rect();
        let lower = obstacle.lower_rect(800.0);
        assert_eq!(upper.top(), 0.0);
        assert_eq!(upper.bottom(), 210.0);
        assert_eq!(lower.top(), 390.0);
        assert_eq!(lower.bottom(), 800.0);
        assert_eq!(upper.width(), 80.0);
    }

    proptest! {
        #[test]
        fn prop_gap_center_within_bounds(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let obstacle = Obstacle::new(1, &AREA, &Tuning::default(), &mut rng);
            prop_assert!(obstacle.gap_center >= 180.0 - 1e-3);
            prop_assert!(obstacle.gap_center <= 520.0 + 1e-3);
        }

        #[test]
        fn prop_inside_gap_never_collides(
            pipe_x in -100.0f32..700.0,
            avatar_x in 0.0f32..600.0,
            gap_center in 180.0f32..520.0,
            t in 0.0f32..=1.0,
        ) {
            let obstacle = pipe(pipe_x, gap_center);
            // Full sprite span [y - 50, y + 50] inside the 180px band
            let lo = obstacle.gap_top() + 50.0;
            let hi = obstacle.gap_bottom() - 50.0;
            let y = lo + (hi - lo) * t;
            prop_assert!(!obstacle.collides_with(&avatar_at(avatar_x, y)));
        }

        #[test]
        fn prop_passed_only_when_avatar_is_past(
            pipe_x in -100.0f32..700.0,
            avatar_x in 0.0f32..600.0,
        ) {
            let mut obstacle = pipe(pipe_x, 300.0);
            let flipped = obstacle.check_passed(&avatar_at(avatar_x, 300.0));
            prop_assert_eq!(flipped, avatar_x > pipe_x);
            prop_assert_eq!(obstacle.passed(), flipped);
        }
    }
}
