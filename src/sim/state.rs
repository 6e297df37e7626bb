//! Game state and core simulation types
//!
//! Everything the tick mutates lives here, including the spawn timer and the
//! backdrop scroll offsets.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::obstacle::Obstacle;
use crate::PlayArea;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Crashed; frozen until the next tap
    GameOver,
}

/// Running score and session best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub current: u32,
    pub best: u32,
}

impl Score {
    /// Count a passed obstacle. Returns true if this set a new best.
    pub fn record_pass(&mut self) -> bool {
        self.current += 1;
        if self.current > self.best {
            self.best = self.current;
            return true;
        }
        false
    }

    pub fn reset_current(&mut self) {
        self.current = 0;
    }
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle { id: u32 },
    Ground,
}

/// Things that happened during a tick, for presentation to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    Impulse,
    ObstacleSpawned { id: u32 },
    Scored { score: u32, new_best: bool },
    GameOver { cause: CrashCause },
    ReturnedToMenu,
}

/// Backdrop offsets; both wrap back to 0 after one area width
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub background: f32,
    pub ground: f32,
}

impl Scroll {
    pub fn advance(&mut self, area_width: f32, tuning: &Tuning) {
        self.background -= tuning.background_scroll_speed;
        self.ground -= tuning.ground_scroll_speed;
        if self.background <= -area_width {
            self.background = 0.0;
        }
        if self.ground <= -area_width {
            self.ground = 0.0;
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub area: PlayArea,
    pub phase: GamePhase,
    pub score: Score,
    pub avatar: Avatar,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub scroll: Scroll,
    /// Time since the last spawn (or round start)
    pub spawn_elapsed_ms: f32,
    /// Current randomized wait before the next spawn
    pub spawn_interval_ms: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state in the menu
    pub fn new(seed: u64, area: PlayArea, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn_interval_ms = sample_interval(&mut rng, &tuning);
        Self {
            seed,
            avatar: Avatar::spawn(&area, &tuning),
            tuning,
            area,
            phase: GamePhase::Menu,
            score: Score::default(),
            obstacles: Vec::new(),
            scroll: Scroll::default(),
            spawn_elapsed_ms: 0.0,
            spawn_interval_ms,
            time_ticks: 0,
            events: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build an obstacle at the right edge and pick the wait before the next one
    pub fn spawn_obstacle(&mut self) -> Obstacle {
        let id = self.next_entity_id();
        let obstacle = Obstacle::new(id, &self.area, &self.tuning, &mut self.rng);
        self.spawn_elapsed_ms = 0.0;
        self.spawn_interval_ms = sample_interval(&mut self.rng, &self.tuning);
        log::debug!(
            "Spawned obstacle {} (gap at {:.0}), next in {:.0}ms",
            id,
            obstacle.gap_center,
            self.spawn_interval_ms
        );
        obstacle
    }

    /// Clear obstacles, reset the spawn timer and put a fresh avatar at the start
    pub fn reset_round(&mut self) {
        self.obstacles.clear();
        self.spawn_elapsed_ms = 0.0;
        self.avatar = Avatar::spawn(&self.area, &self.tuning);
    }

    /// Adopt a new play area (viewport resize)
    pub fn resize(&mut self, area: PlayArea) {
        if area == self.area {
            return;
        }
        log::info!(
            "Play area resized: {}x{} -> {}x{}",
            self.area.width,
            self.area.height,
            area.width,
            area.height
        );
        self.area = area;
        if self.phase == GamePhase::Menu {
            self.avatar = Avatar::spawn(&self.area, &self.tuning);
        }
    }

    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.area.ground_y(self.tuning.ground_height)
    }
}

fn sample_interval(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    if tuning.spawn_interval_min_ms >= tuning.spawn_interval_max_ms {
        return tuning.spawn_interval_min_ms;
    }
    rng.random_range(tuning.spawn_interval_min_ms..tuning.spawn_interval_max_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::new(1, PlayArea::default(), Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, Score::default());
        assert!(state.spawn_interval_ms >= 1500.0 && state.spawn_interval_ms < 3000.0);
    }

    #[test]
    fn test_record_pass_raises_best() {
        let mut score = Score { current: 0, best: 2 };
        assert!(!score.record_pass());
        assert!(!score.record_pass());
        assert!(score.record_pass());
        assert_eq!(score, Score { current: 3, best: 3 });
        score.reset_current();
        assert_eq!(score, Score { current: 0, best: 3 });
    }

    #[test]
    fn test_spawn_obstacle_resets_timer_and_ids() {
        let mut state = GameState::new(5, PlayArea::default(), Tuning::default());
        state.spawn_elapsed_ms = 2500.0;
        let a = state.spawn_obstacle();
        let b = state.spawn_obstacle();
        assert_eq!(state.spawn_elapsed_ms, 0.0);
        assert_eq!(a.x, state.area.width);
        assert!(b.id > a.id);
    }

    #[test]
    fn test_scroll_wraps() {
        let tuning = Tuning::default();
        let mut scroll = Scroll { background: -99.5, ground: -98.0 };
        scroll.advance(100.0, &tuning);
        assert_eq!(scroll.background, 0.0);
        assert_eq!(scroll.ground, 0.0);
        scroll.advance(100.0, &tuning);
        assert_eq!(scroll.background, -0.5);
        assert_eq!(scroll.ground, -2.0);
    }

    #[test]
    fn test_resize_in_menu_respawns_avatar() {
        let mut state = GameState::new(1, PlayArea::new(600.0, 900.0), Tuning::default());
        state.resize(PlayArea::new(300.0, 450.0));
        assert!((state.avatar.pos.x - 100.0).abs() < 1e-3);
        assert!((state.avatar.pos.y - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_while_playing_keeps_avatar() {
        let mut state = GameState::new(1, PlayArea::new(600.0, 900.0), Tuning::default());
        state.phase = GamePhase::Playing;
        state.avatar.pos.y = 123.0;
        state.resize(PlayArea::new(300.0, 450.0));
        assert_eq!(state.avatar.pos.y, 123.0);
        assert_eq!(state.area, PlayArea::new(300.0, 450.0));
    }

    proptest! {
        #[test]
        fn prop_spawn_interval_in_range(seed in any::<u64>()) {
            let mut state = GameState::new(seed, PlayArea::default(), Tuning::default());
            for _ in 0..4 {
                state.spawn_obstacle();
                prop_assert!(state.spawn_interval_ms >= 1500.0);
                prop_assert!(state.spawn_interval_ms < 3000.0);
            }
        }
    }
}
