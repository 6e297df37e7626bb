//! Flappy Canvas - a single-screen flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Simulation (avatar physics, obstacles, scoring, game phases)
//! - `renderer`: Binds image handles to simulation state on a 2D surface
//! - `session`: Frame driver turning timestamps into fixed ticks
//! - `tuning`: Data-driven game balance
//! - `settings`: Player-facing presentation preferences

pub mod error;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in ms (60 Hz; per-tick constants are tuned for it)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed into the accumulator (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Height of the ground strip at the bottom of the play area
    pub const GROUND_HEIGHT: f32 = 100.0;
    /// Play area width as a fraction of its height (portrait 2:3)
    pub const VIEW_ASPECT: f32 = 2.0 / 3.0;

    /// Avatar defaults
    pub const AVATAR_WIDTH: f32 = 100.0;
    pub const AVATAR_HEIGHT: f32 = 100.0;
    pub const AVATAR_START_X: f32 = 1.0 / 3.0; // fraction of area width
    pub const AVATAR_START_Y: f32 = 0.4; // fraction of area height
    /// Hitbox half-extent as a fraction of the sprite size
    pub const AVATAR_HITBOX_FRACTION: f32 = 1.0 / 3.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.12;
    /// Velocity set by a flap (negative is up)
    pub const IMPULSE_VELOCITY: f32 = -18.0;
    pub const MAX_VELOCITY: f32 = 4.0;
    /// Sprite rotation per unit of velocity (radians)
    pub const AVATAR_TILT: f32 = 0.04;
    /// Flap animation cadence
    pub const IMPULSE_FRAME_MS: f32 = 100.0;
    pub const IMPULSE_FRAME_COUNT: u32 = 4;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Horizontal speed per tick (matches the ground scroll)
    pub const OBSTACLE_SPEED: f32 = 2.0;
    /// Gap size as a multiple of avatar height
    pub const GAP_FACTOR: f32 = 1.8;
    /// Inset from each pipe edge before a hit counts
    pub const OBSTACLE_HITBOX_PADDING: f32 = 15.0;
    pub const SPAWN_INTERVAL_MIN_MS: f32 = 1500.0;
    pub const SPAWN_INTERVAL_MAX_MS: f32 = 3000.0;

    /// Screen shake
    pub const SHAKE_INTENSITY: f32 = 15.0;
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const SHAKE_CUTOFF: f32 = 0.5;

    /// Backdrop scroll per tick
    pub const BACKGROUND_SCROLL_SPEED: f32 = 0.5;
    pub const GROUND_SCROLL_SPEED: f32 = 2.0;
}

/// Size of the playable surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fit a portrait play area into a viewport, using its full height
    pub fn fit(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            width: viewport_width.min(viewport_height * consts::VIEW_ASPECT),
            height: viewport_height,
        }
    }

    /// Y coordinate of the top of the ground strip
    #[inline]
    pub fn ground_y(&self, ground_height: f32) -> f32 {
        self.height - ground_height
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(600.0, 900.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_viewport_is_limited_by_aspect() {
        let area = PlayArea::fit(1920.0, 900.0);
        assert!((area.width - 600.0).abs() < 0.001);
        assert_eq!(area.height, 900.0);
    }

    #[test]
    fn test_fit_narrow_viewport_keeps_width() {
        let area = PlayArea::fit(390.0, 844.0);
        assert_eq!(area.width, 390.0);
        assert_eq!(area.height, 844.0);
    }

    #[test]
    fn test_ground_y() {
        let area = PlayArea::new(400.0, 800.0);
        assert_eq!(area.ground_y(consts::GROUND_HEIGHT), 700.0);
    }
}
