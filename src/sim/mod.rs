//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering:
//! - Fixed per-tick constants, seeded RNG only
//! - Obstacles iterate in spawn order
//! - No image handles, no screen shake, no platform calls

pub mod avatar;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, AvatarPose};
pub use obstacle::Obstacle;
pub use rect::Rect;
pub use state::{CrashCause, GameEvent, GamePhase, GameState, Score, Scroll};
pub use tick::{TickInput, autopilot_wants_impulse, tick};
