//! The player-controlled avatar
//!
//! Gravity and flap velocity are per-tick constants; elapsed time only drives
//! the flap animation cadence.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::PlayArea;
use crate::consts::{AVATAR_HITBOX_FRACTION, AVATAR_START_X, AVATAR_START_Y, AVATAR_TILT};
use crate::tuning::Tuning;

use super::rect::Rect;

/// Slack for f32 accumulation (six 60 Hz ticks sum to just under 100ms)
const FRAME_EPSILON_MS: f32 = 1e-3;

/// Animation state of the avatar sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarPose {
    /// Floating / falling
    Idle,
    /// Playing the flap sheet, `frame` in `0..frame_count`
    Impulse { frame: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Sprite center (x stays fixed after spawn)
    pub pos: Vec2,
    /// Vertical velocity per tick (negative is up)
    pub vel: f32,
    pub width: f32,
    pub height: f32,
    gravity: f32,
    impulse_velocity: f32,
    max_velocity: f32,
    frame_ms: f32,
    frame_count: u32,
    pose: AvatarPose,
    /// Time accumulated toward the next animation frame
    frame_elapsed_ms: f32,
}

impl Avatar {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: 0.0,
            width: tuning.avatar_width,
            height: tuning.avatar_height,
            gravity: tuning.gravity,
            impulse_velocity: tuning.impulse_velocity,
            max_velocity: tuning.max_velocity,
            frame_ms: tuning.impulse_frame_ms,
            frame_count: tuning.impulse_frame_count,
            pose: AvatarPose::Idle,
            frame_elapsed_ms: 0.0,
        }
    }

    /// Fresh avatar at the round start position, at rest
    pub fn spawn(area: &PlayArea, tuning: &Tuning) -> Self {
        Self::new(Self::start_position(area), tuning)
    }

    /// One third across, 40% down
    pub fn start_position(area: &PlayArea) -> Vec2 {
        Vec2::new(area.width * AVATAR_START_X, area.height * AVATAR_START_Y)
    }

    /// Flap: overwrite velocity with the upward impulse and restart the flap animation
    pub fn apply_impulse(&mut self) {
        self.vel = self.impulse_velocity;
        self.pose = AvatarPose::Impulse { frame: 0 };
        self.frame_elapsed_ms = 0.0;
    }

    /// Integrate one tick, then clamp velocity
    pub fn advance(&mut self, dt_ms: f32) {
        self.vel += self.gravity;
        self.pos.y += self.vel;
        self.vel = self.vel.clamp(-self.max_velocity, self.max_velocity);

        if let AvatarPose::Impulse { frame } = self.pose {
            self.frame_elapsed_ms += dt_ms;
            // Leftover time carries into the next frame
            if self.frame_elapsed_ms + FRAME_EPSILON_MS >= self.frame_ms {
                self.frame_elapsed_ms -= self.frame_ms;
                let next = frame + 1;
                self.pose = if next >= self.frame_count {
                    AvatarPose::Idle
                } else {
                    AvatarPose::Impulse { frame: next }
                };
            }
        }
    }

    #[inline]
    pub fn pose(&self) -> AvatarPose {
        self.pose
    }

    #[inline]
    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    /// Sprite rotation in radians (nose down while falling)
    pub fn tilt(&self) -> f32 {
        self.vel * AVATAR_TILT
    }

    /// Full sprite bounds
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::new(self.width, self.height) * 0.5)
    }

    /// Collision box, inset to a third of each dimension from the center
    pub fn hitbox(&self) -> Rect {
        Rect::from_center(
            self.pos,
            Vec2::new(self.width, self.height) * AVATAR_HITBOX_FRACTION,
        )
    }

    /// True once the sprite's lower half dips into the ground strip
    pub fn touches_ground(&self, ground_y: f32) -> bool {
        self.pos.y > ground_y - self.height / 2.0
    }
}
