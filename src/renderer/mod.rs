//! 2D rendering
//!
//! The renderer owns the image handles and the screen shake, and draws the
//! simulation onto any [`DrawSurface`] (a browser canvas in production, a
//! recording surface in tests). It never mutates game state.

pub mod overlay;
pub mod shake;
pub mod sprites;

pub use shake::ScreenShake;
pub use sprites::SpriteSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{AvatarPose, GameEvent, GamePhase, GameState, Rect};
use crate::tuning::Tuning;

/// Colors for non-sprite elements (CSS color strings)
pub mod colors {
    pub const SKY: &str = "#87CEEB";
    pub const TEXT_FILL: &str = "white";
    pub const TEXT_STROKE: &str = "black";
    pub const HITBOX: &str = "red";
}

/// Rotate the upper pipe sprite so its cap faces the gap
const UPPER_PIPE_ROTATION: f32 = std::f32::consts::PI;
/// Baseline of the score HUD
const HUD_Y: f32 = 80.0;
const OVERLAY_LINE_HEIGHT: f32 = 36.0;

/// One image blit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    /// Source region within the image; `None` for the whole image
    pub src: Option<Rect>,
    pub dest: Rect,
    /// Radians, about the center of `dest`
    pub rotation: f32,
}

impl SpriteDraw {
    pub fn whole(dest: Rect) -> Self {
        Self {
            src: None,
            dest,
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub bold: bool,
    pub fill: &'static str,
    /// Outline color and width
    pub stroke: Option<(&'static str, f32)>,
}

pub const HUD_STYLE: TextStyle = TextStyle {
    size_px: 48.0,
    bold: true,
    fill: colors::TEXT_FILL,
    stroke: Some((colors::TEXT_STROKE, 3.0)),
};

pub const OVERLAY_STYLE: TextStyle = TextStyle {
    size_px: 24.0,
    bold: false,
    fill: colors::TEXT_FILL,
    stroke: Some((colors::TEXT_STROKE, 2.0)),
};

/// The single 2D drawing surface the game renders to
///
/// Text is drawn horizontally centered on `anchor.x` with its baseline at `anchor.y`.
pub trait DrawSurface {
    type Image;

    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f32);
    fn draw_image(&mut self, image: &Self::Image, sprite: &SpriteDraw);
    fn draw_text(&mut self, text: &str, anchor: Vec2, style: &TextStyle);
    /// Translation applied to everything drawn until the next call
    fn set_offset(&mut self, offset: Vec2);
}

pub struct Renderer<H> {
    sprites: SpriteSet<H>,
    shake: ScreenShake,
    /// Separate stream from the simulation RNG so visuals never perturb gameplay
    rng: Pcg32,
}

impl<H> Renderer<H> {
    pub fn new(sprites: SpriteSet<H>, tuning: &Tuning, seed: u64) -> Self {
        Self {
            sprites,
            shake: ScreenShake::new(tuning),
            rng: Pcg32::seed_from_u64(seed.wrapping_add(0x9E37_79B9_7F4A_7C15)),
        }
    }

    pub fn sprites(&self) -> &SpriteSet<H> {
        &self.sprites
    }

    pub fn shake(&self) -> &ScreenShake {
        &self.shake
    }

    /// React to one simulation tick: decay the shake, then start a new one on a crash
    pub fn observe(&mut self, events: &[GameEvent], settings: &Settings) {
        self.shake.advance(&mut self.rng);
        let crashed = events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }));
        if crashed && settings.effective_screen_shake() {
            self.shake.trigger_default();
        }
    }

    /// Draw one frame
    pub fn draw<S>(&self, state: &GameState, settings: &Settings, surface: &mut S)
    where
        S: DrawSurface<Image = H>,
    {
        let area = state.area;
        let (w, h) = (area.width, area.height);

        // Backdrop is not shaken
        surface.set_offset(Vec2::ZERO);
        surface.fill_rect(Rect::from_xywh(0.0, 0.0, w, h), colors::SKY);
        let bg_x = if settings.effective_scroll_background() {
            state.scroll.background
        } else {
            0.0
        };
        for dx in [0.0, w] {
            surface.draw_image(
                &self.sprites.background,
                &SpriteDraw::whole(Rect::from_xywh(bg_x + dx, 0.0, w, h)),
            );
        }

        surface.set_offset(self.shake.offset());

        for obstacle in &state.obstacles {
            surface.draw_image(
                &self.sprites.pipe,
                &SpriteDraw {
                    src: None,
                    dest: obstacle.upper_rect(),
                    rotation: UPPER_PIPE_ROTATION,
                },
            );
            surface.draw_image(
                &self.sprites.pipe,
                &SpriteDraw::whole(obstacle.lower_rect(h)),
            );
        }

        self.draw_avatar(state, surface);

        let ground_height = state.tuning.ground_height;
        let ground_y = state.ground_y();
        for dx in [0.0, w] {
            surface.draw_image(
                &self.sprites.ground,
                &SpriteDraw::whole(Rect::from_xywh(
                    state.scroll.ground + dx,
                    ground_y,
                    w,
                    ground_height,
                )),
            );
        }

        if settings.show_hitboxes {
            surface.stroke_rect(
                Rect::from_xywh(0.0, ground_y, w, ground_height),
                colors::HITBOX,
                2.0,
            );
            surface.stroke_rect(state.avatar.hitbox(), colors::HITBOX, 1.0);
            for obstacle in &state.obstacles {
                let column = obstacle.column_hitbox(h);
                let top = Rect::new(column.min, Vec2::new(column.right(), obstacle.gap_top()));
                let bottom = Rect::new(Vec2::new(column.left(), obstacle.gap_bottom()), column.max);
                surface.stroke_rect(top, colors::HITBOX, 1.0);
                surface.stroke_rect(bottom, colors::HITBOX, 1.0);
            }
        }

        surface.set_offset(Vec2::ZERO);

        if settings.show_score {
            if let Some(text) = overlay::hud_text(state.phase, &state.score) {
                surface.draw_text(&text, Vec2::new(w / 2.0, HUD_Y), &HUD_STYLE);
            }
        }

        let lines = overlay::overlay_lines(state.phase, &state.score);
        let first_y = h / 2.0 - (lines.len().saturating_sub(1)) as f32 * OVERLAY_LINE_HEIGHT / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let y = first_y + i as f32 * OVERLAY_LINE_HEIGHT;
            surface.draw_text(line, Vec2::new(w / 2.0, y), &OVERLAY_STYLE);
        }
    }

    fn draw_avatar<S>(&self, state: &GameState, surface: &mut S)
    where
        S: DrawSurface<Image = H>,
    {
        let avatar = &state.avatar;
        let dest = avatar.bounds();
        let rotation = avatar.tilt();

        let (image, src) = if state.phase == GamePhase::GameOver {
            (&self.sprites.bird_wall_hit, None)
        } else {
            match avatar.pose() {
                AvatarPose::Impulse { frame } => {
                    (&self.sprites.bird_jump, Some(sprites::jump_frame(frame)))
                }
                AvatarPose::Idle => (&self.sprites.bird_float, None),
            }
        };

        surface.draw_image(image, &SpriteDraw { src, dest, rotation });
    }
}
