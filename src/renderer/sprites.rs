//! Image handles the renderer binds to simulation state
//!
//! Handles are opaque to the crate; the host decides what an image is.

use crate::sim::Rect;

/// Asset locations relative to the served page
pub mod paths {
    pub const BIRD_FLOAT: &str = "assets/bird/floating_fall.png";
    pub const BIRD_JUMP: &str = "assets/bird/jump.png";
    pub const BIRD_WALL_HIT: &str = "assets/bird/wall_hit.png";
    pub const PIPE: &str = "assets/background/gray_column.png";
    pub const GROUND: &str = "assets/background/ground.png";
    pub const BACKGROUND: &str = "assets/background/bg-1.png";
}

/// Width of one frame in the flap sheet (4 frames across a 256px sheet)
pub const JUMP_FRAME_SIZE: f32 = 64.0;

#[derive(Debug, Clone)]
pub struct SpriteSet<H> {
    pub bird_float: H,
    pub bird_jump: H,
    pub bird_wall_hit: H,
    pub pipe: H,
    pub ground: H,
    pub background: H,
}

impl<H> SpriteSet<H> {
    /// Build a set by loading every path through `load`
    pub fn load_with(mut load: impl FnMut(&'static str) -> H) -> Self {
        Self {
            bird_float: load(paths::BIRD_FLOAT),
            bird_jump: load(paths::BIRD_JUMP),
            bird_wall_hit: load(paths::BIRD_WALL_HIT),
            pipe: load(paths::PIPE),
            ground: load(paths::GROUND),
            background: load(paths::BACKGROUND),
        }
    }
}

/// Source rectangle of a flap animation frame
pub fn jump_frame(frame: u32) -> Rect {
    Rect::from_xywh(
        frame as f32 * JUMP_FRAME_SIZE,
        0.0,
        JUMP_FRAME_SIZE,
        JUMP_FRAME_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_with_visits_every_path() {
        let mut seen = Vec::new();
        let set = SpriteSet::load_with(|path| {
            seen.push(path);
            path.len()
        });
        assert_eq!(seen.len(), 6);
        assert_eq!(set.pipe, paths::PIPE.len());
        assert!(seen.contains(&paths::BACKGROUND));
    }

    #[test]
    fn test_jump_frame_offsets() {
        assert_eq!(jump_frame(0).left(), 0.0);
        assert_eq!(jump_frame(3).left(), 192.0);
        assert_eq!(jump_frame(3).width(), 64.0);
    }
}
