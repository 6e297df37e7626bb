//! Screen shake: a decaying random camera offset

use glam::Vec2;
use rand::Rng;

use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct ScreenShake {
    intensity: f32,
    /// Multiplier applied every tick (< 1)
    decay: f32,
    /// Below this the shake snaps off
    cutoff: f32,
    default_intensity: f32,
    offset: Vec2,
}

impl ScreenShake {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            intensity: 0.0,
            decay: tuning.shake_decay,
            cutoff: tuning.shake_cutoff,
            default_intensity: tuning.shake_intensity,
            offset: Vec2::ZERO,
        }
    }

    /// Start a shake, replacing any shake in progress
    pub fn trigger(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    pub fn trigger_default(&mut self) {
        self.trigger(self.default_intensity);
    }

    /// Pick this tick's offset, then decay
    pub fn advance(&mut self, rng: &mut impl Rng) {
        if self.intensity <= 0.0 {
            return;
        }
        self.offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * self.intensity,
            (rng.random::<f32>() - 0.5) * self.intensity,
        );
        self.intensity *= self.decay;
        if self.intensity < self.cutoff {
            self.intensity = 0.0;
            self.offset = Vec2::ZERO;
        }
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}
