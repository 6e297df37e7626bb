//! Frame driver
//!
//! Turns host frame timestamps into fixed simulation ticks, routes the
//! interact signal, and lets the renderer observe every tick.

use crate::consts::*;
use crate::renderer::{DrawSurface, Renderer};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, tick};

/// A running game: state, renderer and the fixed-step accumulator
pub struct Session<H> {
    pub state: GameState,
    pub renderer: Renderer<H>,
    pub settings: Settings,
    input: TickInput,
    accumulator_ms: f32,
    last_time_ms: Option<f64>,
    last_phase: GamePhase,
}

impl<H> Session<H> {
    pub fn new(state: GameState, renderer: Renderer<H>, settings: Settings) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            renderer,
            settings,
            input: TickInput::default(),
            accumulator_ms: 0.0,
            last_time_ms: None,
            last_phase,
        }
    }

    /// Queue an interact; consumed by the next tick that runs
    pub fn interact(&mut self) {
        self.input.interact = true;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    pub fn idle_mode(&self) -> bool {
        self.input.idle_mode
    }

    /// Advance simulation to `timestamp_ms`; returns the number of ticks run
    pub fn update(&mut self, timestamp_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((timestamp_ms - last) as f32).max(0.0),
            None => SIM_DT_MS,
        };
        self.last_time_ms = Some(timestamp_ms);
        self.accumulator_ms += dt.min(MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT_MS);
            self.renderer.observe(&self.state.events, &self.settings);
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.interact = false;
        }

        if self.state.phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }

        substeps
    }

    /// Update then draw one frame
    pub fn frame<S>(&mut self, timestamp_ms: f64, surface: &mut S) -> u32
    where
        S: DrawSurface<Image = H>,
    {
        let substeps = self.update(timestamp_ms);
        self.renderer.draw(&self.state, &self.settings, surface);
        substeps
    }
}
