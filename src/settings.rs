//! Game settings and preferences
//!
//! Presentation-only switches; none of these change simulation results.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on crashes
    pub screen_shake: bool,
    /// Parallax background scrolling
    pub scroll_background: bool,

    // === HUD ===
    /// Show the running score while playing
    pub show_score: bool,
    /// Outline collision boxes (debug)
    pub show_hitboxes: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, static background)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            scroll_background: true,

            show_score: true,
            show_hitboxes: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Apply URL-style flags (`hitboxes`, `reduced-motion`, `noshake`, `noscore`)
    ///
    /// Accepts a query string with or without the leading `?`. Unknown flags are ignored.
    pub fn apply_query(&mut self, query: &str) {
        for flag in query.trim_start_matches('?').split('&') {
            let name = flag.split('=').next().unwrap_or_default();
            match name.to_ascii_lowercase().as_str() {
                "hitboxes" => self.show_hitboxes = true,
                "reduced-motion" | "reduced_motion" => self.reduced_motion = true,
                "noshake" => self.screen_shake = false,
                "noscore" => self.show_score = false,
                "" => {}
                other => log::debug!("Ignoring unknown setting flag: {}", other),
            }
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective background scroll (respects reduced_motion)
    pub fn effective_scroll_background(&self) -> bool {
        self.scroll_background && !self.reduced_motion
    }
}
