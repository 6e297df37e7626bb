//! Data-driven game balance
//!
//! Every gameplay constant the simulation uses, loadable from JSON. Missing
//! fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Avatar ===
    pub avatar_width: f32,
    pub avatar_height: f32,
    pub gravity: f32,
    pub impulse_velocity: f32,
    pub max_velocity: f32,
    pub impulse_frame_ms: f32,
    pub impulse_frame_count: u32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_speed: f32,
    pub gap_factor: f32,
    pub obstacle_hitbox_padding: f32,
    pub spawn_interval_min_ms: f32,
    pub spawn_interval_max_ms: f32,

    // === World ===
    pub ground_height: f32,
    pub background_scroll_speed: f32,
    pub ground_scroll_speed: f32,

    // === Feedback ===
    pub shake_intensity: f32,
    pub shake_decay: f32,
    pub shake_cutoff: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            gravity: GRAVITY,
            impulse_velocity: IMPULSE_VELOCITY,
            max_velocity: MAX_VELOCITY,
            impulse_frame_ms: IMPULSE_FRAME_MS,
            impulse_frame_count: IMPULSE_FRAME_COUNT,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            gap_factor: GAP_FACTOR,
            obstacle_hitbox_padding: OBSTACLE_HITBOX_PADDING,
            spawn_interval_min_ms: SPAWN_INTERVAL_MIN_MS,
            spawn_interval_max_ms: SPAWN_INTERVAL_MAX_MS,

            ground_height: GROUND_HEIGHT,
            background_scroll_speed: BACKGROUND_SCROLL_SPEED,
            ground_scroll_speed: GROUND_SCROLL_SPEED,

            shake_intensity: SHAKE_INTENSITY,
            shake_decay: SHAKE_DECAY,
            shake_cutoff: SHAKE_CUTOFF,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Vertical size of the passable band in every obstacle
    #[inline]
    pub fn gap_size(&self) -> f32 {
        self.avatar_height * self.gap_factor
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("gravity", self.gravity),
            ("impulse_velocity", self.impulse_velocity),
            ("max_velocity", self.max_velocity),
            ("impulse_frame_ms", self.impulse_frame_ms),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("gap_factor", self.gap_factor),
            ("obstacle_hitbox_padding", self.obstacle_hitbox_padding),
            ("spawn_interval_min_ms", self.spawn_interval_min_ms),
            ("spawn_interval_max_ms", self.spawn_interval_max_ms),
            ("ground_height", self.ground_height),
            ("background_scroll_speed", self.background_scroll_speed),
            ("ground_scroll_speed", self.ground_scroll_speed),
            ("shake_intensity", self.shake_intensity),
            ("shake_decay", self.shake_decay),
            ("shake_cutoff", self.shake_cutoff),
        ];
        if let Some((field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        let positive = [
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("max_velocity", self.max_velocity),
            ("impulse_frame_ms", self.impulse_frame_ms),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("gap_factor", self.gap_factor),
            ("spawn_interval_min_ms", self.spawn_interval_min_ms),
            ("shake_cutoff", self.shake_cutoff),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.impulse_frame_count == 0 {
            return Err(ConfigError::NonPositive {
                field: "impulse_frame_count",
                value: 0.0,
            });
        }

        if self.spawn_interval_min_ms > self.spawn_interval_max_ms {
            return Err(ConfigError::InvalidRange {
                field: "spawn_interval_ms",
                min: self.spawn_interval_min_ms,
                max: self.spawn_interval_max_ms,
            });
        }
        if self.shake_decay <= 0.0 || self.shake_decay >= 1.0 {
            return Err(ConfigError::OutOfUnitRange {
                field: "shake_decay",
                value: self.shake_decay,
            });
        }
        // Padding that eats the whole column would make pipes intangible
        if self.obstacle_hitbox_padding * 2.0 >= self.obstacle_width {
            return Err(ConfigError::InvalidRange {
                field: "obstacle_hitbox_padding",
                min: self.obstacle_hitbox_padding * 2.0,
                max: self.obstacle_width,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_gap_size() {
        assert!((Tuning::default().gap_size() - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.2, "obstacle_speed": 3.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.2);
        assert_eq!(tuning.obstacle_speed, 3.0);
        assert_eq!(tuning.max_velocity, MAX_VELOCITY);
        assert_eq!(tuning.spawn_interval_min_ms, SPAWN_INTERVAL_MIN_MS);
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.gap_factor = 2.5;
        let parsed = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ gravity: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_spawn_range() {
        let json = r#"{ "spawn_interval_min_ms": 3000, "spawn_interval_max_ms": 1000 }"#;
        assert_eq!(
            Tuning::from_json(json),
            Err(ConfigError::InvalidRange {
                field: "spawn_interval_ms",
                min: 3000.0,
                max: 1000.0,
            })
        );
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let json = r#"{ "obstacle_speed": 0 }"#;
        assert_eq!(
            Tuning::from_json(json),
            Err(ConfigError::NonPositive {
                field: "obstacle_speed",
                value: 0.0,
            })
        );
    }

    #[test]
    fn test_rejects_decay_outside_unit_range() {
        let json = r#"{ "shake_decay": 1.0 }"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(ConfigError::OutOfUnitRange { field: "shake_decay", .. })
        ));
    }

    #[test]
    fn test_rejects_padding_wider_than_column() {
        let json = r#"{ "obstacle_width": 20, "obstacle_hitbox_padding": 15 }"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(ConfigError::InvalidRange { field: "obstacle_hitbox_padding", .. })
        ));
    }
}
