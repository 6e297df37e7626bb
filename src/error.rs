//! Configuration errors
//!
//! The simulation itself never fails; only loading tuning can.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Input was not valid JSON for the expected shape
    Parse(String),
    NonPositive { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
    InvalidRange { field: &'static str, min: f32, max: f32 },
    /// Value must lie strictly between 0 and 1
    OutOfUnitRange { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid config: {msg}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be a finite number"),
            Self::InvalidRange { field, min, max } => {
                write!(f, "{field} range is inverted: min={min}, max={max}")
            }
            Self::OutOfUnitRange { field, value } => {
                write!(f, "{field} must be in (0, 1), got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
