//! Construction-time errors
//!
//! The simulation itself never fails; only building one from a bad config does.

use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Config text was not valid JSON for [`crate::SimConfig`]
    Parse(String),
    /// Config file could not be read
    Io(String),
    NotFinite { field: &'static str },
    NotPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    JumpNotUpward { value: f32 },
    ZeroSpawnInterval,
    PlayerTooLarge { size: f32, height: f32 },
    GapDoesNotFit { gap_height: f32, margin: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(msg) => write!(f, "failed to read config: {msg}"),
            Self::NotFinite { field } => write!(f, "{field} must be a finite number"),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::JumpNotUpward { value } => {
                write!(f, "jump_impulse must be negative (upward), got {value}")
            }
            Self::ZeroSpawnInterval => write!(f, "spawn_interval must be at least 1 frame"),
            Self::PlayerTooLarge { size, height } => {
                write!(f, "player size {size} does not fit a playfield of height {height}")
            }
            Self::GapDoesNotFit {
                gap_height,
                margin,
                height,
            } => write!(
                f,
                "gap of {gap_height} plus margin {margin} leaves no room in a playfield of height {height}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
