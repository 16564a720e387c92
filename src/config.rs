//! Simulation constants
//!
//! Fixed for the lifetime of a session. Loaded from JSON on native builds;
//! any field left out of the file keeps its reference default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Which flavour of the game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Running from the first frame; a crash restarts in place
    Classic,
    /// Waits on a start screen for the first flap, then grants a short
    /// window of immunity to obstacles
    #[default]
    StartScreen,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::StartScreen => "start_screen",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "classic" | "basic" => Some(Variant::Classic),
            "start_screen" | "start" => Some(Variant::StartScreen),
            _ => None,
        }
    }

    /// Whether a session of this variant begins on the start screen
    pub fn waits_for_start(&self) -> bool {
        matches!(self, Variant::StartScreen)
    }
}

/// Numeric game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub variant: Variant,

    // === Playfield ===
    pub width: f32,
    /// Also the floor line
    pub height: f32,

    // === Player ===
    pub player_x: f32,
    pub player_size: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    // === Obstacles ===
    pub gap_height: f32,
    pub gap_margin: f32,
    pub obstacle_width: f32,
    pub spawn_interval: u64,
    pub scroll_speed: f32,

    /// Obstacle immunity after the starting flap (StartScreen only)
    pub immunity_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),

            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,

            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            gap_height: GAP_HEIGHT,
            gap_margin: GAP_MARGIN,
            obstacle_width: OBSTACLE_WIDTH,
            spawn_interval: SPAWN_INTERVAL,
            scroll_speed: SCROLL_SPEED,

            immunity_ms: IMMUNITY_MS,
        }
    }
}

impl SimConfig {
    /// Reference constants for the given variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Player starting height (vertical center of the playfield)
    pub fn start_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Largest gap top offset that keeps the gap and its margin on screen
    pub fn max_gap_top(&self) -> f32 {
        self.height - self.gap_height - self.gap_margin
    }

    /// Check every constant; a session is only built from a config that passes
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats: [(&'static str, f32); 10] = [
            ("width", self.width),
            ("height", self.height),
            ("player_x", self.player_x),
            ("player_size", self.player_size),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("gap_height", self.gap_height),
            ("gap_margin", self.gap_margin),
            ("obstacle_width", self.obstacle_width),
            ("scroll_speed", self.scroll_speed),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { field });
        }
        if !self.immunity_ms.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "immunity_ms",
            });
        }

        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("player_size", self.player_size),
            ("gravity", self.gravity),
            ("gap_height", self.gap_height),
            ("obstacle_width", self.obstacle_width),
            ("scroll_speed", self.scroll_speed),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }

        if self.gap_margin < 0.0 {
            return Err(ConfigError::Negative {
                field: "gap_margin",
                value: self.gap_margin as f64,
            });
        }
        if self.immunity_ms < 0.0 {
            return Err(ConfigError::Negative {
                field: "immunity_ms",
                value: self.immunity_ms,
            });
        }
        if self.jump_impulse >= 0.0 {
            return Err(ConfigError::JumpNotUpward {
                value: self.jump_impulse,
            });
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.player_size >= self.height {
            return Err(ConfigError::PlayerTooLarge {
                size: self.player_size,
                height: self.height,
            });
        }
        if self.max_gap_top() <= 0.0 {
            return Err(ConfigError::GapDoesNotFit {
                gap_height: self.gap_height,
                margin: self.gap_margin,
                height: self.height,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON (for writing a starter config file)
    pub fn to_json(&self) -> String {
        // Plain numbers and a unit enum; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load a JSON config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
