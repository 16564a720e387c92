//! Swifty Duck - A side-scrolling flap-through-the-trees arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, obstacles, collisions, game state)
//! - `config`: Numeric game constants, validated at construction
//! - `platform`: Browser/native platform abstraction (time)
//! - `web`: Browser host binding (wasm32 only)

pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{SimConfig, Variant};
pub use error::ConfigError;
pub use sim::{GamePhase, Simulation, TickResult};

/// Reference game constants (the defaults of [`SimConfig`])
pub mod consts {
    /// Playfield dimensions; the floor sits at the bottom edge
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player box: fixed left edge, square side length
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 32.0;

    /// Downward acceleration (units/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set on flap (units/frame, negative = up)
    pub const JUMP_IMPULSE: f32 = -10.0;

    /// Obstacle defaults
    pub const GAP_HEIGHT: f32 = 150.0;
    /// Minimum space kept below the gap when placing it
    pub const GAP_MARGIN: f32 = 20.0;
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    /// Frames between obstacle spawns
    pub const SPAWN_INTERVAL: u64 = 100;
    /// Leftward obstacle speed (units/frame)
    pub const SCROLL_SPEED: f32 = 3.0;

    /// Obstacle collisions are ignored this long after the starting flap
    pub const IMMUNITY_MS: f64 = 500.0;
}
