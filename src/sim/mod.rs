//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame, fixed per-frame constants
//! - Seeded or scripted gap placement only
//! - Wall time enters only through an injected clock
//! - No rendering or platform dependencies

pub mod collision;
pub mod gaps;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_obstacle_hit, hits_floor, obstacle_hit, player_box};
pub use gaps::{GapSource, RngGapSource, ScriptedGaps};
pub use session::Simulation;
pub use state::{GamePhase, GameState, Obstacle, Player};
pub use tick::{CollisionCause, TickResult, flap, reset, spawn_obstacle, tick};
