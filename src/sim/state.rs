//! Game state and core simulation types
//!
//! Everything a host needs to render a frame lives here, and all of it is
//! serializable so a frame can be handed across a boundary as JSON.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen: nothing moves until the first flap
    AwaitingStart,
    /// Active gameplay
    Running,
}

/// The player character. Only its vertical motion is simulated; its
/// horizontal position is fixed by the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge; may go negative above the playfield
    pub y: f32,
    /// Positive = falling
    pub vel: f32,
}

impl Player {
    pub fn new(y: f32) -> Self {
        Self { y, vel: 0.0 }
    }

    /// One step of constant-gravity integration (velocity first, then position)
    #[inline]
    pub fn integrate(&mut self, gravity: f32) {
        self.vel += gravity;
        self.y += self.vel;
    }
}

/// A top/bottom obstacle pair with a gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    /// Offset of the gap's upper boundary from the playfield top
    pub gap_top: f32,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Lower boundary of the gap
    #[inline]
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_top + gap_height
    }

    /// Fully scrolled past the left edge of the playfield
    #[inline]
    pub fn is_offscreen(&self, width: f32) -> bool {
        self.trailing_edge(width) < 0.0
    }
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Spawn order = left-to-right order; appended at the back, expired from the front
    pub obstacles: VecDeque<Obstacle>,
    /// Obstacles passed this run
    pub score: u32,
    /// Frames simulated this run
    pub frame: u64,
    /// Obstacle collisions are ignored while the clock reads earlier than this
    pub immune_until_ms: Option<f64>,
}

impl GameState {
    /// Fresh state for a new run
    pub fn new(config: &SimConfig) -> Self {
        Self {
            phase: Self::initial_phase(config),
            player: Player::new(config.start_y()),
            obstacles: VecDeque::new(),
            score: 0,
            frame: 0,
            immune_until_ms: None,
        }
    }

    fn initial_phase(config: &SimConfig) -> GamePhase {
        if config.variant.waits_for_start() {
            GamePhase::AwaitingStart
        } else {
            GamePhase::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Whether obstacle collisions are currently suppressed
    pub fn is_immune(&self, now_ms: f64) -> bool {
        self.immune_until_ms.is_some_and(|until| now_ms < until)
    }
}
