//! A single game session
//!
//! Owns the state and everything the step functions need (config, gap
//! source, clock), so a host only ever calls `tick`, `flap` and `reset`.
//! The session is passive: the host's frame loop drives it.

use std::collections::VecDeque;

use rand_pcg::Pcg32;

use super::gaps::{GapSource, RngGapSource};
use super::state::{GamePhase, GameState, Obstacle, Player};
use super::tick::{self, TickResult};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::platform::{Clock, SystemClock};

#[derive(Debug, Clone)]
pub struct Simulation<G = RngGapSource<Pcg32>, C = SystemClock> {
    config: SimConfig,
    state: GameState,
    gaps: G,
    clock: C,
}

impl Simulation {
    /// Session with seeded gap placement and the host clock
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_sources(config, RngGapSource::seeded(seed), SystemClock::new())
    }
}

impl<G: GapSource, C: Clock> Simulation<G, C> {
    /// Session with an explicit gap source and clock
    pub fn with_sources(config: SimConfig, gaps: G, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config);
        log::debug!(
            "New {} session on a {}x{} playfield",
            config.variant.as_str(),
            config.width,
            config.height
        );
        Ok(Self {
            config,
            state,
            gaps,
            clock,
        })
    }

    /// Advance one frame
    pub fn tick(&mut self) -> TickResult {
        let now = self.clock.now_ms();
        tick::tick(&mut self.state, &self.config, &mut self.gaps, now)
    }

    /// Player input (one call per key-down or touch-start edge)
    pub fn flap(&mut self) {
        let now = self.clock.now_ms();
        tick::flap(&mut self.state, &self.config, now);
    }

    /// Abandon the current run and start fresh
    pub fn reset(&mut self) {
        log::debug!("Reset at frame {} with score {}", self.state.frame, self.state.score);
        tick::reset(&mut self.state, &self.config);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn obstacles(&self) -> &VecDeque<Obstacle> {
        &self.state.obstacles
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn frame(&self) -> u64 {
        self.state.frame
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether obstacle collisions are suppressed right now
    pub fn is_immune(&self) -> bool {
        self.state.is_immune(self.clock.now_ms())
    }
}
