//! Gap placement for newly spawned obstacles
//!
//! Randomness is pluggable so a session can be replayed exactly: the default
//! source is a seeded PCG stream, and tests can script the sequence outright.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies the gap top offset for each new obstacle
pub trait GapSource {
    /// Next offset in `[0, max_gap_top]`
    fn next_gap_top(&mut self, max_gap_top: f32) -> f32;
}

/// Uniform gap placement from any `rand` generator
///
/// Offsets are whole units, `floor(u * max_gap_top)` with `u` in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct RngGapSource<R> {
    rng: R,
}

impl<R: Rng> RngGapSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngGapSource<Pcg32> {
    /// Seeded PCG source; the same seed yields the same gaps
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GapSource for RngGapSource<R> {
    fn next_gap_top(&mut self, max_gap_top: f32) -> f32 {
        let unit: f32 = self.rng.random();
        (unit * max_gap_top).floor().clamp(0.0, max_gap_top)
    }
}

/// Replays a fixed list of offsets, cycling when exhausted
///
/// Offsets are clamped into the valid range so a script can never place a
/// gap off screen.
#[derive(Debug, Clone)]
pub struct ScriptedGaps {
    queue: VecDeque<f32>,
}

impl ScriptedGaps {
    pub fn new(offsets: impl IntoIterator<Item = f32>) -> Self {
        Self {
            queue: offsets.into_iter().collect(),
        }
    }
}

impl GapSource for ScriptedGaps {
    fn next_gap_top(&mut self, max_gap_top: f32) -> f32 {
        match self.queue.pop_front() {
            Some(offset) => {
                self.queue.push_back(offset);
                offset.clamp(0.0, max_gap_top)
            }
            None => 0.0,
        }
    }
}
