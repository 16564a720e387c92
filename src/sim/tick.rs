//! Per-frame simulation step
//!
//! One call to [`tick`] advances exactly one rendered frame. Input arrives
//! separately through [`flap`], between frames.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::{first_obstacle_hit, hits_floor};
use super::gaps::GapSource;
use super::state::{GamePhase, GameState, Obstacle};
use crate::config::SimConfig;

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionCause {
    /// Player dropped below the floor line
    Floor,
    /// Player hit the obstacle at this queue position
    Obstacle { index: usize },
}

impl fmt::Display for CollisionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floor => write!(f, "hit the floor"),
            Self::Obstacle { index } => write!(f, "hit obstacle #{index}"),
        }
    }
}

/// Outcome of one frame, for the host to present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    /// The run ended this frame and the session has been reset
    pub collided: bool,
    /// Final score of the ended run if `collided`, otherwise the current score
    pub score: u32,
    pub cause: Option<CollisionCause>,
}

impl TickResult {
    fn alive(score: u32) -> Self {
        Self {
            collided: false,
            score,
            cause: None,
        }
    }

    fn crashed(score: u32, cause: CollisionCause) -> Self {
        Self {
            collided: true,
            score,
            cause: Some(cause),
        }
    }
}

/// Advance the game state by one frame
///
/// `now_ms` is only consulted for the post-start immunity window.
pub fn tick<G: GapSource + ?Sized>(
    state: &mut GameState,
    config: &SimConfig,
    gaps: &mut G,
    now_ms: f64,
) -> TickResult {
    // Start screen: hold still until the first flap
    if !state.is_running() {
        return TickResult::alive(state.score);
    }

    state.frame += 1;
    if state.frame % config.spawn_interval == 0 {
        spawn_obstacle(state, config, gaps);
    }

    state.player.integrate(config.gravity);
    if hits_floor(&state.player, config) {
        return game_over(state, config, CollisionCause::Floor);
    }

    for obstacle in &mut state.obstacles {
        obstacle.x -= config.scroll_speed;
    }
    despawn_passed(state, config);

    if !state.is_immune(now_ms) {
        if let Some(index) = first_obstacle_hit(&state.player, &state.obstacles, config) {
            return game_over(state, config, CollisionCause::Obstacle { index });
        }
    }

    TickResult::alive(state.score)
}

/// Player input: start the run if waiting, then set the upward velocity
///
/// The impulse replaces the current velocity rather than adding to it.
pub fn flap(state: &mut GameState, config: &SimConfig, now_ms: f64) {
    if state.phase == GamePhase::AwaitingStart {
        state.phase = GamePhase::Running;
        state.immune_until_ms = Some(now_ms + config.immunity_ms);
        log::info!("Run started (immune for {} ms)", config.immunity_ms);
    }
    state.player.vel = config.jump_impulse;
}

/// Back to a fresh run: centered, still, no obstacles, zero score
pub fn reset(state: &mut GameState, config: &SimConfig) {
    *state = GameState::new(config);
}

/// Append a new obstacle at the right edge of the playfield
pub fn spawn_obstacle<G: GapSource + ?Sized>(
    state: &mut GameState,
    config: &SimConfig,
    gaps: &mut G,
) {
    let gap_top = gaps.next_gap_top(config.max_gap_top());
    state.obstacles.push_back(Obstacle {
        x: config.width,
        gap_top,
    });
    log::debug!(
        "Frame {}: spawned obstacle with gap at {} ({} live)",
        state.frame,
        gap_top,
        state.obstacles.len()
    );
}

/// Drop obstacles that have fully left the playfield, one point each
///
/// Obstacles expire in spawn order, so only the front of the queue is checked.
fn despawn_passed(state: &mut GameState, config: &SimConfig) {
    while state
        .obstacles
        .front()
        .is_some_and(|o| o.is_offscreen(config.obstacle_width))
    {
        state.obstacles.pop_front();
        state.score += 1;
        log::debug!("Frame {}: obstacle passed, score {}", state.frame, state.score);
    }
}

fn game_over(state: &mut GameState, config: &SimConfig, cause: CollisionCause) -> TickResult {
    let score = state.score;
    log::info!(
        "Game over after {} frames: {}, score {}",
        state.frame,
        cause,
        score
    );
    reset(state, config);
    TickResult::crashed(score, cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::sim::gaps::{RngGapSource, ScriptedGaps};
    use crate::sim::state::Player;
    use proptest::prelude::*;

    fn classic() -> SimConfig {
        SimConfig::for_variant(Variant::Classic)
    }

    /// Gravity low enough that the player drifts only a few units over a
    /// thousand frames
    fn hovering() -> SimConfig {
        SimConfig {
            gravity: 0.0001,
            ..classic()
        }
    }

    #[test]
    fn test_two_frames_of_free_fall() {
        let config = classic();
        let mut state = GameState::new(&config);
        let mut gaps = ScriptedGaps::new([0.0]);

        tick(&mut state, &config, &mut gaps, 0.0);
        assert_eq!(state.player, Player { y: 300.5, vel: 0.5 });

        tick(&mut state, &config, &mut gaps, 0.0);
        assert_eq!(state.player, Player { y: 301.5, vel: 1.0 });
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let config = classic();
        let mut state = GameState::new(&config);

        for vel in [-25.0, -10.0, 0.0, 3.5, 40.0] {
            state.player.vel = vel;
            flap(&mut state, &config, 0.0);
            assert_eq!(state.player.vel, config.jump_impulse);
        }
    }

    #[test]
    fn test_awaiting_start_holds_still() {
        let config = SimConfig::for_variant(Variant::StartScreen);
        let mut state = GameState::new(&config);
        let mut gaps = ScriptedGaps::new([0.0]);

        for _ in 0..500 {
            let result = tick(&mut state, &config, &mut gaps, 0.0);
            assert!(!result.collided);
        }
        assert_eq!(state, GameState::new(&config));
    }

    #[test]
    fn test_first_flap_starts_run_with_immunity() {
        let config = SimConfig::for_variant(Variant::StartScreen);
        let mut state = GameState::new(&config);

        flap(&mut state, &config, 1_000.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.immune_until_ms, Some(1_500.0));
        assert_eq!(state.player.vel, -10.0);

        // Later flaps do not extend the window
        flap(&mut state, &config, 1_200.0);
        assert_eq!(state.immune_until_ms, Some(1_500.0));
    }

    #[test]
    fn test_classic_flap_grants_no_immunity() {
        let config = classic();
        let mut state = GameState::new(&config);
        flap(&mut state, &config, 1_000.0);
        assert_eq!(state.immune_until_ms, None);
    }

    #[test]
    fn test_spawns_on_interval_with_scripted_gaps() {
        let config = hovering();
        let mut state = GameState::new(&config);
        let mut gaps = ScriptedGaps::new([235.0, 230.0, 240.0]);

        for _ in 0..99 {
            tick(&mut state, &config, &mut gaps, 0.0);
        }
        assert!(state.obstacles.is_empty());

        tick(&mut state, &config, &mut gaps, 0.0);
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at the right edge, then scrolled with the rest this frame
        assert_eq!(state.obstacles[0].x, 397.0);

        for _ in 0..200 {
            tick(&mut state, &config, &mut gaps, 0.0);
        }
        let tops: Vec<f32> = state.obstacles.iter().map(|o| o.gap_top).collect();
        // First obstacle has already expired by frame 300
        assert_eq!(tops, vec![230.0, 240.0]);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_score_counts_each_expired_obstacle_once() {
        let config = hovering();
        let mut state = GameState::new(&config);
        // Gap [235, 385] keeps the drifting player clear the whole way
        let mut gaps = ScriptedGaps::new([235.0]);

        for _ in 0..1_000 {
            let result = tick(&mut state, &config, &mut gaps, 0.0);
            assert!(!result.collided, "unexpected crash at frame {}", state.frame);
            // Spawned at frame 100k, gone 150 frames later
            let expected = (state.frame.saturating_sub(150) / 100) as u32;
            assert_eq!(state.score, expected, "frame {}", state.frame);
            assert_eq!(result.score, expected);
        }
        assert_eq!(state.score, 8);
    }

    #[test]
    fn test_several_obstacles_expire_in_one_frame() {
        let config = classic();
        let mut state = GameState::new(&config);
        for x in [-60.0, -55.0, -51.5, 200.0] {
            state.obstacles.push_back(Obstacle { x, gap_top: 235.0 });
        }
        let mut gaps = ScriptedGaps::new([0.0]);

        tick(&mut state, &config, &mut gaps, 0.0);
        assert_eq!(state.score, 3);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 197.0);
    }

    #[test]
    fn test_floor_crash_resets() {
        let config = classic();
        let mut state = GameState::new(&config);
        let mut gaps = ScriptedGaps::new([0.0]);
        state.score = 4;

        for _ in 0..32 {
            assert!(!tick(&mut state, &config, &mut gaps, 0.0).collided);
        }
        // 300 + 0.25 * 33 * 34 = 580.5, bottom edge below 600
        let result = tick(&mut state, &config, &mut gaps, 0.0);
        assert_eq!(
            result,
            TickResult {
                collided: true,
                score: 4,
                cause: Some(CollisionCause::Floor),
            }
        );
        assert_eq!(state, GameState::new(&config));
    }

    #[test]
    fn test_floor_crash_returns_to_start_screen() {
        let config = SimConfig::for_variant(Variant::StartScreen);
        let mut state = GameState::new(&config);
        let mut gaps = ScriptedGaps::new([0.0]);
        flap(&mut state, &config, 0.0);

        let crashed = (0..200).any(|_| tick(&mut state, &config, &mut gaps, 10_000.0).collided);
        assert!(crashed);
        assert_eq!(state.phase, GamePhase::AwaitingStart);
        assert_eq!(state.immune_until_ms, None);
    }

    #[test]
    fn test_obstacle_crash_resets() {
        let config = SimConfig {
            gravity: 0.001,
            ..classic()
        };
        let mut state = GameState::new(&config);
        // Gap [0, 150] sits well above the player
        let mut gaps = ScriptedGaps::new([0.0]);

        let mut crash = None;
        for _ in 0..300 {
            let result = tick(&mut state, &config, &mut gaps, 0.0);
            if result.collided {
                crash = Some((result, state.clone()));
                break;
            }
        }
        let (result, after) = crash.expect("player should reach the obstacle");
        assert_eq!(result.cause, Some(CollisionCause::Obstacle { index: 0 }));
        assert_eq!(result.score, 0);
        assert_eq!(after, GameState::new(&config));
    }

    #[test]
    fn test_immunity_window_suppresses_obstacle_hits_only() {
        let config = SimConfig::for_variant(Variant::StartScreen);
        let mut state = GameState::new(&config);
        let mut gaps = ScriptedGaps::new([0.0]);
        // Overlapping the player's column, gap far above
        state.obstacles.push_back(Obstacle {
            x: 40.0,
            gap_top: 0.0,
        });

        flap(&mut state, &config, 1_000.0);
        let result = tick(&mut state, &config, &mut gaps, 1_499.0);
        assert!(!result.collided);
        assert_eq!(state.obstacles.len(), 1);

        let result = tick(&mut state, &config, &mut gaps, 1_500.0);
        assert_eq!(result.cause, Some(CollisionCause::Obstacle { index: 0 }));
    }

    #[test]
    fn test_immunity_does_not_cover_floor() {
        let config = SimConfig::for_variant(Variant::StartScreen);
        let mut state = GameState::new(&config);
        let mut gaps = ScriptedGaps::new([0.0]);
        flap(&mut state, &config, 0.0);
        state.player.y = 590.0;
        state.player.vel = 0.0;

        let result = tick(&mut state, &config, &mut gaps, 1.0);
        assert!(state.immune_until_ms.is_none());
        assert_eq!(result.cause, Some(CollisionCause::Floor));
    }

    #[test]
    fn test_reset_twice_equals_once() {
        let config = classic();
        let mut state = GameState::new(&config);
        let mut gaps = RngGapSource::seeded(7);
        for i in 0..150 {
            if i % 12 == 0 {
                flap(&mut state, &config, 0.0);
            }
            tick(&mut state, &config, &mut gaps, 0.0);
        }

        reset(&mut state, &config);
        let once = state.clone();
        reset(&mut state, &config);
        assert_eq!(state, once);
        assert_eq!(once.player, Player { y: 300.0, vel: 0.0 });
        assert!(once.obstacles.is_empty());
        assert_eq!((once.score, once.frame), (0, 0));
    }

    proptest! {
        #[test]
        fn prop_velocity_grows_by_gravity(
            start_vel in -20.0f32..0.0,
            gravity in 0.01f32..1.0,
            frames in 1usize..20,
        ) {
            // Tall playfield so the floor never interrupts the fall
            let config = SimConfig {
                height: 1.0e6,
                gravity,
                ..classic()
            };
            let mut state = GameState::new(&config);
            state.player.vel = start_vel;
            let mut gaps = ScriptedGaps::new([0.0]);

            let mut prev = state.player.vel;
            for n in 1..=frames {
                let result = tick(&mut state, &config, &mut gaps, 0.0);
                prop_assert!(!result.collided);
                prop_assert!(state.player.vel > prev);
                let expected = start_vel + n as f32 * gravity;
                prop_assert!((state.player.vel - expected).abs() < 1e-3);
                prev = state.player.vel;
            }
        }

        #[test]
        fn prop_spawned_gaps_stay_on_screen(seed in any::<u64>()) {
            let config = SimConfig {
                height: 1.0e6,
                ..hovering()
            };
            let mut state = GameState::new(&config);
            let mut gaps = RngGapSource::seeded(seed);
            for _ in 0..8 {
                spawn_obstacle(&mut state, &config, &mut gaps);
            }
            for o in &state.obstacles {
                prop_assert!(o.gap_top >= 0.0);
                prop_assert!(o.gap_top <= config.max_gap_top());
            }
        }

        #[test]
        fn prop_reset_is_idempotent(seed in any::<u64>(), frames in 0usize..400, flap_every in 1usize..40) {
            let config = classic();
            let mut state = GameState::new(&config);
            let mut gaps = RngGapSource::seeded(seed);
            for i in 0..frames {
                if i % flap_every == 0 {
                    flap(&mut state, &config, 0.0);
                }
                tick(&mut state, &config, &mut gaps, 0.0);
            }
            reset(&mut state, &config);
            let once = state.clone();
            reset(&mut state, &config);
            prop_assert_eq!(&state, &once);
            prop_assert_eq!(once, GameState::new(&config));
        }
    }
}
