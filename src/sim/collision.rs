//! Collision detection
//!
//! Everything is an axis-aligned box. The player is a square at a fixed
//! column; an obstacle is two boxes sharing a horizontal band, one above
//! its gap and one below.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::config::SimConfig;

/// Axis-aligned bounding box, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// The player's box this frame
pub fn player_box(player: &Player, config: &SimConfig) -> Aabb {
    Aabb::from_pos_size(
        Vec2::new(config.player_x, player.y),
        Vec2::splat(config.player_size),
    )
}

/// The solid parts of an obstacle: `[above gap, below gap]`
///
/// The upper span extends without bound above the playfield, so flying over
/// an obstacle still counts as hitting it. The lower span likewise extends
/// past the floor.
pub fn obstacle_spans(obstacle: &Obstacle, config: &SimConfig) -> [Aabb; 2] {
    let left = obstacle.x;
    let right = obstacle.trailing_edge(config.obstacle_width);
    [
        Aabb::new(
            Vec2::new(left, f32::NEG_INFINITY),
            Vec2::new(right, obstacle.gap_top),
        ),
        Aabb::new(
            Vec2::new(left, obstacle.gap_bottom(config.gap_height)),
            Vec2::new(right, f32::INFINITY),
        ),
    ]
}

/// Whether the player box overlaps either span of an obstacle
pub fn obstacle_hit(player: &Aabb, obstacle: &Obstacle, config: &SimConfig) -> bool {
    obstacle_spans(obstacle, config)
        .iter()
        .any(|span| player.overlaps(span))
}

/// Index of the earliest-spawned obstacle the player overlaps, if any
pub fn first_obstacle_hit(
    player: &Player,
    obstacles: &VecDeque<Obstacle>,
    config: &SimConfig,
) -> Option<usize> {
    let bbox = player_box(player, config);
    obstacles
        .iter()
        .position(|obstacle| obstacle_hit(&bbox, obstacle, config))
}

/// Whether the player's bottom edge is below the floor
#[inline]
pub fn hits_floor(player: &Player, config: &SimConfig) -> bool {
    player.y + config.player_size > config.height
}
