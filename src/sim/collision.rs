//! Collision detection
//!
//! Axis-aligned tests between the frog's box and the pipe pairs, plus the
//! world boundary. The boundary is deliberately asymmetric: the ceiling stops
//! the frog, the floor ends the run.

use super::state::{Obstacle, Player};
use crate::WorldSize;

/// Result of checking the frog against the world edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOutcome {
    /// Inside the world
    Clear,
    /// Poked above the top; clamped to 0 and stopped
    Ceiling,
    /// Dropped below the bottom; fatal
    FellOut,
}

/// Does the frog's box overlap this pipe pair's solid parts?
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    let overlaps_x = player.right() > obstacle.x && player.left < obstacle.right();
    if !overlaps_x {
        return false;
    }
    player.y < obstacle.top_height || player.bottom() > obstacle.gap_bottom()
}

/// Returns the first live pipe the frog is touching
pub fn first_obstacle_hit<'a>(
    player: &Player,
    obstacles: &'a [Obstacle],
    world: WorldSize,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .filter(|o| o.x <= world.width && o.right() >= 0.0)
        .find(|o| player_hits_obstacle(player, o))
}

/// Apply the world boundary to the frog after integration.
///
/// Above the top the frog is clamped to 0 with zero velocity. Below
/// `height - player.height` it is parked on the edge and the run is over.
pub fn resolve_boundary(player: &mut Player, world: WorldSize) -> BoundaryOutcome {
    if player.y < 0.0 {
        player.y = 0.0;
        player.vel = 0.0;
        return BoundaryOutcome::Ceiling;
    }
    let floor = world.height - player.height;
    if player.y > floor {
        player.y = floor;
        return BoundaryOutcome::FellOut;
    }
    BoundaryOutcome::Clear
}
