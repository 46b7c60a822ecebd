//! Demo player
//!
//! Flaps whenever the frog has sunk below the centre of the next gap and is
//! no longer rising. Good enough to clear a few pipes, not to play forever.

use crate::sim::{GamePhase, GameSession, Obstacle};

/// Slack below the gap centre before flapping
const FLAP_MARGIN: f32 = 12.0;

/// The first pipe whose right edge is still ahead of the frog
pub fn next_obstacle(session: &GameSession) -> Option<&Obstacle> {
    session
        .obstacles
        .iter()
        .filter(|o| o.right() >= session.player.left)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
}

/// Whether the demo player wants to flap this frame
pub fn should_flap(session: &GameSession) -> bool {
    if session.phase != GamePhase::Running {
        return false;
    }
    let player = &session.player;
    let target = next_obstacle(session)
        .map(|o| o.gap_center())
        .unwrap_or(session.world.height / 2.0);
    let centre = player.y + player.height / 2.0;
    centre > target + FLAP_MARGIN && player.vel >= 0.0
}
