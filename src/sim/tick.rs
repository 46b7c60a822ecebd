//! Per-frame simulation tick
//!
//! Called once per host refresh with the host's timestamp. The pacer decides
//! whether this callback becomes a step; a step integrates the frog, resolves
//! the boundary, spawns, scrolls, scores, tests collisions, then updates the
//! cosmetic entities.

use super::collision::{self, BoundaryOutcome};
use super::physics;
use super::scoring;
use super::session::GameSession;
use super::spawner;
use super::state::{CrashCause, GameEvent, GamePhase};

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing simulated
    Frozen,
    /// First callback of a run or throttled; re-arm and wait
    Deferred,
    /// A full step was applied
    Stepped,
    /// The step ended the run
    Ended(CrashCause),
}

impl TickOutcome {
    /// Should the frame loop schedule another callback?
    pub fn keep_running(&self) -> bool {
        matches!(self, TickOutcome::Deferred | TickOutcome::Stepped)
    }
}

/// Advance the session for the host callback at `timestamp` (ms)
pub fn tick(session: &mut GameSession, timestamp: f64) -> TickOutcome {
    match session.phase {
        GamePhase::Idle | GamePhase::GameOver => return TickOutcome::Frozen,
        GamePhase::Running => {}
    }

    let Some(step) = session.pacer.advance(timestamp) else {
        return TickOutcome::Deferred;
    };

    physics::integrate_player(&mut session.player, &step, session.tuning.gravity);

    match collision::resolve_boundary(&mut session.player, session.world) {
        BoundaryOutcome::FellOut => return finish(session, CrashCause::FellOut),
        BoundaryOutcome::Ceiling | BoundaryOutcome::Clear => {}
    }

    spawner::spawn_due(session, timestamp);

    let retired = physics::scroll_obstacles(&mut session.obstacles, session.tuning.pipe_speed);
    if retired > 0 {
        log::debug!("{} pipe(s) retired", retired);
    }

    let mid_x = session.world.mid_x();
    if scoring::award_passes(&mut session.obstacles, &mut session.run, mid_x) > 0 {
        let score = session.run.score;
        session.push_event(GameEvent::Scored { score });
    }

    if collision::first_obstacle_hit(&session.player, &session.obstacles, session.world).is_some() {
        return finish(session, CrashCause::Obstacle);
    }

    physics::drift_clouds(
        &mut session.clouds,
        &step,
        timestamp,
        session.world,
        &session.tuning,
    );
    physics::age_puffs(&mut session.puffs, &step);

    session.pacer.diagnostics_mut().obstacle_count = session.obstacles.len();
    TickOutcome::Stepped
}

fn finish(session: &mut GameSession, cause: CrashCause) -> TickOutcome {
    session.pacer.diagnostics_mut().obstacle_count = session.obstacles.len();
    session.end_run(cause);
    TickOutcome::Ended(cause)
}
