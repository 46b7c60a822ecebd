//! Frame-paced simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform
//! concerns:
//! - Driven only by host timestamps passed into `tick`
//! - Seeded RNG only
//! - Entity collections mutated only by the single tick
//! - No rendering, storage or audio dependencies (those react to `GameEvent`s)

pub mod collision;
pub mod pacer;
pub mod physics;
pub mod scoring;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{BoundaryOutcome, first_obstacle_hit, player_hits_obstacle, resolve_boundary};
pub use pacer::{Diagnostics, FramePacer, Step, step_scale};
pub use session::GameSession;
pub use state::{
    Cloud, CloudSize, CrashCause, EntityId, FlapVariant, GameEvent, GamePhase, Obstacle, Player,
    Puff, RunState,
};
pub use tick::{TickOutcome, tick};
