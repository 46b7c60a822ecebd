//! Farty Frog - A side-scrolling flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Frame-paced simulation (physics, spawning, collisions, game state)
//! - `game`: Coordinator wiring the simulation to display, storage and effects
//! - `renderer`: Display layer abstraction and scene mirroring
//! - `platform`: Frame loop cancellation, input mapping, demo autopilot
//! - `persistence`: Key-value storage backends
//! - `effects`: Best-effort audio/visual feedback
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod effects;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use effects::{Effects, Feedback, FlapVariant};
pub use game::{Game, GameError};
pub use settings::Settings;
pub use tuning::Tuning;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Reference frame duration the physics constants were tuned against (60 Hz)
    pub const REFERENCE_FRAME_MS: f32 = 16.67;
    /// Default target frame rate for the pacer throttle
    pub const TARGET_FPS: u32 = 60;
    /// Largest time-step a single frame may integrate
    pub const MAX_STEP_MS: f32 = 50.0;
    /// Floor on the gravity step scale
    pub const MIN_STEP_SCALE: f32 = 0.7;
    /// Length of the rolling FPS window
    pub const FPS_WINDOW_MS: f64 = 1000.0;

    /// Downward acceleration per reference frame
    pub const GRAVITY: f32 = 0.7;
    /// Velocity set (not added) by a flap
    pub const FLAP_VELOCITY: f32 = -9.5;

    /// Player bounding box
    pub const PLAYER_LEFT: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    /// Used when the display cannot report the player's height
    pub const DEFAULT_PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_Y: f32 = 200.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_GAP: f32 = 150.0;
    pub const MIN_PIPE_HEIGHT: f32 = 50.0;
    /// Horizontal scroll per step (not time-scaled)
    pub const PIPE_SPEED: f32 = 2.5;
    pub const PIPE_INTERVAL_MS: f64 = 3000.0;
    pub const MAX_PIPES: usize = 5;

    /// Background clouds
    pub const CLOUD_INITIAL_INTERVAL_MS: f64 = 8000.0;
    pub const CLOUD_MIN_INTERVAL_MS: f64 = 6000.0;
    pub const CLOUD_MAX_INTERVAL_MS: f64 = 14000.0;
    pub const CLOUD_MAX_AGE_MS: f64 = 120_000.0;
    pub const CLOUD_START_X: f32 = -150.0;
    /// Clouds retire once this far past the right edge
    pub const CLOUD_EXIT_MARGIN: f32 = 150.0;
    /// Cloud drift is skipped when the last frame took longer than this
    pub const CLOUD_DRIFT_MAX_FRAME_MS: f32 = 60.0;

    /// Flap puffs
    pub const MAX_PUFFS: usize = 3;
    pub const PUFF_OFFSET_X: f32 = 40.0;
    pub const PUFF_OFFSET_Y: f32 = 15.0;
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl WorldSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal midpoint, the scoring line
    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.width / 2.0
    }
}

impl Default for WorldSize {
    fn default() -> Self {
        Self::new(400.0, 600.0)
    }
}
