//! Data-driven game balance
//!
//! Every gameplay constant in one serde struct so a build can ship a JSON
//! override without touching code. Missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub flap_velocity: f32,

    pub target_fps: u32,
    pub max_step_ms: f32,
    pub min_step_scale: f32,

    pub player_left: f32,
    pub player_width: f32,
    pub player_start_y: f32,

    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub min_pipe_height: f32,
    pub pipe_speed: f32,
    pub pipe_interval_ms: f64,
    pub max_pipes: usize,

    pub cloud_initial_interval_ms: f64,
    pub cloud_min_interval_ms: f64,
    pub cloud_max_interval_ms: f64,
    pub cloud_max_age_ms: f64,
    pub cloud_drift_max_frame_ms: f32,

    pub max_puffs: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,

            target_fps: TARGET_FPS,
            max_step_ms: MAX_STEP_MS,
            min_step_scale: MIN_STEP_SCALE,

            player_left: PLAYER_LEFT,
            player_width: PLAYER_WIDTH,
            player_start_y: PLAYER_START_Y,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            min_pipe_height: MIN_PIPE_HEIGHT,
            pipe_speed: PIPE_SPEED,
            pipe_interval_ms: PIPE_INTERVAL_MS,
            max_pipes: MAX_PIPES,

            cloud_initial_interval_ms: CLOUD_INITIAL_INTERVAL_MS,
            cloud_min_interval_ms: CLOUD_MIN_INTERVAL_MS,
            cloud_max_interval_ms: CLOUD_MAX_INTERVAL_MS,
            cloud_max_age_ms: CLOUD_MAX_AGE_MS,
            cloud_drift_max_frame_ms: CLOUD_DRIFT_MAX_FRAME_MS,

            max_puffs: MAX_PUFFS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Largest top-pipe height that still leaves room for the gap and a
    /// minimum-height bottom pipe
    pub fn max_top_height(&self, world_height: f32) -> f32 {
        (world_height - self.pipe_gap - self.min_pipe_height).max(self.min_pipe_height)
    }

    /// Whether a pipe pair with both halves at the minimum height fits
    pub fn obstacle_fits(&self, world_height: f32) -> bool {
        world_height >= self.pipe_gap + 2.0 * self.min_pipe_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "max_pipes": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.max_pipes, 3);
        assert_eq!(tuning.flap_velocity, FLAP_VELOCITY);
        assert_eq!(tuning.pipe_interval_ms, PIPE_INTERVAL_MS);
    }

    #[test]
    fn test_max_top_height() {
        let tuning = Tuning::default();
        assert_eq!(tuning.max_top_height(600.0), 400.0);
        // Degenerate world never produces an inverted range
        assert_eq!(tuning.max_top_height(100.0), tuning.min_pipe_height);
    }
}
