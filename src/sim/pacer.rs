//! Frame pacing
//!
//! Turns the host's per-refresh timestamps into bounded simulation steps:
//! the first callback only records time, callbacks arriving faster than half
//! a frame are deferred, stalls are clamped, and gravity gets a scale factor
//! with a floor so throttled hosts never run the frog in slow motion.

use serde::{Deserialize, Serialize};

use crate::consts::{FPS_WINDOW_MS, REFERENCE_FRAME_MS, TARGET_FPS};
use crate::tuning::Tuning;

/// One accepted simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Raw time since the previous accepted step
    pub elapsed_ms: f32,
    /// `elapsed_ms` clamped to the maximum step
    pub step_ms: f32,
    /// Multiplier applied to the gravity term
    pub scale: f32,
}

/// Gravity scale for a clamped step: the ratio to a 60 Hz frame, floored
#[inline]
pub fn step_scale(step_ms: f32, min_scale: f32) -> f32 {
    (step_ms / REFERENCE_FRAME_MS).max(min_scale)
}

/// Observational frame statistics for the FPS overlay.
///
/// Updated on every host callback, throttled or not. Nothing in the
/// simulation reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Frames per second over the last complete window
    pub fps: u32,
    /// Raw duration between the last two callbacks
    pub last_frame_ms: f32,
    /// Clamped duration of the last accepted step
    pub last_step_ms: f32,
    pub target_fps: u32,
    pub obstacle_count: usize,
    /// Callbacks that were deferred by the throttle this run
    pub throttled_frames: u64,
    /// Steps applied this run
    pub steps: u64,
    window_frames: u32,
    window_start: Option<f64>,
}

impl Diagnostics {
    fn observe_callback(&mut self, timestamp: f64) {
        self.window_frames += 1;
        let start = *self.window_start.get_or_insert(timestamp);
        let span = timestamp - start;
        if span >= FPS_WINDOW_MS {
            self.fps = (self.window_frames as f64 * 1000.0 / span).round() as u32;
            self.window_frames = 0;
            self.window_start = Some(timestamp);
        }
    }

    /// Overlay line, e.g. `FPS: 60 T:60 | 17ms | P:3`
    pub fn summary(&self) -> String {
        format!(
            "FPS: {} T:{} | {}ms | P:{}",
            self.fps,
            self.target_fps,
            self.last_frame_ms.round() as i64,
            self.obstacle_count
        )
    }
}

/// Converts host timestamps into clamped simulation steps
#[derive(Debug, Clone)]
pub struct FramePacer {
    target_fps: u32,
    max_step_ms: f32,
    min_step_scale: f32,
    last_timestamp: Option<f64>,
    diagnostics: Diagnostics,
}

impl FramePacer {
    pub fn new(tuning: &Tuning) -> Self {
        let target_fps = if tuning.target_fps == 0 {
            TARGET_FPS
        } else {
            tuning.target_fps
        };
        Self {
            target_fps,
            max_step_ms: tuning.max_step_ms,
            min_step_scale: tuning.min_step_scale,
            last_timestamp: None,
            diagnostics: Diagnostics {
                target_fps,
                ..Default::default()
            },
        }
    }

    /// Nominal frame period for the target rate (16.67ms at 60 Hz)
    pub fn frame_period_ms(&self) -> f32 {
        REFERENCE_FRAME_MS * (TARGET_FPS as f32 / self.target_fps as f32)
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        if fps > 0 {
            self.target_fps = fps;
            self.diagnostics.target_fps = fps;
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Forget the previous timestamp and all counters (run start)
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.diagnostics = Diagnostics {
            target_fps: self.target_fps,
            ..Default::default()
        };
    }

    /// Feed one host callback. Returns the step to simulate, or `None` when
    /// this callback should only re-arm the loop.
    pub fn advance(&mut self, timestamp: f64) -> Option<Step> {
        self.diagnostics.observe_callback(timestamp);

        let Some(last) = self.last_timestamp else {
            self.last_timestamp = Some(timestamp);
            return None;
        };

        if timestamp < last {
            // Host clock went backwards; rebase instead of stalling forever
            self.last_timestamp = Some(timestamp);
            return None;
        }

        let elapsed = (timestamp - last) as f32;
        self.diagnostics.last_frame_ms = elapsed;

        if elapsed < self.frame_period_ms() * 0.5 {
            self.diagnostics.throttled_frames += 1;
            return None;
        }

        let step_ms = elapsed.min(self.max_step_ms);
        self.last_timestamp = Some(timestamp);
        self.diagnostics.last_step_ms = step_ms;
        self.diagnostics.steps += 1;

        Some(Step {
            elapsed_ms: elapsed,
            step_ms,
            scale: step_scale(step_ms, self.min_step_scale),
        })
    }
}
