//! Platform abstraction layer
//!
//! Host-facing pieces that are not simulation:
//! - `FrameLoop` / `LoopToken`: cancellable self re-arming frame loop
//! - Input: mapping the single "activate" trigger onto Start or Flap, and
//!   collapsing a tap's compatibility mouse event into the touch it follows
//! - `autopilot`: demo player for headless runs

pub mod autopilot;

use std::cell::Cell;
use std::rc::Rc;

use crate::sim::GamePhase;

/// Liveness flag for one armed loop. The host checks `is_live` before
/// re-arming its next callback.
#[derive(Debug, Clone)]
pub struct LoopToken {
    live: Rc<Cell<bool>>,
    generation: u64,
}

impl LoopToken {
    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Which arming this token belongs to (1 for the first)
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the current loop's token; at most one is live at a time
#[derive(Debug, Default)]
pub struct FrameLoop {
    current: Option<Rc<Cell<bool>>>,
    generation: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any previous loop and hand out a fresh token
    pub fn arm(&mut self) -> LoopToken {
        self.stop();
        let live = Rc::new(Cell::new(true));
        self.current = Some(live.clone());
        self.generation += 1;
        log::debug!("Frame loop armed (generation {})", self.generation);
        LoopToken {
            live,
            generation: self.generation,
        }
    }

    /// Invalidate the current token. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(live) = self.current.take() {
            if live.replace(false) {
                log::debug!("Frame loop stopped (generation {})", self.generation);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.as_ref().is_some_and(|live| live.get())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What an activate trigger means right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Flap,
}

impl Action {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Idle | GamePhase::GameOver => Action::Start,
            GamePhase::Running => Action::Flap,
        }
    }
}

/// Keys that count as the activate trigger
pub fn is_activate_key(key: &str) -> bool {
    matches!(key, " " | "Spacebar" | "Enter" | "ArrowUp")
}

/// Where an activate trigger came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Key,
    Touch,
    Mouse,
}

/// How long after a touch a mouse trigger is treated as its echo
pub const TOUCH_ECHO_MS: f64 = 800.0;

/// Lets exactly one activate through per physical tap
#[derive(Debug, Default, Clone)]
pub struct TriggerFilter {
    last_touch_ms: Option<f64>,
}

impl TriggerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Should the trigger from `source` at `now_ms` reach the game?
    pub fn accept(&mut self, source: TriggerSource, now_ms: f64) -> bool {
        match source {
            TriggerSource::Key => true,
            TriggerSource::Touch => {
                self.last_touch_ms = Some(now_ms);
                true
            }
            TriggerSource::Mouse => match self.last_touch_ms {
                Some(last) if now_ms >= last && now_ms - last < TOUCH_ECHO_MS => {
                    log::debug!("Dropping mouse echo of touch");
                    false
                }
                _ => true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_cancels_previous() {
        let mut frame_loop = FrameLoop::new();
        let first = frame_loop.arm();
        let second = frame_loop.arm();
        assert!(!first.is_live());
        assert!(second.is_live());
        assert_eq!(second.generation(), 2);
        assert!(frame_loop.is_running());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut frame_loop = FrameLoop::new();
        let token = frame_loop.arm();
        frame_loop.stop();
        frame_loop.stop();
        assert!(!token.is_live());
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn test_activate_mapping() {
        assert_eq!(Action::for_phase(GamePhase::Idle), Action::Start);
        assert_eq!(Action::for_phase(GamePhase::Running), Action::Flap);
        assert_eq!(Action::for_phase(GamePhase::GameOver), Action::Start);
        assert!(is_activate_key(" "));
        assert!(!is_activate_key("Escape"));
    }

    #[test]
    fn test_tap_echo_counts_once() {
        let mut filter = TriggerFilter::new();
        assert!(filter.accept(TriggerSource::Touch, 1000.0));
        // Compatibility mousedown right after the tap
        assert!(!filter.accept(TriggerSource::Mouse, 1030.0));
        // A real click later still works
        assert!(filter.accept(TriggerSource::Mouse, 1000.0 + TOUCH_ECHO_MS));
        assert!(filter.accept(TriggerSource::Key, 1031.0));
    }

    #[test]
    fn test_mouse_without_touch_passes() {
        let mut filter = TriggerFilter::new();
        assert!(filter.accept(TriggerSource::Mouse, 0.0));
        assert!(filter.accept(TriggerSource::Mouse, 10.0));
    }
}
