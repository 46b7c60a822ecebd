//! Feedback effects
//!
//! The game asks for "flap" or "collision" feedback and never learns whether
//! anything was heard. Delivery goes through a swappable [`EffectSink`]
//! (Web Audio in the browser, silence elsewhere). Failures are classified:
//! a permission that has not been granted yet is retried on the next cue,
//! anything else disables the sink until the next run re-arms it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

pub use crate::sim::FlapVariant;

/// Feedback the game core can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Flap,
    Collision,
}

/// What a sink is asked to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Flap(FlapVariant),
    Collision,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// Host has not granted playback yet (no user gesture)
    #[error("playback not allowed yet")]
    NotAllowed,
    /// Backend broken or missing
    #[error("effect backend unavailable: {0}")]
    Unavailable(String),
}

/// A delivery strategy for cues
pub trait EffectSink {
    fn play(&mut self, cue: Cue, volume: f32) -> Result<(), EffectError>;

    /// Try to (re)acquire the output, e.g. resume a suspended audio context
    fn unlock(&mut self) {}

    fn name(&self) -> &'static str;
}

/// Sink that accepts everything and plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl EffectSink for SilentSink {
    fn play(&mut self, _cue: Cue, _volume: f32) -> Result<(), EffectError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "silent"
    }
}

/// Best-effort feedback coordinator
pub struct Effects {
    sink: Box<dyn EffectSink>,
    rng: Pcg32,
    volume: f32,
    disabled: bool,
    last_variant: Option<FlapVariant>,
}

impl Effects {
    pub fn new(sink: Box<dyn EffectSink>, seed: u64) -> Self {
        log::info!("Effects using {} sink", sink.name());
        Self {
            sink,
            rng: Pcg32::seed_from_u64(seed),
            volume: 0.8,
            disabled: false,
            last_variant: None,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentSink), 0)
    }

    /// Set volume (0.0 - 1.0); 0 mutes without touching the sink
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn last_variant(&self) -> Option<FlapVariant> {
        self.last_variant
    }

    /// Fresh attempt at audio, called on every run start
    pub fn rearm(&mut self) {
        self.disabled = false;
        self.sink.unlock();
    }

    /// Pick a flap variant from the selection table
    pub fn pick_variant(&mut self) -> FlapVariant {
        FlapVariant::TABLE[self.rng.random_range(0..FlapVariant::TABLE.len())]
    }

    /// Fire feedback. Never fails; for flaps returns the variant chosen so the
    /// caller can match the visual puff.
    pub fn trigger(&mut self, feedback: Feedback) -> Option<FlapVariant> {
        let (cue, variant) = match feedback {
            Feedback::Flap => {
                let variant = self.pick_variant();
                self.last_variant = Some(variant);
                log::debug!("Flap variant: {:?}", variant);
                (Cue::Flap(variant), Some(variant))
            }
            Feedback::Collision => (Cue::Collision, None),
        };

        if self.disabled || self.volume <= 0.0 {
            return variant;
        }

        match self.sink.play(cue, self.volume) {
            Ok(()) => {}
            Err(EffectError::NotAllowed) => {
                log::debug!("{} sink not unlocked yet, skipping {:?}", self.sink.name(), cue);
            }
            Err(e) => {
                log::warn!("Disabling {} sink: {}", self.sink.name(), e);
                self.disabled = true;
            }
        }
        variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scripted sink: returns queued results, then Ok
    #[derive(Default)]
    struct Scripted {
        results: Vec<Result<(), EffectError>>,
        played: Rc<RefCell<Vec<Cue>>>,
        unlocks: Rc<RefCell<u32>>,
    }

    impl EffectSink for Scripted {
        fn play(&mut self, cue: Cue, _volume: f32) -> Result<(), EffectError> {
            self.played.borrow_mut().push(cue);
            if self.results.is_empty() {
                Ok(())
            } else {
                self.results.remove(0)
            }
        }

        fn unlock(&mut self) {
            *self.unlocks.borrow_mut() += 1;
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    #[test]
    fn test_flap_returns_variant_from_table() {
        let mut fx = Effects::silent();
        for _ in 0..50 {
            let v = fx.trigger(Feedback::Flap).unwrap();
            assert!(FlapVariant::TABLE.contains(&v));
            assert_eq!(fx.last_variant(), Some(v));
        }
        assert_eq!(fx.trigger(Feedback::Collision), None);
    }

    #[test]
    fn test_all_variants_reachable() {
        let mut fx = Effects::new(Box::new(SilentSink), 1234);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(fx.pick_variant());
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_not_allowed_stays_armed() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = Scripted {
            results: vec![Err(EffectError::NotAllowed)],
            played: played.clone(),
            ..Default::default()
        };
        let mut fx = Effects::new(Box::new(sink), 5);
        fx.trigger(Feedback::Collision);
        assert!(!fx.is_disabled());
        fx.trigger(Feedback::Collision);
        assert_eq!(played.borrow().len(), 2);
    }

    #[test]
    fn test_hard_failure_disables_until_rearm() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let unlocks = Rc::new(RefCell::new(0));
        let sink = Scripted {
            results: vec![Err(EffectError::Unavailable("no device".into()))],
            played: played.clone(),
            unlocks: unlocks.clone(),
        };
        let mut fx = Effects::new(Box::new(sink), 5);
        assert!(fx.trigger(Feedback::Flap).is_some());
        assert!(fx.is_disabled());
        // Still hands out variants while disabled, but plays nothing
        assert!(fx.trigger(Feedback::Flap).is_some());
        assert_eq!(played.borrow().len(), 1);

        fx.rearm();
        assert_eq!(*unlocks.borrow(), 1);
        fx.trigger(Feedback::Collision);
        assert_eq!(played.borrow().len(), 2);
    }

    #[test]
    fn test_muted_skips_sink() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = Scripted {
            played: played.clone(),
            ..Default::default()
        };
        let mut fx = Effects::new(Box::new(sink), 5);
        fx.set_volume(0.0);
        fx.trigger(Feedback::Collision);
        assert!(played.borrow().is_empty());
    }
}
