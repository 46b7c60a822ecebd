//! Web Audio effect sink
//!
//! Procedurally generated sounds - no external files needed! Each flap
//! variant is a short oscillator stack with a pitch sweep; the collision is a
//! low thud. The context only starts after a user gesture, so playback before
//! that reports `NotAllowed`.

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use crate::effects::{Cue, EffectError, EffectSink};
use crate::sim::FlapVariant;

pub struct WebAudioSink {
    ctx: Option<AudioContext>,
}

impl Default for WebAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioSink {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// One voice: frequency sweep `from -> to` with an exponential fade
    fn voice(
        ctx: &AudioContext,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        level: f32,
        duration: f64,
    ) -> Result<(), EffectError> {
        let (osc, gain) = Self::create_osc(ctx, from, osc_type)
            .ok_or_else(|| EffectError::Unavailable("oscillator graph".into()))?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.05).ok();
        Ok(())
    }

    fn play_flap(ctx: &AudioContext, variant: FlapVariant, vol: f32) -> Result<(), EffectError> {
        match variant {
            // Short with wet bubble texture
            FlapVariant::ShortWet => {
                Self::voice(ctx, OscillatorType::Sawtooth, 110.0, 60.0, vol * 0.5, 0.35)?;
                Self::voice(ctx, OscillatorType::Square, 240.0, 140.0, vol * 0.15, 0.2)
            }
            // Long with vibrato-ish layering
            FlapVariant::LongRippling => {
                Self::voice(ctx, OscillatorType::Sawtooth, 95.0, 70.0, vol * 0.45, 0.9)?;
                Self::voice(ctx, OscillatorType::Triangle, 100.0, 75.0, vol * 0.3, 0.9)
            }
            // High pitched squeak
            FlapVariant::Squeaky => {
                Self::voice(ctx, OscillatorType::Square, 500.0, 900.0, vol * 0.2, 0.35)
            }
            // Loud burst then decay
            FlapVariant::Explosive => {
                Self::voice(ctx, OscillatorType::Sawtooth, 180.0, 40.0, vol * 0.7, 0.45)?;
                Self::voice(ctx, OscillatorType::Square, 90.0, 30.0, vol * 0.3, 0.5)
            }
            // Low rumble
            FlapVariant::DeepRumble => {
                Self::voice(ctx, OscillatorType::Sine, 70.0, 40.0, vol * 0.6, 0.8)?;
                Self::voice(ctx, OscillatorType::Sawtooth, 55.0, 35.0, vol * 0.25, 0.7)
            }
        }
    }

    /// Collision - solid thump
    fn play_hit(ctx: &AudioContext, vol: f32) -> Result<(), EffectError> {
        Self::voice(ctx, OscillatorType::Sine, 150.0, 60.0, vol * 0.6, 0.15)?;
        Self::voice(ctx, OscillatorType::Triangle, 300.0, 80.0, vol * 0.25, 0.1)
    }
}

impl EffectSink for WebAudioSink {
    fn play(&mut self, cue: Cue, volume: f32) -> Result<(), EffectError> {
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| EffectError::Unavailable("no AudioContext".into()))?;

        if ctx.state() == AudioContextState::Suspended {
            // Browsers require a gesture; ask again and skip this cue
            let _ = ctx.resume();
            return Err(EffectError::NotAllowed);
        }

        match cue {
            Cue::Flap(variant) => Self::play_flap(ctx, variant, volume),
            Cue::Collision => Self::play_hit(ctx, volume),
        }
    }

    fn unlock(&mut self) {
        if self.ctx.is_none() {
            self.ctx = AudioContext::new().ok();
        }
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn name(&self) -> &'static str {
        "web-audio"
    }
}
