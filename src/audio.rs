//! Audio system using Web Audio API
//!
//! Every cue is a short procedurally generated tone - no external files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::state::SoundCue;

/// Peak gain of a cue before the fade
const CUE_GAIN: f32 = 0.1;
/// Fade-out length in seconds
const CUE_LENGTH: f64 = 0.1;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted: false }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a sound cue. Silently does nothing when muted or unavailable.
    pub fn play(&self, cue: SoundCue) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        self.play_tone(ctx, cue_frequency(cue));
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    fn play_tone(&self, ctx: &AudioContext, freq: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(CUE_GAIN, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + CUE_LENGTH)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + CUE_LENGTH).ok();
    }
}

/// Tone pitch in Hz for each cue
pub fn cue_frequency(cue: SoundCue) -> f32 {
    match cue {
        SoundCue::Jump => 440.0,
        SoundCue::Hit => 150.0,
        SoundCue::Collect => 800.0,
        SoundCue::PowerUp => 660.0,
        SoundCue::Shield => 500.0,
        SoundCue::Achievement => 880.0,
    }
}
