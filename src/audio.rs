//! Collision chimes
//!
//! A collider's radius picks a key on a piano-style keyboard (small
//! circles ring high, large ones low); the key picks a frequency. The
//! simulation only asks for tones; sinks decide how to play them.

use serde::{Deserialize, Serialize};

use crate::settings::{ChimeSettings, Settings};

/// A fire-and-forget tone request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    /// 0.0 - 1.0
    pub gain: f32,
}

/// Anything that can play a tone
pub trait AudioSink {
    fn play_tone(&mut self, tone: Tone);
}

/// Key number for a collider radius: `num_keys * (1 - radius/max_radius) + initial_key`
pub fn key_for_radius(radius: f32, chime: &ChimeSettings) -> f32 {
    let ratio = if chime.max_radius > 0.0 {
        (radius / chime.max_radius).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let key = chime.num_keys * (1.0 - ratio) + chime.initial_key;
    if chime.quantize { key.floor() } else { key }
}

/// Equal-tempered frequency of a key, key 49 = A4 = 440 Hz
#[inline]
pub fn key_frequency(key: f32) -> f32 {
    440.0 * 2f32.powf((key - 49.0) / 12.0)
}

/// Tone for a collider of the given radius
pub fn tone_for_radius(radius: f32, settings: &Settings) -> Tone {
    Tone {
        frequency: key_frequency(key_for_radius(radius, &settings.chime)),
        duration: settings.chime.duration,
        gain: settings.effective_gain(),
    }
}

/// Drops every tone
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl AudioSink for Silence {
    fn play_tone(&mut self, _tone: Tone) {}
}

/// Records tones in order
#[derive(Debug, Default, Clone)]
pub struct ToneLog {
    pub tones: Vec<Tone>,
}

impl ToneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}

impl AudioSink for ToneLog {
    fn play_tone(&mut self, tone: Tone) {
        self.tones.push(tone);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Tone};

    /// Web Audio sink: one sine oscillator per tone
    pub struct WebAudio {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl AudioSink for WebAudio {
        fn play_tone(&mut self, tone: Tone) {
            // Muted settings arrive as zero gain
            if tone.gain <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = self.create_osc(ctx, tone.frequency) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + tone.duration as f64;

            gain.gain().set_value_at_time(tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }
}
