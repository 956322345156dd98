//! Sound cues
//!
//! Cues are short synthesized tones, no audio files. The tone data is plain
//! Rust; playback goes through the Web Audio API on wasm and silently does
//! nothing when audio is unavailable.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Stage element clicked - short descending blip
    Click,
    /// Final message revealed - ascending arpeggio
    Celebration,
}

/// One oscillator voice with an exponential fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Seconds after the cue starts
    pub offset: f64,
    pub start_freq: f32,
    /// Frequency glide target, if the pitch moves
    pub end_freq: Option<f32>,
    pub gain: f32,
    /// Seconds until the fade reaches silence
    pub duration: f64,
}

/// C5, E5, G5, C6
pub const CELEBRATION_NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.5];
/// Gap between celebration notes (seconds)
pub const CELEBRATION_NOTE_STAGGER: f64 = 0.15;

impl SoundCue {
    /// Voices making up this cue
    pub fn tones(&self) -> Vec<Tone> {
        match self {
            SoundCue::Click => vec![Tone {
                offset: 0.0,
                start_freq: 800.0,
                end_freq: Some(400.0),
                gain: 0.3,
                duration: 0.1,
            }],
            SoundCue::Celebration => CELEBRATION_NOTES
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone {
                    offset: i as f64 * CELEBRATION_NOTE_STAGGER,
                    start_freq: freq,
                    end_freq: None,
                    gain: 0.2,
                    duration: 0.3,
                })
                .collect(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundCue, Tone};

    /// Plays cues through a single shared `AudioContext`
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
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
                log::warn!("Audio context not supported - sound disabled");
            }
            Self {
                ctx,
                master_volume: 1.0,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        /// Set SFX volume (0.0 - 1.0)
        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play a cue
        pub fn play(&self, cue: SoundCue) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in cue.tones() {
                self.play_tone(ctx, &tone, vol);
            }
        }

        /// Release the context (page teardown)
        pub fn close(&mut self) {
            if let Some(ctx) = self.ctx.take() {
                let _ = ctx.close();
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

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.start_freq) else {
                return;
            };
            let t = ctx.current_time() + tone.offset;

            osc.frequency().set_value_at_time(tone.start_freq, t).ok();
            if let Some(end) = tone.end_freq {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end, t + tone.duration)
                    .ok();
            }
            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_is_single_descending_tone() {
        let tones = SoundCue::Click.tones();
        assert_eq!(tones.len(), 1);
        let tone = tones[0];
        assert!(tone.end_freq.is_some_and(|end| end < tone.start_freq));
    }

    #[test]
    fn test_celebration_is_four_ascending_notes() {
        let tones = SoundCue::Celebration.tones();
        assert_eq!(tones.len(), 4);
        for pair in tones.windows(2) {
            assert!(pair[1].start_freq > pair[0].start_freq);
            assert!((pair[1].offset - pair[0].offset - 0.15).abs() < 1e-9);
        }
        assert_eq!(tones[0].offset, 0.0);
    }
}
