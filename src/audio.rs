//! Sound effect sink
//!
//! The simulation never plays sound itself. [`crate::Game`] maps simulation
//! events to [`SoundEffect`]s and hands them to an [`AudioSink`]; a failing
//! sink is logged and otherwise ignored.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Projectile fired
    Shot,
    /// Projectile destroyed a hazard
    Hit,
    /// Hazard struck the planet
    Explosion,
}

/// Fire-and-forget audio output
pub trait AudioSink {
    /// Play an effect. Errors are reported but never affect the game.
    fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()>;

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    /// Wake the output after a user gesture (browsers start audio suspended)
    fn resume(&mut self) {}

    /// Flip mute, returning the new state
    fn toggle_mute(&mut self) -> bool {
        let muted = !self.is_muted();
        self.set_muted(muted);
        muted
    }
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()> {
        (**self).play(effect)
    }

    fn set_muted(&mut self, muted: bool) {
        (**self).set_muted(muted)
    }

    fn is_muted(&self) -> bool {
        (**self).is_muted()
    }

    fn resume(&mut self) {
        (**self).resume()
    }
}

/// Sink that only logs (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    muted: bool,
    /// Effects played so far (muted effects are not recorded)
    pub played: Vec<SoundEffect>,
}

impl AudioSink for SilentAudio {
    fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()> {
        if self.muted {
            return Ok(());
        }
        log::trace!("sfx {effect:?}");
        self.played.push(effect);
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Web Audio API synth - procedurally generated effects, no external files
#[cfg(target_arch = "wasm32")]
mod web {
    use anyhow::anyhow;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl WebAudio {
        /// `volume` is the effect gain; mute is tracked separately
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
                muted: false,
            }
        }

        /// Create an oscillator routed through a gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> anyhow::Result<(OscillatorNode, GainNode)> {
            let js = |e| anyhow!("web audio: {e:?}");
            let osc = ctx.create_oscillator().map_err(js)?;
            let gain = ctx.create_gain().map_err(js)?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).map_err(js)?;
            gain.connect_with_audio_node(&ctx.destination()).map_err(js)?;

            Ok((osc, gain))
        }

        /// Sweep `from` → `to` Hz with an attack/decay envelope
        #[allow(clippy::too_many_arguments)]
        fn sweep(
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            sweep_secs: f64,
            peak: f32,
            decay_secs: f64,
        ) -> anyhow::Result<()> {
            let js = |e| anyhow!("web audio: {e:?}");
            let (osc, gain) = Self::create_osc(ctx, from, osc_type)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.001, t).map_err(js)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(peak, t + 0.02)
                .map_err(js)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + decay_secs)
                .map_err(js)?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + sweep_secs)
                .map_err(js)?;

            osc.start().map_err(js)?;
            osc.stop_with_when(t + decay_secs + 0.02).map_err(js)?;
            Ok(())
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()> {
            if self.muted || self.volume <= 0.0 {
                return Ok(());
            }
            self.resume();
            let Some(ctx) = &self.ctx else { return Ok(()) };

            let vol = self.volume;
            match effect {
                // Sawtooth zap
                SoundEffect::Shot => {
                    Self::sweep(ctx, OscillatorType::Sawtooth, 1200.0, 420.0, 0.12, 0.18 * vol, 0.28)
                }
                // Triangle thud
                SoundEffect::Hit => {
                    Self::sweep(ctx, OscillatorType::Triangle, 260.0, 120.0, 0.25, 0.28 * vol, 0.4)
                }
                // Low sine boom
                SoundEffect::Explosion => {
                    Self::sweep(ctx, OscillatorType::Sine, 180.0, 40.0, 0.5, 0.6 * vol, 0.6)
                }
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn resume(&mut self) {
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                if let Err(e) = ctx.resume() {
                    log::warn!("AudioContext resume failed: {e:?}");
                }
            }
        }
    }
}
