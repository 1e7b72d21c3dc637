//! Web Audio backend
//!
//! The `AudioContext` is created on first use (always inside a click handler,
//! so browsers allow it) and resumed whenever the page left it suspended.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, AudioContextState, AudioNode, AudioParam, GainNode, OscillatorType};

use super::engine::AudioBackend;
use super::melody::{LOOKAHEAD_MS, MUSIC_BUS_GAIN, MelodyScheduler};
use super::voice::{Automation, Ramp, Voice, Waveform};

/// Exponential ramps cannot reach zero
const MIN_RAMP_VALUE: f32 = 0.0001;

impl From<Waveform> for OscillatorType {
    fn from(waveform: Waveform) -> Self {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }
}

fn automate(param: &AudioParam, points: &[Automation], start: f64, scale: f32) {
    for point in points {
        let value = point.value * scale;
        let at = start + point.offset;
        let _ = match point.ramp {
            Ramp::Set => param.set_value_at_time(value, at),
            Ramp::Linear => param.linear_ramp_to_value_at_time(value, at),
            Ramp::Exponential => {
                param.exponential_ramp_to_value_at_time(value.max(MIN_RAMP_VALUE), at)
            }
        };
    }
}

/// Build an oscillator and gain for `voice`, routed into `output`
fn play_voice(
    ctx: &AudioContext,
    output: &AudioNode,
    voice: &Voice,
    start: f64,
    level: f32,
) -> Option<()> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(voice.waveform.into());
    automate(&osc.frequency(), &voice.pitch, start, 1.0);
    automate(&gain.gain(), &voice.envelope, start, level);

    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(output).ok()?;

    osc.start_with_when(start).ok()?;
    osc.stop_with_when(start + voice.duration).ok()?;
    Some(())
}

/// Repeating look-ahead timer that owns its scheduler. Dropping it clears
/// the interval; notes already handed to the audio graph keep playing.
struct MelodyTask {
    interval: i32,
    _tick: Closure<dyn FnMut()>,
}

impl MelodyTask {
    fn spawn(ctx: AudioContext, bus: GainNode) -> Option<Self> {
        let window = web_sys::window()?;
        let mut scheduler = MelodyScheduler::new(ctx.current_time());
        let mut pump = move || {
            for note in scheduler.due(ctx.current_time()) {
                play_voice(&ctx, &bus, &note.voice(), note.at, 1.0);
            }
        };
        pump();

        let tick = Closure::<dyn FnMut()>::new(pump);
        let interval = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                LOOKAHEAD_MS,
            )
            .ok()?;
        Some(Self {
            interval,
            _tick: tick,
        })
    }
}

impl Drop for MelodyTask {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.interval);
        }
    }
}

/// Web Audio synthesis
pub struct WebAudio {
    ctx: Option<AudioContext>,
    music_bus: Option<GainNode>,
    /// Set once construction failed, so we stop retrying
    unavailable: bool,
    melody: Option<MelodyTask>,
    sfx_volume: f32,
    music_volume: f32,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        Self {
            ctx: None,
            music_bus: None,
            unavailable: false,
            melody: None,
            sfx_volume: 1.0,
            music_volume: 1.0,
        }
    }

    /// Lazily create the context and resume it if suspended
    fn context(&mut self) -> Option<AudioContext> {
        if self.ctx.is_none() && !self.unavailable {
            match AudioContext::new() {
                Ok(ctx) => {
                    let level = MUSIC_BUS_GAIN * self.music_volume;
                    self.music_bus = ctx.create_gain().ok().and_then(|bus| {
                        bus.gain().set_value(level);
                        bus.connect_with_audio_node(&ctx.destination()).ok()?;
                        Some(bus)
                    });
                    log::info!("Audio context created");
                    self.ctx = Some(ctx);
                }
                Err(e) => {
                    log::warn!("Failed to create AudioContext - audio disabled: {e:?}");
                    self.unavailable = true;
                }
            }
        }

        let ctx = self.ctx.as_ref()?;
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx.clone())
    }
}

impl AudioBackend for WebAudio {
    fn play(&mut self, voice: &Voice) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = self.context() else { return };
        play_voice(
            &ctx,
            &ctx.destination(),
            voice,
            ctx.current_time(),
            self.sfx_volume,
        );
    }

    fn start_melody(&mut self) {
        self.melody = None;
        let Some(ctx) = self.context() else { return };
        let Some(bus) = self.music_bus.clone() else {
            return;
        };
        self.melody = MelodyTask::spawn(ctx, bus);
        if self.melody.is_none() {
            log::warn!("Could not start melody timer");
        }
    }

    fn stop_melody(&mut self) {
        self.melody = None;
    }

    fn set_levels(&mut self, sfx: f32, music: f32) {
        self.sfx_volume = sfx.clamp(0.0, 1.0);
        self.music_volume = music.clamp(0.0, 1.0);
        if let Some(bus) = &self.music_bus {
            bus.gain().set_value(MUSIC_BUS_GAIN * self.music_volume);
        }
    }
}
