//! Voice descriptions for procedurally synthesized sounds
//!
//! A `Voice` is a single oscillator with pitch and gain automation, described
//! in offsets from its start time. Backends turn it into real audio nodes.

use crate::sim::{DotStyle, DotTint};

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// How a parameter reaches its next value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Set,
    Linear,
    Exponential,
}

/// One automation point, `offset` seconds after the voice starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Automation {
    pub ramp: Ramp,
    pub value: f32,
    pub offset: f64,
}

pub(crate) const fn set(value: f32, offset: f64) -> Automation {
    Automation {
        ramp: Ramp::Set,
        value,
        offset,
    }
}

pub(crate) const fn linear(value: f32, offset: f64) -> Automation {
    Automation {
        ramp: Ramp::Linear,
        value,
        offset,
    }
}

pub(crate) const fn exponential(value: f32, offset: f64) -> Automation {
    Automation {
        ramp: Ramp::Exponential,
        value,
        offset,
    }
}

/// A single enveloped tone
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    /// Frequency automation (Hz)
    pub pitch: Vec<Automation>,
    /// Gain automation (linear amplitude)
    pub envelope: Vec<Automation>,
    /// Oscillator stops this many seconds after starting
    pub duration: f64,
}

impl Voice {
    /// Starting frequency
    pub fn base_frequency(&self) -> f32 {
        self.pitch.first().map(|a| a.value).unwrap_or(0.0)
    }
}

/// Pentatonic-ish scale the connect sound climbs through (C4 D4 E4 G4 A4 C5)
pub const CONNECT_SCALE: [f32; 6] = [261.63, 293.66, 329.63, 392.00, 440.00, 523.25];

/// Frequency ratio applied per pass through the scale (half an octave)
pub const CONNECT_OCTAVE_STEP: f32 = 0.5;

/// Attack time shared by connect voices
const CONNECT_ATTACK: f64 = 0.02;

/// Discrete sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// A connection was made; `ordinal` is the connection count so far
    Connect {
        ordinal: usize,
        style: DotStyle,
        tint: DotTint,
    },
    /// A game started
    Start,
    /// Connections crossed
    GameOver,
}

/// Pitch of the nth connection: scale degree `n mod 6`, raised by
/// `floor(n / 6)` half-octaves
pub fn connect_frequency(ordinal: usize) -> f32 {
    let base = CONNECT_SCALE[ordinal % CONNECT_SCALE.len()];
    let octave = (ordinal / CONNECT_SCALE.len()) as f32;
    base * 2f32.powf(octave * CONNECT_OCTAVE_STEP)
}

impl Effect {
    pub fn voice(&self) -> Voice {
        match *self {
            Effect::Connect {
                ordinal,
                style,
                tint,
            } => {
                let freq = connect_frequency(ordinal);
                // Accent dots buzz, hollow dots ring brighter, the rest are pure
                let (waveform, peak, decay) = match (tint, style) {
                    (DotTint::Accent, _) => (Waveform::Sawtooth, 0.08, 0.5),
                    (DotTint::Ordinary, DotStyle::Hollow) => (Waveform::Square, 0.05, 0.3),
                    (DotTint::Ordinary, DotStyle::Solid) => (Waveform::Sine, 0.1, 0.4),
                };
                Voice {
                    waveform,
                    pitch: vec![set(freq, 0.0)],
                    envelope: vec![
                        set(0.0, 0.0),
                        linear(peak, CONNECT_ATTACK),
                        exponential(0.001, decay),
                    ],
                    duration: 0.5,
                }
            }
            Effect::Start => Voice {
                waveform: Waveform::Triangle,
                pitch: vec![set(220.0, 0.0), linear(440.0, 0.1), linear(880.0, 0.2)],
                envelope: vec![set(0.1, 0.0), linear(0.1, 0.2), linear(0.0, 0.4)],
                duration: 0.4,
            },
            Effect::GameOver => Voice {
                waveform: Waveform::Sawtooth,
                pitch: vec![set(100.0, 0.0), exponential(30.0, 0.5)],
                envelope: vec![set(0.15, 0.0), exponential(0.001, 0.5)],
                duration: 0.5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connect(ordinal: usize, style: DotStyle, tint: DotTint) -> Voice {
        Effect::Connect {
            ordinal,
            style,
            tint,
        }
        .voice()
    }

    #[test]
    fn test_connect_pitch_walks_scale() {
        for (i, &note) in CONNECT_SCALE.iter().enumerate() {
            assert_eq!(connect_frequency(i), note);
        }
    }

    #[test]
    fn test_connect_pitch_climbs_per_pass() {
        let first = connect_frequency(1);
        let second = connect_frequency(7);
        let third = connect_frequency(13);
        assert!((second / first - 2f32.sqrt()).abs() < 1e-4);
        assert!((third / first - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_timbre_follows_target_dot() {
        let accent = connect(1, DotStyle::Hollow, DotTint::Accent);
        let hollow = connect(1, DotStyle::Hollow, DotTint::Ordinary);
        let plain = connect(1, DotStyle::Solid, DotTint::Ordinary);
        assert_eq!(accent.waveform, Waveform::Sawtooth);
        assert_eq!(hollow.waveform, Waveform::Square);
        assert_eq!(plain.waveform, Waveform::Sine);
        assert_eq!(plain.envelope[1], linear(0.1, CONNECT_ATTACK));

        // Distinct decay tails
        let tail = |v: &Voice| v.envelope.last().map(|a| a.offset);
        assert_eq!(tail(&accent), Some(0.5));
        assert_eq!(tail(&hollow), Some(0.3));
        assert_eq!(tail(&plain), Some(0.4));
    }

    #[test]
    fn test_fixed_effects() {
        let start = Effect::Start.voice();
        assert_eq!(start.waveform, Waveform::Triangle);
        assert_eq!(start.base_frequency(), 220.0);
        assert_eq!(start.duration, 0.4);

        let over = Effect::GameOver.voice();
        assert_eq!(over.waveform, Waveform::Sawtooth);
        assert_eq!(over.base_frequency(), 100.0);
        assert_eq!(over.duration, 0.5);
    }

    #[test]
    fn test_envelopes_end_within_duration() {
        let voices = [
            Effect::Start.voice(),
            Effect::GameOver.voice(),
            connect(0, DotStyle::Solid, DotTint::Accent),
            connect(3, DotStyle::Hollow, DotTint::Ordinary),
        ];
        for voice in voices {
            for point in voice.envelope.iter().chain(&voice.pitch) {
                assert!(point.offset <= voice.duration);
            }
        }
    }
}
