//! Event-driven audio front end
//!
//! Maps game events to effect voices and keeps the melody running exactly
//! while a game is in progress and sound is on. Backends do the synthesis.

use super::voice::{Effect, Voice};
use crate::sim::{GameEvent, GameStatus};

/// Synthesis backend. Implementations must degrade silently when the host
/// has no audio; nothing in the game depends on sound succeeding.
pub trait AudioBackend {
    /// Play a voice immediately
    fn play(&mut self, voice: &Voice);
    /// Begin the look-ahead melody from the top of the loop
    fn start_melody(&mut self);
    /// Cancel the melody timer; notes already queued finish on their own
    fn stop_melody(&mut self);
    /// Effect and melody volume (0.0 - 1.0)
    fn set_levels(&mut self, _sfx: f32, _music: f32) {}
}

/// Backend for hosts without audio
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, voice: &Voice) {
        log::trace!("(silent) {:?} at {:.1} Hz", voice.waveform, voice.base_frequency());
    }

    fn start_melody(&mut self) {}

    fn stop_melody(&mut self) {}
}

pub struct AudioEngine<B: AudioBackend> {
    backend: B,
    muted: bool,
    melody_running: bool,
}

impl<B: AudioBackend> AudioEngine<B> {
    pub fn new(backend: B, muted: bool) -> Self {
        Self {
            backend,
            muted,
            melody_running: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn melody_running(&self) -> bool {
        self.melody_running
    }

    pub fn set_levels(&mut self, sfx: f32, music: f32) {
        self.backend.set_levels(sfx, music);
    }

    /// Mute or unmute, then bring the melody in line with `status`.
    /// Voices already sounding are left alone.
    pub fn set_muted(&mut self, muted: bool, status: GameStatus) {
        self.muted = muted;
        self.sync(status);
    }

    /// Play the effect for a game event, if it has one
    pub fn handle(&mut self, event: &GameEvent) {
        if self.muted {
            return;
        }
        let effect = match *event {
            GameEvent::Started => Effect::Start,
            GameEvent::Connected {
                ordinal,
                style,
                tint,
                ..
            } => Effect::Connect {
                ordinal,
                style,
                tint,
            },
            GameEvent::GameOver { .. } => Effect::GameOver,
            GameEvent::Selected { .. } | GameEvent::Deselected | GameEvent::Stopped => return,
        };
        self.backend.play(&effect.voice());
    }

    /// Start or stop the melody to match the game status
    pub fn sync(&mut self, status: GameStatus) {
        let wanted = status == GameStatus::Playing && !self.muted;
        if wanted && !self.melody_running {
            self.backend.start_melody();
            self.melody_running = true;
        } else if !wanted && self.melody_running {
            self.backend.stop_melody();
            self.melody_running = false;
        }
    }

    /// Overlay teardown: cancel the melody timer
    pub fn shutdown(&mut self) {
        if self.melody_running {
            self.backend.stop_melody();
            self.melody_running = false;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audio::voice::Waveform;
    use crate::sim::{DotStyle, DotTint};

    /// Records what the engine asked for
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub played: Vec<Waveform>,
        pub melody_starts: usize,
        pub melody_stops: usize,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, voice: &Voice) {
            self.played.push(voice.waveform);
        }

        fn start_melody(&mut self) {
            self.melody_starts += 1;
        }

        fn stop_melody(&mut self) {
            self.melody_stops += 1;
        }
    }

    fn connected() -> GameEvent {
        GameEvent::Connected {
            ordinal: 1,
            style: DotStyle::Solid,
            tint: DotTint::Accent,
        }
    }

    #[test]
    fn test_events_map_to_effects() {
        let mut engine = AudioEngine::new(Recorder::default(), false);
        engine.handle(&GameEvent::Started);
        engine.handle(&connected());
        engine.handle(&GameEvent::Deselected);
        engine.handle(&GameEvent::GameOver { score: 10, rank: 1 });
        assert_eq!(
            engine.backend().played,
            vec![Waveform::Triangle, Waveform::Sawtooth, Waveform::Sawtooth]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut engine = AudioEngine::new(Recorder::default(), true);
        engine.handle(&GameEvent::Started);
        engine.sync(GameStatus::Playing);
        assert!(engine.backend().played.is_empty());
        assert_eq!(engine.backend().melody_starts, 0);
    }

    #[test]
    fn test_melody_follows_status() {
        let mut engine = AudioEngine::new(Recorder::default(), false);
        engine.sync(GameStatus::Idle);
        assert!(!engine.melody_running());

        engine.sync(GameStatus::Playing);
        engine.sync(GameStatus::Playing);
        assert_eq!(engine.backend().melody_starts, 1);

        engine.sync(GameStatus::GameOver);
        assert!(!engine.melody_running());
        assert_eq!(engine.backend().melody_stops, 1);
    }

    #[test]
    fn test_mute_toggle_stops_and_resumes_melody() {
        let mut engine = AudioEngine::new(Recorder::default(), false);
        engine.sync(GameStatus::Playing);
        engine.set_muted(true, GameStatus::Playing);
        assert_eq!(engine.backend().melody_stops, 1);
        engine.set_muted(false, GameStatus::Playing);
        assert_eq!(engine.backend().melody_starts, 2);
    }

    #[test]
    fn test_shutdown_cancels_melody() {
        let mut engine = AudioEngine::new(Recorder::default(), false);
        engine.sync(GameStatus::Playing);
        engine.shutdown();
        assert!(!engine.melody_running());
        assert_eq!(engine.backend().melody_stops, 1);
    }
}
