//! Look-ahead background melody scheduler
//!
//! A short periodic timer calls `MelodyScheduler::due` with the audio clock.
//! Every note whose start falls within `SCHEDULE_AHEAD` seconds is handed out
//! with its exact start time, and the next-note timestamp advances by one
//! beat. Notes are timed on the audio clock, so timer jitter never shifts them.

use super::voice::{Voice, Waveform, exponential, linear, set};

/// Eight-note loop (C3 E3 G3 A3 A#3 A3 G3 E3)
pub const MELODY: [f32; 8] = [130.81, 164.81, 196.00, 220.00, 233.08, 220.00, 196.00, 164.81];

pub const TEMPO_BPM: f64 = 200.0;
pub const SECONDS_PER_BEAT: f64 = 60.0 / TEMPO_BPM;
/// Sounding length of a note, as a fraction of a beat
pub const NOTE_LENGTH: f64 = 0.8;
/// Timer period; well under one beat
pub const LOOKAHEAD_MS: i32 = 25;
/// How far past the audio clock notes get scheduled
pub const SCHEDULE_AHEAD: f64 = 0.1;
/// Gap before the first note after starting
pub const START_DELAY: f64 = 0.05;
/// Gain of the shared melody bus
pub const MUSIC_BUS_GAIN: f32 = 0.05;

/// A melody note pinned to an audio-clock time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledNote {
    pub at: f64,
    pub frequency: f32,
}

impl ScheduledNote {
    pub fn voice(&self) -> Voice {
        let length = SECONDS_PER_BEAT * NOTE_LENGTH;
        Voice {
            waveform: Waveform::Triangle,
            pitch: vec![set(self.frequency, 0.0)],
            envelope: vec![set(0.0, 0.0), linear(0.4, 0.02), exponential(0.01, length)],
            duration: length,
        }
    }
}

/// Note cursor plus the audio-clock time of the next unscheduled note
#[derive(Debug, Clone)]
pub struct MelodyScheduler {
    cursor: usize,
    next_note_time: f64,
}

impl MelodyScheduler {
    /// Start from the top of the loop, shortly after `now`
    pub fn new(now: f64) -> Self {
        Self {
            cursor: 0,
            next_note_time: now + START_DELAY,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn next_note_time(&self) -> f64 {
        self.next_note_time
    }

    /// Notes that must be queued now, in order
    pub fn due(&mut self, now: f64) -> Vec<ScheduledNote> {
        // A throttled timer (background tab) can fall far behind; pick up from
        // the present instead of firing a burst of stale notes.
        if self.next_note_time + SECONDS_PER_BEAT < now {
            log::debug!("Melody fell behind by {:.3}s", now - self.next_note_time);
            self.next_note_time = now;
        }

        let mut notes = Vec::new();
        while self.next_note_time < now + SCHEDULE_AHEAD {
            notes.push(ScheduledNote {
                at: self.next_note_time,
                frequency: MELODY[self.cursor % MELODY.len()],
            });
            self.next_note_time += SECONDS_PER_BEAT;
            self.cursor += 1;
        }
        notes
    }
}
