//! Procedural audio
//!
//! No sample files: every sound is an oscillator with an envelope.
//! - `voice`: effect voice tables (connect/start/game over)
//! - `melody`: look-ahead background melody scheduler
//! - `engine`: maps game events and status onto a backend
//! - `web`: Web Audio backend (wasm only)

pub mod engine;
pub mod melody;
pub mod voice;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{AudioBackend, AudioEngine, SilentBackend};
pub use melody::{MelodyScheduler, ScheduledNote};
pub use voice::{Effect, Voice, Waveform};
#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;
