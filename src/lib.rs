//! Dot Field - an ambient connect-the-dots overlay
//!
//! Core modules:
//! - `sim`: Field simulation, segment crossings, ripples and the game state machine
//! - `overlay`: Per-frame orchestration and input dispatch
//! - `renderer`: Drawing surface abstraction (Canvas 2D on the web)
//! - `audio`: Procedural sound effects and the look-ahead melody
//! - `persistence`: Key/value storage (LocalStorage on the web)
//! - `highscores`: Persisted leaderboard
//! - `input`: Pointer hit testing and click dispatch
//! - `settings`: Persisted user preferences

pub mod audio;
pub mod highscores;
pub mod input;
pub mod overlay;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::{HighScores, Standing};
pub use overlay::Overlay;
pub use settings::Settings;

/// Tuning constants
pub mod consts {
    /// Fixed simulation timestep (dot velocities are in pixels per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Surface area (px²) per spawned dot
    pub const DOT_DENSITY: f32 = 15_000.0;
    /// Velocity components are drawn from [-MAX_DOT_SPEED, MAX_DOT_SPEED)
    pub const MAX_DOT_SPEED: f32 = 0.4;
    pub const MIN_DOT_RADIUS: f32 = 2.0;
    pub const DOT_RADIUS_SPREAD: f32 = 10.0;
    /// Probability that a dot is drawn hollow
    pub const HOLLOW_CHANCE: f64 = 0.4;
    /// Probability that a dot carries the accent tint
    pub const ACCENT_CHANCE: f64 = 0.1;

    /// Extra reach around a dot for clicks and for the idle fade-in
    pub const PICK_MARGIN: f32 = 15.0;
    /// Extra reach around a dot for the hover highlight
    pub const HOVER_MARGIN: f32 = 10.0;

    /// Idle overlay opacity when nothing is hovered
    pub const REST_ALPHA: f32 = 0.15;
    /// Per-tick smoothing factor toward the target opacity
    pub const FADE_RATE: f32 = 0.1;

    pub const RIPPLE_MAX_RADIUS: f32 = 100.0;
    pub const RIPPLE_START_ALPHA: f32 = 0.5;
    pub const RIPPLE_GROWTH: f32 = 2.5;
    pub const RIPPLE_FADE: f32 = 0.015;

    /// Points per connection touching the clicked dot
    pub const POINTS_PER_LINK: u64 = 10;

    /// Reference entry shown alongside the player's scores
    pub const BENCHMARK_NAME: &str = "Rob's Top Score";
    pub const BENCHMARK_SCORE: u64 = 180;
    /// Rows shown in the merged leaderboard
    pub const LEADERBOARD_ROWS: usize = 5;
}
