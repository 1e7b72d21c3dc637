//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay platform free:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Entities referenced by index, never by handle
//! - No rendering or audio dependencies

pub mod collision;
pub mod game;
pub mod motion;
pub mod ripple;
pub mod state;

pub use collision::{find_crossing, has_crossing, segments_cross};
pub use game::{Command, Game, GameEvent, GameStatus};
pub use motion::{advance_dots, dot_count, fit_to_surface, spawn_dots};
pub use ripple::{advance_ripples, spawn_ripple};
pub use state::{Connection, Dot, DotStyle, DotTint, Field, Ripple};
