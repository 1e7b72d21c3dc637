//! Pointer input dispatch
//!
//! Turns raw pointer positions into dot hits and state-machine commands.
//! Which clicks count as game input depends on the current status.

use glam::Vec2;

use crate::consts::{HOVER_MARGIN, PICK_MARGIN};
use crate::sim::{Command, Dot, GameStatus};

/// Pointer events the overlay understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { at: Vec2 },
    /// `on_control` is set when the click target is a button, link or form
    /// field, whether part of the page or of the overlay's own chrome
    Click { at: Vec2, on_control: bool },
}

/// First dot (in field order) whose pick area contains `at`
pub fn pick_dot(dots: &[Dot], at: Vec2) -> Option<usize> {
    dots.iter().position(|dot| dot.reaches(at, PICK_MARGIN))
}

/// True if `at` is within the pick area of any dot
pub fn near_any_dot(dots: &[Dot], at: Vec2) -> bool {
    dots.iter().any(|dot| dot.reaches(at, PICK_MARGIN))
}

/// True if `at` is close enough to highlight `dot`
#[inline]
pub fn hovers(dot: &Dot, at: Vec2) -> bool {
    dot.reaches(at, HOVER_MARGIN)
}

/// Command for a click, if the click is game input at all.
///
/// Clicks on controls are never game input, so the mute and abort buttons
/// cannot connect a dot drifting underneath them. Otherwise, while idle only
/// a dot hit starts a game; while playing every click is input; after game
/// over clicks are ignored (the panel buttons send `Reset`/`Retry` directly).
pub fn click_command(status: GameStatus, hit: Option<usize>, on_control: bool) -> Option<Command> {
    if on_control {
        return None;
    }
    match status {
        GameStatus::Idle => hit.map(Command::Press),
        GameStatus::Playing => Some(hit.map_or(Command::PressEmpty, Command::Press)),
        GameStatus::GameOver => None,
    }
}
