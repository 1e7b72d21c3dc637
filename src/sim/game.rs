//! Game state machine
//!
//! The single authority on whether the field is scorable. Input dispatch and
//! rendering query `Game::status` instead of tracking their own flags, and
//! every state change goes through `Game::apply`.

use super::state::{DotStyle, DotTint, Field};
use crate::consts::POINTS_PER_LINK;
use crate::highscores::HighScores;

/// Current phase of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Decorative background, nothing scores
    #[default]
    Idle,
    /// Connections score and crossings are fatal
    Playing,
    /// Score frozen, leaderboard updated
    GameOver,
}

/// Requests fed into the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A dot was clicked (already validated as game input)
    Press(usize),
    /// A click landed on empty space
    PressEmpty,
    /// The collision detector found crossing connections
    Collide,
    /// Leave the game-over screen
    Reset,
    /// Start over from the game-over screen
    Retry,
    /// Quit a running game without recording it
    Abort,
}

/// Discrete transitions other components react to (audio, persistence, logs)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    Selected { dot: usize },
    Deselected,
    Connected {
        /// Connection count after this connection
        ordinal: usize,
        style: DotStyle,
        tint: DotTint,
    },
    GameOver { score: u64, rank: usize },
    Stopped,
}

/// Score, status and the player's history
#[derive(Debug, Clone, Default)]
pub struct Game {
    status: GameStatus,
    score: u64,
    /// Pending endpoint of the next connection (only meaningful while playing)
    selected: Option<usize>,
    high_scores: HighScores,
}

impl Game {
    pub fn new(high_scores: HighScores) -> Self {
        Self {
            high_scores,
            ..Default::default()
        }
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Run one transition. Commands that make no sense in the current status
    /// are ignored and produce no event.
    pub fn apply(&mut self, command: Command, field: &mut Field) -> Option<GameEvent> {
        use Command::*;
        use GameStatus::*;

        match (self.status, command) {
            (Idle, Press(dot)) => {
                if dot >= field.dots.len() {
                    return None;
                }
                self.begin(field);
                self.selected = Some(dot);
                Some(GameEvent::Started)
            }
            (Playing, Press(dot)) => self.press(dot, field),
            (Playing, PressEmpty) => self.selected.take().map(|_| GameEvent::Deselected),
            (Playing, Collide) => Some(self.finish()),
            (Playing, Abort) | (GameOver, Reset) => {
                field.clear_connections();
                self.selected = None;
                self.score = 0;
                self.status = Idle;
                Some(GameEvent::Stopped)
            }
            (GameOver, Retry) => {
                self.begin(field);
                Some(GameEvent::Started)
            }
            (Idle, PressEmpty | Collide | Reset | Retry | Abort)
            | (Playing, Reset | Retry)
            | (GameOver, Press(_) | PressEmpty | Collide | Abort) => None,
        }
    }

    fn begin(&mut self, field: &mut Field) {
        field.clear_connections();
        self.selected = None;
        self.score = 0;
        self.status = GameStatus::Playing;
        log::info!("Game started");
    }

    fn press(&mut self, dot: usize, field: &mut Field) -> Option<GameEvent> {
        let target = *field.dot(dot)?;
        let Some(from) = self.selected else {
            self.selected = Some(dot);
            return Some(GameEvent::Selected { dot });
        };

        if from == dot || !field.connect(from, dot) {
            // Clicking the pending dot again, or an existing connection
            self.selected = None;
            return Some(GameEvent::Deselected);
        }

        let points = POINTS_PER_LINK * field.degree(dot) as u64;
        self.score += points;
        self.selected = Some(dot);
        log::debug!("Connected {from} -> {dot} (+{points}, score {})", self.score);

        Some(GameEvent::Connected {
            ordinal: field.connections.len(),
            style: target.style,
            tint: target.tint,
        })
    }

    fn finish(&mut self) -> GameEvent {
        self.status = GameStatus::GameOver;
        self.selected = None;
        let rank = self.high_scores.add_score(self.score);
        log::info!("Game over with score {} (rank {rank})", self.score);
        GameEvent::GameOver {
            score: self.score,
            rank,
        }
    }
}
