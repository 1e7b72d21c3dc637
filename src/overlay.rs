//! Per-frame orchestration
//!
//! `Overlay` owns the field, the game state machine, audio and storage. The
//! host feeds it pointer events and frame times; it never blocks and never
//! surfaces errors to the host.

use glam::Vec2;

use crate::audio::{AudioBackend, AudioEngine};
use crate::consts::{FADE_RATE, MAX_SUBSTEPS, REST_ALPHA, SIM_DT};
use crate::highscores::{HighScores, Standing};
use crate::input::{click_command, near_any_dot, pick_dot};
use crate::persistence::KeyValueStore;
use crate::renderer::{Surface, draw_scene};
use crate::settings::Settings;
use crate::sim::{
    Command, Field, Game, GameEvent, GameStatus, advance_dots, advance_ripples, fit_to_surface,
    has_crossing, spawn_ripple,
};

/// Longest frame delta fed to the simulation (tab switches, debugger pauses)
const MAX_FRAME_DT: f32 = 0.1;

/// Pointer position before the first move event: far away from every dot
const POINTER_OFFSCREEN: Vec2 = Vec2::new(-10_000.0, -10_000.0);

pub struct Overlay<B: AudioBackend, K: KeyValueStore> {
    field: Field,
    game: Game,
    audio: AudioEngine<B>,
    store: K,
    settings: Settings,
    pointer: Vec2,
    fade: f32,
    accumulator: f32,
    seed: u64,
}

impl<B: AudioBackend, K: KeyValueStore> Overlay<B, K> {
    pub fn new(backend: B, store: K, seed: u64) -> Self {
        let settings = Settings::load(&store);
        let game = Game::new(HighScores::load(&store));
        let mut audio = AudioEngine::new(backend, settings.muted);
        audio.set_levels(settings.sfx_volume, settings.music_volume);

        Self {
            field: Field::default(),
            game,
            audio,
            store,
            settings,
            pointer: POINTER_OFFSCREEN,
            fade: REST_ALPHA,
            accumulator: 0.0,
            seed,
        }
    }

    /// New surface size. Dots are generated on the first call only.
    pub fn resize(&mut self, width: f32, height: f32) {
        fit_to_surface(&mut self.field, width, height, self.seed);
    }

    /// Track the pointer. Returns true when the page should show a
    /// pointer cursor (idle and over a dot).
    pub fn pointer_moved(&mut self, at: Vec2) -> bool {
        self.pointer = at;
        self.game.status() == GameStatus::Idle && near_any_dot(&self.field.dots, at)
    }

    /// Handle a click. Any click on a dot leaves a ripple at the dot, whatever
    /// the status. Returns true if the click was consumed and must not reach
    /// the page underneath.
    pub fn click(&mut self, at: Vec2, on_control: bool) -> bool {
        self.pointer = at;
        let status = self.game.status();
        let hit = pick_dot(&self.field.dots, at);

        let origin = hit.and_then(|i| self.field.dot(i)).map(|dot| dot.pos);
        if let Some(origin) = origin.filter(|_| !self.settings.reduced_motion) {
            spawn_ripple(&mut self.field, origin);
        }

        let Some(command) = click_command(status, hit, on_control) else {
            return false;
        };
        let event = self.dispatch(command);
        status == GameStatus::Idle && event == Some(GameEvent::Started)
    }

    /// Leave the game-over panel for the idle field
    pub fn reset(&mut self) {
        self.dispatch(Command::Reset);
    }

    /// Start again straight from the game-over panel
    pub fn retry(&mut self) {
        self.dispatch(Command::Retry);
    }

    /// Quit a running game without recording it
    pub fn abort(&mut self) {
        self.dispatch(Command::Abort);
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.settings.muted;
        self.set_muted(muted);
        muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.audio.set_muted(muted, self.game.status());
        self.settings.save(&mut self.store);
    }

    /// Advance by `dt` seconds of wall time and draw the result
    pub fn frame(&mut self, dt: f32, surface: &mut impl Surface) {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.tick();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        draw_scene(surface, &self.field, &self.game, self.pointer, self.fade);

        if self.game.is_playing() && has_crossing(&self.field) {
            self.dispatch(Command::Collide);
        }
    }

    fn tick(&mut self) {
        advance_ripples(&mut self.field);
        advance_dots(&mut self.field);

        self.fade = match self.game.status() {
            GameStatus::Idle => {
                let target = if near_any_dot(&self.field.dots, self.pointer) {
                    1.0
                } else {
                    REST_ALPHA
                };
                self.fade + (target - self.fade) * FADE_RATE
            }
            GameStatus::Playing | GameStatus::GameOver => 1.0,
        };
    }

    fn dispatch(&mut self, command: Command) -> Option<GameEvent> {
        let event = self.game.apply(command, &mut self.field)?;
        self.audio.handle(&event);
        self.audio.sync(self.game.status());
        if let GameEvent::GameOver { .. } = event {
            self.game.high_scores().save(&mut self.store);
        }
        Some(event)
    }

    /// Cancel background audio work (page unload)
    pub fn teardown(&mut self) {
        self.audio.shutdown();
        log::info!("Overlay torn down");
    }

    /// Page restored from the back/forward cache: drop the time spent away
    /// and restart the melody if a game was left running
    pub fn resume(&mut self) {
        self.accumulator = 0.0;
        self.audio.sync(self.game.status());
        log::info!("Overlay resumed");
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    pub fn score(&self) -> u64 {
        self.game.score()
    }

    /// Merged leaderboard rows for the game-over panel
    pub fn standings(&self) -> Vec<Standing> {
        self.game.high_scores().standings()
    }

    pub fn muted(&self) -> bool {
        self.settings.muted
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn fade(&self) -> f32 {
        self.fade
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Waveform;
    use crate::audio::engine::tests::Recorder;
    use crate::persistence::MemoryStore;
    use crate::renderer::NullSurface;
    use crate::renderer::scene::tests::{Call, Recording};
    use crate::sim::Dot;

    const A: Vec2 = Vec2::new(100.0, 100.0);
    const B: Vec2 = Vec2::new(300.0, 100.0);
    const C: Vec2 = Vec2::new(200.0, 300.0);
    const D: Vec2 = Vec2::new(350.0, 250.0);

    fn overlay_with(store: MemoryStore) -> Overlay<Recorder, MemoryStore> {
        let mut overlay = Overlay::new(Recorder::default(), store, 7);
        overlay.field = Field::new(500.0, 400.0);
        overlay.field.dots = [A, B, C, D]
            .into_iter()
            .map(|pos| Dot::new(pos, Vec2::ZERO, 5.0))
            .collect();
        overlay
    }

    fn overlay() -> Overlay<Recorder, MemoryStore> {
        overlay_with(MemoryStore::default())
    }

    #[test]
    fn test_full_game_ends_on_crossing() {
        let mut overlay = overlay();

        assert!(overlay.click(A, false));
        assert_eq!(overlay.status(), GameStatus::Playing);
        assert!(overlay.audio.melody_running());

        let mut scores = vec![];
        for at in [B, C, A, D] {
            assert!(!overlay.click(at, false));
            scores.push(overlay.score());
        }
        assert_eq!(scores, vec![10, 20, 40, 50]);
        assert_eq!(overlay.status(), GameStatus::Playing);

        overlay.frame(SIM_DT, &mut NullSurface);
        assert_eq!(overlay.status(), GameStatus::GameOver);
        assert_eq!(overlay.score(), 50);
        assert!(!overlay.audio.melody_running());
        assert_eq!(overlay.audio.backend().played.last(), Some(&Waveform::Sawtooth));

        let saved = HighScores::load(&overlay.store);
        assert_eq!(saved.scores(), &[50]);
    }

    #[test]
    fn test_retry_and_reset_from_game_over() {
        let mut overlay = overlay();
        for at in [A, B, C, A, D] {
            overlay.click(at, false);
        }
        overlay.frame(SIM_DT, &mut NullSurface);
        assert_eq!(overlay.status(), GameStatus::GameOver);

        // Clicks on the field are ignored until the player picks an option
        assert!(!overlay.click(B, false));
        assert_eq!(overlay.status(), GameStatus::GameOver);

        overlay.retry();
        assert_eq!(overlay.status(), GameStatus::Playing);
        assert_eq!(overlay.score(), 0);
        assert!(overlay.field().connections.is_empty());

        overlay.abort();
        assert_eq!(overlay.status(), GameStatus::Idle);
        assert_eq!(overlay.game.high_scores().scores(), &[50]);
    }

    #[test]
    fn test_idle_click_on_page_control_passes_through() {
        let mut overlay = overlay();
        assert!(!overlay.click(A, true));
        assert_eq!(overlay.status(), GameStatus::Idle);
        // Still a dot hit, so it still ripples
        assert_eq!(overlay.field().ripples.len(), 1);
    }

    #[test]
    fn test_ripple_centred_on_dot() {
        let mut overlay = overlay();
        overlay.click(A + Vec2::new(10.0, 0.0), false);
        assert_eq!(overlay.field().ripples[0].origin, A);
    }

    #[test]
    fn test_game_over_dot_click_still_ripples() {
        let mut overlay = overlay();
        for at in [A, B, C, A, D] {
            overlay.click(at, false);
        }
        overlay.frame(SIM_DT, &mut NullSurface);
        assert_eq!(overlay.status(), GameStatus::GameOver);

        let before = overlay.field().ripples.len();
        assert!(!overlay.click(B, false));
        assert_eq!(overlay.field().ripples.len(), before + 1);
        assert_eq!(overlay.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_mute_click_over_dot_leaves_game_alone() {
        let mut overlay = overlay();
        overlay.click(A, false);
        assert_eq!(overlay.game.selected(), Some(0));

        // The mute button sits over B: the capture listener sees a control
        assert!(!overlay.click(B, true));
        overlay.toggle_mute();
        assert_eq!(overlay.score(), 0);
        assert!(overlay.field().connections.is_empty());
        assert_eq!(overlay.game.selected(), Some(0));
        assert_eq!(overlay.status(), GameStatus::Playing);
    }

    #[test]
    fn test_idle_click_on_empty_space_is_ignored() {
        let mut overlay = overlay();
        assert!(!overlay.click(Vec2::new(450.0, 380.0), false));
        assert_eq!(overlay.status(), GameStatus::Idle);
    }

    #[test]
    fn test_dot_click_spawns_ripple_unless_reduced_motion() {
        let mut overlay = overlay();
        overlay.click(A, false);
        assert_eq!(overlay.field().ripples.len(), 1);

        overlay.settings.reduced_motion = true;
        overlay.click(B, false);
        assert_eq!(overlay.field().ripples.len(), 1);
    }

    #[test]
    fn test_idle_fade_follows_hover() {
        let mut overlay = overlay();
        assert!(overlay.pointer_moved(A + Vec2::new(12.0, 0.0)));
        for _ in 0..60 {
            overlay.frame(SIM_DT, &mut NullSurface);
        }
        assert!(overlay.fade() > 0.95);

        assert!(!overlay.pointer_moved(Vec2::new(450.0, 380.0)));
        overlay.frame(SIM_DT, &mut NullSurface);
        let after_one = overlay.fade();
        assert!(after_one < 0.95 && after_one > REST_ALPHA);
    }

    #[test]
    fn test_playing_fade_is_opaque() {
        let mut overlay = overlay();
        overlay.click(A, false);
        overlay.frame(SIM_DT, &mut NullSurface);
        assert_eq!(overlay.fade(), 1.0);
        assert!(!overlay.pointer_moved(A));
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut overlay = overlay();
        overlay.field.dots[0].vel = Vec2::new(1.0, 0.0);
        overlay.frame(5.0, &mut NullSurface);
        assert_eq!(overlay.field().dots[0].pos.x, A.x + MAX_SUBSTEPS as f32);
    }

    #[test]
    fn test_mute_persists_and_stops_melody() {
        let mut overlay = overlay();
        overlay.click(A, false);
        assert!(overlay.audio.melody_running());

        assert!(overlay.toggle_mute());
        assert!(!overlay.audio.melody_running());
        assert_eq!(overlay.audio.backend().melody_stops, 1);

        let reloaded = overlay_with(overlay.store.clone());
        assert!(reloaded.muted());
        assert!(reloaded.audio.is_muted());
    }

    #[test]
    fn test_loads_existing_leaderboard() {
        let mut store = MemoryStore::default();
        HighScores::from_scores(vec![300, 20]).save(&mut store);
        let overlay = overlay_with(store);

        let rows: Vec<u64> = overlay.standings().iter().map(|s| s.score).collect();
        assert_eq!(rows, vec![300, 180, 20]);
    }

    #[test]
    fn test_frame_draws_preview_toward_pointer() {
        let mut overlay = overlay();
        overlay.click(A, false);
        overlay.pointer_moved(Vec2::new(20.0, 20.0));

        let mut surface = Recording::default();
        overlay.frame(SIM_DT, &mut surface);
        assert_eq!(surface.calls.last(), Some(&Call::Dashed(A, Vec2::new(20.0, 20.0))));
    }

    #[test]
    fn test_resume_restarts_melody_mid_game() {
        let mut overlay = overlay();
        overlay.click(A, false);
        overlay.teardown();
        overlay.resume();
        assert!(overlay.audio.melody_running());
        assert_eq!(overlay.audio.backend().melody_starts, 2);
        assert_eq!(overlay.status(), GameStatus::Playing);
    }

    #[test]
    fn test_resume_while_idle_stays_quiet() {
        let mut overlay = overlay();
        overlay.teardown();
        overlay.resume();
        assert!(!overlay.audio.melody_running());
        assert_eq!(overlay.audio.backend().melody_starts, 0);
    }

    #[test]
    fn test_teardown_cancels_melody() {
        let mut overlay = overlay();
        overlay.click(A, false);
        overlay.teardown();
        assert!(!overlay.audio.melody_running());
        assert_eq!(overlay.audio.backend().melody_stops, 1);
    }
}
