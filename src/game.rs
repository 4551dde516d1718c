//! Frame driver
//!
//! Owns the simulation plus its collaborators. Input is queued between
//! frames, [`Game::update`] runs one tick, and the tick's events are routed to
//! audio and persistence. Renderers read [`Game::snapshot`] after each update.

use glam::Vec2;
use serde::Serialize;

use crate::audio::{AudioSink, sound_cues};
use crate::highscores::ScoreEntry;
use crate::persistence::ScoreStore;
use crate::platform;
use crate::rank::{Rank, rank_for, rank_progress};
use crate::settings::Settings;
use crate::sim::effects::{Particle, ScoreFloater};
use crate::sim::{
    Bird, GameEvent, GamePhase, GameState, Modifier, Pipe, PowerUp, SessionSummary, SimConfig,
    TickInput, tick,
};

/// A running game with its score store and audio sink
pub struct Game<S, A> {
    state: GameState,
    store: S,
    audio: A,
    /// Milliseconds since the Unix epoch, stamped on leaderboard entries
    clock: fn() -> f64,
    /// Pending input for the next tick
    input: TickInput,
    shake_enabled: bool,
    /// Leaderboard place of the last finished run
    last_place: Option<usize>,
}

impl<S: ScoreStore, A: AudioSink> Game<S, A> {
    /// Load persisted records and sit in the menu
    pub fn new(seed: u64, config: SimConfig, store: S, audio: A) -> Self {
        let high_score = store.load_high_score();
        let stats = store.load_stats();
        log::info!(
            "Loaded records: high score {high_score}, {} games played",
            stats.games_played
        );
        Self {
            state: GameState::new(seed, config).with_records(high_score, stats),
            store,
            audio,
            clock: platform::now_ms,
            input: TickInput::default(),
            shake_enabled: true,
            last_place: None,
        }
    }

    /// Replace the wall clock used for leaderboard timestamps
    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self
    }

    /// Difficulty and character take effect on the next session start
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.config.difficulty = settings.difficulty;
        self.state.config.character = settings.character;
        self.shake_enabled = settings.effective_screen_shake();
    }

    /// Start (or restart) a session from any phase. In idle mode the run is
    /// a demo and leaves the records alone.
    pub fn start(&mut self) {
        self.input = TickInput {
            idle_mode: self.input.idle_mode,
            ..Default::default()
        };
        if self.input.idle_mode {
            self.state.start_demo();
        } else {
            self.state.start_session();
        }
        log::info!(
            "{} started ({}, {})",
            if self.state.demo { "Demo" } else { "Session" },
            self.state.config.difficulty.name(),
            self.state.config.character.id()
        );
        self.dispatch_events();
    }

    /// Queue a flap for the next tick
    pub fn flap(&mut self) {
        self.input.flap = true;
    }

    /// Queue a pause toggle for the next tick
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn go_to_menu(&mut self) {
        self.input = TickInput::default();
        self.state.go_to_menu();
    }

    /// Let the autopilot fly
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Run one tick, react to its events and return them
    pub fn update(&mut self) -> Vec<GameEvent> {
        tick(&mut self.state, &self.input);
        // Clear one-shot inputs
        self.input.flap = false;
        self.input.pause = false;
        self.dispatch_events()
    }

    fn dispatch_events(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            for cue in sound_cues(event) {
                self.audio.play(*cue);
            }
            if let GameEvent::SessionEnded(summary) = event {
                self.record_session(summary);
            }
        }
        events
    }

    fn record_session(&mut self, summary: &SessionSummary) {
        if summary.demo {
            log::debug!("Demo over: score {}, {} frames", summary.score, summary.frames);
            return;
        }

        if summary.new_high_score {
            self.store.save_high_score(summary.score);
            log::info!(
                "New high score: {} (was {})",
                summary.score,
                summary.previous_high_score
            );
        }

        self.last_place = self.store.append_score(ScoreEntry {
            score: summary.score,
            character: summary.character,
            difficulty: summary.difficulty,
            coins: summary.coins,
            best_combo: summary.best_streak,
            timestamp: (self.clock)(),
        });
        self.store.save_stats(&self.state.stats);

        log::info!(
            "Game over: score {}, coins {}, best streak {}, {} frames",
            summary.score,
            summary.coins,
            summary.best_streak,
            summary.frames
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn last_place(&self) -> Option<usize> {
        self.last_place
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            bird: &state.bird,
            pipes: &state.pipes,
            power_ups: &state.power_ups,
            particles: &state.particles,
            floaters: &state.floaters,
            shake_offset: if self.shake_enabled {
                state.shake.offset
            } else {
                Vec2::ZERO
            },
            hud: self.hud(),
        }
    }

    pub fn hud(&self) -> Hud {
        let state = &self.state;
        Hud {
            score: state.score,
            high_score: state.high_score,
            coins: state.coins,
            combo_multiplier: state.combo_multiplier,
            streak: state.streak,
            difficulty: state.config.difficulty.name(),
            rank: rank_for(state.score),
            rank_progress: rank_progress(state.score),
            modifiers: state
                .modifiers
                .iter()
                .map(|(modifier, active)| ModifierView {
                    modifier,
                    icon: modifier.icon(),
                    remaining: active.remaining,
                    label: format!("{} {}s", modifier.icon(), active.remaining.div_ceil(10)),
                })
                .collect(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub floaters: &'a [ScoreFloater],
    pub shake_offset: Vec2,
    pub hud: Hud,
}

/// Session counters for the overlay
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub coins: u64,
    pub combo_multiplier: f32,
    pub streak: u32,
    pub difficulty: &'static str,
    pub rank: &'static Rank,
    /// Percent toward the next rank
    pub rank_progress: f32,
    pub modifiers: Vec<ModifierView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierView {
    pub modifier: Modifier,
    pub icon: &'static str,
    /// Ticks left
    pub remaining: u32,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::persistence::{KeyValueStore, MemoryStore, Persistence, keys};
    use crate::sim::Difficulty;

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    fn tall_config() -> SimConfig {
        SimConfig {
            canvas_height: 2000.0,
            ..Default::default()
        }
    }

    fn game_with(store: MemoryStore) -> Game<Persistence<MemoryStore>, Recorder> {
        Game::new(7, tall_config(), Persistence::new(store), Recorder::default())
            .with_clock(|| 1_234.0)
    }

    fn run_until_over(game: &mut Game<Persistence<MemoryStore>, Recorder>) {
        for _ in 0..10_000 {
            if game.phase() == GamePhase::GameOver {
                return;
            }
            game.update();
        }
        panic!("session never ended");
    }

    #[test]
    fn test_session_end_to_end() {
        let mut store = MemoryStore::new();
        store.set(keys::HIGH_SCORE, "5");
        let mut game = game_with(store);
        assert_eq!(game.state().high_score, 5);
        assert_eq!(game.phase(), GamePhase::Menu);

        game.start();
        for _ in 0..160 {
            game.update();
        }
        assert_eq!(game.state().frame_count, 160);
        assert_eq!(game.state().pipes.len(), 1);

        run_until_over(&mut game);
        let state = game.state();
        assert!(state.bird.y > state.config.canvas_height);
        assert_eq!(state.score, 0);

        // Not beaten, so the stored value stays
        assert_eq!(game.store().load_high_score(), 5);
        let board = game.store().load_top_scores();
        assert_eq!(board.len(), 1);
        assert_eq!(board.entries()[0].timestamp, 1_234.0);
        assert_eq!(game.last_place(), Some(1));

        let stats = game.store().load_stats();
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.longest_session, state.frame_count);
    }

    #[test]
    fn test_high_score_saved_when_beaten() {
        let mut game = game_with(MemoryStore::new());
        game.start();
        game.update();
        game.state.score = 7;
        run_until_over(&mut game);

        assert_eq!(game.store().load_high_score(), 7);
        assert_eq!(game.store().load_stats().games_won, 1);
        assert_eq!(game.store().load_top_scores().top_score(), Some(7));
    }

    #[test]
    fn test_idle_run_not_recorded() {
        let mut store = MemoryStore::new();
        store.set(keys::HIGH_SCORE, "5");
        let mut game = game_with(store);
        game.set_idle_mode(true);
        game.start();
        assert!(game.state().demo);
        game.update();
        game.state.score = 9;
        game.state.bird.y = 5_000.0;
        run_until_over(&mut game);

        assert_eq!(game.state().high_score, 5);
        assert_eq!(game.store().load_high_score(), 5);
        assert!(game.store().load_top_scores().is_empty());
        assert_eq!(game.last_place(), None);
        assert_eq!(game.store().store().get(keys::STATS), None);
        assert_eq!(game.state().stats.games_played, 0);

        // A real run afterwards is recorded as usual
        game.set_idle_mode(false);
        game.start();
        assert!(!game.state().demo);
        run_until_over(&mut game);
        assert_eq!(game.store().load_stats().games_played, 1);
        assert_eq!(game.store().load_top_scores().len(), 1);
    }

    #[test]
    fn test_flap_is_one_shot() {
        let mut game = game_with(MemoryStore::new());
        game.start();
        game.flap();
        let events = game.update();
        assert!(events.contains(&GameEvent::Flapped));
        assert!(game.audio_mut().0.contains(&SoundEffect::Flap));

        let events = game.update();
        assert!(!events.contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut game = game_with(MemoryStore::new());
        game.start();
        game.update();
        game.toggle_pause();
        game.update();
        assert_eq!(game.phase(), GamePhase::Paused);
        let frames = game.state().frame_count;
        for _ in 0..10 {
            game.update();
        }
        assert_eq!(game.state().frame_count, frames);

        game.toggle_pause();
        game.update();
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_settings_apply_on_next_start() {
        let mut game = game_with(MemoryStore::new());
        let settings = Settings {
            difficulty: Difficulty::Hard,
            reduced_motion: true,
            ..Default::default()
        };
        game.apply_settings(&settings);
        game.start();
        assert_eq!(game.state().config.difficulty, Difficulty::Hard);
        assert_eq!(game.hud().difficulty, "Hard");
        assert_eq!(game.snapshot().shake_offset, Vec2::ZERO);
    }

    #[test]
    fn test_hud_modifier_labels() {
        let mut game = game_with(MemoryStore::new());
        game.start();
        game.state.modifiers.activate(Modifier::Shield);
        game.update();

        let hud = game.hud();
        assert_eq!(hud.rank.name, "Rookie");
        assert_eq!(hud.modifiers.len(), 1);
        assert_eq!(hud.modifiers[0].remaining, 299);
        assert_eq!(hud.modifiers[0].label, "🛡 30s");
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = game_with(MemoryStore::new());
        game.start();
        game.update();
        let json = serde_json::to_string(&game.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"playing\""));
        assert!(json.contains("\"highScore\""));
    }
}
