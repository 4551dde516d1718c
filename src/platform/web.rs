//! Browser entry point
//!
//! The page's JS owns the canvas and the `requestAnimationFrame` loop; it
//! calls into [`WebGame`] once per frame and paints the JSON snapshot.

use wasm_bindgen::prelude::*;

use super::{Command, command_for_key};
use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::game::Game;
use crate::persistence::{KeyValueStore, LocalStore, MemoryStore, Persistence, ScoreStore};
use crate::settings::Settings;
use crate::sim::{Character, Difficulty, SimConfig};

/// LocalStorage when the browser allows it, memory otherwise
enum Backend {
    Local(LocalStore),
    Memory(MemoryStore),
}

impl Backend {
    fn open() -> Self {
        match LocalStore::open() {
            Some(store) => Backend::Local(store),
            None => {
                log::warn!("LocalStorage unavailable - records will not persist");
                Backend::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for Backend {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Backend::Local(store) => store.get(key),
            Backend::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match self {
            Backend::Local(store) => store.set(key, value),
            Backend::Memory(store) => store.set(key, value),
        }
    }
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    game: Game<Persistence<Backend>, AudioManager>,
    settings: Settings,
    settings_store: Backend,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_width: f32, canvas_height: f32) -> WebGame {
        console_error_panic_hook::set_once();
        // Already initialized when the page builds a second handle
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Ultimate starting...");

        let settings_store = Backend::open();
        let settings = Settings::load(&settings_store);

        let config = SimConfig {
            canvas_width,
            canvas_height,
            difficulty: settings.difficulty,
            character: settings.character,
            ..Default::default()
        };
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, config, Persistence::new(Backend::open()), audio);
        game.apply_settings(&settings);

        WebGame {
            game,
            settings,
            settings_store,
        }
    }

    pub fn start(&mut self) {
        self.game.audio_mut().resume();
        self.game.start();
    }

    pub fn flap(&mut self) {
        self.game.flap();
    }

    pub fn toggle_pause(&mut self) {
        self.game.toggle_pause();
    }

    pub fn go_to_menu(&mut self) {
        self.game.go_to_menu();
    }

    /// Feed a `KeyboardEvent.code`; returns whether it was handled
    pub fn key_down(&mut self, code: &str) -> bool {
        match command_for_key(code) {
            Some(Command::Flap) => self.game.flap(),
            Some(Command::TogglePause) => self.game.toggle_pause(),
            None => return false,
        }
        true
    }

    /// Attract mode for the title screen
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.game.set_idle_mode(idle);
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.game.update();
    }

    /// Render state for this frame as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    pub fn top_scores_json(&self) -> String {
        serde_json::to_string(&self.game.store().load_top_scores()).unwrap_or_default()
    }

    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.game.state().stats).unwrap_or_default()
    }

    pub fn settings_json(&self) -> String {
        serde_json::to_string(&self.settings).unwrap_or_default()
    }

    /// Returns `false` for an unknown id
    pub fn set_difficulty(&mut self, id: &str) -> bool {
        let Some(difficulty) = Difficulty::from_id(id) else {
            return false;
        };
        self.settings.difficulty = difficulty;
        self.commit_settings();
        true
    }

    /// Returns `false` for an unknown id
    pub fn set_character(&mut self, id: &str) -> bool {
        let Some(character) = Character::from_id(id) else {
            return false;
        };
        self.settings.character = character;
        self.commit_settings();
        true
    }

    pub fn set_volumes(&mut self, master: f32, music: f32, sfx: f32) {
        self.settings.set_master_volume(master);
        self.settings.set_music_volume(music);
        self.settings.set_sfx_volume(sfx);
        self.commit_settings();
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        self.commit_settings();
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.settings.music_enabled = enabled;
        self.commit_settings();
    }

    pub fn set_screen_shake(&mut self, enabled: bool) {
        self.settings.screen_shake = enabled;
        self.commit_settings();
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.settings.reduced_motion = enabled;
        self.commit_settings();
    }

    /// Menu button feedback
    pub fn click(&mut self) {
        self.game.audio_mut().play(SoundEffect::ButtonClick);
    }
}

impl WebGame {
    fn commit_settings(&mut self) {
        self.settings.save(&mut self.settings_store);
        self.game.audio_mut().apply_settings(&self.settings);
        self.game.apply_settings(&self.settings);
    }
}
