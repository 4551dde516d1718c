//! Player preferences
//!
//! Persisted separately from score records.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, keys, load_json, save_json};
use crate::sim::{Character, Difficulty};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub sound_enabled: bool,
    pub music_enabled: bool,

    // === Gameplay ===
    pub character: Character,
    pub difficulty: Difficulty,

    // === Visual Effects ===
    /// Screen shake on crashes and shield hits
    pub screen_shake: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.7,
            music_volume: 0.5,
            sfx_volume: 0.7,
            sound_enabled: true,
            music_enabled: true,

            character: Character::default(),
            difficulty: Difficulty::default(),

            screen_shake: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Gain applied to a sound effect before its own tone volume
    pub fn sfx_gain(&self) -> f32 {
        if self.sound_enabled {
            self.sfx_volume * self.master_volume
        } else {
            0.0
        }
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = clamp_volume(volume);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = clamp_volume(volume);
    }

    /// Pull volumes back into range after loading hand-edited data
    fn sanitized(mut self) -> Self {
        self.master_volume = clamp_volume(self.master_volume);
        self.music_volume = clamp_volume(self.music_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json::<Settings>(store, keys::SETTINGS) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        save_json(store, keys::SETTINGS, self);
        log::info!("Settings saved");
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}
