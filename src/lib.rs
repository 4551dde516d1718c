//! Flappy Ultimate - a Flappy Bird arcade game with power-ups and combos
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, power-ups, scoring)
//! - `game`: Frame driver wiring the simulation to audio and persistence
//! - `persistence`: Key-value storage and the typed score store
//! - `platform`: Browser/native platform abstraction
//! - `audio`: Sound cue vocabulary and Web Audio playback

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod rank;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{HighScores, ScoreEntry};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 640.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 100.0;
    pub const BIRD_START_Y: f32 = 200.0;
    pub const BIRD_WIDTH: f32 = 30.0;
    pub const BIRD_HEIGHT: f32 = 25.0;
    /// Downward acceleration per tick
    pub const BIRD_GRAVITY: f32 = 0.25;
    /// Velocity set by a flap (overrides, never accumulates)
    pub const BIRD_FLAP_IMPULSE: f32 = -6.0;
    /// Terminal fall speed
    pub const BIRD_MAX_VELOCITY: f32 = 7.0;
    /// Nose-down easing per tick
    pub const BIRD_ROTATION_STEP: f32 = 0.05;
    pub const BIRD_MAX_TILT: f32 = std::f32::consts::FRAC_PI_6;
    pub const BIRD_WING_STEP: f32 = 0.1;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_BASE_SPEED: f32 = 3.0;
    /// Keep gaps at least this far from the top and bottom edges
    pub const PIPE_GAP_MARGIN: f32 = 75.0;
    /// Global pace (0.65 = 35% slower than the classic game)
    pub const GAME_SPEED_MULTIPLIER: f32 = 0.65;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_SPEED: f32 = 3.0;
    pub const POWERUP_SPIN: f32 = 0.05;
    /// Pickup when both |dx| and |dy| are below this
    pub const POWERUP_PICKUP_RANGE: f32 = 30.0;
    /// Vertical margin for power-up spawn positions
    pub const POWERUP_SPAWN_MARGIN: f32 = 40.0;
    /// Per-tick spawn probability
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.015;
    /// Share of spawns that are coins
    pub const COIN_SPAWN_SHARE: f64 = 0.4;
    pub const COIN_REWARD: u64 = 10;

    /// Combo arithmetic (in tenths to keep the floor exact)
    pub const COMBO_BASE_TENTHS: u32 = 10;
    pub const COMBO_MAX_TENTHS: u32 = 30;
    /// Every Nth consecutive pass is a combo milestone
    pub const COMBO_MILESTONE: u32 = 5;

    /// Particle gravity per tick
    pub const PARTICLE_GRAVITY: f32 = 0.2;
}

/// Wrap an angle into (-TAU, TAU), keeping its sign
#[inline]
pub fn wrap_phase(angle: f32) -> f32 {
    angle % std::f32::consts::TAU
}
