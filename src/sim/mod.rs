//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] is one frame)
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod effects;
pub mod modifiers;
pub mod state;
pub mod tick;

pub use collision::{Aabb, bird_pipe_collision, within_pickup_range};
pub use effects::{Particle, ScoreFloater, ScreenShake};
pub use modifiers::{ActiveModifier, ActiveModifiers, Modifier, PowerUpKind};
pub use state::{
    Bird, Character, Difficulty, GameEvent, GamePhase, GameState, Palette, Pipe, PowerUp,
    SessionStats, SessionSummary, SimConfig,
};
pub use tick::{TickInput, activate_power_up, combo_multiplier, spawn_pipe, spawn_power_up, tick};
