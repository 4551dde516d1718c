//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. Entities never point back
//! at the state; the tick owns all mutation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::{Particle, ScoreFloater, ScreenShake};
use super::modifiers::{ActiveModifiers, Modifier, PowerUpKind};
use crate::consts::*;
use crate::wrap_phase;

/// Stream offset for the cosmetic RNG so visual effects never shift gameplay draws
const FX_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Run ended
    GameOver,
}

/// Difficulty profile: gap size and pipe spawn cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    VeryEasy,
    #[default]
    Easy,
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::VeryEasy,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "veryeasy",
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "Very Easy",
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.to_lowercase();
        Self::ALL.into_iter().find(|d| d.id() == id)
    }

    /// Vertical opening of each pipe pair
    pub fn gap_size(&self) -> f32 {
        match self {
            Difficulty::VeryEasy => 200.0,
            Difficulty::Easy => 180.0,
            Difficulty::Normal => 150.0,
            Difficulty::Hard => 120.0,
            Difficulty::Extreme => 100.0,
        }
    }

    /// Frames between pipe spawns
    pub fn spawn_rate(&self) -> u64 {
        match self {
            Difficulty::VeryEasy => 180,
            Difficulty::Easy => 160,
            Difficulty::Normal => 140,
            Difficulty::Hard => 120,
            Difficulty::Extreme => 100,
        }
    }
}

/// Bird skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    #[default]
    Classic,
    Golden,
    Ninja,
    Magnet,
    Ghost,
    Eagle,
    Penguin,
    Hummingbird,
    Phoenix,
    Robot,
    Robin,
}

/// Body and wing colors for a skin (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub body: u32,
    pub wing: u32,
}

impl Character {
    pub const ALL: [Character; 11] = [
        Character::Classic,
        Character::Golden,
        Character::Ninja,
        Character::Magnet,
        Character::Ghost,
        Character::Eagle,
        Character::Penguin,
        Character::Hummingbird,
        Character::Phoenix,
        Character::Robot,
        Character::Robin,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Character::Classic => "classic",
            Character::Golden => "golden",
            Character::Ninja => "ninja",
            Character::Magnet => "magnet",
            Character::Ghost => "ghost",
            Character::Eagle => "eagle",
            Character::Penguin => "penguin",
            Character::Hummingbird => "hummingbird",
            Character::Phoenix => "phoenix",
            Character::Robot => "robot",
            Character::Robin => "robin",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.to_lowercase();
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn palette(&self) -> Palette {
        let (body, wing) = match self {
            Character::Classic => (0xFFD700, 0xFFA500),
            Character::Golden => (0xFFD700, 0xFFB700),
            Character::Ninja => (0x333333, 0x555555),
            Character::Magnet => (0xFF69B4, 0xFF1493),
            Character::Ghost => (0xE0E0E0, 0xB0B0B0),
            Character::Eagle => (0x8B4513, 0x654321),
            Character::Penguin => (0x000000, 0x333333),
            Character::Hummingbird => (0x4CAF50, 0x45A049),
            Character::Phoenix => (0xFF6347, 0xFF4500),
            Character::Robot => (0xC0C0C0, 0x808080),
            Character::Robin => (0xE07856, 0x4A8B7C),
        };
        Palette { body, wing }
    }
}

/// Per-session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub difficulty: Difficulty,
    pub character: Character,
    /// Global pace applied to pipe speed
    pub speed_multiplier: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            difficulty: Difficulty::default(),
            character: Character::default(),
            speed_multiplier: GAME_SPEED_MULTIPLIER,
        }
    }
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity (positive is down)
    pub velocity: f32,
    /// Tilt in radians, within [-π/6, π/6]
    pub rotation: f32,
    /// Wing animation phase
    pub wing_phase: f32,
    pub character: Character,
}

impl Bird {
    pub fn new(character: Character) -> Self {
        Self {
            x: BIRD_X,
            y: BIRD_START_Y,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            velocity: 0.0,
            rotation: 0.0,
            wing_phase: 0.0,
            character,
        }
    }

    /// Advance one tick of gravity and animation
    pub fn update(&mut self) {
        self.velocity = (self.velocity + BIRD_GRAVITY).min(BIRD_MAX_VELOCITY);
        self.y += self.velocity;
        self.rotation = (self.rotation + BIRD_ROTATION_STEP).min(BIRD_MAX_TILT);
        self.wing_phase = wrap_phase(self.wing_phase + BIRD_WING_STEP);
    }

    /// Jump: velocity is replaced, not added to
    pub fn flap(&mut self) {
        self.velocity = BIRD_FLAP_IMPULSE;
        self.rotation = -BIRD_MAX_TILT;
        self.wing_phase = -std::f32::consts::FRAC_PI_4;
    }

    /// Box centered on the bird's position
    pub fn bounds(&self) -> Aabb {
        Aabb::centered(Vec2::new(self.x, self.y), self.width, self.height)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A top/bottom pipe pair with a gap between
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Top of the gap
    pub gap: f32,
    pub gap_size: f32,
    pub width: f32,
    /// Pixels per tick, rewritten by the tick before each move
    pub speed: f32,
    /// Set once the bird clears the right edge; scores exactly once
    pub passed: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, gap: f32, gap_size: f32) -> Self {
        Self {
            id,
            x,
            gap,
            gap_size,
            width: PIPE_WIDTH,
            speed: PIPE_BASE_SPEED,
            passed: false,
        }
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom of the gap
    #[inline]
    pub fn gap_end(&self) -> f32 {
        self.gap + self.gap_size
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

/// A collectible drifting toward the bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Center
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Cosmetic spin
    pub rotation: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: POWERUP_SIZE,
            speed: POWERUP_SPEED,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.pos.x -= self.speed;
        self.rotation = wrap_phase(self.rotation + POWERUP_SPIN);
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size < 0.0
    }
}

/// Cumulative counters across sessions (persisted)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionStats {
    pub games_played: u64,
    pub total_score: u64,
    pub total_coins: u64,
    /// Sessions that set a new high score
    pub games_won: u64,
    pub best_combo: u32,
    /// Longest session, in frames
    pub longest_session: u64,
    pub pipes_avoided: u64,
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    Paused,
    Resumed,
    Flapped,
    PointScored { points: u64, streak: u32 },
    ComboMilestone { streak: u32 },
    /// Unprotected hit, the run is over
    Collision,
    ShieldAbsorbed,
    GhostPhased { uses_left: u32 },
    CoinCollected { amount: u64 },
    PowerUpCollected(Modifier),
    SessionEnded(SessionSummary),
}

/// Final numbers of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub score: u64,
    pub coins: u64,
    pub best_streak: u32,
    pub frames: u64,
    pub previous_high_score: u64,
    pub new_high_score: bool,
    pub difficulty: Difficulty,
    pub character: Character,
    /// Autopilot run; records were left untouched
    pub demo: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay draws: gap offsets, power-up spawns
    pub(crate) rng: Pcg32,
    /// Cosmetic draws: particles, floaters, shake
    pub(crate) fx_rng: Pcg32,
    pub config: SimConfig,
    pub phase: GamePhase,
    /// Autopilot attract run that never touches the records
    pub demo: bool,
    /// Ticks since the session started
    pub frame_count: u64,
    pub score: u64,
    pub coins: u64,
    /// Consecutive pipes passed
    pub streak: u32,
    /// Best streak this session
    pub best_streak: u32,
    pub combo_multiplier: f32,
    pub high_score: u64,
    pub stats: SessionStats,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub power_ups: Vec<PowerUp>,
    pub modifiers: ActiveModifiers,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub floaters: Vec<ScoreFloater>,
    pub shake: ScreenShake,
    /// Events recorded since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a state sitting in the menu
    pub fn new(seed: u64, config: SimConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_STREAM),
            config,
            phase: GamePhase::Menu,
            demo: false,
            frame_count: 0,
            score: 0,
            coins: 0,
            streak: 0,
            best_streak: 0,
            combo_multiplier: 1.0,
            high_score: 0,
            stats: SessionStats::default(),
            bird: Bird::new(config.character),
            pipes: Vec::new(),
            power_ups: Vec::new(),
            modifiers: ActiveModifiers::default(),
            particles: Vec::new(),
            floaters: Vec::new(),
            shake: ScreenShake::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed the persisted records loaded by the driver
    pub fn with_records(mut self, high_score: u64, stats: SessionStats) -> Self {
        self.high_score = high_score;
        self.stats = stats;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything session-scoped and enter `Playing`.
    /// Valid from any phase (menu start, retry, restart from pause).
    pub fn start_session(&mut self) {
        self.reset_session(false);
    }

    /// Like [`GameState::start_session`], but the run is not counted in the
    /// stats and cannot set a high score
    pub fn start_demo(&mut self) {
        self.reset_session(true);
    }

    fn reset_session(&mut self, demo: bool) {
        self.bird = Bird::new(self.config.character);
        self.pipes.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.floaters.clear();
        self.modifiers.clear();
        self.score = 0;
        self.coins = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.combo_multiplier = 1.0;
        self.frame_count = 0;
        self.shake = ScreenShake::default();
        self.demo = demo;
        if !demo {
            self.stats.games_played += 1;
        }
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::SessionStarted);
    }

    /// Playing ⇄ Paused; ignored in other phases
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    /// Abandon whatever is running and show the title screen
    pub fn go_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pipe speed for the current tick
    pub fn pipe_speed(&self) -> f32 {
        PIPE_BASE_SPEED * self.config.speed_multiplier * self.modifiers.time_scale()
    }
}
