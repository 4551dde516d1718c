//! Fixed-step simulation tick
//!
//! Core game loop that advances a session one frame. The step order inside
//! [`tick`] is load-bearing: later steps read state written by earlier ones.

use glam::Vec2;
use rand::Rng;

use super::collision::{bird_pipe_collision, within_pickup_range};
use super::effects::{self, ScoreFloater};
use super::modifiers::{Modifier, PowerUpKind};
use super::state::{GameEvent, GamePhase, GameState, Pipe, PowerUp, SessionSummary};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (click/tap/space)
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot flies the bird
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.toggle_pause();
    }

    // Menu, pause and game over freeze everything
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.flap || (input.idle_mode && autopilot_wants_flap(state)) {
        state.bird.flap();
        state.events.push(GameEvent::Flapped);
    }

    state.frame_count += 1;
    state.shake.step(&mut state.fx_rng);

    state.bird.update();

    for floater in &mut state.floaters {
        floater.update();
    }
    state.floaters.retain(|f| !f.is_faded());

    if state.bird.y > state.config.canvas_height || state.bird.y < 0.0 {
        end_session(state);
        return;
    }

    if state.frame_count % state.config.difficulty.spawn_rate() == 0 {
        spawn_pipe(state);
    }

    if !update_pipes(state) {
        return;
    }

    update_power_ups(state);

    state.modifiers.tick_down();

    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());

    if roll_power_up_spawn(&mut state.rng) {
        spawn_power_up(state);
    }
}

/// Combo multiplier in tenths for a streak: 1.0 + 0.1 per pass, capped at 3.0
pub fn combo_tenths(streak: u32) -> u32 {
    COMBO_BASE_TENTHS.saturating_add(streak).min(COMBO_MAX_TENTHS)
}

pub fn combo_multiplier(streak: u32) -> f32 {
    combo_tenths(streak) as f32 / 10.0
}

/// Random gap top within `[margin, height - gap_size - margin]`.
///
/// A canvas too short for both margins gets a centered gap instead.
pub fn gap_offset<R: Rng>(rng: &mut R, canvas_height: f32, gap_size: f32) -> f32 {
    let min_gap = PIPE_GAP_MARGIN;
    let max_gap = canvas_height - gap_size - PIPE_GAP_MARGIN;
    if max_gap <= min_gap {
        return ((canvas_height - gap_size) / 2.0).max(0.0);
    }
    let gap = rng.random::<f32>() * (max_gap - min_gap) + min_gap;
    gap.clamp(min_gap, max_gap)
}

/// Push a fresh pipe pair at the right edge
pub fn spawn_pipe(state: &mut GameState) {
    let gap_size = state.config.difficulty.gap_size();
    let gap = gap_offset(&mut state.rng, state.config.canvas_height, gap_size);
    let id = state.next_entity_id();
    state
        .pipes
        .push(Pipe::new(id, state.config.canvas_width, gap, gap_size));
}

/// Per-tick chance that a collectible appears
pub fn roll_power_up_spawn<R: Rng>(rng: &mut R) -> bool {
    rng.random::<f64>() < POWERUP_SPAWN_CHANCE
}

/// 40% coins, the rest split evenly across the modifiers
pub fn roll_power_up_kind<R: Rng>(rng: &mut R) -> PowerUpKind {
    if rng.random::<f64>() < COIN_SPAWN_SHARE {
        PowerUpKind::Coin
    } else {
        let index = rng.random_range(0..Modifier::ALL.len());
        PowerUpKind::Boost(Modifier::ALL[index])
    }
}

/// Push a random collectible at the right edge
pub fn spawn_power_up(state: &mut GameState) {
    let kind = roll_power_up_kind(&mut state.rng);
    let span = (state.config.canvas_height - 2.0 * POWERUP_SPAWN_MARGIN).max(0.0);
    let y = state.rng.random::<f32>() * span + POWERUP_SPAWN_MARGIN;
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp::new(
        id,
        kind,
        Vec2::new(state.config.canvas_width, y),
    ));
}

/// Install a modifier from a pickup. Coins never come through here.
pub fn activate_power_up(state: &mut GameState, modifier: Modifier) {
    state.modifiers.activate(modifier);
    if modifier == Modifier::Shield {
        effects::explosion(&mut state.particles, state.bird.pos(), &mut state.fx_rng);
    }
    state.events.push(GameEvent::PowerUpCollected(modifier));
}

/// Move, collide, score and cull pipes. Returns `false` if the run ended.
fn update_pipes(state: &mut GameState) -> bool {
    let speed = state.pipe_speed();
    let mut pipes = std::mem::take(&mut state.pipes);
    let mut crashed = false;

    // Newest pipe first
    for pipe in pipes.iter_mut().rev() {
        pipe.speed = speed;
        pipe.update();

        if bird_pipe_collision(&state.bird.bounds(), pipe) && !absorb_hit(state) {
            crashed = true;
            break;
        }

        if !pipe.passed && pipe.right() < state.bird.x {
            pipe.passed = true;
            award_pass(state);
        }
    }

    if crashed {
        state.pipes = pipes;
        crash(state);
        return false;
    }

    pipes.retain(|p| !p.is_off_screen());
    state.pipes = pipes;
    true
}

/// Let a shield or ghost eat a hit. Shield goes first.
fn absorb_hit(state: &mut GameState) -> bool {
    if state.modifiers.remove(Modifier::Shield).is_some() {
        effects::explosion(&mut state.particles, state.bird.pos(), &mut state.fx_rng);
        // Keeps the current intensity. Shake resets each session and only a
        // crash sets one, so this counts frames without moving the camera.
        state.shake.trigger(5, None, &mut state.fx_rng);
        state.events.push(GameEvent::ShieldAbsorbed);
        true
    } else if state.modifiers.is_active(Modifier::Ghost) {
        let uses_left = state.modifiers.spend_ghost();
        state.events.push(GameEvent::GhostPhased { uses_left });
        true
    } else {
        false
    }
}

fn award_pass(state: &mut GameState) {
    state.streak += 1;
    state.best_streak = state.best_streak.max(state.streak);

    let tenths = combo_tenths(state.streak);
    state.combo_multiplier = tenths as f32 / 10.0;
    let points = u64::from(state.modifiers.points_per_pass() * tenths / 10);
    state.score += points;

    if !state.demo {
        state.stats.pipes_avoided += 1;
        state.stats.best_combo = state.stats.best_combo.max(state.streak);
    }

    let bird = state.bird.pos();
    effects::score_burst(&mut state.particles, bird);
    state
        .floaters
        .push(ScoreFloater::new(bird, format!("+{points}"), &mut state.fx_rng));
    state.events.push(GameEvent::PointScored {
        points,
        streak: state.streak,
    });

    if state.streak % COMBO_MILESTONE == 0 {
        let center = Vec2::new(
            state.config.canvas_width / 2.0,
            state.config.canvas_height / 2.0,
        );
        effects::combo_burst(&mut state.particles, center, &mut state.fx_rng);
        state.floaters.push(ScoreFloater::new(
            center,
            format!("COMBO x{}!", state.streak),
            &mut state.fx_rng,
        ));
        state.events.push(GameEvent::ComboMilestone {
            streak: state.streak,
        });
    }
}

fn update_power_ups(state: &mut GameState) {
    let mut power_ups = std::mem::take(&mut state.power_ups);
    power_ups.retain_mut(|power_up| {
        power_up.update();
        if within_pickup_range(power_up.pos, state.bird.pos(), POWERUP_PICKUP_RANGE) {
            collect(state, power_up.kind, power_up.pos);
            return false;
        }
        !power_up.is_off_screen()
    });
    state.power_ups = power_ups;
}

fn collect(state: &mut GameState, kind: PowerUpKind, pos: Vec2) {
    let label = match kind.modifier() {
        None => {
            state.coins += COIN_REWARD;
            state.events.push(GameEvent::CoinCollected {
                amount: COIN_REWARD,
            });
            format!("+{COIN_REWARD} 🪙")
        }
        Some(modifier) => {
            activate_power_up(state, modifier);
            format!("+{}", modifier.as_str())
        }
    };
    effects::power_up_burst(&mut state.particles, pos);
    state
        .floaters
        .push(ScoreFloater::new(pos, label, &mut state.fx_rng));
}

fn crash(state: &mut GameState) {
    state.events.push(GameEvent::Collision);
    effects::explosion(&mut state.particles, state.bird.pos(), &mut state.fx_rng);
    state.shake.trigger(10, Some(5.0), &mut state.fx_rng);
    end_session(state);
}

/// Enter game over and fold the run into the records. Demo runs leave
/// the records alone.
fn end_session(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    effects::explosion(&mut state.particles, state.bird.pos(), &mut state.fx_rng);

    let previous_high_score = state.high_score;
    let new_high_score = !state.demo && state.score > previous_high_score;
    if new_high_score {
        state.high_score = state.score;
        state.stats.games_won += 1;
    }
    if !state.demo {
        state.stats.total_score += state.score;
        state.stats.total_coins += state.coins;
        state.stats.longest_session = state.stats.longest_session.max(state.frame_count);
    }

    state.streak = 0;
    state.combo_multiplier = 1.0;

    state.events.push(GameEvent::SessionEnded(SessionSummary {
        score: state.score,
        coins: state.coins,
        best_streak: state.best_streak,
        frames: state.frame_count,
        previous_high_score,
        new_high_score,
        difficulty: state.config.difficulty,
        character: state.config.character,
        demo: state.demo,
    }));
}

/// Flap whenever the next step would sink the bird toward the bottom of the
/// next gap
fn autopilot_wants_flap(state: &GameState) -> bool {
    let bird = &state.bird;
    let floor = state
        .pipes
        .iter()
        .filter(|p| p.right() >= bird.x - bird.width / 2.0)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|p| p.gap_end() - bird.height / 2.0 - 4.0)
        .unwrap_or(state.config.canvas_height * 0.5);
    bird.velocity >= 0.0 && bird.y + bird.velocity + BIRD_GRAVITY > floor
}
