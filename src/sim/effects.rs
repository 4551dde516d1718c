//! Cosmetic effects: particles, score floaters and screen shake
//!
//! Nothing here feeds back into gameplay. All randomness comes from the
//! cosmetic RNG stream handed in by the tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::PARTICLE_GRAVITY;

pub const GOLD: u32 = 0xFFD700;
pub const ORANGE: u32 = 0xFFA500;

/// A short-lived point with ballistic motion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// Ticks left
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: u32, life: u32) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            max_life: life,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    /// Fade factor for rendering
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

/// Floating "+N" text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFloater {
    pub pos: Vec2,
    /// Horizontal drift (render only)
    pub vx: f32,
    pub text: String,
    pub alpha: f32,
}

impl ScoreFloater {
    const RISE: f32 = 2.0;
    const FADE: f32 = 0.02;

    pub fn new<R: Rng>(pos: Vec2, text: impl Into<String>, rng: &mut R) -> Self {
        Self {
            pos,
            vx: (rng.random::<f32>() - 0.5) * 2.0,
            text: text.into(),
            alpha: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.pos.y -= Self::RISE;
        self.alpha -= Self::FADE;
    }

    pub fn is_faded(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Camera shake, counted in frames
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub frames: u32,
    pub intensity: f32,
    /// Offset the renderer should apply this frame
    pub offset: Vec2,
}

impl ScreenShake {
    /// Count down one frame and roll this frame's offset
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        self.frames = self.frames.saturating_sub(1);
        self.roll(rng);
    }

    /// Start (or restart) a shake; intensity carries over when `None`
    pub fn trigger<R: Rng>(&mut self, frames: u32, intensity: Option<f32>, rng: &mut R) {
        self.frames = frames;
        if let Some(intensity) = intensity {
            self.intensity = intensity;
        }
        self.roll(rng);
    }

    fn roll<R: Rng>(&mut self, rng: &mut R) {
        self.offset = if self.frames > 0 {
            Vec2::new(
                (rng.random::<f32>() - 0.5) * self.intensity,
                (rng.random::<f32>() - 0.5) * self.intensity,
            )
        } else {
            Vec2::ZERO
        };
    }
}

/// Evenly spaced ring of particles
pub fn radial_burst(
    particles: &mut Vec<Particle>,
    center: Vec2,
    count: u32,
    speed: f32,
    color: u32,
    life: u32,
) {
    for i in 0..count {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        particles.push(Particle::new(center, vel, color, life));
    }
}

/// Gold ring when a pipe is passed
pub fn score_burst(particles: &mut Vec<Particle>, center: Vec2) {
    radial_burst(particles, center, 8, 3.0, GOLD, 30);
}

/// Wider gold ring on pickup
pub fn power_up_burst(particles: &mut Vec<Particle>, center: Vec2) {
    radial_burst(particles, center, 16, 3.5, GOLD, 30);
}

/// Random red/orange spray for crashes and shield pops
pub fn explosion<R: Rng>(particles: &mut Vec<Particle>, center: Vec2, rng: &mut R) {
    for _ in 0..20 {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = 2.0 + rng.random::<f32>() * 4.0;
        let green: u32 = rng.random_range(0..256);
        particles.push(Particle::new(
            center,
            Vec2::new(angle.cos(), angle.sin()) * speed,
            0xFF0000 | (green << 8),
            50,
        ));
    }
}

/// Celebration at a combo milestone
pub fn combo_burst<R: Rng>(particles: &mut Vec<Particle>, center: Vec2, rng: &mut R) {
    for i in 0..25 {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = 2.0 + rng.random::<f32>() * 3.0;
        let color = if i % 2 == 0 { GOLD } else { ORANGE };
        particles.push(Particle::new(
            center,
            Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            50,
        ));
    }
}
