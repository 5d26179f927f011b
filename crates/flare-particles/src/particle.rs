//! Particle state and per-tick integration

use flare_core::{Color, Vec2};
use serde::{Deserialize, Serialize};

/// What produced a particle. Physics ignores it; renderers and stats may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Message,
    Ambient,
}

/// Velocity update applied after every position step.
///
/// `friction` scales the velocity, then `gravity` is added to `vy`
/// (surface space, positive is down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub gravity: f32,
    pub friction: f32,
}

impl Motion {
    /// Pure drift: velocity never changes
    pub const DRIFT: Self = Self {
        gravity: 0.0,
        friction: 1.0,
    };

    pub const fn new(gravity: f32, friction: f32) -> Self {
        Self { gravity, friction }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::DRIFT
    }
}

/// A single decaying point-mass
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub radius: f32,
    pub motion: Motion,
    pub kind: ParticleKind,
    age: u32,
    lifespan: u32,
}

impl Particle {
    /// Create a live particle. A zero lifespan is raised to one tick.
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        color: Color,
        lifespan: u32,
        radius: f32,
        kind: ParticleKind,
    ) -> Self {
        Self {
            position,
            velocity,
            color,
            radius,
            motion: Motion::DRIFT,
            kind,
            age: 0,
            lifespan: lifespan.max(1),
        }
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Step position by velocity, apply the motion rule, and age one tick
    pub fn advance(&mut self) {
        self.position += self.velocity;
        self.velocity = self.velocity * self.motion.friction;
        self.velocity.y += self.motion.gravity;
        self.age = self.age.saturating_add(1);
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.lifespan
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    /// Normalized age in [0, 1]
    pub fn age_ratio(&self) -> f32 {
        (self.age as f32 / self.lifespan as f32).min(1.0)
    }

    /// Linear fade: 1 at birth, 0 at the end of life
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age_ratio()).clamp(0.0, 1.0)
    }

    /// Base color with the current fade applied as alpha
    pub fn render_color(&self) -> Color {
        self.color.with_alpha(self.opacity())
    }
}
