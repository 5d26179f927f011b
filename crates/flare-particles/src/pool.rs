//! The set of live particles, advanced, drawn and pruned once per frame

use crate::particle::{Particle, ParticleKind};
use flare_core::Surface;

/// Counters from one pool tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub rendered: usize,
    pub removed: usize,
    pub alive: usize,
}

/// Append-only particle pool.
///
/// There is no capacity limit: every particle has a finite lifespan, so the
/// steady-state size is bounded by emission rate times the longest lifespan.
#[derive(Debug, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    glow: f32,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool whose particles are drawn with a soft halo of radius `glow`
    pub fn with_glow(glow: f32) -> Self {
        Self {
            particles: Vec::new(),
            glow: glow.max(0.0),
        }
    }

    pub fn add(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn count_kind(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Drop every particle
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advance every particle, draw the ones still alive, then drop the
    /// dead ones. Survivors keep their relative order.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> PoolStats {
        let mut rendered = 0;
        for p in &mut self.particles {
            p.advance();
            if p.is_alive() {
                surface.fill_circle(p.position, p.radius, p.render_color(), self.glow);
                rendered += 1;
            }
        }

        let before = self.particles.len();
        self.particles.retain(Particle::is_alive);
        let alive = self.particles.len();

        PoolStats {
            rendered,
            removed: before - alive,
            alive,
        }
    }
}
