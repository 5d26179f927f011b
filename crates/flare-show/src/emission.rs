//! Emission strategies: message formations and ambient bursts

use crate::config::{AmbientStyle, MessageStyle};
use flare_core::{Color, RandomSource, Vec2, Viewport};
use flare_particles::{Particle, ParticleKind, ParticlePool};
use flare_text::{Formation, TextRasterizer};
use std::f32::consts::TAU;

/// Turns a message into long-lived, slowly drifting particles
#[derive(Debug, Clone)]
pub struct MessageEmitter {
    style: MessageStyle,
}

impl MessageEmitter {
    pub fn new(style: MessageStyle) -> Self {
        Self { style }
    }

    /// Rasterize `text` and add one particle per sampled point.
    /// Returns the number of particles added (0 for blank text).
    pub fn emit(
        &self,
        rasterizer: &mut dyn TextRasterizer,
        text: &str,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
        pool: &mut ParticlePool,
    ) -> usize {
        let formation = rasterizer.rasterize(text, viewport, rng);
        self.spawn_formation(&formation, rng, pool)
    }

    /// Add one particle per point of an already rasterized formation
    pub fn spawn_formation(
        &self,
        formation: &Formation,
        rng: &mut dyn RandomSource,
        pool: &mut ParticlePool,
    ) -> usize {
        let s = &self.style;
        for point in formation.absolute_points() {
            let position = point + Vec2::new(rng.centered() * s.jitter, rng.centered() * s.jitter);
            let velocity = Vec2::new(rng.centered() * s.drift, rng.centered() * s.drift);
            let radius = rng.range(s.radius_min, s.radius_max);
            pool.add(
                Particle::new(
                    position,
                    velocity,
                    s.color,
                    s.lifespan,
                    radius,
                    ParticleKind::Message,
                )
                .with_motion(s.motion),
            );
        }
        formation.len()
    }
}

/// Radial explosions from random points in the upper-middle of the sky
#[derive(Debug, Clone)]
pub struct AmbientEmitter {
    style: AmbientStyle,
}

impl AmbientEmitter {
    pub fn new(style: AmbientStyle) -> Self {
        Self { style }
    }

    pub fn enabled(&self) -> bool {
        self.style.enabled
    }

    /// Random burst center for the viewport
    pub fn pick_center(&self, viewport: Viewport, rng: &mut dyn RandomSource) -> Vec2 {
        let s = &self.style;
        Vec2::new(
            rng.next_f32() * viewport.width,
            rng.range(s.vertical_min, s.vertical_max) * viewport.height,
        )
    }

    /// Emit one burst; returns the number of particles added
    pub fn burst(
        &self,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
        pool: &mut ParticlePool,
    ) -> usize {
        let center = self.pick_center(viewport, rng);
        self.burst_at(center, rng, pool)
    }

    /// Emit one burst from a fixed center
    pub fn burst_at(
        &self,
        center: Vec2,
        rng: &mut dyn RandomSource,
        pool: &mut ParticlePool,
    ) -> usize {
        let s = &self.style;
        let count = rng.range_inclusive(s.count_min, s.count_max) as usize;
        for _ in 0..count {
            let angle = rng.range(0.0, TAU);
            let speed = rng.range(s.speed_min, s.speed_max);
            let color = if s.palette.is_empty() {
                Color::WHITE
            } else {
                s.palette[rng.index(s.palette.len())]
            };
            let lifespan = rng.range_inclusive(s.lifespan_min, s.lifespan_max);
            let radius = rng.range(s.radius_min, s.radius_max);
            pool.add(
                Particle::new(
                    center,
                    Vec2::from_angle(angle) * speed,
                    color,
                    lifespan,
                    radius,
                    ParticleKind::Ambient,
                )
                .with_motion(s.motion),
            );
        }
        log::trace!("ambient burst of {count} at ({:.0}, {:.0})", center.x, center.y);
        count
    }
}
