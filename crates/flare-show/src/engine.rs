//! Frame driver: one call per display refresh

use crate::config::ShowConfig;
use crate::emission::{AmbientEmitter, MessageEmitter};
use crate::scheduler::BurstScheduler;
use crate::timeline::{Phase, ShowTimeline};
use flare_core::{RandomSource, Surface};
use flare_particles::{ParticlePool, PoolStats};
use flare_runtime::FrameSystem;
use flare_text::TextRasterizer;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub now_ms: f64,
    pub phase: Phase,
    /// Message index emitted this frame, if any
    pub emitted_message: Option<usize>,
    pub message_particles: usize,
    pub ambient_particles: usize,
    pub pool: PoolStats,
}

/// A self-contained show instance.
///
/// Lifecycle: construct, call [`ShowEngine::frame`] once per refresh,
/// optionally [`ShowEngine::reset`], drop. Instances share nothing.
pub struct ShowEngine {
    config: ShowConfig,
    pool: ParticlePool,
    timeline: ShowTimeline,
    bursts: BurstScheduler,
    messages: MessageEmitter,
    ambient: AmbientEmitter,
    rasterizer: Box<dyn TextRasterizer>,
    rng: Box<dyn RandomSource>,
    frames: u64,
}

impl ShowEngine {
    pub fn new(
        config: ShowConfig,
        rasterizer: Box<dyn TextRasterizer>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        log::info!(
            "show engine: {} message(s), {} rasterizer",
            config.messages.len(),
            rasterizer.name()
        );
        Self {
            pool: ParticlePool::with_glow(config.scene.glow),
            timeline: ShowTimeline::new(config.timing.clone(), config.messages.len()),
            bursts: BurstScheduler::new(
                config.timing.burst_interval_min_ms,
                config.timing.burst_interval_max_ms,
            ),
            messages: MessageEmitter::new(config.message.clone()),
            ambient: AmbientEmitter::new(config.ambient.clone()),
            rasterizer,
            rng,
            frames: 0,
            config,
        }
    }

    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn timeline(&self) -> &ShowTimeline {
        &self.timeline
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Paint the background, run the timeline, maybe burst, then advance,
    /// draw and prune every particle. Never fails.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> FrameStats {
        let viewport = surface.viewport();
        let scene = &self.config.scene;
        surface.clear();
        surface.fill_radial_gradient(
            viewport.center(),
            viewport.height,
            scene.background_inner,
            scene.background_outer,
        );

        let emitted_message = self.timeline.tick(now_ms, self.rng.as_mut());
        let mut message_particles = 0;
        if let Some(index) = emitted_message {
            if let Some(text) = self.config.messages.get(index) {
                message_particles = self.messages.emit(
                    self.rasterizer.as_mut(),
                    text,
                    viewport,
                    self.rng.as_mut(),
                    &mut self.pool,
                );
                log::debug!("message {index} {text:?}: {message_particles} particle(s)");
            }
        }

        let mut ambient_particles = 0;
        if self.bursts.poll(now_ms, self.rng.as_mut()) && self.ambient.enabled() {
            ambient_particles = self.ambient.burst(viewport, self.rng.as_mut(), &mut self.pool);
        }

        let pool = self.pool.tick(surface);
        self.frames += 1;

        FrameStats {
            frame: self.frames,
            now_ms,
            phase: self.timeline.phase(),
            emitted_message,
            message_particles,
            ambient_particles,
            pool,
        }
    }

    /// Full reset: no particles, timeline back at message 0, burst clock
    /// cleared
    pub fn reset(&mut self) {
        self.pool.clear();
        self.timeline.reset();
        self.bursts.reset();
        log::info!("show reset");
    }
}

impl FrameSystem for ShowEngine {
    type Stats = FrameStats;

    fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> FrameStats {
        ShowEngine::frame(self, now_ms, surface)
    }

    fn reset(&mut self) {
        ShowEngine::reset(self)
    }

    fn name(&self) -> &str {
        "fireworks show"
    }
}
