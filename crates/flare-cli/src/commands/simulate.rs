//! Headless simulation with periodic statistics

use super::ShowArgs;
use anyhow::Result;
use flare_core::NullSurface;
use flare_runtime::{FrameClock, FrameLoop};
use flare_show::{FrameStats, Phase};
use std::ops::ControlFlow;

/// Running totals over a simulation
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub frames: u64,
    pub messages_emitted: usize,
    pub message_particles: usize,
    pub bursts: usize,
    pub ambient_particles: usize,
    pub peak_pool: usize,
    pub pauses: usize,
    last_paused: bool,
}

impl Summary {
    pub fn record(&mut self, stats: &FrameStats) {
        self.frames += 1;
        if stats.emitted_message.is_some() {
            self.messages_emitted += 1;
            self.message_particles += stats.message_particles;
        }
        if stats.ambient_particles > 0 {
            self.bursts += 1;
            self.ambient_particles += stats.ambient_particles;
        }
        self.peak_pool = self.peak_pool.max(stats.pool.alive);
        let paused = stats.phase.is_paused();
        if paused && !self.last_paused {
            self.pauses += 1;
        }
        self.last_paused = paused;
    }
}

fn describe(phase: Phase) -> String {
    match phase {
        Phase::Displaying { index } => format!("displaying #{}", index),
        Phase::Paused { index, resume_at } => {
            format!("paused after #{} until {:.0}ms", index, resume_at)
        }
    }
}

pub fn run(args: ShowArgs) -> Result<()> {
    let mut engine = args.build_engine()?;
    let mut surface = NullSurface::new(args.width as f32, args.height as f32);
    let clock = FrameClock::with_fps(args.fps);
    let per_second = clock.frames_for(1.0).max(1);
    let mut frame_loop = FrameLoop::new(clock);

    let mut summary = Summary::default();
    frame_loop.run(&mut engine, &mut surface, args.frames, |frame, stats, _surface| {
        summary.record(stats);
        if (frame + 1) % per_second == 0 {
            log::info!(
                "t={:>6.0}ms pool={:>5} {}",
                stats.now_ms,
                stats.pool.alive,
                describe(stats.phase)
            );
        }
        ControlFlow::Continue(())
    });

    println!("Simulated {} frame(s)", summary.frames);
    println!(
        "  messages: {} ({} particles)",
        summary.messages_emitted, summary.message_particles
    );
    println!(
        "  bursts:   {} ({} particles)",
        summary.bursts, summary.ambient_particles
    );
    println!("  pauses:   {}", summary.pauses);
    println!("  peak pool: {}", summary.peak_pool);
    println!("  final:    {}", describe(engine.timeline().phase()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_particles::PoolStats;

    fn stats(phase: Phase, emitted: Option<usize>, ambient: usize, alive: usize) -> FrameStats {
        FrameStats {
            frame: 0,
            now_ms: 0.0,
            phase,
            emitted_message: emitted,
            message_particles: if emitted.is_some() { 10 } else { 0 },
            ambient_particles: ambient,
            pool: PoolStats {
                rendered: alive,
                removed: 0,
                alive,
            },
        }
    }

    #[test]
    fn summary_counts_emissions_bursts_and_pauses() {
        let shown = Phase::Displaying { index: 0 };
        let paused = Phase::Paused {
            index: 0,
            resume_at: 100.0,
        };
        let mut summary = Summary::default();
        summary.record(&stats(shown, Some(0), 0, 10));
        summary.record(&stats(shown, None, 30, 40));
        summary.record(&stats(paused, None, 0, 35));
        summary.record(&stats(paused, None, 25, 50));
        summary.record(&stats(Phase::Displaying { index: 1 }, Some(1), 0, 20));

        assert_eq!(summary.frames, 5);
        assert_eq!(summary.messages_emitted, 2);
        assert_eq!(summary.message_particles, 20);
        assert_eq!(summary.bursts, 2);
        assert_eq!(summary.ambient_particles, 55);
        assert_eq!(summary.pauses, 1);
        assert_eq!(summary.peak_pool, 50);
    }

    #[test]
    fn describes_phases() {
        assert_eq!(describe(Phase::Displaying { index: 2 }), "displaying #2");
        assert_eq!(
            describe(Phase::Paused {
                index: 1,
                resume_at: 1234.4
            }),
            "paused after #1 until 1234ms"
        );
    }
}
