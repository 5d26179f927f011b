//! Drives a frame system against a surface

use crate::clock::FrameClock;
use crate::system::FrameSystem;
use flare_core::Surface;
use std::ops::ControlFlow;

/// Runs frames in order, handing each frame's stats to an observer.
pub struct FrameLoop {
    clock: FrameClock,
}

impl FrameLoop {
    pub fn new(clock: FrameClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Run up to `frames` frames. The observer sees the frame number, the
    /// stats and the surface after drawing; returning `Break` stops the loop.
    /// Returns the number of frames actually run.
    pub fn run<S, Sf, F>(
        &mut self,
        system: &mut S,
        surface: &mut Sf,
        frames: u64,
        mut observer: F,
    ) -> u64
    where
        S: FrameSystem,
        Sf: Surface,
        F: FnMut(u64, &S::Stats, &mut Sf) -> ControlFlow<()>,
    {
        log::info!("running {} for up to {} frame(s)", system.name(), frames);
        for frame in 0..frames {
            let now = self.clock.tick();
            let stats = system.frame(now, &mut *surface);
            if observer(frame, &stats, &mut *surface).is_break() {
                log::info!("{} stopped after {} frame(s)", system.name(), frame + 1);
                return frame + 1;
            }
        }
        frames
    }
}
