//! Ambient burst spacing

use flare_core::RandomSource;

/// Fires when the time since the last burst exceeds a random threshold.
/// The threshold is redrawn after every trigger.
#[derive(Debug, Clone)]
pub struct BurstScheduler {
    interval_min_ms: f64,
    interval_max_ms: f64,
    last_burst: Option<f64>,
    threshold_ms: f64,
}

impl BurstScheduler {
    pub fn new(interval_min_ms: f64, interval_max_ms: f64) -> Self {
        Self {
            interval_min_ms,
            interval_max_ms: interval_max_ms.max(interval_min_ms),
            last_burst: None,
            threshold_ms: interval_min_ms,
        }
    }

    /// Returns true when a burst is due at `now`. The first call only starts
    /// the clock.
    pub fn poll(&mut self, now: f64, rng: &mut dyn RandomSource) -> bool {
        let Some(last) = self.last_burst else {
            self.last_burst = Some(now);
            self.redraw(rng);
            return false;
        };
        if now - last > self.threshold_ms {
            self.last_burst = Some(now);
            self.redraw(rng);
            return true;
        }
        false
    }

    /// Current wait, in [interval_min_ms, interval_max_ms]
    pub fn threshold_ms(&self) -> f64 {
        self.threshold_ms
    }

    /// Forget the last burst; the next poll restarts the clock
    pub fn reset(&mut self) {
        self.last_burst = None;
        self.threshold_ms = self.interval_min_ms;
    }

    fn redraw(&mut self, rng: &mut dyn RandomSource) {
        let drawn = rng.range(self.interval_min_ms as f32, self.interval_max_ms as f32) as f64;
        self.threshold_ms = drawn.max(self.interval_min_ms).min(self.interval_max_ms);
    }
}
