//! Show timeline: display a message, pause, advance to the next one

use crate::config::TimingConfig;
use flare_core::RandomSource;

/// Current phase of the show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Message `index` is on screen
    Displaying { index: usize },
    /// Ambient-only interlude after message `index`, until `resume_at`
    Paused { index: usize, resume_at: f64 },
}

impl Phase {
    pub fn index(&self) -> usize {
        match *self {
            Phase::Displaying { index } | Phase::Paused { index, .. } => index,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Phase::Paused { .. })
    }
}

/// Sequential, cyclic message timeline.
///
/// The phase clock starts on the first tick, not at construction, so it
/// runs on real frame timestamps.
#[derive(Debug, Clone)]
pub struct ShowTimeline {
    timing: TimingConfig,
    message_count: usize,
    phase: Phase,
    phase_start: Option<f64>,
    emitted: bool,
}

impl ShowTimeline {
    /// An inverted pause range is reordered rather than rejected
    pub fn new(mut timing: TimingConfig, message_count: usize) -> Self {
        if timing.pause_min_ms > timing.pause_max_ms {
            std::mem::swap(&mut timing.pause_min_ms, &mut timing.pause_max_ms);
        }
        Self {
            timing,
            message_count,
            phase: Phase::Displaying { index: 0 },
            phase_start: None,
            emitted: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn message_index(&self) -> usize {
        self.phase.index()
    }

    pub fn is_paused(&self) -> bool {
        self.phase.is_paused()
    }

    /// Scheduled end of the current pause
    pub fn resume_deadline(&self) -> Option<f64> {
        match self.phase {
            Phase::Paused { resume_at, .. } => Some(resume_at),
            Phase::Displaying { .. } => None,
        }
    }

    /// When the current phase began, once the first tick has happened
    pub fn phase_start(&self) -> Option<f64> {
        self.phase_start
    }

    pub fn message_count(&self) -> usize {
        self.message_count
    }

    /// Back to `Displaying(0)` with no clock and no pending emission
    pub fn reset(&mut self) {
        self.phase = Phase::Displaying { index: 0 };
        self.phase_start = None;
        self.emitted = false;
    }

    /// Advance the state machine to `now`. Returns the message index to
    /// emit, at most once per display phase.
    pub fn tick(&mut self, now: f64, rng: &mut dyn RandomSource) -> Option<usize> {
        let start = *self.phase_start.get_or_insert(now);

        match self.phase {
            Phase::Displaying { index } => {
                if now - start > self.timing.message_duration_ms {
                    let pause = rng.range(
                        self.timing.pause_min_ms as f32,
                        self.timing.pause_max_ms as f32,
                    ) as f64;
                    let pause = pause
                        .max(self.timing.pause_min_ms)
                        .min(self.timing.pause_max_ms);
                    self.phase = Phase::Paused {
                        index,
                        resume_at: now + pause,
                    };
                    self.phase_start = Some(now);
                    log::info!("message {index} done, pausing for {pause:.0}ms");
                    return None;
                }
            }
            Phase::Paused { index, resume_at } => {
                if now <= resume_at {
                    return None;
                }
                let next = (index + 1) % self.message_count.max(1);
                self.phase = Phase::Displaying { index: next };
                self.phase_start = Some(now);
                self.emitted = false;
                log::info!("pause over, showing message {next}");
            }
        }

        self.poll_emission(now)
    }

    fn poll_emission(&mut self, now: f64) -> Option<usize> {
        let Phase::Displaying { index } = self.phase else {
            return None;
        };
        let start = self.phase_start.unwrap_or(now);
        if self.emitted || now - start >= self.timing.emission_window_ms {
            return None;
        }
        self.emitted = true;
        if self.message_count == 0 {
            return None;
        }
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::ShowRng;

    fn timeline(count: usize) -> ShowTimeline {
        ShowTimeline::new(TimingConfig::default(), count)
    }

    #[test]
    fn emits_once_on_first_tick() {
        let mut tl = timeline(3);
        let mut rng = ShowRng::new(1);
        assert_eq!(tl.tick(0.0, &mut rng), Some(0));
        assert_eq!(tl.tick(16.0, &mut rng), None);
        assert_eq!(tl.tick(32.0, &mut rng), None);
        assert_eq!(tl.phase_start(), Some(0.0));
    }

    #[test]
    fn clock_starts_lazily_at_first_tick() {
        let mut tl = timeline(3);
        let mut rng = ShowRng::new(1);
        assert_eq!(tl.phase_start(), None);
        assert_eq!(tl.tick(123_456.0, &mut rng), Some(0));
        assert_eq!(tl.tick(133_456.0, &mut rng), None);
        assert!(!tl.is_paused());
        tl.tick(133_457.0, &mut rng);
        assert!(tl.is_paused());
    }

    #[test]
    fn display_then_pause_then_next_message() {
        let mut tl = timeline(3);
        let mut rng = ShowRng::new(9);
        assert_eq!(tl.tick(0.0, &mut rng), Some(0));
        assert_eq!(tl.tick(10_000.0, &mut rng), None);
        assert_eq!(tl.phase(), Phase::Displaying { index: 0 });

        assert_eq!(tl.tick(10_001.0, &mut rng), None);
        let deadline = tl.resume_deadline().unwrap();
        assert!((12_001.0..=15_001.0).contains(&deadline));

        assert_eq!(tl.tick(deadline, &mut rng), None);
        assert!(tl.is_paused());

        assert_eq!(tl.tick(deadline + 1.0, &mut rng), Some(1));
        assert_eq!(tl.phase(), Phase::Displaying { index: 1 });
        assert_eq!(tl.resume_deadline(), None);
    }

    #[test]
    fn cycles_sequentially_with_period_equal_to_count() {
        let mut tl = timeline(3);
        let mut rng = ShowRng::new(42);
        let mut emitted = Vec::new();
        let mut pauses = 0;
        let mut was_paused = false;
        let mut now = 0.0;
        while emitted.len() < 7 {
            if let Some(i) = tl.tick(now, &mut rng) {
                emitted.push(i);
            }
            if tl.is_paused() && !was_paused {
                pauses += 1;
                assert!(tl.resume_deadline().unwrap() - now >= 2_000.0);
            }
            was_paused = tl.is_paused();
            now += 16.0;
        }
        assert_eq!(emitted, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(pauses, 6);
    }

    #[test]
    fn pause_durations_stay_in_range() {
        let mut rng = ShowRng::new(1234);
        for _ in 0..200 {
            let mut tl = timeline(2);
            tl.tick(0.0, &mut rng);
            tl.tick(10_001.0, &mut rng);
            let pause = tl.resume_deadline().unwrap() - 10_001.0;
            assert!((2_000.0..=5_000.0).contains(&pause), "{pause}");
        }
    }

    #[test]
    fn inverted_pause_range_is_reordered() {
        let timing = TimingConfig {
            pause_min_ms: 5_000.0,
            pause_max_ms: 2_000.0,
            ..TimingConfig::default()
        };
        let mut rng = ShowRng::new(8);
        for _ in 0..50 {
            let mut tl = ShowTimeline::new(timing.clone(), 2);
            tl.tick(0.0, &mut rng);
            tl.tick(10_001.0, &mut rng);
            let pause = tl.resume_deadline().unwrap() - 10_001.0;
            assert!((2_000.0..=5_000.0).contains(&pause), "{pause}");

            let deadline = tl.resume_deadline().unwrap();
            assert_eq!(tl.tick(deadline + 1.0, &mut rng), Some(1));
        }
    }

    #[test]
    fn reset_clears_pause_and_index() {
        let mut tl = timeline(3);
        let mut rng = ShowRng::new(2);
        tl.tick(0.0, &mut rng);
        tl.tick(10_001.0, &mut rng);
        assert!(tl.is_paused());

        tl.reset();
        assert_eq!(tl.phase(), Phase::Displaying { index: 0 });
        assert_eq!(tl.resume_deadline(), None);
        assert_eq!(tl.phase_start(), None);
        assert_eq!(tl.tick(50_000.0, &mut rng), Some(0));
    }

    #[test]
    fn empty_message_list_still_cycles() {
        let mut tl = timeline(0);
        let mut rng = ShowRng::new(2);
        assert_eq!(tl.tick(0.0, &mut rng), None);
        tl.tick(10_001.0, &mut rng);
        assert!(tl.is_paused());
        assert_eq!(tl.tick(20_000.0, &mut rng), None);
        assert_eq!(tl.message_index(), 0);
        assert!(!tl.is_paused());
    }

    #[test]
    fn single_message_repeats() {
        let mut tl = timeline(1);
        let mut rng = ShowRng::new(2);
        assert_eq!(tl.tick(0.0, &mut rng), Some(0));
        tl.tick(10_001.0, &mut rng);
        assert_eq!(tl.tick(20_000.0, &mut rng), Some(0));
    }
}
