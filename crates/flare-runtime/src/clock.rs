//! Fixed-rate frame clock

/// Produces monotonically increasing millisecond timestamps, one per frame,
/// as a display refresh callback would.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Duration of one frame in milliseconds
    pub frame_ms: f64,
    /// Timestamp of the first frame
    origin_ms: f64,
    /// Frames handed out so far
    frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            frame_ms: 1000.0 / 60.0,
            origin_ms: 0.0,
            frame: 0,
        }
    }
}

impl FrameClock {
    /// Create a 60Hz clock starting at 0 ms
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom refresh rate. Rates below 1Hz are raised to 1Hz.
    pub fn with_fps(fps: f64) -> Self {
        Self {
            frame_ms: 1000.0 / fps.max(1.0),
            ..Self::default()
        }
    }

    /// Start handing out timestamps from `origin_ms`
    pub fn starting_at(mut self, origin_ms: f64) -> Self {
        self.origin_ms = origin_ms;
        self
    }

    /// Timestamp for the next frame. Call once per frame.
    pub fn tick(&mut self) -> f64 {
        let now = self.origin_ms + self.frame as f64 * self.frame_ms;
        self.frame += 1;
        now
    }

    /// Frames handed out so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Time covered by the frames handed out so far
    pub fn elapsed_ms(&self) -> f64 {
        self.frame as f64 * self.frame_ms
    }

    /// Frames needed to cover `seconds` of show time
    pub fn frames_for(&self, seconds: f64) -> u64 {
        (seconds.max(0.0) * 1000.0 / self.frame_ms).ceil() as u64
    }
}
