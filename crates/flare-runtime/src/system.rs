//! Frame system trait

use flare_core::Surface;

/// Something driven once per display refresh.
///
/// A frame runs to completion before the next one starts; stopping a system
/// means not calling `frame` again.
pub trait FrameSystem {
    /// Per-frame report handed to observers
    type Stats;

    /// Advance and draw one frame at host timestamp `now_ms`
    fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> Self::Stats;

    /// Return to the initial state, dropping all transient state
    fn reset(&mut self);

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
