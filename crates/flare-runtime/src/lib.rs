//! Flare Runtime - Frame loop infrastructure
//!
//! Provides the building blocks a host uses to drive a show:
//! - `FrameClock` - fixed-rate virtual clock producing frame timestamps
//! - `FrameSystem` - trait for anything ticked once per frame
//! - `FrameLoop` - runs a system for a number of frames with an observer

mod clock;
mod frame_loop;
mod system;

pub use clock::FrameClock;
pub use frame_loop::FrameLoop;
pub use system::FrameSystem;
