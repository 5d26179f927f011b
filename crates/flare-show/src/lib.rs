//! Flare Show - the looping fireworks message show
//!
//! Ties the particle pool and text rasterizers together:
//! - `ShowConfig` - every tunable, loadable from TOML
//! - `MessageEmitter` / `AmbientEmitter` - the two emission strategies
//! - `BurstScheduler` - randomized spacing of ambient bursts
//! - `ShowTimeline` - display / pause state machine over the message list
//! - `ShowEngine` - the per-frame driver, implements `FrameSystem`

pub mod config;
pub mod emission;
pub mod engine;
pub mod scheduler;
pub mod timeline;

pub use config::{AmbientStyle, MessageStyle, SceneStyle, ShowConfig, TimingConfig};
pub use emission::{AmbientEmitter, MessageEmitter};
pub use engine::{FrameStats, ShowEngine};
pub use scheduler::BurstScheduler;
pub use timeline::{Phase, ShowTimeline};
