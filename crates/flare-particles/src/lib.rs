//! Flare Particles - CPU particle simulation
//!
//! Provides the particle lifecycle used by every emission strategy:
//! - integer-tick aging with a linear opacity fade
//! - per-particle motion rule (gravity increment, friction factor)
//! - an append-only pool that advances, renders and compacts once per frame

pub mod particle;
pub mod pool;

pub use particle::{Motion, Particle, ParticleKind};
pub use pool::{ParticlePool, PoolStats};
