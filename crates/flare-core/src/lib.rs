//! Flare Core - Foundational types for the Flare show engine
//!
//! This crate provides the types every other Flare crate depends on:
//! - `Vec2`, `Color`, `Viewport` - 2D geometry and colors
//! - `Surface` - the drawing capability the engine renders through
//! - `RandomSource` / `ShowRng` - injectable randomness
//! - Error types and Result alias

mod error;
mod rng;
mod surface;
mod types;

pub use error::{FlareError, Result};
pub use rng::{RandomSource, ShowRng};
pub use surface::{NullSurface, Surface};
pub use types::{Color, Vec2, Viewport};
