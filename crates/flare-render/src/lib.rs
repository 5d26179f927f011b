//! Flare Render - Software rendering for the Flare show engine
//!
//! A CPU-side RGBA canvas that implements `flare_core::Surface`, so frames
//! can be rendered without a window and exported as PNG images.

mod canvas;

pub use canvas::{Canvas, Pixel};
