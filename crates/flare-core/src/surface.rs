//! Drawing capability the show engine renders through

use crate::types::{Color, Vec2, Viewport};

/// Raw drawing primitives provided by the host.
///
/// The viewport may change between frames (window resize), so callers read
/// it at the start of every frame instead of caching it.
pub trait Surface {
    /// Current visible size
    fn viewport(&self) -> Viewport;

    /// Reset every pixel to transparent black
    fn clear(&mut self);

    /// Fill the whole surface with a radial gradient from `inner` at `center`
    /// to `outer` at `radius` and beyond
    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);

    /// Fill a circle; `glow` is the blur radius of a soft halo (0 disables it)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, glow: f32);
}

/// A surface that only reports a size. Used for headless simulation.
#[derive(Debug, Clone, Copy)]
pub struct NullSurface {
    pub viewport: Viewport,
}

impl NullSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }
}

impl Surface for NullSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {}

    fn fill_radial_gradient(&mut self, _center: Vec2, _radius: f32, _inner: Color, _outer: Color) {}

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _glow: f32) {}
}
