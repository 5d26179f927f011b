//! RGBA canvas with source-over blending

use bytemuck::{Pod, Zeroable};
use flare_core::{Color, FlareError, Result, Surface, Vec2, Viewport};
use std::path::Path;

/// Peak opacity of a glow halo relative to the particle's own alpha
const GLOW_STRENGTH: f32 = 0.6;

/// One straight-alpha pixel, components in [0, 1]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Pixel {
    pub rgba: [f32; 4],
}

impl Pixel {
    const TRANSPARENT: Self = Self { rgba: [0.0; 4] };

    fn blend(&mut self, color: Color, alpha: f32) {
        let a = (color.a * alpha).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let [r, g, b, da] = self.rgba;
        let out_a = a + da * (1.0 - a);
        let mix = |src: f32, dst: f32| (src * a + dst * da * (1.0 - a)) / out_a;
        self.rgba = [mix(color.r, r), mix(color.g, g), mix(color.b, b), out_a];
    }

}

fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Fixed-size raster surface
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the size; contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("canvas resized to {width}x{height}");
        *self = Self::new(width, height);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// 8-bit RGBA, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        let channels: &[f32] = bytemuck::cast_slice(&self.pixels);
        channels.iter().map(|&c| quantize(c)).collect()
    }

    pub fn to_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8()).ok_or_else(|| {
            FlareError::ImageError(format!(
                "pixel buffer does not match {}x{}",
                self.width, self.height
            ))
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| FlareError::ImageError(format!("{}: {e}", path.display())))
    }

    /// Pixel bounds covering a circle, clipped to the canvas
    fn bounds(&self, center: Vec2, reach: f32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (center.x - reach).floor().max(0.0);
        let y0 = (center.y - reach).floor().max(0.0);
        let x1 = (center.x + reach).ceil().min(self.width as f32);
        let y1 = (center.y + reach).ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Surface for Canvas {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::TRANSPARENT);
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        let radius = radius.max(f32::EPSILON);
        let width = self.width as usize;
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            let p = Vec2::new((i % width) as f32 + 0.5, (i / width) as f32 + 0.5);
            let t = (p - center).length() / radius;
            pixel.blend(inner.lerp(outer, t), 1.0);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, glow: f32) {
        let radius = radius.max(0.0);
        let glow = glow.max(0.0);
        let Some((x0, y0, x1, y1)) = self.bounds(center, radius + glow + 1.0) else {
            return;
        };
        let width = self.width as usize;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = (p - center).length();
                let core = (radius + 0.5 - d).clamp(0.0, 1.0);
                let halo = if glow > 0.0 {
                    let falloff = (1.0 - (d - radius).max(0.0) / glow).max(0.0);
                    falloff * falloff * GLOW_STRENGTH
                } else {
                    0.0
                };
                let coverage = core.max(halo);
                if coverage > 0.0 {
                    self.pixels[y as usize * width + x as usize].blend(color, coverage);
                }
            }
        }
    }
}
