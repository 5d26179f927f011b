//! Opacity-sampling rasterizer: render off-screen, read coverage, sample a grid

use crate::layout::layout_text;
use crate::{Formation, TextConfig, TextRasterizer};
use flare_core::{RandomSource, Vec2, Viewport};

/// Lines to render into an off-screen coverage buffer.
///
/// Lines are centered horizontally; line `i` has its top edge at
/// `padding + i * line_height`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
    pub padding: f32,
    pub width: usize,
    pub height: usize,
}

/// Single-channel coverage buffer, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl AlphaMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Coverage at (x, y); 0 outside the buffer
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Keep the stronger of the stored and incoming coverage
    pub fn blend_max(&mut self, x: i64, y: i64, value: u8) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.data[idx] = self.data[idx].max(value);
    }

    pub fn covered(&self, threshold: u8) -> usize {
        self.data.iter().filter(|a| **a > threshold).count()
    }
}

/// Off-screen text capability: measuring and coverage rendering
pub trait TextCanvas {
    /// Single-line advance width in pixels
    fn measure(&self, text: &str, font_size: f32) -> f32;

    /// Render the block and read back its coverage
    fn render(&mut self, block: &TextBlock) -> AlphaMask;
}

/// Preferred rasterizer: fit, wrap, render, then keep one jittered point per
/// sampling cell whose coverage passes the threshold
pub struct OpacitySampler<C: TextCanvas> {
    canvas: C,
    config: TextConfig,
}

impl<C: TextCanvas> OpacitySampler<C> {
    pub fn new(canvas: C, config: TextConfig) -> Self {
        Self { canvas, config }
    }

    /// Sampling cell edge for a font size
    pub fn cell_size(&self, font_size: f32) -> usize {
        let cell = (font_size / self.config.cell_divisor.max(1.0)).round() as u32;
        cell.max(self.config.min_cell).max(1) as usize
    }
}

impl<C: TextCanvas> TextRasterizer for OpacitySampler<C> {
    fn rasterize(
        &mut self,
        text: &str,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) -> Formation {
        let cfg = &self.config;
        let budget = (viewport.width * cfg.width_fraction).max(1.0);
        let canvas = &self.canvas;
        let layout = layout_text(text, budget, viewport.width, cfg, |s, size| {
            canvas.measure(s, size)
        });

        let line_height = layout.font_size * cfg.line_spacing;
        let width = (budget + cfg.padding * 2.0).ceil().max(1.0);
        let height = (layout.lines.len() as f32 * line_height + cfg.padding * 2.0)
            .ceil()
            .max(1.0);
        let origin = Vec2::new(
            (viewport.width - width) / 2.0,
            (viewport.height - height) * cfg.vertical_fraction,
        );
        if layout.lines.is_empty() {
            return Formation::empty(origin);
        }

        let block = TextBlock {
            lines: layout.lines,
            font_size: layout.font_size,
            line_height,
            padding: cfg.padding,
            width: width as usize,
            height: height as usize,
        };
        let cell = self.cell_size(block.font_size);
        let threshold = self.config.alpha_threshold;
        let jitter = cell as f32 * self.config.jitter_factor;
        let mask = self.canvas.render(&block);

        let mut points = Vec::new();
        for y in (0..mask.height).step_by(cell) {
            for x in (0..mask.width).step_by(cell) {
                if mask.get(x, y) > threshold {
                    points.push(Vec2::new(
                        x as f32 + rng.centered() * jitter,
                        y as f32 + rng.centered() * jitter,
                    ));
                }
            }
        }

        log::debug!(
            "sampled {} point(s) for {:?} ({}x{} block, cell {})",
            points.len(),
            text,
            mask.width,
            mask.height,
            cell
        );
        Formation { origin, points }
    }

    fn name(&self) -> &str {
        "opacity"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flare_core::ShowRng;

    /// Fixed metrics: every glyph is a solid box 0.5 em wide and 1 em tall,
    /// spaces are blank.
    pub(crate) struct BoxCanvas;

    impl TextCanvas for BoxCanvas {
        fn measure(&self, text: &str, font_size: f32) -> f32 {
            text.chars().count() as f32 * font_size * 0.5
        }

        fn render(&mut self, block: &TextBlock) -> AlphaMask {
            let mut mask = AlphaMask::new(block.width, block.height);
            let advance = block.font_size * 0.5;
            for (i, line) in block.lines.iter().enumerate() {
                let line_width = self.measure(line, block.font_size);
                let left = (block.width as f32 - line_width) / 2.0;
                let top = block.padding + i as f32 * block.line_height;
                for (j, ch) in line.chars().enumerate() {
                    if ch.is_whitespace() {
                        continue;
                    }
                    let x0 = (left + j as f32 * advance) as i64;
                    for dy in 0..block.font_size as i64 {
                        for dx in 0..advance as i64 {
                            mask.blend_max(x0 + dx, top as i64 + dy, 255);
                        }
                    }
                }
            }
            mask
        }
    }

    #[test]
    fn mask_bounds_are_safe() {
        let mut mask = AlphaMask::new(4, 3);
        mask.blend_max(-1, 0, 255);
        mask.blend_max(4, 0, 255);
        mask.blend_max(1, 1, 100);
        mask.blend_max(1, 1, 50);
        assert_eq!(mask.get(1, 1), 100);
        assert_eq!(mask.get(9, 9), 0);
        assert_eq!(mask.covered(0), 1);
    }

    #[test]
    fn cell_size_scales_with_font() {
        let sampler = OpacitySampler::new(BoxCanvas, TextConfig::default());
        assert_eq!(sampler.cell_size(26.0), 4);
        assert_eq!(sampler.cell_size(80.0), 4);
        assert_eq!(sampler.cell_size(108.0), 6);
    }

    #[test]
    fn samples_points_inside_the_rendered_text() {
        let mut sampler = OpacitySampler::new(BoxCanvas, TextConfig::default());
        let mut rng = ShowRng::new(3);
        let viewport = Viewport::new(1000.0, 800.0);
        let formation = sampler.rasterize("HI", viewport, &mut rng);

        assert!(!formation.is_empty());
        // Block: 900 + 40 wide, 80 * 1.25 + 40 tall
        assert!((formation.origin.x - 30.0).abs() < 1e-3);
        assert!((formation.origin.y - (800.0 - 140.0) / 3.0).abs() < 1e-3);

        let jitter = 4.0 * 0.4 / 2.0;
        for p in &formation.points {
            assert!(p.x >= 430.0 - jitter && p.x <= 510.0 + jitter, "x {}", p.x);
            assert!(p.y >= 20.0 - jitter && p.y <= 100.0 + jitter, "y {}", p.y);
        }
    }

    #[test]
    fn repeated_rasterization_is_jittered_differently() {
        let mut sampler = OpacitySampler::new(BoxCanvas, TextConfig::default());
        let mut rng = ShowRng::new(11);
        let viewport = Viewport::new(1000.0, 800.0);
        let a = sampler.rasterize("OK", viewport, &mut rng);
        let b = sampler.rasterize("OK", viewport, &mut rng);
        assert_eq!(a.len(), b.len());
        assert_ne!(a.points, b.points);
    }

    #[test]
    fn whitespace_message_yields_no_points() {
        let mut sampler = OpacitySampler::new(BoxCanvas, TextConfig::default());
        let mut rng = ShowRng::new(5);
        let formation = sampler.rasterize("    ", Viewport::new(640.0, 480.0), &mut rng);
        assert!(formation.is_empty());
    }

    #[test]
    fn narrow_viewport_still_produces_output() {
        let mut sampler = OpacitySampler::new(BoxCanvas, TextConfig::default());
        let mut rng = ShowRng::new(8);
        let formation = sampler.rasterize("BUT YOU SHINE", Viewport::new(120.0, 300.0), &mut rng);
        assert!(!formation.is_empty());
    }
}
