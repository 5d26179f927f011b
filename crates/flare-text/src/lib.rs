//! Flare Text - turns a message string into particle emission sites
//!
//! Two interchangeable strategies implement [`TextRasterizer`]:
//! - [`OpacitySampler`] renders the text off-screen through a [`TextCanvas`]
//!   and samples the coverage mask on a coarse grid (preferred)
//! - [`GlyphTable`] lays out hand-authored stroke vertices per character,
//!   for hosts without font rendering

pub mod font;
pub mod glyphs;
pub mod layout;
pub mod opacity;

use flare_core::{RandomSource, Vec2, Viewport};
use serde::{Deserialize, Serialize};

pub use font::FontdueCanvas;
pub use glyphs::GlyphTable;
pub use layout::{fit_font_size, layout_text, wrap_words, TextLayout};
pub use opacity::{AlphaMask, OpacitySampler, TextBlock, TextCanvas};

/// Sampled emission sites for one message.
///
/// `points` are relative to `origin`, the top-left placement on the main
/// surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formation {
    pub origin: Vec2,
    pub points: Vec<Vec2>,
}

impl Formation {
    pub fn empty(origin: Vec2) -> Self {
        Self {
            origin,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in surface space
    pub fn absolute_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(move |p| self.origin + *p)
    }
}

/// Converts text into a formation for the current viewport
pub trait TextRasterizer {
    fn rasterize(&mut self, text: &str, viewport: Viewport, rng: &mut dyn RandomSource)
        -> Formation;

    /// Human-readable strategy name
    fn name(&self) -> &str;
}

/// Tunables for both rasterization strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Share of the viewport width the text may occupy
    pub width_fraction: f32,
    /// Upper bound on the starting font size (px)
    pub max_font_size: f32,
    /// Floor for the shrink loop (px)
    pub min_font_size: f32,
    /// Shrink decrement (px)
    pub font_step: f32,
    /// Line height as a multiple of the font size
    pub line_spacing: f32,
    /// Margin around the off-screen text block (px)
    pub padding: f32,
    /// Sampling cell = font size / cell_divisor, at least `min_cell`
    pub cell_divisor: f32,
    pub min_cell: u32,
    /// Coverage above this value (0-255) becomes a point
    pub alpha_threshold: u8,
    /// Point jitter as a fraction of the sampling cell
    pub jitter_factor: f32,
    /// Vertical placement: share of the free space left above the block
    pub vertical_fraction: f32,
    /// Glyph-table box size and spacing (px)
    pub glyph_width: f32,
    pub glyph_height: f32,
    pub letter_spacing: f32,
    /// Glyph-table jitter amplitude (px)
    pub glyph_jitter: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.9,
            max_font_size: 80.0,
            min_font_size: 26.0,
            font_step: 2.0,
            line_spacing: 1.25,
            padding: 20.0,
            cell_divisor: 18.0,
            min_cell: 4,
            alpha_threshold: 128,
            jitter_factor: 0.4,
            vertical_fraction: 1.0 / 3.0,
            glyph_width: 40.0,
            glyph_height: 56.0,
            letter_spacing: 12.0,
            glyph_jitter: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formation_absolute_points_offset_by_origin() {
        let f = Formation {
            origin: Vec2::new(10.0, 20.0),
            points: vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)],
        };
        let abs: Vec<Vec2> = f.absolute_points().collect();
        assert_eq!(abs, vec![Vec2::new(11.0, 22.0), Vec2::new(13.0, 24.0)]);
        assert_eq!(f.len(), 2);
        assert!(Formation::empty(Vec2::ZERO).is_empty());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: TextConfig = toml::from_str("min_font_size = 18.0\nalpha_threshold = 64").unwrap();
        assert_eq!(cfg.min_font_size, 18.0);
        assert_eq!(cfg.alpha_threshold, 64);
        assert_eq!(cfg.max_font_size, 80.0);
        assert_eq!(cfg.min_cell, 4);
    }
}
