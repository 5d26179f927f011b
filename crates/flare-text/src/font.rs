//! `fontdue`-backed off-screen text canvas

use crate::opacity::{AlphaMask, TextBlock, TextCanvas};
use flare_core::{FlareError, Result};
use std::path::Path;

/// Install locations tried, in order, when no font is named
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Renders text coverage from a TrueType/OpenType font
pub struct FontdueCanvas {
    name: String,
    font: fontdue::Font,
}

impl FontdueCanvas {
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(|e| FlareError::FontLoadError(e.to_string()))?;
        Ok(Self {
            name: name.into(),
            font,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, data)
    }

    /// First loadable font from [`SYSTEM_FONT_PATHS`]
    pub fn system_default() -> Option<Self> {
        SYSTEM_FONT_PATHS
            .iter()
            .map(Path::new)
            .filter(|path| path.is_file())
            .find_map(|path| match Self::load(path) {
                Ok(canvas) => Some(canvas),
                Err(e) => {
                    log::debug!("skipping system font {}: {}", path.display(), e);
                    None
                }
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn ascent(&self, font_size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(font_size)
            .map(|m| m.ascent)
            .unwrap_or(font_size * 0.8)
    }
}

impl TextCanvas for FontdueCanvas {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|c| self.font.metrics(c, font_size).advance_width)
            .sum()
    }

    fn render(&mut self, block: &TextBlock) -> AlphaMask {
        let mut mask = AlphaMask::new(block.width, block.height);
        let ascent = self.ascent(block.font_size);

        for (i, line) in block.lines.iter().enumerate() {
            let line_width = self.measure(line, block.font_size);
            let mut pen_x = (block.width as f32 - line_width) / 2.0;
            let baseline = block.padding + i as f32 * block.line_height + ascent;

            for ch in line.chars() {
                let (metrics, bitmap) = self.font.rasterize(ch, block.font_size);
                let left = (pen_x + metrics.xmin as f32).round() as i64;
                let top = (baseline - (metrics.height as i32 + metrics.ymin) as f32).round() as i64;

                for row in 0..metrics.height {
                    for col in 0..metrics.width {
                        let coverage = bitmap[row * metrics.width + col];
                        if coverage > 0 {
                            mask.blend_max(left + col as i64, top + row as i64, coverage);
                        }
                    }
                }
                pen_x += metrics.advance_width;
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_load() {
        let result = FontdueCanvas::from_bytes("junk", vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(FlareError::FontLoadError(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = FontdueCanvas::load("/definitely/not/here.ttf");
        assert!(matches!(result, Err(FlareError::IoError(_))));
    }

    /// Tests below need a real font; hosts without one skip them
    fn system_font() -> Option<FontdueCanvas> {
        let font = FontdueCanvas::system_default();
        if font.is_none() {
            eprintln!("no system font found, skipping");
        }
        font
    }

    fn block(lines: &[&str], font_size: f32, width: usize, height: usize) -> TextBlock {
        TextBlock {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            font_size,
            line_height: font_size * 1.25,
            padding: 20.0,
            width,
            height,
        }
    }

    /// Column range holding coverage in rows [y0, y1)
    fn ink_columns(mask: &AlphaMask, y0: usize, y1: usize) -> Option<(usize, usize)> {
        let mut cols = (0..mask.width).filter(|&x| (y0..y1).any(|y| mask.get(x, y) > 0));
        let first = cols.next()?;
        Some((first, cols.last().unwrap_or(first)))
    }

    #[test]
    fn measure_grows_with_text_and_size() {
        let Some(font) = system_font() else { return };
        assert!(!font.name().is_empty());
        assert_eq!(font.measure("", 40.0), 0.0);
        let short = font.measure("HI", 40.0);
        assert!(short > 0.0);
        assert!(font.measure("HIHI", 40.0) > short * 1.9);
        assert!((font.measure("HI", 80.0) - short * 2.0).abs() < short * 0.1);
    }

    #[test]
    fn glyphs_sit_between_padding_and_baseline() {
        let Some(mut font) = system_font() else { return };
        let b = block(&["HELLO"], 60.0, 400, 115);
        let mask = font.render(&b);
        assert!(mask.covered(128) > 100);

        let ascent = font.ascent(60.0);
        let baseline = (20.0 + ascent).round() as usize;
        let rows: Vec<usize> = (0..mask.height)
            .filter(|&y| (0..mask.width).any(|x| mask.get(x, y) > 128))
            .collect();
        let top = rows[0];
        let bottom = *rows.last().unwrap();
        // Capitals start below the top padding and rest on the baseline
        assert!(top >= 20, "top {top}");
        assert!(bottom <= baseline + 2 && bottom + 3 >= baseline, "{bottom} vs {baseline}");
    }

    #[test]
    fn lines_are_centered_in_the_block() {
        let Some(mut font) = system_font() else { return };
        let b = block(&["WIDE LINE", "HI"], 40.0, 500, 140);
        let mask = font.render(&b);

        let first_rows = (20, 20 + 50);
        let second_rows = (70, 120);
        for (y0, y1) in [first_rows, second_rows] {
            let (left, right) = ink_columns(&mask, y0, y1).unwrap();
            let left_gap = left as f32;
            let right_gap = (mask.width - 1 - right) as f32;
            assert!((left_gap - right_gap).abs() < 12.0, "{left_gap} vs {right_gap}");
        }
        let (l1, r1) = ink_columns(&mask, first_rows.0, first_rows.1).unwrap();
        let (l2, r2) = ink_columns(&mask, second_rows.0, second_rows.1).unwrap();
        assert!(r1 - l1 > r2 - l2);
    }

    #[test]
    fn render_is_deterministic_and_saturates_stems() {
        let Some(mut font) = system_font() else { return };
        let once = font.render(&block(&["III"], 50.0, 160, 110));
        let twice = font.render(&block(&["III"], 50.0, 160, 110));
        assert_eq!(once, twice);
        assert!(once.data.iter().any(|&v| v == 255));
    }

    #[test]
    fn sampler_over_real_font_wraps_on_narrow_viewports() {
        use crate::{OpacitySampler, TextConfig, TextRasterizer};
        use flare_core::{ShowRng, Viewport};

        let Some(font) = system_font() else { return };
        let mut sampler = OpacitySampler::new(font, TextConfig::default());
        let mut rng = ShowRng::new(3);

        let wide = sampler.rasterize("HAPPY NEW YEAR", Viewport::new(1280.0, 720.0), &mut rng);
        assert!(wide.len() > 100, "{}", wide.len());

        let narrow = sampler.rasterize("HAPPY NEW YEAR", Viewport::new(200.0, 640.0), &mut rng);
        assert!(!narrow.is_empty());
        let (min_y, max_y) = narrow
            .points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        // At the 26px floor the text wraps, so ink spans more than one line
        assert!(max_y - min_y > 26.0 * 1.25, "{min_y}..{max_y}");
        for p in narrow.absolute_points() {
            assert!(p.x > -15.0 && p.x < 215.0, "{}", p.x);
        }
    }
}
