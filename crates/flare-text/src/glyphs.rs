//! Glyph-table rasterizer: hand-authored stroke vertices per character
//!
//! Glyphs live on a 4 x 6 design grid (x right, y down). Each stroke is a
//! segment between two grid nodes and contributes one vertex per grid step.

use crate::{Formation, TextConfig, TextRasterizer};
use flare_core::{RandomSource, Vec2, Viewport};

const GRID_W: f32 = 4.0;
const GRID_H: f32 = 6.0;

/// `(x0, y0, x1, y1)` on the design grid
type Stroke = (u8, u8, u8, u8);

const FALLBACK: &[Stroke] = &[(0, 0, 4, 0), (4, 0, 4, 6), (4, 6, 0, 6), (0, 6, 0, 0)];

const RING: &[Stroke] = &[
    (1, 0, 3, 0),
    (3, 0, 4, 1),
    (4, 1, 4, 5),
    (4, 5, 3, 6),
    (3, 6, 1, 6),
    (1, 6, 0, 5),
    (0, 5, 0, 1),
    (0, 1, 1, 0),
];

const BOWL: &[Stroke] = &[
    (0, 6, 0, 0),
    (0, 0, 3, 0),
    (3, 0, 4, 1),
    (4, 1, 4, 2),
    (4, 2, 3, 3),
    (3, 3, 0, 3),
];

fn strokes(ch: char) -> Option<&'static [Stroke]> {
    let table: &'static [Stroke] = match ch {
        'A' => &[(0, 6, 0, 2), (0, 2, 2, 0), (2, 0, 4, 2), (4, 2, 4, 6), (0, 3, 4, 3)],
        'B' => &[
            (0, 0, 0, 6),
            (0, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 2),
            (4, 2, 3, 3),
            (0, 3, 3, 3),
            (3, 3, 4, 4),
            (4, 4, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 0, 6),
        ],
        'C' => &[(4, 0, 1, 0), (1, 0, 0, 1), (0, 1, 0, 5), (0, 5, 1, 6), (1, 6, 4, 6)],
        'D' => &[(0, 0, 0, 6), (0, 0, 2, 0), (2, 0, 4, 2), (4, 2, 4, 4), (4, 4, 2, 6), (2, 6, 0, 6)],
        'E' => &[(4, 0, 0, 0), (0, 0, 0, 6), (0, 6, 4, 6), (0, 3, 3, 3)],
        'F' => &[(4, 0, 0, 0), (0, 0, 0, 6), (0, 3, 3, 3)],
        'G' => &[
            (4, 0, 1, 0),
            (1, 0, 0, 1),
            (0, 1, 0, 5),
            (0, 5, 1, 6),
            (1, 6, 4, 6),
            (4, 6, 4, 3),
            (4, 3, 2, 3),
        ],
        'H' => &[(0, 0, 0, 6), (4, 0, 4, 6), (0, 3, 4, 3)],
        'I' => &[(0, 0, 4, 0), (2, 0, 2, 6), (0, 6, 4, 6)],
        'J' => &[(0, 0, 4, 0), (3, 0, 3, 5), (3, 5, 2, 6), (2, 6, 1, 6), (1, 6, 0, 5)],
        'K' => &[(0, 0, 0, 6), (4, 0, 0, 3), (0, 3, 4, 6)],
        'L' => &[(0, 0, 0, 6), (0, 6, 4, 6)],
        'M' => &[(0, 6, 0, 0), (0, 0, 2, 3), (2, 3, 4, 0), (4, 0, 4, 6)],
        'N' => &[(0, 6, 0, 0), (0, 0, 4, 6), (4, 6, 4, 0)],
        'O' => RING,
        'P' => BOWL,
        'Q' => &[
            (1, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 1, 6),
            (1, 6, 0, 5),
            (0, 5, 0, 1),
            (0, 1, 1, 0),
            (2, 4, 4, 6),
        ],
        'R' => &[
            (0, 6, 0, 0),
            (0, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 2),
            (4, 2, 3, 3),
            (3, 3, 0, 3),
            (2, 3, 4, 6),
        ],
        'S' => &[
            (4, 0, 1, 0),
            (1, 0, 0, 1),
            (0, 1, 0, 2),
            (0, 2, 1, 3),
            (1, 3, 3, 3),
            (3, 3, 4, 4),
            (4, 4, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 0, 6),
        ],
        'T' => &[(0, 0, 4, 0), (2, 0, 2, 6)],
        'U' => &[(0, 0, 0, 5), (0, 5, 1, 6), (1, 6, 3, 6), (3, 6, 4, 5), (4, 5, 4, 0)],
        'V' => &[(0, 0, 2, 6), (2, 6, 4, 0)],
        'W' => &[(0, 0, 1, 6), (1, 6, 2, 3), (2, 3, 3, 6), (3, 6, 4, 0)],
        'X' => &[(0, 0, 4, 6), (4, 0, 0, 6)],
        'Y' => &[(0, 0, 2, 3), (4, 0, 2, 3), (2, 3, 2, 6)],
        'Z' => &[(0, 0, 4, 0), (4, 0, 0, 6), (0, 6, 4, 6)],
        '0' => &[
            (1, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 1, 6),
            (1, 6, 0, 5),
            (0, 5, 0, 1),
            (0, 1, 1, 0),
            (4, 1, 0, 5),
        ],
        '1' => &[(1, 1, 2, 0), (2, 0, 2, 6), (0, 6, 4, 6)],
        '2' => &[(0, 1, 1, 0), (1, 0, 3, 0), (3, 0, 4, 1), (4, 1, 4, 2), (4, 2, 0, 6), (0, 6, 4, 6)],
        '3' => &[
            (0, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 2),
            (4, 2, 3, 3),
            (1, 3, 3, 3),
            (3, 3, 4, 4),
            (4, 4, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 0, 6),
        ],
        '4' => &[(3, 6, 3, 0), (3, 0, 0, 4), (0, 4, 4, 4)],
        '5' => &[
            (4, 0, 0, 0),
            (0, 0, 0, 3),
            (0, 3, 3, 3),
            (3, 3, 4, 4),
            (4, 4, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 0, 6),
        ],
        '6' => &[
            (3, 0, 1, 0),
            (1, 0, 0, 1),
            (0, 1, 0, 5),
            (0, 5, 1, 6),
            (1, 6, 3, 6),
            (3, 6, 4, 5),
            (4, 5, 4, 4),
            (4, 4, 3, 3),
            (3, 3, 0, 3),
        ],
        '7' => &[(0, 0, 4, 0), (4, 0, 1, 6)],
        '8' => &[
            (1, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 2),
            (4, 2, 3, 3),
            (3, 3, 1, 3),
            (1, 3, 0, 2),
            (0, 2, 0, 1),
            (0, 1, 1, 0),
            (3, 3, 4, 4),
            (4, 4, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 1, 6),
            (1, 6, 0, 5),
            (0, 5, 0, 4),
            (0, 4, 1, 3),
        ],
        '9' => &[
            (4, 3, 1, 3),
            (1, 3, 0, 2),
            (0, 2, 0, 1),
            (0, 1, 1, 0),
            (1, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 1, 6),
        ],
        '!' => &[(2, 0, 2, 4), (2, 6, 2, 6)],
        '?' => &[
            (0, 1, 1, 0),
            (1, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 2),
            (4, 2, 2, 3),
            (2, 3, 2, 4),
            (2, 6, 2, 6),
        ],
        '.' => &[(2, 6, 2, 6)],
        ',' => &[(2, 5, 1, 6)],
        '\'' => &[(2, 0, 2, 1)],
        '-' => &[(1, 3, 3, 3)],
        ':' => &[(2, 2, 2, 2), (2, 5, 2, 5)],
        _ => return None,
    };
    Some(table)
}

/// Grid vertices for a character; lowercase folds to uppercase and unknown
/// characters get a rectangle outline
pub fn glyph_vertices(ch: char) -> Vec<(f32, f32)> {
    let table = strokes(ch.to_ascii_uppercase()).unwrap_or(FALLBACK);
    let mut vertices = Vec::new();
    for &(x0, y0, x1, y1) in table {
        let (x0, y0, x1, y1) = (x0 as f32, y0 as f32, x1 as f32, y1 as f32);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()) as u32;
        if steps == 0 {
            vertices.push((x0, y0));
            continue;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            vertices.push((x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
        }
    }
    vertices
}

pub fn has_glyph(ch: char) -> bool {
    strokes(ch.to_ascii_uppercase()).is_some()
}

/// Fallback rasterizer for hosts without off-screen font rendering
pub struct GlyphTable {
    config: TextConfig,
}

impl GlyphTable {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Width of a laid-out line of `count` characters
    pub fn line_width(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        count as f32 * self.config.glyph_width + (count - 1) as f32 * self.config.letter_spacing
    }
}

impl TextRasterizer for GlyphTable {
    fn rasterize(
        &mut self,
        text: &str,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) -> Formation {
        let cfg = &self.config;
        let count = text.chars().count();
        let origin = Vec2::new(
            (viewport.width - self.line_width(count)) / 2.0,
            (viewport.height - cfg.glyph_height) * cfg.vertical_fraction,
        );

        let scale_x = cfg.glyph_width / GRID_W;
        let scale_y = cfg.glyph_height / GRID_H;
        let mut points = Vec::new();
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = i as f32 * (cfg.glyph_width + cfg.letter_spacing);
            for (gx, gy) in glyph_vertices(ch) {
                points.push(Vec2::new(
                    left + gx * scale_x + rng.centered() * cfg.glyph_jitter,
                    gy * scale_y + rng.centered() * cfg.glyph_jitter,
                ));
            }
        }

        log::debug!("glyph table laid out {} point(s) for {:?}", points.len(), text);
        Formation { origin, points }
    }

    fn name(&self) -> &str {
        "glyph-table"
    }
}
