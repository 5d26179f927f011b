//! CLI command implementations

pub mod config;
pub mod render;
pub mod simulate;

use anyhow::{Context, Result};
use clap::Args;
use flare_core::{RandomSource, ShowRng};
use flare_show::{ShowConfig, ShowEngine};
use flare_text::{FontdueCanvas, GlyphTable, OpacitySampler, TextConfig, TextRasterizer};

/// Options shared by every command that runs the show
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Show configuration file (TOML); built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// TrueType/OpenType font for message text; a system font when omitted
    #[arg(long)]
    pub font: Option<String>,

    /// Number of frames to run
    #[arg(long, default_value = "600")]
    pub frames: u64,

    /// Frame rate of the virtual clock
    #[arg(long, default_value = "60")]
    pub fps: f64,

    /// Surface width in pixels
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value = "720")]
    pub height: u32,

    /// Fixed random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u32>,
}

impl ShowArgs {
    pub fn load_config(&self) -> Result<ShowConfig> {
        match &self.config {
            Some(path) => ShowConfig::load(path)
                .with_context(|| format!("Failed to load show config {}", path)),
            None => Ok(ShowConfig::default()),
        }
    }

    /// Build an engine from the config, font and seed options
    pub fn build_engine(&self) -> Result<ShowEngine> {
        let config = self.load_config()?;
        let rasterizer = build_rasterizer(self.font.as_deref(), &config.text);
        let rng: Box<dyn RandomSource> = match self.seed {
            Some(seed) => Box::new(ShowRng::new(seed)),
            None => Box::new(ShowRng::from_entropy()),
        };
        Ok(ShowEngine::new(config, rasterizer, rng))
    }
}

/// Opacity sampling over the named font, else over a system font; the glyph
/// table only when no font can be loaded at all
fn build_rasterizer(font: Option<&str>, text: &TextConfig) -> Box<dyn TextRasterizer> {
    let named = font.and_then(|path| match FontdueCanvas::load(path) {
        Ok(canvas) => Some(canvas),
        Err(e) => {
            log::warn!("font {} unavailable ({}), trying system fonts", path, e);
            None
        }
    });

    match named.or_else(FontdueCanvas::system_default) {
        Some(canvas) => {
            log::info!("rendering messages with font {}", canvas.name());
            Box::new(OpacitySampler::new(canvas, text.clone()))
        }
        None => {
            log::warn!("no usable font, falling back to the glyph table");
            Box::new(GlyphTable::new(text.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_without_named_font() -> &'static str {
        if FontdueCanvas::system_default().is_some() {
            "opacity"
        } else {
            "glyph-table"
        }
    }

    #[test]
    fn missing_font_falls_back_without_failing() {
        let rasterizer = build_rasterizer(Some("/no/such/font.ttf"), &TextConfig::default());
        assert_eq!(rasterizer.name(), expected_without_named_font());
    }

    #[test]
    fn no_font_prefers_system_font_sampling() {
        let rasterizer = build_rasterizer(None, &TextConfig::default());
        assert_eq!(rasterizer.name(), expected_without_named_font());
    }

    #[test]
    fn engine_builds_from_defaults() {
        let args = ShowArgs {
            config: None,
            font: None,
            frames: 1,
            fps: 60.0,
            width: 320,
            height: 240,
            seed: Some(1),
        };
        let engine = args.build_engine().unwrap();
        assert_eq!(engine.config().messages.len(), 3);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = ShowArgs {
            config: Some("/no/such/show.toml".into()),
            font: None,
            frames: 1,
            fps: 60.0,
            width: 320,
            height: 240,
            seed: None,
        };
        let err = args.load_config().unwrap_err();
        assert!(err.to_string().contains("/no/such/show.toml"));
    }
}
