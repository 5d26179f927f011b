//! Show configuration, loaded from TOML
//!
//! Every section is optional in the file; missing keys keep their defaults.
//!
//! ```toml
//! messages = ["HELLO", "WORLD"]
//!
//! [timing]
//! message_duration_ms = 8000.0
//!
//! [ambient]
//! palette = ["#ff4500d9", "#1e90ffd9"]
//! ```

use flare_core::{Color, FlareError, Result};
use flare_particles::Motion;
use flare_text::TextConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Phase lengths and burst spacing, all in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// How long a message phase lasts before the pause
    pub message_duration_ms: f64,
    /// Pause length is drawn uniformly from this range on entry
    pub pause_min_ms: f64,
    pub pause_max_ms: f64,
    /// A message is emitted on the first tick within this window of phase start
    pub emission_window_ms: f64,
    /// Gap before the next ambient burst, redrawn after every burst
    pub burst_interval_min_ms: f64,
    pub burst_interval_max_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            message_duration_ms: 10_000.0,
            pause_min_ms: 2_000.0,
            pause_max_ms: 5_000.0,
            emission_window_ms: 60.0,
            burst_interval_min_ms: 400.0,
            burst_interval_max_ms: 1_400.0,
        }
    }
}

/// Look and motion of message particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageStyle {
    pub color: Color,
    /// Lifespan in ticks
    pub lifespan: u32,
    /// Peak per-axis drift speed; actual drift is uniform in ±drift/2
    pub drift: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Extra placement jitter on top of the rasterizer's own (px)
    pub jitter: f32,
    pub motion: Motion,
}

impl Default for MessageStyle {
    fn default() -> Self {
        Self {
            color: Color::rgba8(255, 180, 220, 1.0),
            lifespan: 220,
            drift: 0.35,
            radius_min: 2.0,
            radius_max: 3.6,
            jitter: 0.0,
            motion: Motion::DRIFT,
        }
    }
}

/// Look, geometry and motion of ambient bursts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientStyle {
    pub enabled: bool,
    pub palette: Vec<Color>,
    pub count_min: u32,
    pub count_max: u32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Lifespan range in ticks (inclusive)
    pub lifespan_min: u32,
    pub lifespan_max: u32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Burst centers fall between these fractions of the viewport height
    pub vertical_min: f32,
    pub vertical_max: f32,
    pub motion: Motion,
}

impl Default for AmbientStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            palette: vec![
                Color::rgba8(255, 69, 0, 0.85),
                Color::rgba8(30, 144, 255, 0.85),
                Color::rgba8(255, 215, 0, 0.85),
                Color::rgba8(50, 205, 50, 0.85),
                Color::rgba8(138, 43, 226, 0.85),
                Color::rgba8(255, 105, 180, 0.85),
                Color::rgba8(255, 140, 0, 0.85),
            ],
            count_min: 24,
            count_max: 49,
            speed_min: 2.0,
            speed_max: 5.0,
            lifespan_min: 80,
            lifespan_max: 120,
            radius_min: 2.0,
            radius_max: 3.6,
            vertical_min: 0.15,
            vertical_max: 0.85,
            motion: Motion::new(0.03, 0.985),
        }
    }
}

/// Background and particle glow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    /// Radial night-sky gradient, center to edge
    pub background_inner: Color,
    pub background_outer: Color,
    /// Halo blur radius drawn around every particle (px)
    pub glow: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background_inner: Color::from_hex(0x000012),
            background_outer: Color::BLACK,
            glow: 10.0,
        }
    }
}

/// Complete show configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Shown in order, wrapping to the first after the last
    pub messages: Vec<String>,
    pub timing: TimingConfig,
    pub message: MessageStyle,
    pub ambient: AmbientStyle,
    pub scene: SceneStyle,
    pub text: TextConfig,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            messages: ["HAPPY NEW YEAR", "MAKE A WISH", "SHINE BRIGHT"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timing: TimingConfig::default(),
            message: MessageStyle::default(),
            ambient: AmbientStyle::default(),
            scene: SceneStyle::default(),
            text: TextConfig::default(),
        }
    }
}

impl ShowConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::info!(
            "loaded show config {} ({} message(s))",
            path.display(),
            config.messages.len()
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject settings that would break the show's invariants
    pub fn validate(&self) -> Result<()> {
        let t = &self.timing;
        positive("timing.message_duration_ms", t.message_duration_ms)?;
        ordered("timing.pause", t.pause_min_ms, t.pause_max_ms)?;
        non_negative("timing.pause_min_ms", t.pause_min_ms)?;
        positive("timing.emission_window_ms", t.emission_window_ms)?;
        ordered("timing.burst_interval", t.burst_interval_min_ms, t.burst_interval_max_ms)?;
        non_negative("timing.burst_interval_min_ms", t.burst_interval_min_ms)?;

        let m = &self.message;
        if m.lifespan == 0 {
            return Err(FlareError::InvalidConfig("message.lifespan must be > 0".into()));
        }
        ordered("message.radius", m.radius_min as f64, m.radius_max as f64)?;
        non_negative("message.radius_min", m.radius_min as f64)?;

        let a = &self.ambient;
        if a.palette.is_empty() {
            return Err(FlareError::InvalidConfig("ambient.palette must not be empty".into()));
        }
        if a.lifespan_min == 0 {
            return Err(FlareError::InvalidConfig("ambient.lifespan_min must be > 0".into()));
        }
        ordered("ambient.count", a.count_min as f64, a.count_max as f64)?;
        ordered("ambient.speed", a.speed_min as f64, a.speed_max as f64)?;
        ordered("ambient.lifespan", a.lifespan_min as f64, a.lifespan_max as f64)?;
        ordered("ambient.radius", a.radius_min as f64, a.radius_max as f64)?;
        ordered("ambient.vertical", a.vertical_min as f64, a.vertical_max as f64)?;
        fraction("ambient.vertical_min", a.vertical_min as f64)?;
        fraction("ambient.vertical_max", a.vertical_max as f64)?;

        let x = &self.text;
        if x.width_fraction <= 0.0 || x.width_fraction > 1.0 {
            return Err(out_of_range("text.width_fraction", 0.0, 1.0, x.width_fraction as f64));
        }
        positive("text.min_font_size", x.min_font_size as f64)?;
        positive("text.font_step", x.font_step as f64)?;
        ordered("text.font_size", x.min_font_size as f64, x.max_font_size as f64)?;
        positive("text.cell_divisor", x.cell_divisor as f64)?;
        positive("text.line_spacing", x.line_spacing as f64)?;
        fraction("text.vertical_fraction", x.vertical_fraction as f64)?;
        Ok(())
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> FlareError {
    FlareError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(field, f64::MIN_POSITIVE, f64::MAX, value))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(field, 0.0, f64::MAX, value))
    }
}

fn fraction(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(out_of_range(field, 0.0, 1.0, value))
    }
}

fn ordered(field: &str, min: f64, max: f64) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(FlareError::InvalidConfig(format!(
            "{field}: minimum {min} exceeds maximum {max}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ShowConfig::default();
        config.validate().unwrap();
        assert_eq!(config.ambient.palette.len(), 7);
        assert_eq!(config.timing.message_duration_ms, 10_000.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let source = r##"
messages = ["ONE", "TWO"]

[timing]
message_duration_ms = 5000

[message]
color = "#ffffff"
motion = { gravity = 0.01 }

[ambient]
palette = ["#ff0000", [0.0, 1.0, 0.0, 0.5]]
"##;
        let config = ShowConfig::from_toml_str(source).unwrap();
        assert_eq!(config.messages, vec!["ONE", "TWO"]);
        assert_eq!(config.timing.message_duration_ms, 5000.0);
        assert_eq!(config.timing.pause_max_ms, 5000.0);
        assert_eq!(config.message.color, Color::WHITE);
        assert!((config.message.motion.gravity - 0.01).abs() < 1e-6);
        assert_eq!(config.message.motion.friction, 1.0);
        assert_eq!(config.ambient.palette.len(), 2);
        assert!((config.ambient.palette[1].a - 0.5).abs() < 1e-6);
        assert_eq!(config.ambient.count_min, 24);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let source = "[timing]\npause_min_ms = 6000\npause_max_ms = 1000\n";
        let err = ShowConfig::from_toml_str(source).unwrap_err();
        assert!(matches!(err, FlareError::InvalidConfig(_)));
    }

    #[test]
    fn empty_palette_is_rejected() {
        let err = ShowConfig::from_toml_str("[ambient]\npalette = []\n").unwrap_err();
        assert!(matches!(err, FlareError::InvalidConfig(_)));
    }

    #[test]
    fn bad_width_fraction_is_out_of_range() {
        let err = ShowConfig::from_toml_str("[text]\nwidth_fraction = 1.5\n").unwrap_err();
        assert!(matches!(err, FlareError::ValueOutOfRange { .. }));
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = ShowConfig::from_toml_str("[message]\ncolor = \"pink\"\n").unwrap_err();
        assert!(matches!(err, FlareError::TomlParseError(_)));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let config = ShowConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = ShowConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.messages, config.messages);
        assert_eq!(parsed.timing, config.timing);
        assert_eq!(parsed.ambient.palette.len(), config.ambient.palette.len());
    }
}
