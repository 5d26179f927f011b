//! Font-size fitting and greedy word wrapping

use crate::TextConfig;

/// Result of fitting a message into a width budget
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub font_size: f32,
    pub lines: Vec<String>,
}

/// Pick the largest candidate size whose single-line width fits `budget`.
///
/// Candidates start at `min(max_font_size, viewport_width / 10)` and step
/// down by `font_step` to the `min_font_size` floor. Returns the floor when
/// nothing fits; the caller then wraps.
pub fn fit_font_size<M>(
    text: &str,
    budget: f32,
    viewport_width: f32,
    config: &TextConfig,
    measure: M,
) -> f32
where
    M: Fn(&str, f32) -> f32,
{
    let floor = config.min_font_size.max(1.0);
    let step = config.font_step.max(0.5);
    let mut size = config.max_font_size.min(viewport_width / 10.0).max(floor);

    while measure(text, size) > budget && size > floor {
        size = (size - step).max(floor);
    }
    size
}

/// Greedy fill: a word joins the current line while the line still fits,
/// otherwise it starts a new one. A lone word never gets split, so every
/// iteration places one word and the loop always terminates.
pub fn wrap_words<M>(text: &str, budget: f32, font_size: f32, measure: M) -> Vec<String>
where
    M: Fn(&str, f32) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate, font_size) <= budget {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Fit then wrap. Whitespace-only text yields no lines.
pub fn layout_text<M>(
    text: &str,
    budget: f32,
    viewport_width: f32,
    config: &TextConfig,
    measure: M,
) -> TextLayout
where
    M: Fn(&str, f32) -> f32,
{
    let font_size = fit_font_size(text, budget, viewport_width, config, &measure);
    let lines = wrap_words(text, budget, font_size, &measure);
    log::debug!(
        "layout {:?}: font {}px, {} line(s), budget {:.0}px",
        text,
        font_size,
        lines.len(),
        budget
    );
    TextLayout { font_size, lines }
}
