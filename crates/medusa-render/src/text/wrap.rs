//! Greedy word wrapping for node labels.

use super::{TextMeasurer, TextStyle};

/// Wraps `text` into lines no wider than `max_width_px` according to the
/// provided measurer.
///
/// Words are whitespace-separated and never split: a single word wider than
/// the limit is placed alone on its own line. Produced lines are non-empty
/// and concatenating their words in order reproduces the input word
/// sequence.
pub fn wrap_label(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };
    if !max_width_px.is_finite() || max_width_px <= 0.0 {
        // Degenerate limit: one word per line is the closest legal output.
        return std::iter::once(first)
            .chain(words)
            .map(str::to_string)
            .collect();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate, style).width <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}
