use super::wrap::wrap_label;
use super::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};

/// Fixed advance per character, independent of font size. Matches the
/// "9px per character" oracle used throughout the wrapping contract.
struct PerCharMeasurer {
    px_per_char: f64,
}

impl TextMeasurer for PerCharMeasurer {
    fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f64 * self.px_per_char,
            height: self.px_per_char,
        }
    }
}

fn wrap_9px(text: &str, max_width_px: f64) -> Vec<String> {
    let measurer = PerCharMeasurer { px_per_char: 9.0 };
    wrap_label(text, &measurer, &TextStyle::default(), max_width_px)
}

#[test]
fn short_label_stays_on_one_line() {
    // "Detail 1.1" is 10 chars = 90px, inside the 100px budget.
    assert_eq!(wrap_9px("Detail 1.1", 100.0), vec!["Detail 1.1"]);
}

#[test]
fn lines_fit_and_words_survive_in_order() {
    let text = "a hierarchical mind map about the solar system";
    let lines = wrap_9px(text, 100.0);
    let measurer = PerCharMeasurer { px_per_char: 9.0 };
    for line in &lines {
        assert!(!line.is_empty());
        assert!(
            measurer.measure(line, &TextStyle::default()).width <= 100.0
                || line.split_whitespace().count() == 1,
            "line too wide: {line:?}"
        );
    }
    let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
    let original: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(rejoined, original);
}

#[test]
fn overlong_word_gets_its_own_line_unsplit() {
    let lines = wrap_9px("tiny Supercalifragilisticexpialidocious end", 90.0);
    assert_eq!(
        lines,
        vec!["tiny", "Supercalifragilisticexpialidocious", "end"]
    );
}

#[test]
fn whitespace_only_input_produces_no_lines() {
    assert!(wrap_9px("", 100.0).is_empty());
    assert!(wrap_9px("   \t ", 100.0).is_empty());
}

#[test]
fn collapses_repeated_whitespace() {
    assert_eq!(wrap_9px("a  b\t c", 100.0), vec!["a b c"]);
}

#[test]
fn nonpositive_budget_degrades_to_one_word_per_line() {
    assert_eq!(wrap_9px("one two three", 0.0), vec!["one", "two", "three"]);
}

#[test]
fn deterministic_measurer_scales_with_font_size() {
    let measurer = DeterministicTextMeasurer::default();
    let narrow = measurer.measure("abcdef", &TextStyle::sized(10.0));
    let wide = measurer.measure("abcdef", &TextStyle::sized(20.0));
    assert!(wide.width > narrow.width);
    assert_eq!(narrow.width, 6.0 * 10.0 * 0.6);
}

#[test]
fn deterministic_measurer_counts_wide_glyphs_double() {
    let measurer = DeterministicTextMeasurer::default();
    let style = TextStyle::sized(10.0);
    let ascii = measurer.measure("ab", &style);
    let cjk = measurer.measure("日本", &style);
    assert_eq!(cjk.width, 2.0 * ascii.width);
}
