//! Greedy word wrap by character count, plus the per-line hard clip.
//!
//! The wrap width is a coarse estimate derived from the width of "M" at the
//! candidate size. The clip step then guarantees the real width bound.

use crate::layout::font_metrics::{StandardFont, TextMeasure};

/// Glyph used to estimate how many characters fit on a line.
pub const REFERENCE_GLYPH: &str = "M";

/// Approximate characters per line at `size`, or `None` when the reference
/// glyph measures zero (the size is unusable).
pub fn chars_per_line<M: TextMeasure + ?Sized>(
    measure: &M,
    font: StandardFont,
    size: f32,
    max_width: f32,
) -> Option<usize> {
    let glyph_width = measure.text_width(REFERENCE_GLYPH, font, size);
    if glyph_width <= 0.0 {
        return None;
    }
    Some(((max_width / glyph_width).floor() as usize).max(1))
}

/// Greedy word wrap: accumulate words until the next one would push the line
/// past `width` characters. Words are never split, so a word longer than
/// `width` ends up alone on its own line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Drops trailing characters until `line` fits `max_width` or a single
/// character remains. Ignores word boundaries.
pub fn clip_to_width<M: TextMeasure + ?Sized>(
    measure: &M,
    mut line: String,
    font: StandardFont,
    size: f32,
    max_width: f32,
) -> String {
    while line.chars().count() > 1 && measure.text_width(&line, font, size) > max_width {
        line.pop();
    }
    line
}

/// Wraps `text` at `chars_per_line` and clips every line to `max_width`.
pub fn wrap_and_clip<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: StandardFont,
    size: f32,
    max_width: f32,
    chars_per_line: usize,
) -> Vec<String> {
    wrap_words(text, chars_per_line)
        .into_iter()
        .map(|line| clip_to_width(measure, line, font, size, max_width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::StandardMetrics;

    #[test]
    fn test_wrap_words_greedy_breaks() {
        let lines = wrap_words("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_words_exact_fit_stays_on_line() {
        let lines = wrap_words("hello world", 11);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_words_long_word_is_not_split() {
        let lines = wrap_words("a Supercalifragilistic b", 5);
        assert_eq!(lines, vec!["a", "Supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_words_collapses_whitespace() {
        let lines = wrap_words("  Bohemian \t  Rhapsody ", 40);
        assert_eq!(lines, vec!["Bohemian Rhapsody"]);
    }

    #[test]
    fn test_wrap_words_blank_is_empty() {
        assert!(wrap_words("   ", 10).is_empty());
    }

    #[test]
    fn test_chars_per_line_floors_to_one() {
        // M at 10pt Courier is 6pt wide; a 4pt line still gets one character.
        let n = chars_per_line(&StandardMetrics, StandardFont::Courier, 10.0, 4.0);
        assert_eq!(n, Some(1));
        let n = chars_per_line(&StandardMetrics, StandardFont::Courier, 10.0, 61.0);
        assert_eq!(n, Some(10));
    }

    #[test]
    fn test_clip_to_width_drops_trailing_chars() {
        // Courier 10pt: 6pt per char, so 20pt holds three characters.
        let clipped = clip_to_width(
            &StandardMetrics,
            "abcdefgh".to_string(),
            StandardFont::Courier,
            10.0,
            20.0,
        );
        assert_eq!(clipped, "abc");
    }

    #[test]
    fn test_clip_to_width_keeps_one_char() {
        let clipped = clip_to_width(
            &StandardMetrics,
            "WWW".to_string(),
            StandardFont::Helvetica,
            50.0,
            1.0,
        );
        assert_eq!(clipped, "W", "the first character is never dropped");
    }

    #[test]
    fn test_clip_to_width_handles_multibyte_chars() {
        let clipped = clip_to_width(
            &StandardMetrics,
            "ééééé".to_string(),
            StandardFont::Courier,
            10.0,
            13.0,
        );
        assert_eq!(clipped, "éé");
    }
}
