//! Greedy line wrapping against measured glyph widths.

use crate::fonts::TextMeasure;
use crate::style::TextStyle;

/// Splits `text` into lines no wider than `max_width` millimetres.
///
/// Explicit newlines always start a new line and empty lines are kept.
/// Lines are broken at spaces; runs of spaces (code indentation) survive
/// because each space-separated token, even an empty one, is rejoined with a
/// single space.  A token wider than the whole line is broken between
/// characters.
pub fn wrap_text(
    text: &str,
    style: &TextStyle,
    max_width: f64,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let width = |s: &str| measure.text_width(s, style.face, style.size_pt);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if width(paragraph) <= max_width {
            lines.push(paragraph.to_owned());
            continue;
        }

        let mut line = String::new();
        let mut started = false;
        let mut wrapped = false;

        for token in paragraph.split(' ') {
            // Spaces at a break vanish; only leading indentation is kept.
            if token.is_empty() && wrapped && !started {
                continue;
            }

            let candidate = if started {
                format!("{} {}", line, token)
            } else {
                token.to_owned()
            };

            if width(&candidate) <= max_width {
                line = candidate;
                started = true;
                continue;
            }

            if started && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                wrapped = true;
            }

            if token.is_empty() {
                line.clear();
                started = false;
                continue;
            }

            if width(token) <= max_width {
                line = token.to_owned();
            } else {
                let mut pieces = break_token(token, max_width, &width);
                line = pieces.pop().unwrap_or_default();
                wrapped |= !pieces.is_empty();
                lines.extend(pieces);
            }
            started = true;
        }

        lines.push(line);
    }

    lines
}

fn break_token(token: &str, max_width: f64, width: &dyn Fn(&str) -> f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in token.chars() {
        piece.push(ch);
        if width(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }

    pieces.push(piece);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontFace, Rgb};

    /// Every character is exactly one millimetre wide.
    struct UnitMetrics;

    impl TextMeasure for UnitMetrics {
        fn text_width(&self, text: &str, _face: FontFace, _size_pt: f64) -> f64 {
            text.chars().count() as f64
        }
    }

    fn wrap(text: &str, max_width: f64) -> Vec<String> {
        let style = TextStyle::new(FontFace::Mono, 10.0, Rgb::BLACK);
        wrap_text(text, &style, max_width, &UnitMetrics)
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("hello world", 20.0), vec!["hello world"]);
    }

    #[test]
    fn breaks_at_spaces() {
        assert_eq!(
            wrap("the quick brown fox", 10.0),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn keeps_explicit_newlines_and_blank_lines() {
        assert_eq!(wrap("a\n\nb", 10.0), vec!["a", "", "b"]);
    }

    #[test]
    fn preserves_indentation() {
        assert_eq!(
            wrap("    return value + other;", 16.0),
            vec!["    return value", "+ other;"]
        );
    }

    #[test]
    fn spaces_at_a_break_do_not_indent_the_next_line() {
        assert_eq!(wrap("aaaa bbbb  cc", 9.0), vec!["aaaa bbbb", "cc"]);
        assert_eq!(wrap("aaaa bbbb    cc dd", 9.0), vec!["aaaa bbbb", "cc dd"]);
        assert_eq!(wrap("  aaaa bbbb cc", 9.0), vec!["  aaaa", "bbbb cc"]);
    }

    #[test]
    fn splits_tokens_wider_than_the_line() {
        assert_eq!(wrap("abcdefghij xy", 4.0), vec!["abcd", "efgh", "ij", "xy"]);
    }
}
