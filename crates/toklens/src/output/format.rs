//! Pure formatting helpers for numbers, ratios, and labels.

use owo_colors::OwoColorize;

/// Format a number with thousands separators (commas).
#[must_use]
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let digits: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let len = digits.len();
    for (i, &c) in digits.iter().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a `[0, 1]` ratio as a percentage with one decimal.
#[must_use]
pub fn format_pct(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Format a score with two decimals.
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Bold `text` when `color` is on; plain otherwise.
pub(super) fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_owned()
    }
}

/// Dim `text` when `color` is on; plain otherwise.
pub(super) fn dim(text: &str, color: bool) -> String {
    if color {
        text.dimmed().to_string()
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1_000, "1,000")]
    #[case(1_234_567, "1,234,567")]
    fn numbers_get_thousands_separators(#[case] n: usize, #[case] expected: &str) {
        assert_eq!(format_number(n), expected);
    }

    #[rstest]
    #[case(0.0, "0.0%")]
    #[case(0.823, "82.3%")]
    #[case(1.0, "100.0%")]
    fn ratios_format_as_percentages(#[case] ratio: f64, #[case] expected: &str) {
        assert_eq!(format_pct(ratio), expected);
    }

    #[test]
    fn plain_mode_leaves_text_unstyled() {
        assert_eq!(heading("Tokens", false), "Tokens");
        assert_eq!(dim("note", false), "note");
    }
}
