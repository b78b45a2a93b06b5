//! Sequence-number formatting for `{i:...}` and `{iv:...}`.
//!
//! A spec starting with an ASCII digit is a zero-padded counter whose origin
//! is the first non-zero digit (`001` counts 1, 2, 3 as `001`, `002`, `003`).
//! A spec starting with a Chinese numeral renders Chinese numerals from that
//! numeral's value. Anything else renders the plain integer.

use super::chinese::{numeral_origin, to_chinese, NumeralStyle};

/// Format an already transformed index value
pub fn format_index(value: i64, spec: &str) -> String {
    let Some(first) = spec.chars().next() else {
        return value.to_string();
    };

    if first.is_ascii_digit() {
        return format_numeric(value, spec);
    }

    if let (Some(style), Some(origin)) = (NumeralStyle::of_char(first), numeral_origin(first)) {
        return to_chinese(value.saturating_add(origin), style);
    }

    value.to_string()
}

fn format_numeric(value: i64, spec: &str) -> String {
    let origin = spec
        .chars()
        .find(|&c| c != '0')
        .and_then(|c| c.to_digit(10))
        .map(i64::from)
        .unwrap_or(0);
    let width = spec.chars().count();
    let shown = value.saturating_add(origin).max(0);
    format!("{:0width$}", shown, width = width)
}
