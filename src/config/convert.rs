//! Lenient string conversions for setting values.
//!
//! Every conversion is total: a value that cannot be parsed turns into the
//! target type's zero value (`0`, `false`, `0.0`) instead of an error.
//! Callers rely on this, so a malformed setting never aborts a bind.

/// Separator between items of a sequence setting.
pub const ITEMS_DELIMITER: char = ';';

/// Passes the raw value through unchanged.
pub fn convert_string(raw: &str) -> String {
    raw.to_owned()
}

/// Parses a base-10 32-bit integer, falling back to `0`.
pub fn convert_int(raw: &str) -> i32 {
    trim_number(raw).parse().unwrap_or_default()
}

/// Parses `1`/`0` or a case-insensitive `true`/`false`, falling back to `false`.
pub fn convert_bool(raw: &str) -> bool {
    // digits are accepted as well as words
    match raw {
        "1" => true,
        "0" => false,
        _ => trim_number(raw).eq_ignore_ascii_case("true"),
    }
}

/// Parses a decimal number in invariant notation, falling back to `0.0`.
///
/// Only `.` is accepted as the decimal separator. Special values such as
/// `inf` or `NaN` are not numbers here and also fall back.
pub fn convert_double(raw: &str) -> f64 {
    let raw = trim_number(raw);
    if !looks_like_decimal(raw) {
        return 0.0;
    }
    // out-of-range literals overflow to infinity
    raw.parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .unwrap_or_default()
}

/// Strips surrounding ASCII whitespace, vertical tab included.
fn trim_number(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\u{b}')
}

fn looks_like_decimal(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
}

/// Splits `raw` on [`ITEMS_DELIMITER`] and converts every token with `convert`.
///
/// Tokens are neither trimmed nor dropped; an empty token converts like any
/// other malformed value, so the result always has one item per token.
pub fn convert_sequence<T>(raw: &str, convert: impl Fn(&str) -> T) -> Vec<T> {
    raw.split(ITEMS_DELIMITER).map(convert).collect()
}
