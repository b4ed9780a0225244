//! Lenient parsing of numeric form fields.

/// Reads an integer the way a forgiving form field does: leading whitespace,
/// an optional sign, then every digit up to the first non-digit.
///
/// Returns `None` when no digit follows or the value overflows `i64`.
///
/// # Examples
/// ```
/// use ui::engine::input::parse_int_prefix;
/// assert_eq!(parse_int_prefix(" 12abc"), Some(12));
/// assert_eq!(parse_int_prefix("-7"), Some(-7));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign = match s.as_bytes().first() {
        Some(b'-' | b'+') => 1,
        _ => 0,
    };

    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    // Parsing with the sign attached keeps i64::MIN in range.
    s[..sign + digits].parse().ok()
}
