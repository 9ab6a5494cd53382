//! Decimal number reading and writing shared by coordinates, `u` and `z`.

use crate::error::NumberError;

/// Parses the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped, then an optional sign followed by either
/// `Infinity` or a decimal literal with optional fraction and exponent.
/// Anything after the numeric prefix is ignored, so `"12abc"` reads as `12`.
/// Returns `None` when there is no numeric prefix at all.
///
/// # Examples
///
/// ```
/// use geo_url::parse_number;
///
/// assert_eq!(parse_number("47.6"), Some(47.6));
/// assert_eq!(parse_number(" -1e3 "), Some(-1000.0));
/// assert_eq!(parse_number("12abc"), Some(12.0));
/// assert_eq!(parse_number("abc"), None);
/// assert_eq!(parse_number(""), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start_matches(is_number_whitespace);
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().ok()
}

/// Formats `value` in fixed-point notation with at most `max_decimal_digits`
/// fractional digits.
///
/// The value is rounded to exactly `max_decimal_digits` digits, then trailing
/// fractional zeros and a dangling decimal point are removed. Digits before
/// the decimal point are never touched.
///
/// # Errors
///
/// Returns `NumberError::NonFinite` for infinities and NaN.
///
/// # Examples
///
/// ```
/// use geo_url::format_number;
///
/// assert_eq!(format_number(0.1 + 0.2, 12).unwrap(), "0.3");
/// assert_eq!(format_number(1000.0, 9).unwrap(), "1000");
/// assert!(format_number(f64::NAN, 9).is_err());
/// ```
pub fn format_number(value: f64, max_decimal_digits: usize) -> Result<String, NumberError> {
    if !value.is_finite() {
        return Err(NumberError::NonFinite { value });
    }
    Ok(format_finite(value, max_decimal_digits))
}

/// Formats a value already known to be finite.
pub(crate) fn format_finite(value: f64, max_decimal_digits: usize) -> String {
    let mut s = format!("{value:.max_decimal_digits$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ECMAScript StrWhiteSpaceChar: WhiteSpace and LineTerminator, including the BOM.
fn is_number_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}
