//! Reading and writing of a single geo parameter token.
//!
//! A token is either a flag `name` or a `name=value` pair. Values are
//! percent-encoded like `encodeURIComponent` would do, except for the
//! `p-unreserved` characters of RFC 5870 (`[ ] : & + $`), which are written
//! as is.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped in parameter values.
///
/// Everything but ASCII alphanumerics, the RFC 3986 `mark` characters and
/// the RFC 5870 `p-unreserved` characters.
const PARAM_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    // mark
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    // p-unreserved
    .remove(b'[')
    .remove(b']')
    .remove(b':')
    .remove(b'&')
    .remove(b'+')
    .remove(b'$');

/// Splits a parameter token into its name and decoded value.
///
/// The token is split on the first `=`. A token without `=` is a flag and
/// gets an empty value. `+` is not decoded to a space. Malformed escapes are
/// kept as they are and invalid UTF-8 is replaced.
///
/// # Examples
///
/// ```
/// use geo_url::read_param;
///
/// assert_eq!(read_param("u=35"), ("u".to_string(), "35".to_string()));
/// assert_eq!(read_param("flag"), ("flag".to_string(), String::new()));
/// assert_eq!(read_param("plus=a+b"), ("plus".to_string(), "a+b".to_string()));
/// ```
#[must_use]
pub fn read_param(token: &str) -> (String, String) {
    match token.split_once('=') {
        Some((name, value)) => (name.to_string(), decode_value(value)),
        None => (token.to_string(), String::new()),
    }
}

/// Writes a parameter token.
///
/// An empty value produces a bare flag `name`.
///
/// # Examples
///
/// ```
/// use geo_url::write_param;
///
/// assert_eq!(write_param("u", "35"), "u=35");
/// assert_eq!(write_param("flag", ""), "flag");
/// assert_eq!(write_param("foo", "a b;c"), "foo=a%20b%3Bc");
/// assert_eq!(write_param("foo", "[]:&+$"), "foo=[]:&+$");
/// ```
#[must_use]
pub fn write_param(name: &str, value: &str) -> String {
    if value.is_empty() {
        return name.to_string();
    }
    let mut token = String::with_capacity(name.len() + 1 + value.len());
    token.push_str(name);
    token.push('=');
    for chunk in utf8_percent_encode(value, PARAM_VALUE_SET) {
        token.push_str(chunk);
    }
    token
}

fn decode_value(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}
