//! Form data serialization.
//!
//! The leave guard compares snapshots of the form's data, so the encoding
//! only has to be deterministic: pairs keep document order and are encoded as
//! `application/x-www-form-urlencoded` (space as `+`, the unreserved marks
//! `- _ . ! ~ * ' ( )` left as is).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes one name or value.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, FORM_VALUE)
        .to_string()
        .replace("%20", "+")
}

/// Encodes name/value pairs in order.
///
/// # Examples
///
/// ```
/// use uniform_rs_forms::serialize::urlencode;
///
/// let pairs = vec![
///     ("name".to_string(), "Jane Doe".to_string()),
///     ("tags".to_string(), "a&b".to_string()),
///     ("tags".to_string(), "c".to_string()),
/// ];
/// assert_eq!(urlencode(&pairs), "name=Jane+Doe&tags=a%26b&tags=c");
/// ```
pub fn urlencode(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}
