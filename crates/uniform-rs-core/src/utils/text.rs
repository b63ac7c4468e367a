//! String utility functions shared by the formatter, the validators and the
//! banner renderer.

/// Turns raw label text into a caption suitable for message interpolation.
///
/// Removes the first `*` (required marker) and the first `:` and trims the
/// result.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::utils::text::clean_caption;
///
/// assert_eq!(clean_caption("Email *:"), "Email");
/// assert_eq!(clean_caption("Time: 10:30"), "Time 10:30");
/// assert_eq!(clean_caption(""), "");
/// ```
pub fn clean_caption(label: &str) -> String {
    let without_star = label.replacen('*', "", 1);
    without_star.replacen(':', "", 1).trim().to_string()
}

/// Escapes the five HTML-significant characters.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::utils::text::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parses the leading base-10 integer of a string.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit, and `None` is returned when no digit was read. Values
/// beyond the `i64` range saturate.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::utils::text::parse_leading_int;
///
/// assert_eq!(parse_leading_int("42"), Some(42));
/// assert_eq!(parse_leading_int("  -7px"), Some(-7));
/// assert_eq!(parse_leading_int("12.9"), Some(12));
/// assert_eq!(parse_leading_int("abc"), None);
/// assert_eq!(parse_leading_int(""), None);
/// ```
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let d = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(d)
        } else {
            value.saturating_add(d)
        };
    }
    seen.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── clean_caption ────────────────────────────────────────────────

    #[test]
    fn test_clean_caption_plain() {
        assert_eq!(clean_caption("Name"), "Name");
    }

    #[test]
    fn test_clean_caption_required_marker() {
        assert_eq!(clean_caption("* Password"), "Password");
        assert_eq!(clean_caption("Password *"), "Password");
    }

    #[test]
    fn test_clean_caption_only_first_occurrences() {
        assert_eq!(clean_caption("a*b*c:d:e"), "ab*cd:e");
        assert_eq!(clean_caption("**x::"), "*x:");
    }

    // ── escape_html ──────────────────────────────────────────────────

    #[test]
    fn test_escape_html_passthrough() {
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_escape_html_ampersand_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    // ── parse_leading_int ────────────────────────────────────────────

    #[test]
    fn test_parse_leading_int_sign_only() {
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("+5"), Some(5));
    }

    #[test]
    fn test_parse_leading_int_stops_at_non_digit() {
        assert_eq!(parse_leading_int("1e5"), Some(1));
        assert_eq!(parse_leading_int("007"), Some(7));
    }

    #[test]
    fn test_parse_leading_int_saturates() {
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999999"), Some(i64::MIN));
    }
}
