//! Reversible escaping for JSON string bodies and XML text/attribute bodies.
//!
//! The two escapers live in separate universes and are never composed. The XML path
//! re-derives its strings from JSON scalars that the JSON parser has already
//! unescaped, so `{$` sequences survive into XML untouched.

/// Escape a string body for embedding between JSON double quotes.
///
/// Besides `"` and `\`, a literal `$` becomes `{$` so that ordinary strings can never
/// be mistaken for an extended-type sentinel. Control characters are escaped so the
/// result is always valid JSON.
pub fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    push_json_escaped(s, true, &mut out);
    out
}

/// Exact inverse of [`escape_json`].
///
/// Backslash escapes that `escape_json` never produces are kept verbatim.
pub fn unescape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('b') => out.push('\u{8}'),
                Some('f') => out.push('\u{c}'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(ch) if hex.len() == 4 => out.push(ch),
                        _ => {
                            out.push_str("\\u");
                            out.push_str(&hex);
                        }
                    }
                }
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '{' if chars.peek() == Some(&'$') => {
                chars.next();
                out.push('$');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Turn every `{$` back into `$`. Applied to string scalars the JSON parser has
/// already unescaped.
pub fn unescape_dollars(s: &str) -> String {
    s.replace("{$", "$")
}

/// Escape a string for an XML attribute value or text node.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '>' => out.push_str("&gt;"),
            '<' => out.push_str("&lt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Append `s` as a complete quoted JSON string.
pub(crate) fn push_json_string(s: &str, escape_dollar: bool, out: &mut String) {
    out.push('"');
    push_json_escaped(s, escape_dollar, out);
    out.push('"');
}

fn push_json_escaped(s: &str, escape_dollar: bool, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' if escape_dollar => out.push_str("{$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() && (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(ch),
        }
    }
}
