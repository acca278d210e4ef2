//! Escaping for text embedded in generated Java source.

/// Escape a value for use inside a Java string literal. Control characters
/// and everything outside ASCII are written as `\uXXXX` UTF-16 escapes so the
/// output is pure ASCII.
pub fn escape_java(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if c.is_ascii_control() || !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// Make free text safe for a single Javadoc line. Line breaks collapse to
/// spaces, `*/` cannot close the comment and `\u` cannot start a unicode
/// escape.
pub fn escape_javadoc(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "*&#47;")
        .replace("\\u", "&#92;u")
}
