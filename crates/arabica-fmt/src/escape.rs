//! Java-style escaping for string and character literals.
//!
//! Characters at or above U+00C0, control characters, surrogate-range
//! artifacts, and non-space whitespace are rendered as `\uXXXX` escapes
//! (one per UTF-16 unit) so the emitted text survives any target encoding.

use std::fmt::Write as _;

/// Escape and quote a character literal: `'a'`, `'\n'`, `'é'`.
pub fn escape_char_literal(ch: char) -> String {
    let mut out = String::with_capacity(8);
    out.push('\'');
    escape_char_into(ch, '\'', &mut out);
    out.push('\'');
    out
}

/// Escape and quote a string literal: `"line\n"`.
pub fn escape_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        escape_char_into(ch, '"', &mut out);
    }
    out.push('"');
    out
}

fn escape_char_into(ch: char, quote: char, out: &mut String) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\0' => out.push_str("\\u0000"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ if ch == quote => {
            out.push('\\');
            out.push(quote);
        }
        _ if needs_unicode_escape(ch) => {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
        _ => out.push(ch),
    }
}

fn needs_unicode_escape(ch: char) -> bool {
    ch as u32 >= 0xC0 || ch.is_control() || (ch.is_whitespace() && ch != ' ')
}
