//! String emission (§4.5 "Strings"). The inverse of
//! [`crate::decode::string`]: escapes a Rust `&str` back into JXC source
//! text under a chosen quote style.

use super::settings::QuoteStyle;

fn pick_quote(s: &str, preferred: QuoteStyle) -> char {
    match preferred {
        QuoteStyle::Double => '"',
        QuoteStyle::Single => '\'',
        QuoteStyle::Auto => {
            let singles = s.chars().filter(|&c| c == '\'').count();
            let doubles = s.chars().filter(|&c| c == '"').count();
            if singles < doubles {
                '\''
            } else {
                '"'
            }
        }
    }
}

/// Escapes `s` into a quoted JXC string literal.
pub fn value_string(s: &str, quote: QuoteStyle, decode_unicode: bool) -> String {
    let q = pick_quote(s, quote);
    let mut out = String::with_capacity(s.len() + 2);
    out.push(q);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_ascii() => out.push(c),
            c if decode_unicode && (c as u32) > 0xFFFF => out.push_str(&format!("\\U{:08x}", c as u32)),
            c if decode_unicode => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// Emits a raw-string literal `r"<tag>(<body>)<tag>"` with a caller-chosen
/// heredoc tag. The caller is responsible for picking a tag that does not
/// appear as `)<tag>` inside `body` (§4.1 heredoc matching).
pub fn value_string_raw(body: &str, tag: &str) -> String {
    let mut out = String::with_capacity(body.len() + tag.len() * 2 + 4);
    out.push('r');
    out.push('"');
    out.push_str(tag);
    out.push('(');
    out.push_str(body);
    out.push(')');
    out.push_str(tag);
    out.push('"');
    out
}

/// True if `s` can be emitted without quoting as a plain identifier (§4.5
/// "Identifiers and object keys").
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// True if `s` is a valid bare object key: identifier segments joined by `.`
/// or `-` (§4.5 "Identifiers and object keys").
pub fn is_valid_object_key(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.split(['.', '-']).all(|segment| !segment.is_empty() && is_valid_identifier(segment))
}

/// Emits `text` bare if it's a legal identifier (or, in an object key slot,
/// a legal bare key), otherwise falls back to a quoted string.
pub fn identifier_or_string(text: &str, in_key_slot: bool, quote: QuoteStyle, decode_unicode: bool) -> String {
    let bare_ok = if in_key_slot { is_valid_object_key(text) } else { is_valid_identifier(text) };
    if bare_ok {
        text.to_string()
    } else {
        value_string(text, quote, decode_unicode)
    }
}
