//! Non-raw string escape decoding (§4.2): `\0 \a \b \f \n \r \t \v \\ \' \"`,
//! `\xHH`, `\uHHHH`, `\UHHHHHHHH`. There is no `\/` escape. Buffer sizing is
//! a separate pure function so callers can allocate once, decode, then
//! truncate — it never allocates itself and is safe to call on untrusted
//! input.

use crate::diagnostics::{Diagnostic, ErrorKind};

const REPLACEMENT_CHAR: char = '\u{FFFD}';

fn err(msg: impl Into<String>) -> Diagnostic {
    Diagnostic::new(ErrorKind::EncodingError, msg, 0, 0)
}

/// Upper bound on the decoded byte length of `inner` (the string's content
/// with quotes, `r` prefix, and heredoc already stripped). Exact for raw
/// strings and escape-free strings; overestimates `\U` escapes (always
/// charged 4 bytes, the UTF-8 worst case, even when the codepoint would
/// encode shorter).
pub fn required_buffer_size(inner: &str) -> usize {
    let bytes = inner.as_bytes();
    let mut size = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 1;
            if i >= bytes.len() {
                size += 1;
                break;
            }
            match bytes[i] {
                b'x' => {
                    size += 1;
                    i += 1 + 2;
                }
                b'u' => {
                    size += 4;
                    i += 1 + 4;
                }
                b'U' => {
                    size += 4;
                    i += 1 + 8;
                }
                _ => {
                    size += 1;
                    i += 1;
                }
            }
        } else {
            size += 1;
            i += 1;
        }
    }
    size
}

/// Decodes `inner`'s escapes into `out`, which must be at least
/// [`required_buffer_size`] bytes. Returns the number of bytes written.
pub fn decode_into(inner: &str, out: &mut [u8]) -> Result<usize, Diagnostic> {
    let bytes = inner.as_bytes();
    let mut written = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'\\' {
            let len = utf8_len(b);
            out[written..written + len].copy_from_slice(&bytes[i..i + len]);
            written += len;
            i += len;
            continue;
        }

        i += 1;
        let Some(&kind) = bytes.get(i) else {
            return Err(err("string cannot end with a trailing backslash"));
        };
        i += 1;

        match kind {
            b'"' => push_byte(out, &mut written, b'"'),
            b'\'' => push_byte(out, &mut written, b'\''),
            b'\\' => push_byte(out, &mut written, b'\\'),
            b'0' => push_byte(out, &mut written, 0x00),
            b'a' => push_byte(out, &mut written, 0x07),
            b'b' => push_byte(out, &mut written, 0x08),
            b'f' => push_byte(out, &mut written, 0x0c),
            b'n' => push_byte(out, &mut written, b'\n'),
            b'r' => push_byte(out, &mut written, b'\r'),
            b't' => push_byte(out, &mut written, b'\t'),
            b'v' => push_byte(out, &mut written, 0x0b),
            b'x' => {
                let hex = read_hex(bytes, i, 2)?;
                i += 2;
                push_byte(out, &mut written, hex as u8);
            }
            b'u' => {
                let hex = read_hex(bytes, i, 4)?;
                i += 4;
                push_char(out, &mut written, codepoint_to_char(hex));
            }
            b'U' => {
                let hex = read_hex(bytes, i, 8)?;
                i += 8;
                push_char(out, &mut written, codepoint_to_char(hex));
            }
            other => {
                return Err(err(format!("invalid escape sequence `\\{}`", other as char)));
            }
        }
    }

    Ok(written)
}

/// Convenience wrapper: sizes, decodes, and returns an owned `String`.
pub fn decode(inner: &str) -> Result<String, Diagnostic> {
    let mut buf = vec![0u8; required_buffer_size(inner)];
    let written = decode_into(inner, &mut buf)?;
    buf.truncate(written);
    String::from_utf8(buf).map_err(|_| err("decoded string escapes did not form valid UTF-8"))
}

fn codepoint_to_char(cp: u32) -> char {
    if (0xd800..=0xdfff).contains(&cp) {
        return REPLACEMENT_CHAR;
    }
    char::from_u32(cp).unwrap_or(REPLACEMENT_CHAR)
}

fn read_hex(bytes: &[u8], start: usize, count: usize) -> Result<u32, Diagnostic> {
    if start + count > bytes.len() {
        return Err(err("truncated hex escape sequence"));
    }
    let text = std::str::from_utf8(&bytes[start..start + count]).map_err(|_| err("malformed hex escape sequence"))?;
    u32::from_str_radix(text, 16).map_err(|_| err("malformed hex escape sequence"))
}

fn push_byte(out: &mut [u8], written: &mut usize, b: u8) {
    out[*written] = b;
    *written += 1;
}

fn push_char(out: &mut [u8], written: &mut usize, c: char) {
    let mut tmp = [0u8; 4];
    let s = c.encode_utf8(&mut tmp);
    out[*written..*written + s.len()].copy_from_slice(s.as_bytes());
    *written += s.len();
}

fn utf8_len(first_byte: u8) -> usize {
    if first_byte & 0x80 == 0 {
        1
    } else if first_byte & 0xe0 == 0xc0 {
        2
    } else if first_byte & 0xf0 == 0xe0 {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_simple_escapes() {
        assert_eq!(decode(r"a\nb\tc").unwrap(), "a\nb\tc");
    }

    #[test]
    fn decodes_hex_byte_escape() {
        assert_eq!(decode(r"\x41").unwrap(), "A");
    }

    #[test]
    fn decodes_unicode_escape() {
        assert_eq!(decode(r"\u00e9").unwrap(), "\u{e9}");
    }

    #[test]
    fn decodes_astral_via_u_escape() {
        assert_eq!(decode(r"\U0001F600").unwrap(), "\u{1F600}");
    }

    #[test]
    fn lone_surrogate_becomes_replacement_char() {
        assert_eq!(decode(r"\ud800").unwrap(), REPLACEMENT_CHAR.to_string());
    }

    #[test]
    fn rejects_trailing_backslash() {
        assert!(decode("abc\\").is_err());
    }

    #[test]
    fn required_size_overestimates_u_escape() {
        // A `\u` escape is always charged 4 bytes even though `é` only
        // needs 2 once it's actually encoded.
        assert_eq!(required_buffer_size(r"\u00e9"), 4);
        assert_eq!(decode(r"\u00e9").unwrap().len(), 2);
    }

    #[test]
    fn passthrough_bytes_have_one_to_one_size() {
        assert_eq!(required_buffer_size("hello"), 5);
    }
}
