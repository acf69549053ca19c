//! String, raw-string/heredoc, byte-string (base64), and datetime body
//! scanning (§4.1). Only token extent and well-formedness are checked here;
//! decoding the payload is [`crate::decode`]'s job.

use super::identifiers::{is_ident_continue, is_ident_start};
use super::reader::Cursor;
use crate::diagnostics::{Diagnostic, ErrorKind};
use crate::position::ByteSpan;

const MAX_HEREDOC_LEN: usize = 15;

fn err(kind: ErrorKind, msg: impl Into<String>, start: usize, end: usize) -> Diagnostic {
    Diagnostic::new(kind, msg, start, end)
}

/// Scans a non-raw string: `cur` is positioned at the opening quote.
/// Returns the (empty) tag span — non-raw strings never carry a tag.
pub(super) fn scan_string(cur: &mut Cursor, token_start: usize) -> Result<ByteSpan, Diagnostic> {
    let quote = cur.current().expect("scan_string called at end of input");
    cur.bump();

    loop {
        match cur.current() {
            None => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    "unterminated string literal",
                    token_start,
                    cur.index(),
                ))
            }
            Some(b'\n') => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    "line breaks are not allowed inside a non-raw string",
                    token_start,
                    cur.index() + 1,
                ))
            }
            Some(b'\\') => {
                let esc_start = cur.index();
                cur.bump();
                validate_escape(cur, token_start, esc_start)?;
            }
            Some(b) if b == quote => {
                cur.bump();
                let end = cur.index();
                return Ok(ByteSpan::new(end, end));
            }
            Some(_) => {
                cur.bump();
            }
        }
    }
}

/// Validates (without decoding) the escape sequence starting right after the
/// backslash. Recognized forms per §4.1: `\0 \a \b \f \n \r \t \v \\ \' \"`,
/// `\xHH`, `\uHHHH`, `\UHHHHHHHH`. There is no `\/` escape.
fn validate_escape(cur: &mut Cursor, token_start: usize, esc_start: usize) -> Result<(), Diagnostic> {
    let Some(kind) = cur.current() else {
        return Err(err(
            ErrorKind::LexicalMalformed,
            "string cannot end with a trailing backslash",
            token_start,
            cur.index(),
        ));
    };
    match kind {
        b'0' | b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'"' | b'\'' | b'\\' => {
            cur.bump();
            Ok(())
        }
        b'x' => {
            cur.bump();
            require_hex_digits(cur, token_start, esc_start, 2)
        }
        b'u' => {
            cur.bump();
            require_hex_digits(cur, token_start, esc_start, 4)
        }
        b'U' => {
            cur.bump();
            require_hex_digits(cur, token_start, esc_start, 8)
        }
        _ => Err(err(
            ErrorKind::LexicalMalformed,
            format!("invalid escape sequence `\\{}`", kind as char),
            esc_start,
            cur.index() + 1,
        )),
    }
}

fn require_hex_digits(
    cur: &mut Cursor,
    token_start: usize,
    esc_start: usize,
    count: usize,
) -> Result<(), Diagnostic> {
    for _ in 0..count {
        match cur.current() {
            Some(b) if b.is_ascii_hexdigit() => cur.bump(),
            _ => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    "truncated hex escape sequence",
                    esc_start,
                    token_start.max(cur.index()).min(cur.index() + 1),
                ))
            }
        }
    }
    Ok(())
}

/// Scans a raw string: `cur` is positioned at the leading `r`.
/// `r"TAG(body)TAG"` — TAG is an optional, <=15-char identifier-shaped
/// heredoc. Returns the heredoc's span (used as the token's tag).
pub(super) fn scan_raw_string(cur: &mut Cursor, token_start: usize) -> Result<ByteSpan, Diagnostic> {
    debug_assert_eq!(cur.current(), Some(b'r'));
    cur.bump();

    let quote = match cur.current() {
        Some(b @ (b'\'' | b'"')) => b,
        _ => {
            return Err(err(
                ErrorKind::LexicalMalformed,
                "expected a quote after `r` to start a raw string",
                token_start,
                cur.index(),
            ))
        }
    };
    cur.bump();

    let heredoc_start = cur.index();
    if cur.current().map(is_ident_start).unwrap_or(false) {
        cur.bump();
        cur.consume_while(is_ident_continue);
    }
    let heredoc = ByteSpan::new(heredoc_start, cur.index());
    if heredoc.len() > MAX_HEREDOC_LEN {
        return Err(err(
            ErrorKind::LimitExceeded,
            format!("raw string heredoc exceeds the {MAX_HEREDOC_LEN}-character limit"),
            token_start,
            cur.index(),
        ));
    }

    if cur.current() != Some(b'(') {
        return Err(err(
            ErrorKind::LexicalMalformed,
            "expected `(` to start a raw string body",
            token_start,
            cur.index(),
        ));
    }
    cur.bump();

    let heredoc_str = cur.slice(heredoc.start, heredoc.end);
    loop {
        match cur.current() {
            None => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    "unterminated raw string: missing closing heredoc",
                    token_start,
                    cur.index(),
                ))
            }
            Some(b')') => {
                let after_paren = cur.index() + 1;
                if cur.len() >= after_paren + heredoc_str.len() + 1
                    && cur.slice(after_paren, after_paren + heredoc_str.len()) == heredoc_str
                    && cur.byte_at(after_paren + heredoc_str.len()) == Some(quote)
                {
                    cur.bump_n(1 + heredoc_str.len() + 1);
                    return Ok(heredoc);
                }
                cur.bump();
            }
            Some(_) => cur.bump(),
        }
    }
}

/// Scans `b64"..."` / `b64"( ... )"`: `cur` is positioned at the opening
/// quote (the `b64` prefix has already been consumed by the caller).
pub(super) fn scan_byte_string(cur: &mut Cursor, token_start: usize) -> Result<(), Diagnostic> {
    let quote = match cur.current() {
        Some(b @ (b'\'' | b'"')) => b,
        _ => {
            return Err(err(
                ErrorKind::LexicalMalformed,
                "expected a quote after `b64`",
                token_start,
                cur.index(),
            ))
        }
    };
    cur.bump();

    let multiline = cur.current() == Some(b'(');
    if multiline {
        cur.bump();
    }

    let mut base64_char_count: usize = 0;
    loop {
        match cur.current() {
            None => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    "unterminated byte string",
                    token_start,
                    cur.index(),
                ))
            }
            Some(b) if multiline && b.is_ascii_whitespace() => {
                cur.bump();
            }
            Some(b')') if multiline => {
                cur.bump();
                if cur.current() != Some(quote) {
                    return Err(err(
                        ErrorKind::LexicalMalformed,
                        "expected multiline base64 string to end with the opening quote",
                        token_start,
                        cur.index(),
                    ));
                }
                cur.bump();
                break;
            }
            Some(b) if b == quote && !multiline => {
                cur.bump();
                break;
            }
            Some(b) if is_base64_alphabet(b) => {
                base64_char_count += 1;
                cur.bump();
            }
            Some(b) if b.is_ascii_whitespace() => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    "whitespace is only allowed in the parenthesized multi-line base64 form",
                    token_start,
                    cur.index() + 1,
                ));
            }
            Some(b) => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    format!("invalid base64 character `{}`", b as char),
                    token_start,
                    cur.index() + 1,
                ));
            }
        }
    }

    if base64_char_count % 4 != 0 {
        return Err(err(
            ErrorKind::EncodingError,
            "base64 string length is not a multiple of four",
            token_start,
            cur.index(),
        ));
    }

    Ok(())
}

fn is_base64_alphabet(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='
}

/// Scans `dt"..."`: `cur` is positioned at the opening quote (the `dt`
/// prefix has already been consumed). Only checks that the body is
/// terminated; ISO-8601 shape validation is the decoder's job.
pub(super) fn scan_datetime(cur: &mut Cursor, token_start: usize) -> Result<(), Diagnostic> {
    let quote = match cur.current() {
        Some(b @ (b'\'' | b'"')) => b,
        _ => {
            return Err(err(
                ErrorKind::LexicalMalformed,
                "expected a quote after `dt`",
                token_start,
                cur.index(),
            ))
        }
    };
    cur.bump();

    loop {
        match cur.current() {
            None => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    "unterminated datetime literal",
                    token_start,
                    cur.index(),
                ))
            }
            Some(b'\n') => {
                return Err(err(
                    ErrorKind::LexicalMalformed,
                    "line breaks are not allowed inside a datetime literal",
                    token_start,
                    cur.index() + 1,
                ))
            }
            Some(b) if b == quote => {
                cur.bump();
                return Ok(());
            }
            Some(_) => cur.bump(),
        }
    }
}
