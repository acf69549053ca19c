//! Number token scanning (§4.1, §9 "Number suffix ambiguity"). This only
//! finds the token's extent; splitting it into sign/prefix/digits/exponent/
//! suffix is [`crate::decode::number`]'s job.

use super::identifiers::is_ident_continue;
use super::reader::Cursor;
use crate::diagnostics::{Diagnostic, ErrorKind};
use crate::position::ByteSpan;

#[inline]
fn is_decimal_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

#[inline]
fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

/// True if the byte after an optional sign looks like the start of a number:
/// a decimal digit, or the first letter of `nan`/`inf`.
pub(super) fn starts_number(cur: &Cursor, after_sign: usize) -> bool {
    match cur.byte_at(after_sign) {
        Some(b) if is_decimal_digit(b) => true,
        Some(b'n') => cur.slice_matches(after_sign, "nan"),
        Some(b'i') => cur.slice_matches(after_sign, "inf"),
        _ => false,
    }
}

impl<'src> Cursor<'src> {
    fn slice_matches(&self, at: usize, needle: &str) -> bool {
        let end = at + needle.len();
        end <= self.len() && self.slice(at, end) == needle
    }
}

/// Scans a number token body starting at `cur`'s current position (which
/// must be the sign, if any, or the first digit/letter). Advances `cur` to
/// the end of the token and returns the suffix's span.
pub(super) fn scan(cur: &mut Cursor, token_start: usize) -> Result<ByteSpan, Diagnostic> {
    if matches!(cur.current(), Some(b'+') | Some(b'-')) {
        cur.bump();
    }

    // `nan` / `inf`: exact identifiers, no digits, no suffix.
    if let Some(b) = cur.current() {
        if (b == b'n' && cur.slice_matches(cur.index(), "nan"))
            || (b == b'i' && cur.slice_matches(cur.index(), "inf"))
        {
            let after = cur.index() + 3;
            let followed_by_ident = cur.byte_at(after).map(is_ident_continue).unwrap_or(false);
            if !followed_by_ident {
                cur.bump_n(3);
                let end = cur.index();
                return Ok(ByteSpan::new(end, end));
            }
        }
    }

    // Base-prefixed literal: 0x / 0o / 0b.
    if cur.current() == Some(b'0') {
        if let Some(letter) = cur.peek() {
            let digit_pred: Option<fn(u8) -> bool> = match letter {
                b'x' | b'X' => Some(is_hex_digit),
                b'o' | b'O' => Some(is_octal_digit),
                b'b' | b'B' => Some(is_binary_digit),
                _ => None,
            };
            if let Some(pred) = digit_pred {
                cur.bump_n(2);
                let digits_start = cur.index();
                cur.consume_while(pred);
                if cur.index() == digits_start {
                    return Err(Diagnostic::new(
                        ErrorKind::LexicalMalformed,
                        format!(
                            "invalid number literal: missing digits after `0{}` prefix",
                            letter as char
                        ),
                        token_start,
                        cur.index(),
                    ));
                }
                return Ok(scan_suffix(cur));
            }
        }
    }

    // Decimal, with optional fraction and exponent.
    cur.consume_while(is_decimal_digit);

    if cur.current() == Some(b'.') {
        cur.bump();
        cur.consume_while(is_decimal_digit);
    }

    // Exponent-vs-suffix ambiguity (§9): only consume `e`/`E` as an exponent
    // when it is followed by an optional sign and at least one digit.
    if matches!(cur.current(), Some(b'e') | Some(b'E')) {
        let mut lookahead = cur.index() + 1;
        if matches!(cur.byte_at(lookahead), Some(b'+') | Some(b'-')) {
            lookahead += 1;
        }
        if cur.byte_at(lookahead).map(is_decimal_digit).unwrap_or(false) {
            cur.bump(); // e/E
            if matches!(cur.current(), Some(b'+') | Some(b'-')) {
                cur.bump();
            }
            cur.consume_while(is_decimal_digit);
        }
    }

    Ok(scan_suffix(cur))
}

fn scan_suffix(cur: &mut Cursor) -> ByteSpan {
    let suffix_start = cur.index();
    cur.consume_while(is_ident_continue);
    ByteSpan::new(suffix_start, cur.index())
}
