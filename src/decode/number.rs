//! Number token decoding (§3 "Number split", §4.2).
//!
//! Splitting is a zero-allocation view over the token's value; converting a
//! split to a typed value is where range/domain checks happen.

use crate::diagnostics::{Diagnostic, ErrorKind};
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Pos,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
    Octal,
    Binary,
}

impl Radix {
    fn value(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hex => 16,
            Radix::Octal => 8,
            Radix::Binary => 2,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Radix::Decimal => "",
            Radix::Hex => "0x",
            Radix::Octal => "0o",
            Radix::Binary => "0b",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Finite,
    Nan,
    PosInf,
    NegInf,
}

/// The decomposed shape of a `Number` token's value (§3).
#[derive(Debug, Clone, Copy)]
pub struct NumberSplit<'src> {
    pub sign: Sign,
    pub radix: Radix,
    pub digits: &'src str,
    pub fraction_present: bool,
    pub fraction: &'src str,
    pub exponent: i32,
    pub suffix: &'src str,
    pub literal_kind: LiteralKind,
}

fn err(msg: impl Into<String>, start: usize, end: usize) -> Diagnostic {
    Diagnostic::new(ErrorKind::NumericDomain, msg, start, end)
}

/// Splits a `Number` token's lexed value into sign/radix/digits/exponent/
/// suffix. Rejects malformed shapes the lexer let through syntactically but
/// that have no valid decomposition (an empty digit body, a suffix that is
/// a lone separator underscore).
pub fn split<'src>(token: &Token<'src>) -> Result<NumberSplit<'src>, Diagnostic> {
    debug_assert_eq!(token.kind, TokenKind::Number);
    let full = token.value;
    let suffix_raw = token.tag;
    let body_len = full.len() - suffix_raw.len();
    let body = &full[..body_len];

    let (sign, rest) = match body.as_bytes().first() {
        Some(b'+') => (Sign::Pos, &body[1..]),
        Some(b'-') => (Sign::Neg, &body[1..]),
        _ => (Sign::Pos, body),
    };

    if rest == "nan" {
        return Ok(NumberSplit {
            sign,
            radix: Radix::Decimal,
            digits: "",
            fraction_present: false,
            fraction: "",
            exponent: 0,
            suffix: suffix_raw,
            literal_kind: LiteralKind::Nan,
        });
    }
    if rest == "inf" {
        return Ok(NumberSplit {
            sign,
            radix: Radix::Decimal,
            digits: "",
            fraction_present: false,
            fraction: "",
            exponent: 0,
            suffix: suffix_raw,
            literal_kind: if sign == Sign::Neg { LiteralKind::NegInf } else { LiteralKind::PosInf },
        });
    }

    let (radix, rest) = if rest.len() > 2 && rest.as_bytes()[0] == b'0' {
        match rest.as_bytes()[1] {
            b'x' | b'X' => (Radix::Hex, &rest[2..]),
            b'o' | b'O' => (Radix::Octal, &rest[2..]),
            b'b' | b'B' => (Radix::Binary, &rest[2..]),
            _ => (Radix::Decimal, rest),
        }
    } else {
        (Radix::Decimal, rest)
    };

    let digits_len = rest
        .as_bytes()
        .iter()
        .take_while(|b| is_digit_for(radix, **b))
        .count();
    let digits = &rest[..digits_len];
    let mut tail = &rest[digits_len..];

    if digits.is_empty() {
        return Err(err(
            format!("number literal `{full}` has no digits after its `{}` prefix", radix.prefix()),
            token.start(),
            token.end(),
        ));
    }

    let (fraction_present, fraction) = if radix == Radix::Decimal && tail.as_bytes().first() == Some(&b'.') {
        tail = &tail[1..];
        let frac_len = tail.as_bytes().iter().take_while(|b| b.is_ascii_digit()).count();
        let fraction = &tail[..frac_len];
        tail = &tail[frac_len..];
        (true, fraction)
    } else {
        (false, "")
    };

    let exponent = if radix == Radix::Decimal && matches!(tail.as_bytes().first(), Some(b'e') | Some(b'E')) {
        let exp_body = &tail[1..];
        let (exp_sign, exp_digits_src) = match exp_body.as_bytes().first() {
            Some(b'+') => (1, &exp_body[1..]),
            Some(b'-') => (-1, &exp_body[1..]),
            _ => (1, exp_body),
        };
        let exp_digits: String = exp_digits_src.chars().take_while(|c| c.is_ascii_digit()).collect();
        if exp_digits.is_empty() {
            return Err(err(format!("number literal `{full}` has `e`/`E` but no exponent digits"), token.start(), token.end()));
        }
        let magnitude: i32 = exp_digits.parse().map_err(|_| {
            err(format!("exponent in `{full}` is out of range"), token.start(), token.end())
        })?;
        exp_sign * magnitude
    } else {
        0
    };

    // Any remaining bytes at this point belong to the suffix, already split
    // off via `token.tag`; nothing else should be left in `body`.
    debug_assert!(tail.is_empty() || !tail.as_bytes()[0].is_ascii_alphanumeric());

    let suffix = suffix_raw.strip_prefix('_').unwrap_or(suffix_raw);
    if suffix_raw == "_" {
        return Err(err(
            format!("number literal `{full}` has a trailing separator underscore with no suffix after it"),
            token.start(),
            token.end(),
        ));
    }

    Ok(NumberSplit {
        sign,
        radix,
        digits,
        fraction_present,
        fraction,
        exponent,
        suffix,
        literal_kind: LiteralKind::Finite,
    })
}

fn is_digit_for(radix: Radix, b: u8) -> bool {
    match radix {
        Radix::Decimal => b.is_ascii_digit(),
        Radix::Hex => b.is_ascii_hexdigit(),
        Radix::Octal => matches!(b, b'0'..=b'7'),
        Radix::Binary => matches!(b, b'0' | b'1'),
    }
}

/// Converts a split to a signed 128-bit integer. Exponents must be
/// non-negative; a fractional part must be all zeros (or absent).
pub fn to_i128(split: &NumberSplit, span: (usize, usize)) -> Result<i128, Diagnostic> {
    match split.literal_kind {
        LiteralKind::Nan | LiteralKind::PosInf | LiteralKind::NegInf => {
            return Err(err("cannot convert a non-finite number literal to an integer", span.0, span.1))
        }
        LiteralKind::Finite => {}
    }
    if split.exponent < 0 {
        return Err(err("a negative exponent is not valid for an integer target", span.0, span.1));
    }
    if split.fraction_present && split.fraction.bytes().any(|b| b != b'0') {
        return Err(err("a number with a non-zero fractional part is not valid for an integer target", span.0, span.1));
    }

    let mut magnitude = i128::from_str_radix(split.digits, split.radix.value())
        .map_err(|_| err("number literal is out of range for a 128-bit integer", span.0, span.1))?;

    for _ in 0..split.exponent {
        magnitude = magnitude
            .checked_mul(10)
            .ok_or_else(|| err("number literal is out of range for a 128-bit integer", span.0, span.1))?;
    }

    if split.sign == Sign::Neg {
        magnitude = -magnitude;
    }
    Ok(magnitude)
}

/// Converts a split to an unsigned 128-bit integer. A negative sign is only
/// legal on the literal `0`.
pub fn to_u128(split: &NumberSplit, span: (usize, usize)) -> Result<u128, Diagnostic> {
    let signed = to_i128(split, span)?;
    if signed < 0 {
        if signed == 0 {
            return Ok(0);
        }
        return Err(err("a negative number literal is not valid for an unsigned target", span.0, span.1));
    }
    Ok(signed as u128)
}

/// Converts a split to an `f64`. `nan`/`±inf` literal kinds short-circuit to
/// the corresponding IEEE-754 value.
pub fn to_f64(split: &NumberSplit, span: (usize, usize)) -> Result<f64, Diagnostic> {
    match split.literal_kind {
        LiteralKind::Nan => return Ok(f64::NAN),
        LiteralKind::PosInf => return Ok(f64::INFINITY),
        LiteralKind::NegInf => return Ok(f64::NEG_INFINITY),
        LiteralKind::Finite => {}
    }

    let magnitude = if split.radix == Radix::Decimal {
        let mut literal = String::with_capacity(split.digits.len() + split.fraction.len() + 8);
        literal.push_str(split.digits);
        if split.fraction_present {
            literal.push('.');
            literal.push_str(split.fraction);
        }
        if split.exponent != 0 {
            literal.push('e');
            literal.push_str(&split.exponent.to_string());
        }
        literal
            .parse::<f64>()
            .map_err(|_| err("number literal could not be parsed as a float", span.0, span.1))?
    } else {
        i128::from_str_radix(split.digits, split.radix.value())
            .map_err(|_| err("number literal is out of range", span.0, span.1))? as f64
    };

    Ok(if split.sign == Sign::Neg { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::ByteSpan;

    fn tok<'a>(value: &'a str, tag: &'a str) -> Token<'a> {
        Token::new(TokenKind::Number, ByteSpan::new(0, value.len()), value, tag)
    }

    #[test]
    fn splits_simple_decimal() {
        let t = tok("42", "");
        let s = split(&t).unwrap();
        assert_eq!(s.digits, "42");
        assert!(!s.fraction_present);
        assert_eq!(s.exponent, 0);
        assert_eq!(s.literal_kind, LiteralKind::Finite);
    }

    #[test]
    fn splits_suffix_and_strips_separator() {
        let t = tok("25px", "px");
        let s = split(&t).unwrap();
        assert_eq!(s.digits, "25");
        assert_eq!(s.suffix, "px");

        let t2 = tok("0x1F_u32", "_u32");
        let s2 = split(&t2).unwrap();
        assert_eq!(s2.digits, "1F");
        assert_eq!(s2.radix, Radix::Hex);
        assert_eq!(s2.suffix, "u32");
    }

    #[test]
    fn rejects_lone_underscore_suffix() {
        let t = tok("5_", "_");
        assert!(split(&t).is_err());
    }

    #[test]
    fn recognizes_signed_infinity() {
        let t = tok("-inf", "");
        let s = split(&t).unwrap();
        assert_eq!(s.literal_kind, LiteralKind::NegInf);
    }

    #[test]
    fn converts_hex_to_integer() {
        let t = tok("0xFF", "");
        let s = split(&t).unwrap();
        assert_eq!(to_i128(&s, (0, 4)).unwrap(), 255);
    }

    #[test]
    fn rejects_negative_exponent_for_integer_target() {
        let t = tok("1e-2", "");
        let s = split(&t).unwrap();
        assert!(to_i128(&s, (0, 4)).is_err());
    }

    #[test]
    fn float_target_accepts_exponent() {
        let t = tok("1.5e2", "");
        let s = split(&t).unwrap();
        assert_eq!(to_f64(&s, (0, 5)).unwrap(), 150.0);
    }

    #[test]
    fn unsigned_rejects_negative_except_zero() {
        let t = tok("-0", "");
        let s = split(&t).unwrap();
        assert_eq!(to_u128(&s, (0, 2)).unwrap(), 0);

        let t2 = tok("-5", "");
        let s2 = split(&t2).unwrap();
        assert!(to_u128(&s2, (0, 2)).is_err());
    }
}
