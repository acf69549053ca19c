use jxc::decode::{self, datetime::Timezone, LiteralKind};
use jxc::lexer::Lexer;
use jxc::token::TokenKind;

fn lex_one(input: &str) -> jxc::token::Token<'_> {
    let mut lexer = Lexer::new(input);
    lexer.next(false).unwrap()
}

#[test]
fn decodes_decimal_integer() {
    let tok = lex_one("42");
    let split = decode::number::split(&tok).unwrap();
    assert_eq!(split.literal_kind, LiteralKind::Finite);
    assert_eq!(decode::number::to_i128(&split, (0, 2)).unwrap(), 42);
}

#[test]
fn decodes_hex_integer_with_underscore() {
    let tok = lex_one("0xff_00");
    let split = decode::number::split(&tok).unwrap();
    assert_eq!(decode::number::to_i128(&split, (0, tok.value.len())).unwrap(), 0xff00);
}

#[test]
fn decodes_float_with_exponent() {
    let tok = lex_one("1.5e2");
    let split = decode::number::split(&tok).unwrap();
    assert!(split.fraction_present);
    let v = decode::number::to_f64(&split, (0, tok.value.len())).unwrap();
    assert_eq!(v, 150.0);
}

#[test]
fn decodes_suffix_separately_from_digits() {
    let tok = lex_one("25px");
    let split = decode::number::split(&tok).unwrap();
    assert_eq!(split.suffix, "px");
    assert_eq!(decode::number::to_i128(&split, (0, tok.value.len())).unwrap(), 25);
}

#[test]
fn decodes_escaped_string() {
    let tok = lex_one("\"a\\nb\\tc\"");
    let inner = &tok.value[1..tok.value.len() - 1];
    let decoded = decode::string::decode(inner).unwrap();
    assert_eq!(decoded, "a\nb\tc");
}

#[test]
fn decodes_unicode_escape() {
    let tok = lex_one("\"\\u0041\"");
    let inner = &tok.value[1..tok.value.len() - 1];
    let decoded = decode::string::decode(inner).unwrap();
    assert_eq!(decoded, "A");
}

#[test]
fn decodes_base64_bytes() {
    assert_eq!(decode::bytes::decode("SGVsbG8=").unwrap(), b"Hello");
}

#[test]
fn decodes_date_only_literal() {
    let dt = decode::datetime::parse("2024-01-02").unwrap();
    assert_eq!((dt.year, dt.month, dt.day), (2024, 1, 2));
    assert!(dt.date_only);
}

#[test]
fn decodes_datetime_with_utc_offset() {
    let tok = lex_one("dt\"2024-01-02T03:04:05Z\"");
    assert_eq!(tok.kind, TokenKind::DateTime);
    let body = &tok.value["dt\"".len()..tok.value.len() - 1];
    let dt = decode::datetime::parse(body).unwrap();
    assert_eq!((dt.hour, dt.minute, dt.second), (3, 4, 5));
    assert_eq!(dt.timezone, Timezone::Utc);
}

#[test]
fn decodes_datetime_with_explicit_offset() {
    let dt = decode::datetime::parse("2024-01-02T03:04:05+05:30").unwrap();
    assert_eq!(dt.timezone, Timezone::Offset { negative: false, hours: 5, minutes: 30 });
}
