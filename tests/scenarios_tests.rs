//! End-to-end exercises of the element stream against a minimal serializer
//! walk, covering the representative inputs a human-authored document mixes
//! together: annotated containers, number suffixes, raw strings, byte
//! literals, and free-form expressions.

use jxc::decode::{self, LiteralKind, Radix};
use jxc::parser::{ElementKind, JumpParser};
use jxc::serializer::{Serializer, SerializerSettings};
use jxc::token::Token;

fn echo(source: &str, settings: SerializerSettings) -> String {
    let mut parser = JumpParser::new(source);
    let mut out = Vec::new();
    let mut ser = Serializer::new(&mut out, settings);
    let mut in_value_slot = vec![false];
    let mut in_expr = vec![false];

    while parser.next() {
        let el = parser.value();
        if !el.annotation.is_empty() && el.kind.can_carry_annotation() {
            let text: String = el.annotation.iter().map(raw_text).collect();
            ser.annotate(&text);
        }
        let slot = *in_value_slot.last().unwrap();

        if *in_expr.last().unwrap() && !matches!(el.kind, ElementKind::Comment | ElementKind::EndExpression) {
            ser.expression_raw(raw_text(&el.token)).unwrap();
            continue;
        }

        match el.kind {
            ElementKind::Comment => continue,
            ElementKind::BeginArray => {
                if slot { ser.begin_array_as_value() } else { ser.begin_array() }.unwrap();
                in_value_slot.push(false);
                in_expr.push(false);
            }
            ElementKind::EndArray => {
                in_value_slot.pop();
                in_expr.pop();
                ser.end_array().unwrap();
            }
            ElementKind::BeginObject => {
                if slot { ser.begin_object_as_value() } else { ser.begin_object() }.unwrap();
                in_value_slot.push(false);
                in_expr.push(false);
            }
            ElementKind::ObjectKey => {
                ser.key(raw_text(&el.token)).unwrap();
                ser.sep().unwrap();
                *in_value_slot.last_mut().unwrap() = true;
            }
            ElementKind::EndObject => {
                in_value_slot.pop();
                in_expr.pop();
                ser.end_object().unwrap();
            }
            ElementKind::BeginExpression => {
                if slot { ser.begin_expression_as_value() } else { ser.begin_expression() }.unwrap();
                in_value_slot.push(false);
                in_expr.push(true);
            }
            ElementKind::EndExpression => {
                in_value_slot.pop();
                in_expr.pop();
                ser.end_expression().unwrap();
            }
            ElementKind::ExpressionToken => unreachable!(),
            ElementKind::Number => {
                let split = decode::number::split(&el.token).unwrap();
                match split.literal_kind {
                    LiteralKind::Finite if !split.fraction_present => {
                        let v = decode::number::to_i128(&split, (el.token.start(), el.token.end())).unwrap();
                        ser.value_int(v, split.radix, split.suffix, slot).unwrap();
                    }
                    _ => {
                        let v = decode::number::to_f64(&split, (el.token.start(), el.token.end())).unwrap();
                        ser.value_float(v, split.suffix, slot).unwrap();
                    }
                }
            }
            ElementKind::Bool => {
                ser.value_bool(el.token.value == "true", slot).unwrap();
            }
            ElementKind::Null => {
                ser.value_null(slot).unwrap();
            }
            ElementKind::String => {
                let decoded = decode_string_value(&el.token);
                ser.value_string(&decoded, slot).unwrap();
            }
            ElementKind::Bytes => {
                let inner = &el.token.value["b64\"".len()..el.token.value.len() - 1];
                let stripped = decode::bytes::strip_multiline_wrapper(inner);
                let bytes = decode::bytes::decode(stripped).unwrap();
                ser.value_bytes(&bytes, slot).unwrap();
            }
            ElementKind::DateTime => {
                let body = &el.token.value["dt\"".len()..el.token.value.len() - 1];
                let dt = decode::datetime::parse(body).unwrap();
                ser.value_datetime(&dt, slot).unwrap();
            }
            ElementKind::Invalid => panic!("invalid element in {source:?}"),
        }
    }
    assert!(!parser.has_error(), "unexpected parse error in {source:?}: {:?}", parser.error());
    ser.flush().unwrap();
    String::from_utf8(out).unwrap()
}

fn decode_string_value(tok: &Token) -> String {
    if !tok.tag.is_empty() {
        let prefix_len = 1 + 1 + tok.tag.len() + 1; // r, quote, tag, (
        let suffix_len = 1 + tok.tag.len() + 1; // ), tag, quote
        return tok.value[prefix_len..tok.value.len() - suffix_len].to_string();
    }
    let inner = &tok.value[1..tok.value.len() - 1];
    decode::string::decode(inner).unwrap()
}

fn raw_text<'a>(tok: &Token<'a>) -> &'a str {
    if tok.value.is_empty() {
        tok.kind.as_symbol().unwrap_or("")
    } else {
        tok.value
    }
}

#[test]
fn scenario_flat_array_of_mixed_scalars() {
    let out = echo("[1, 2.5, true, false, null, \"hi\"]", SerializerSettings::compact());
    assert_eq!(out, "[1,2.5,true,false,null,\"hi\"]");
}

#[test]
fn scenario_annotated_vector() {
    let out = echo("vec3<f32>[1, 2, 3]", SerializerSettings::compact());
    assert_eq!(out, "vec3<f32>[1,2,3]");
}

#[test]
fn scenario_object_with_nested_array() {
    let out = echo("{name: \"widget\", tags: [\"a\", \"b\", \"c\"]}", SerializerSettings::compact());
    assert_eq!(out, "{name:\"widget\",tags:[\"a\",\"b\",\"c\"]}");
}

#[test]
fn scenario_number_suffix_round_trips_as_integer_with_suffix() {
    let out = echo("[25px]", SerializerSettings::compact());
    assert_eq!(out, "[25px]");
}

#[test]
fn scenario_raw_string_body_is_reserialized_as_a_quoted_string() {
    let out = echo("[r\"TAG(hello)TAG\"]", SerializerSettings::compact());
    assert_eq!(out, "[\"hello\"]");
}

#[test]
fn scenario_byte_literal_round_trips_through_decode_and_encode() {
    let out = echo("[b64\"SGVsbG8h\"]", SerializerSettings::compact());
    assert_eq!(out, "[b64\"SGVsbG8h\"]");
}

#[test]
fn scenario_expression_tokens_pass_through_uninterpreted() {
    let out = echo("(a+b*(c-1))", SerializerSettings::compact());
    assert_eq!(out, "(a+b*(c-1))");
}

#[test]
fn scenario_comments_are_dropped_on_reserialization() {
    let out = echo("[1, # a trailing comment\n 2]", SerializerSettings::compact());
    assert_eq!(out, "[1,2]");
}
