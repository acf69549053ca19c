//! Thin CLI driver: parse a JXC file and either dump its element stream for
//! inspection or re-serialize it. Exercises the library end to end; owns no
//! parsing/serializing logic of its own beyond walking one element stream
//! into the other.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use jxc::decode;
use jxc::parser::{ElementKind, JumpParser};
use jxc::serializer::{QuoteStyle, Serializer, SerializerSettings};
use jxc::token::{Token, TokenKind};

/// Parses and re-serializes (or dumps) a JXC document.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the JXC file to read.
    file: PathBuf,

    /// Print the raw element stream (one line per element) instead of
    /// re-serializing.
    #[arg(long)]
    dump: bool,

    /// Use the compact serializer preset instead of pretty-printing.
    #[arg(long)]
    compact: bool,

    /// Indentation unit, when pretty-printing (ignored with `--compact`).
    #[arg(long, default_value = "    ")]
    indent: String,

    /// Preferred quote style for emitted strings.
    #[arg(long, value_enum, default_value_t = Quote::Double)]
    quote: Quote,

    /// Log verbosity.
    #[arg(value_enum, short, long, default_value_t = LogLevel::Error)]
    verbosity: LogLevel,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Quote {
    #[default]
    Double,
    Single,
    Auto,
}

impl From<Quote> for QuoteStyle {
    fn from(q: Quote) -> Self {
        match q {
            Quote::Double => QuoteStyle::Double,
            Quote::Single => QuoteStyle::Single,
            Quote::Auto => QuoteStyle::Auto,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    simple_logger::init_with_level(args.verbosity.into()).ok();

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("could not read {}", args.file.display()))?;
    info!("read {} bytes from {}", source.len(), args.file.display());

    let mut parser = JumpParser::new(&source);

    if args.dump {
        return dump_elements(&mut parser, &source);
    }

    let mut settings = if args.compact {
        SerializerSettings::compact()
    } else {
        SerializerSettings {
            indent: args.indent.clone(),
            ..SerializerSettings::default()
        }
    };
    settings.default_quote = args.quote.into();

    let stdout = io::stdout();
    let mut serializer = Serializer::new(stdout.lock(), settings);
    echo(&mut parser, &mut serializer)?;
    serializer.flush()?;

    if parser.has_error() {
        let diag = parser.error().expect("has_error implies error() is Some");
        bail!("{}", diag.clone().resolved(&source).render(&source));
    }

    Ok(())
}

fn dump_elements(parser: &mut JumpParser, source: &str) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    while parser.next() {
        let el = parser.value();
        let ann: Vec<&str> = el.annotation.iter().map(token_text).collect();
        writeln!(
            out,
            "{:?} {}..{} {:?} tag={:?} annotation={:?}",
            el.kind,
            el.token.start(),
            el.token.end(),
            el.token.value,
            el.token.tag,
            ann
        )?;
    }
    if parser.has_error() {
        let diag = parser.error().expect("has_error implies error() is Some");
        bail!("{}", diag.clone().resolved(source).render(source));
    }
    Ok(())
}

fn token_text<'a>(tok: &Token<'a>) -> &'a str {
    if tok.value.is_empty() {
        tok.kind.as_symbol().unwrap_or("")
    } else {
        tok.value
    }
}

/// Walks one element stream into one serializer, decoding each scalar token
/// along the way. This is the CLI's own glue, not a library-level reflective
/// converter (that layer is explicitly out of scope for the core).
fn echo<W: Write>(parser: &mut JumpParser, ser: &mut Serializer<W>) -> anyhow::Result<()> {
    // Tracks whether the value about to be written sits in an object's value
    // slot (after a key) so the right serializer entry point is used.
    let mut in_value_slot = vec![false];
    // Parallel stack: whether the container currently open is an expression.
    // Everything an expression yields besides its brackets is handed to
    // `expression_raw` verbatim (§4.4 "delivered uninterpreted") rather than
    // through the scalar `value_*` entry points, which reject expression
    // frames outright.
    let mut in_expr = vec![false];

    while parser.next() {
        let el = parser.value();
        if !el.annotation.is_empty() && el.kind.can_carry_annotation() {
            ser.annotate(&render_annotation(el.annotation));
        }
        let slot = *in_value_slot.last().unwrap();

        if *in_expr.last().unwrap() && !matches!(el.kind, ElementKind::Comment | ElementKind::EndExpression) {
            ser.expression_raw(token_text(&el.token))?;
            ser.expression_raw(" ")?;
            continue;
        }

        match el.kind {
            ElementKind::Comment => continue,
            ElementKind::BeginArray => {
                if slot {
                    ser.begin_array_as_value()?;
                } else {
                    ser.begin_array()?;
                }
                in_value_slot.push(false);
                in_expr.push(false);
            }
            ElementKind::EndArray => {
                in_value_slot.pop();
                in_expr.pop();
                ser.end_array()?;
            }
            ElementKind::BeginObject => {
                if slot {
                    ser.begin_object_as_value()?;
                } else {
                    ser.begin_object()?;
                }
                in_value_slot.push(false);
                in_expr.push(false);
            }
            ElementKind::ObjectKey => {
                let key_text = object_key_text(&el.token)?;
                ser.key(&key_text)?;
                ser.sep()?;
                *in_value_slot.last_mut().unwrap() = true;
            }
            ElementKind::EndObject => {
                in_value_slot.pop();
                in_expr.pop();
                ser.end_object()?;
            }
            ElementKind::BeginExpression => {
                if slot {
                    ser.begin_expression_as_value()?;
                } else {
                    ser.begin_expression()?;
                }
                in_value_slot.push(false);
                in_expr.push(true);
            }
            ElementKind::EndExpression => {
                in_value_slot.pop();
                in_expr.pop();
                ser.end_expression()?;
            }
            ElementKind::ExpressionToken => unreachable!("handled by the in_expr branch above"),
            ElementKind::Number => {
                write_number(ser, &el.token, slot)?;
            }
            ElementKind::Bool => {
                ser.value_bool(el.token.value == "true", slot)?;
            }
            ElementKind::Null => {
                ser.value_null(slot)?;
            }
            ElementKind::String => {
                let decoded = decode_string_token(&el.token)?;
                ser.value_string(&decoded, slot)?;
            }
            ElementKind::Bytes => {
                let bytes = decode_bytes_token(&el.token)?;
                ser.value_bytes(&bytes, slot)?;
            }
            ElementKind::DateTime => {
                let body = strip_prefixed_quoted(&el.token.value, "dt");
                let dt = decode::datetime::parse(body)
                    .map_err(|d| anyhow::anyhow!(d.render(el.token.value)))?;
                ser.value_datetime(&dt, slot)?;
            }
            ElementKind::Invalid => bail!("encountered an Invalid element"),
        }
    }
    Ok(())
}

fn write_number<W: Write>(ser: &mut Serializer<W>, tok: &Token, slot: bool) -> anyhow::Result<()> {
    let split = decode::number::split(tok).map_err(|d| anyhow::anyhow!(d.render(tok.value)))?;
    use decode::LiteralKind;
    match split.literal_kind {
        LiteralKind::Nan | LiteralKind::PosInf | LiteralKind::NegInf => {
            ser.value_non_finite(split.literal_kind, slot)?;
        }
        LiteralKind::Finite if split.fraction_present => {
            let v = decode::number::to_f64(&split, (tok.start(), tok.end()))
                .map_err(|d| anyhow::anyhow!(d.render(tok.value)))?;
            ser.value_float(v, split.suffix, slot)?;
        }
        LiteralKind::Finite => match decode::number::to_i128(&split, (tok.start(), tok.end())) {
            Ok(v) => {
                ser.value_int(v, split.radix, split.suffix, slot)?;
            }
            Err(_) => {
                let v = decode::number::to_f64(&split, (tok.start(), tok.end()))
                    .map_err(|d| anyhow::anyhow!(d.render(tok.value)))?;
                ser.value_float(v, split.suffix, slot)?;
            }
        },
    }
    Ok(())
}

fn decode_string_token(tok: &Token) -> anyhow::Result<String> {
    if !tok.tag.is_empty() {
        // Raw string: r<quote><tag>(<body>)<tag><quote> — no escapes to decode.
        let prefix_len = 1 + 1 + tok.tag.len() + 1;
        let suffix_len = 1 + tok.tag.len() + 1;
        let body = &tok.value[prefix_len..tok.value.len() - suffix_len];
        return Ok(body.to_string());
    }
    let inner = &tok.value[1..tok.value.len() - 1];
    decode::string::decode(inner).map_err(|d| anyhow::anyhow!(d.render(tok.value)))
}

fn decode_bytes_token(tok: &Token) -> anyhow::Result<Vec<u8>> {
    let body = strip_prefixed_quoted(tok.value, "b64");
    let stripped = decode::bytes::strip_multiline_wrapper(body);
    decode::bytes::decode(stripped).map_err(|d| anyhow::anyhow!(d.render(tok.value)))
}

/// Strips a `<prefix>"..."` or `<prefix>'...'` wrapper, returning the quoted
/// body's interior.
fn strip_prefixed_quoted<'a>(value: &'a str, prefix: &str) -> &'a str {
    let rest = &value[prefix.len()..];
    &rest[1..rest.len() - 1]
}

fn object_key_text(tok: &Token) -> anyhow::Result<String> {
    match tok.kind {
        TokenKind::String => decode_string_token(tok),
        _ => Ok(token_text(tok).to_string()),
    }
}

fn render_annotation(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, tok) in tokens.iter().enumerate() {
        if tok.kind == TokenKind::Comma {
            out.push_str(", ");
            continue;
        }
        if i > 0 && tokens[i - 1].kind == TokenKind::Comma {
            // already spaced above
        }
        out.push_str(token_text(tok));
    }
    debug!("rendered annotation: {out}");
    out
}
