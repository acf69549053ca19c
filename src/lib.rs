//! JXC: a human-authoring data-interchange format that is a strict superset
//! of JSON. This crate is the core tokenizer/parser/serializer pipeline —
//! the lexer, the jump parser, the token-level value decoders, and the
//! streaming serializer. It deliberately stops short of an in-memory dynamic
//! value type: callers drive a [`parser::JumpParser`] or
//! [`serializer::Serializer`] directly and decode/encode scalars with
//! [`decode`] as they go.

pub mod decode;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod serializer;
pub mod token;

pub use diagnostics::{Diagnostic, ErrorKind};
pub use error::{Error, Result};
pub use parser::{Element, ElementKind, JumpParser};
pub use serializer::{QuoteStyle, Serializer, SerializerSettings};
pub use token::{Token, TokenKind};
