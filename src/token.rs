//! Lexer output (§3, §6.1 of the wire format).

use crate::position::ByteSpan;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Invalid,
    Comment,

    Identifier,
    True,
    False,
    Null,
    Number,
    String,
    ByteString,
    DateTime,

    Colon,
    Equals,
    Comma,
    Period,
    BraceOpen,
    BraceClose,
    SquareBracketOpen,
    SquareBracketClose,
    AngleBracketOpen,
    AngleBracketClose,
    ParenOpen,
    ParenClose,
    ExclamationPoint,
    Asterisk,
    QuestionMark,
    AtSymbol,
    Pipe,
    Ampersand,
    Percent,
    Semicolon,
    Plus,
    Minus,
    Slash,
    Backslash,
    Caret,
    Tilde,
    Backtick,

    LineBreak,
    EndOfStream,
}

impl TokenKind {
    /// Canonical single-character string for symbol kinds, `None` otherwise.
    pub fn as_symbol(&self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            Colon => ":",
            Equals => "=",
            Comma => ",",
            Period => ".",
            BraceOpen => "{",
            BraceClose => "}",
            SquareBracketOpen => "[",
            SquareBracketClose => "]",
            AngleBracketOpen => "<",
            AngleBracketClose => ">",
            ParenOpen => "(",
            ParenClose => ")",
            ExclamationPoint => "!",
            Asterisk => "*",
            QuestionMark => "?",
            AtSymbol => "@",
            Pipe => "|",
            Ampersand => "&",
            Percent => "%",
            Semicolon => ";",
            Plus => "+",
            Minus => "-",
            Slash => "/",
            Backslash => "\\",
            Caret => "^",
            Tilde => "~",
            Backtick => "`",
            LineBreak => "\n",
            _ => return None,
        })
    }

    /// Whether this kind carries a meaningful `value` slice.
    pub fn has_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Comment
                | TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::ByteString
                | TokenKind::DateTime
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sym) = self.as_symbol() {
            write!(f, "{sym}")
        } else {
            write!(f, "{self:?}")
        }
    }
}

/// A single lexed token. Borrows from the source buffer; has the buffer's
/// lifetime. `value` includes any disambiguating prefix/suffix (quotes,
/// `r`, `b64`, `dt`, sign, base prefix); decoding it is the decoders' job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: ByteSpan,
    pub value: &'src str,
    pub tag: &'src str,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, span: ByteSpan, value: &'src str, tag: &'src str) -> Self {
        Self {
            kind,
            span,
            value,
            tag,
        }
    }

    pub fn symbol(kind: TokenKind, span: ByteSpan) -> Self {
        Self {
            kind,
            span,
            value: "",
            tag: "",
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}
