//! The jump parser (§4.3): a single-pass, state-stack driven structural
//! parser that turns a token stream into a flat element stream without
//! materializing a tree. Dispatch happens on the top-of-stack frame; this is
//! deliberately not recursive descent (§9 "State machine over callbacks"),
//! which keeps stack usage bounded by heap-allocated frames rather than the
//! program stack.

mod annotation;
mod element;
mod frame;

pub use element::{Element, ElementKind};

use crate::diagnostics::{Diagnostic, ErrorKind};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use frame::{Frame, FrameTag, ObjPhase, SeqPhase};

type PendingElement<'src> = (ElementKind, Token<'src>, usize);

enum Flow<'src> {
    Emit(PendingElement<'src>),
    Continue,
}

/// Token kinds legal as an object key (§4.3 grammar: `key`).
fn is_key_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier | TokenKind::String | TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Null
    )
}

fn closes(open: TokenKind, close: TokenKind) -> bool {
    matches!(
        (open, close),
        (TokenKind::ParenOpen, TokenKind::ParenClose)
            | (TokenKind::SquareBracketOpen, TokenKind::SquareBracketClose)
            | (TokenKind::BraceOpen, TokenKind::BraceClose)
    )
}

/// Single-pass structural parser. Construct with a source buffer, then call
/// [`JumpParser::next`] repeatedly; each successful call makes one element
/// available via [`JumpParser::value`]. On failure `next()` returns `false`
/// and [`JumpParser::has_error`] is `true` with a retrievable diagnostic —
/// further `next()` calls keep returning `false` (§4.3 "Failure semantics").
pub struct JumpParser<'src> {
    lexer: Lexer<'src>,
    stack: Vec<Frame>,
    /// One-token lookahead buffer, used when annotation/separator scanning
    /// needs to "un-read" a token that turned out to belong to the next
    /// production.
    pending_token: Option<Token<'src>>,
    /// Reused across elements (§9 "Annotation tokens are a prefix"):
    /// cleared at the start of the next value's annotation scan, not right
    /// after attaching, so the just-emitted element's view stays valid.
    annotation_buf: Vec<Token<'src>>,
    current: Option<PendingElement<'src>>,
    error: Option<Diagnostic>,
    done: bool,
}

impl<'src> JumpParser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            stack: vec![Frame::Document { produced: false }],
            pending_token: None,
            annotation_buf: Vec::new(),
            current: None,
            error: None,
            done: false,
        }
    }

    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    /// Advances the parser by one element. Returns `false` at end of
    /// document or on error — check [`has_error`](Self::has_error) to tell
    /// the two apart.
    pub fn next(&mut self) -> bool {
        if self.done {
            return false;
        }
        match self.step() {
            Ok(Some(pending)) => {
                self.current = Some(pending);
                true
            }
            Ok(None) => {
                self.current = None;
                self.done = true;
                false
            }
            Err(diag) => {
                self.current = None;
                self.error = Some(diag);
                self.done = true;
                false
            }
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&Diagnostic> {
        self.error.as_ref()
    }

    /// The element made available by the most recent successful `next()`.
    /// Borrows the parser, so it can't outlive the next `next()` call —
    /// that's what keeps the annotation view sound without unsafe aliasing.
    pub fn value(&self) -> Element<'_, 'src> {
        let (kind, token, annotation_len) =
            self.current.expect("value() called without a prior successful next()");
        Element { kind, token, annotation: &self.annotation_buf[..annotation_len] }
    }

    fn err(&self, kind: ErrorKind, msg: impl Into<String>, tok: Token<'src>) -> Diagnostic {
        Diagnostic::new(kind, msg, tok.start(), tok.end())
    }

    /// Reads the next non-`LineBreak` token, preferring a pushed-back token
    /// over the lexer. `LineBreak` is never surfaced as an element (it only
    /// matters for separator bookkeeping, handled by the caller).
    fn read_raw(&mut self, expr_mode: bool) -> Result<Token<'src>, Diagnostic> {
        loop {
            let tok = match self.pending_token.take() {
                Some(t) => t,
                None => self.lexer.next(expr_mode)?,
            };
            if tok.kind == TokenKind::LineBreak {
                continue;
            }
            return Ok(tok);
        }
    }

    fn step(&mut self) -> Result<Option<PendingElement<'src>>, Diagnostic> {
        loop {
            let Some(top) = self.stack.last() else { return Ok(None) };
            let flow = match top.tag() {
                FrameTag::DocumentBeforeValue => self.step_document_before()?,
                FrameTag::DocumentAfterValue => self.step_document_after()?,
                FrameTag::Array => self.step_array()?,
                FrameTag::Object => self.step_object()?,
                FrameTag::Expression => self.step_expression()?,
            };
            match flow {
                Flow::Emit(pending) => return Ok(Some(pending)),
                Flow::Continue => continue,
            }
        }
    }

    fn step_document_before(&mut self) -> Result<Flow<'src>, Diagnostic> {
        let tok = self.read_raw(false)?;
        if tok.kind == TokenKind::Comment {
            return Ok(Flow::Emit((ElementKind::Comment, tok, 0)));
        }
        if tok.kind == TokenKind::EndOfStream {
            return Err(self.err(ErrorKind::GrammarViolation, "expected a value", tok));
        }
        *self.stack.last_mut().unwrap() = Frame::Document { produced: true };
        Ok(Flow::Emit(self.parse_value(tok)?))
    }

    fn step_document_after(&mut self) -> Result<Flow<'src>, Diagnostic> {
        let tok = self.read_raw(false)?;
        match tok.kind {
            TokenKind::Comment => Ok(Flow::Emit((ElementKind::Comment, tok, 0))),
            TokenKind::EndOfStream => {
                self.stack.pop();
                Ok(Flow::Continue)
            }
            _ => Err(self.err(
                ErrorKind::GrammarViolation,
                format!("unexpected `{}` after the document's value", tok.kind),
                tok,
            )),
        }
    }

    /// Parses one `value` production (§4.3 grammar): optional annotation
    /// then a scalar or container opener. `first` is the already-read first
    /// token (guaranteed not `Comment`/`EndOfStream`/`LineBreak`).
    fn parse_value(&mut self, first: Token<'src>) -> Result<PendingElement<'src>, Diagnostic> {
        self.annotation_buf.clear();
        let mut annotation_len = 0usize;

        let value_tok = if matches!(first.kind, TokenKind::Identifier | TokenKind::ExclamationPoint) {
            self.read_annotation_from(first)?;
            annotation_len = self.annotation_buf.len();
            let tok = self.read_raw(false)?;
            match tok.kind {
                TokenKind::EndOfStream => {
                    return Err(self.err(ErrorKind::GrammarViolation, "expected a value after annotation", tok))
                }
                TokenKind::Comment => {
                    return Err(self.err(
                        ErrorKind::GrammarViolation,
                        "a comment cannot appear between an annotation and its value",
                        tok,
                    ))
                }
                _ => tok,
            }
        } else {
            first
        };

        self.dispatch_value_token(value_tok, annotation_len)
    }

    fn dispatch_value_token(
        &mut self,
        tok: Token<'src>,
        annotation_len: usize,
    ) -> Result<PendingElement<'src>, Diagnostic> {
        let kind = match tok.kind {
            TokenKind::Number => ElementKind::Number,
            TokenKind::True | TokenKind::False => ElementKind::Bool,
            TokenKind::Null => ElementKind::Null,
            TokenKind::String => ElementKind::String,
            TokenKind::ByteString => ElementKind::Bytes,
            TokenKind::DateTime => ElementKind::DateTime,
            TokenKind::SquareBracketOpen => {
                self.stack.push(Frame::Array { phase: SeqPhase::EntryOrClose });
                ElementKind::BeginArray
            }
            TokenKind::BraceOpen => {
                self.stack.push(Frame::Object { phase: ObjPhase::KeyOrClose });
                ElementKind::BeginObject
            }
            TokenKind::ParenOpen => {
                self.stack.push(Frame::Expression { brackets: Vec::new() });
                ElementKind::BeginExpression
            }
            _ => {
                return Err(self.err(
                    ErrorKind::GrammarViolation,
                    format!("unexpected `{}`, expected a value", tok.kind),
                    tok,
                ))
            }
        };
        Ok((kind, tok, annotation_len))
    }

    fn set_array_phase(&mut self, phase: SeqPhase) {
        if let Some(Frame::Array { phase: p }) = self.stack.last_mut() {
            *p = phase;
        }
    }

    fn step_array(&mut self) -> Result<Flow<'src>, Diagnostic> {
        let phase = match self.stack.last() {
            Some(Frame::Array { phase }) => *phase,
            _ => unreachable!("step_array called without an Array frame on top"),
        };
        match phase {
            SeqPhase::EntryOrClose => {
                let tok = self.read_raw(false)?;
                match tok.kind {
                    TokenKind::Comment => Ok(Flow::Emit((ElementKind::Comment, tok, 0))),
                    TokenKind::SquareBracketClose => {
                        self.stack.pop();
                        Ok(Flow::Emit((ElementKind::EndArray, tok, 0)))
                    }
                    TokenKind::EndOfStream => {
                        Err(self.err(ErrorKind::GrammarViolation, "unterminated array: expected `]`", tok))
                    }
                    _ => {
                        self.set_array_phase(SeqPhase::SeparatorOrClose { comma_count: 0 });
                        Ok(Flow::Emit(self.parse_value(tok)?))
                    }
                }
            }
            SeqPhase::SeparatorOrClose { comma_count } => {
                let tok = self.read_raw(false)?;
                match tok.kind {
                    TokenKind::Comment => Ok(Flow::Emit((ElementKind::Comment, tok, 0))),
                    TokenKind::SquareBracketClose => {
                        self.stack.pop();
                        Ok(Flow::Emit((ElementKind::EndArray, tok, 0)))
                    }
                    TokenKind::Comma => {
                        self.set_array_phase(SeqPhase::SeparatorOrClose { comma_count: comma_count + 1 });
                        Ok(Flow::Continue)
                    }
                    TokenKind::EndOfStream => {
                        Err(self.err(ErrorKind::GrammarViolation, "unterminated array: expected `]`", tok))
                    }
                    _ => {
                        if comma_count > 1 {
                            return Err(self.err(
                                ErrorKind::GrammarViolation,
                                "two commas with no value between them",
                                tok,
                            ));
                        }
                        self.set_array_phase(SeqPhase::SeparatorOrClose { comma_count: 0 });
                        Ok(Flow::Emit(self.parse_value(tok)?))
                    }
                }
            }
        }
    }

    fn set_object_phase(&mut self, phase: ObjPhase) {
        if let Some(Frame::Object { phase: p }) = self.stack.last_mut() {
            *p = phase;
        }
    }

    fn step_object(&mut self) -> Result<Flow<'src>, Diagnostic> {
        let phase = match self.stack.last() {
            Some(Frame::Object { phase }) => *phase,
            _ => unreachable!("step_object called without an Object frame on top"),
        };
        match phase {
            ObjPhase::KeyOrClose => {
                let tok = self.read_raw(false)?;
                match tok.kind {
                    TokenKind::Comment => Ok(Flow::Emit((ElementKind::Comment, tok, 0))),
                    TokenKind::BraceClose => {
                        self.stack.pop();
                        Ok(Flow::Emit((ElementKind::EndObject, tok, 0)))
                    }
                    TokenKind::EndOfStream => {
                        Err(self.err(ErrorKind::GrammarViolation, "unterminated object: expected `}`", tok))
                    }
                    _ if is_key_start(tok.kind) => {
                        self.set_object_phase(ObjPhase::Colon);
                        Ok(Flow::Emit((ElementKind::ObjectKey, tok, 0)))
                    }
                    _ => Err(self.err(
                        ErrorKind::GrammarViolation,
                        format!("unexpected `{}`, expected an object key", tok.kind),
                        tok,
                    )),
                }
            }
            ObjPhase::Colon => {
                let tok = self.read_raw(false)?;
                match tok.kind {
                    TokenKind::Comment => Ok(Flow::Emit((ElementKind::Comment, tok, 0))),
                    TokenKind::Colon => {
                        self.set_object_phase(ObjPhase::Value);
                        Ok(Flow::Continue)
                    }
                    _ => Err(self.err(
                        ErrorKind::GrammarViolation,
                        format!("expected `:` after object key, found `{}`", tok.kind),
                        tok,
                    )),
                }
            }
            ObjPhase::Value => {
                let tok = self.read_raw(false)?;
                match tok.kind {
                    TokenKind::Comment => Ok(Flow::Emit((ElementKind::Comment, tok, 0))),
                    TokenKind::EndOfStream => {
                        Err(self.err(ErrorKind::GrammarViolation, "expected a value after `:`", tok))
                    }
                    _ => {
                        self.set_object_phase(ObjPhase::SeparatorOrClose { comma_count: 0 });
                        Ok(Flow::Emit(self.parse_value(tok)?))
                    }
                }
            }
            ObjPhase::SeparatorOrClose { comma_count } => {
                let tok = self.read_raw(false)?;
                match tok.kind {
                    TokenKind::Comment => Ok(Flow::Emit((ElementKind::Comment, tok, 0))),
                    TokenKind::BraceClose => {
                        self.stack.pop();
                        Ok(Flow::Emit((ElementKind::EndObject, tok, 0)))
                    }
                    TokenKind::Comma => {
                        self.set_object_phase(ObjPhase::SeparatorOrClose { comma_count: comma_count + 1 });
                        Ok(Flow::Continue)
                    }
                    TokenKind::EndOfStream => {
                        Err(self.err(ErrorKind::GrammarViolation, "unterminated object: expected `}`", tok))
                    }
                    _ if is_key_start(tok.kind) => {
                        if comma_count > 1 {
                            return Err(self.err(
                                ErrorKind::GrammarViolation,
                                "two commas with no value between them",
                                tok,
                            ));
                        }
                        self.set_object_phase(ObjPhase::Colon);
                        Ok(Flow::Emit((ElementKind::ObjectKey, tok, 0)))
                    }
                    _ => Err(self.err(
                        ErrorKind::GrammarViolation,
                        format!("unexpected `{}`, expected an object key", tok.kind),
                        tok,
                    )),
                }
            }
        }
    }

    fn step_expression(&mut self) -> Result<Flow<'src>, Diagnostic> {
        let tok = self.read_raw(true)?;
        if tok.kind == TokenKind::Comment {
            return Ok(Flow::Emit((ElementKind::Comment, tok, 0)));
        }
        if tok.kind == TokenKind::EndOfStream {
            return Err(self.err(ErrorKind::GrammarViolation, "unterminated expression: expected `)`", tok));
        }

        let is_opener = matches!(tok.kind, TokenKind::ParenOpen | TokenKind::SquareBracketOpen | TokenKind::BraceOpen);
        if is_opener {
            if let Some(Frame::Expression { brackets }) = self.stack.last_mut() {
                brackets.push(tok.kind);
            }
            return Ok(Flow::Emit((ElementKind::ExpressionToken, tok, 0)));
        }

        let is_closer = matches!(tok.kind, TokenKind::ParenClose | TokenKind::SquareBracketClose | TokenKind::BraceClose);
        if is_closer {
            let top_bracket = match self.stack.last_mut() {
                Some(Frame::Expression { brackets }) => brackets.pop(),
                _ => unreachable!("step_expression called without an Expression frame on top"),
            };
            return match (top_bracket, tok.kind) {
                (None, TokenKind::ParenClose) => {
                    self.stack.pop();
                    Ok(Flow::Emit((ElementKind::EndExpression, tok, 0)))
                }
                (None, _) => Err(self.err(
                    ErrorKind::GrammarViolation,
                    format!("unmatched `{}` in expression", tok.kind),
                    tok,
                )),
                (Some(open_kind), _) if closes(open_kind, tok.kind) => {
                    Ok(Flow::Emit((ElementKind::ExpressionToken, tok, 0)))
                }
                (Some(open_kind), _) => Err(self.err(
                    ErrorKind::GrammarViolation,
                    format!("`{}` does not close `{}` in expression", tok.kind, open_kind),
                    tok,
                )),
            };
        }

        let kind = match tok.kind {
            TokenKind::Number => ElementKind::Number,
            TokenKind::True | TokenKind::False => ElementKind::Bool,
            TokenKind::Null => ElementKind::Null,
            TokenKind::String => ElementKind::String,
            TokenKind::ByteString => ElementKind::Bytes,
            TokenKind::DateTime => ElementKind::DateTime,
            _ => ElementKind::ExpressionToken,
        };
        Ok(Flow::Emit((kind, tok, 0)))
    }
}
