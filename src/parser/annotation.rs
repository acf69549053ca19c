//! Annotation composition (§4.3 "Annotation composition"). An annotation is
//! an optional `!`, a dotted identifier, and an optional `< … >` generic
//! group whose contents are a free-form token mix. Collected tokens are
//! pushed onto the parser's reusable annotation buffer and attached to the
//! *next* value element; the buffer is cleared at the start of the next
//! `parse_value` call, never mid-collection (§9 "Annotation tokens are a
//! prefix, not a wrapper").

use super::JumpParser;
use crate::diagnostics::{Diagnostic, ErrorKind};
use crate::token::{Token, TokenKind};

impl<'src> JumpParser<'src> {
    /// `first` is already known to be `!` or an `Identifier` — the only two
    /// token kinds that can start an annotation.
    pub(super) fn read_annotation_from(&mut self, first: Token<'src>) -> Result<(), Diagnostic> {
        let ident_tok = if first.kind == TokenKind::ExclamationPoint {
            self.annotation_buf.push(first);
            let next = self.read_raw(false)?;
            if next.kind != TokenKind::Identifier {
                return Err(self.err(
                    ErrorKind::GrammarViolation,
                    "an annotation must begin with an identifier",
                    next,
                ));
            }
            next
        } else {
            first
        };
        self.annotation_buf.push(ident_tok);

        loop {
            let tok = self.read_raw(false)?;
            if tok.kind != TokenKind::Period {
                self.pending_token = Some(tok);
                break;
            }
            let next = self.read_raw(false)?;
            if next.kind != TokenKind::Identifier {
                return Err(self.err(
                    ErrorKind::GrammarViolation,
                    "`.` is only legal between identifiers in an annotation",
                    next,
                ));
            }
            self.annotation_buf.push(tok);
            self.annotation_buf.push(next);
        }

        let tok = self.read_raw(false)?;
        if tok.kind == TokenKind::AngleBracketOpen {
            self.annotation_buf.push(tok);
            self.read_generic_group()?;
        } else {
            self.pending_token = Some(tok);
        }
        Ok(())
    }

    /// Reads the contents of a `< … >` generic group (the opening `<` has
    /// already been pushed). `generic_inner` is free-form: further dotted
    /// identifiers, scalars, symbols, nested `< … >` groups, and balanced
    /// `( … )` groups. Angle-bracket depth and parenthesis depth must both
    /// return to zero at the matching `>`.
    fn read_generic_group(&mut self) -> Result<(), Diagnostic> {
        let mut angle_depth: u32 = 1;
        let mut paren_depth: u32 = 0;
        loop {
            let tok = self.read_raw(false)?;
            match tok.kind {
                TokenKind::AngleBracketOpen => {
                    angle_depth += 1;
                    self.annotation_buf.push(tok);
                }
                TokenKind::AngleBracketClose => {
                    angle_depth -= 1;
                    self.annotation_buf.push(tok);
                    if angle_depth == 0 {
                        if paren_depth != 0 {
                            return Err(self.err(
                                ErrorKind::GrammarViolation,
                                "unbalanced parentheses inside an annotation's generic group",
                                tok,
                            ));
                        }
                        return Ok(());
                    }
                }
                TokenKind::ParenOpen => {
                    paren_depth += 1;
                    self.annotation_buf.push(tok);
                }
                TokenKind::ParenClose => {
                    if paren_depth == 0 {
                        return Err(self.err(
                            ErrorKind::GrammarViolation,
                            "unmatched `)` inside an annotation's generic group",
                            tok,
                        ));
                    }
                    paren_depth -= 1;
                    self.annotation_buf.push(tok);
                }
                TokenKind::EndOfStream => {
                    return Err(self.err(
                        ErrorKind::GrammarViolation,
                        "unterminated generic group in annotation",
                        tok,
                    ))
                }
                TokenKind::Identifier
                | TokenKind::ExclamationPoint
                | TokenKind::Asterisk
                | TokenKind::QuestionMark
                | TokenKind::Pipe
                | TokenKind::Ampersand
                | TokenKind::Equals
                | TokenKind::Comma
                | TokenKind::Period
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::ByteString
                | TokenKind::DateTime => self.annotation_buf.push(tok),
                _ => {
                    return Err(self.err(
                        ErrorKind::GrammarViolation,
                        "unexpected token inside an annotation's generic group",
                        tok,
                    ))
                }
            }
        }
    }
}
