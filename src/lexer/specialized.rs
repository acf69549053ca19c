//! Restricted wrappers around [`Lexer`] (§4.4). Each reuses the same byte
//! scanner but gates which token kinds are legal in its context.

use super::Lexer;
use crate::diagnostics::{Diagnostic, ErrorKind};
use crate::token::{Token, TokenKind};

/// Accepts every token kind the base lexer produces. A thin pass-through,
/// kept distinct so callers can name their intent at the type level.
pub struct WholeStreamLexer<'src> {
    inner: Lexer<'src>,
}

impl<'src> WholeStreamLexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { inner: Lexer::new(source) }
    }

    pub fn next(&mut self) -> Result<Token<'src>, Diagnostic> {
        self.inner.next(false)
    }
}

/// Lexes the contents of a type annotation (§4.2, §4.4). Enforces:
/// the first non-`!` token must be an identifier; `.` may appear only
/// between identifiers; any other scalar literal or symbol is only legal
/// inside an angle-bracket group; angle-bracket depth must return to zero
/// before end-of-stream; a second top-level angle-bracket group is rejected.
pub struct AnnotationLexer<'src> {
    inner: Lexer<'src>,
    angle_depth: u32,
    seen_top_level_group: bool,
    saw_first_token: bool,
    prev_was_identifier: bool,
}

impl<'src> AnnotationLexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: Lexer::new(source),
            angle_depth: 0,
            seen_top_level_group: false,
            saw_first_token: false,
            prev_was_identifier: false,
        }
    }

    pub fn next(&mut self) -> Result<Token<'src>, Diagnostic> {
        let tok = self.inner.next(false)?;

        match tok.kind {
            TokenKind::EndOfStream => {
                if self.angle_depth != 0 {
                    return Err(Diagnostic::new(
                        ErrorKind::GrammarViolation,
                        "annotation ended with an unclosed angle-bracket group",
                        tok.start(),
                        tok.end(),
                    ));
                }
                return Ok(tok);
            }
            TokenKind::ExclamationPoint if !self.saw_first_token => {
                return Ok(tok);
            }
            TokenKind::AngleBracketOpen => {
                if self.angle_depth == 0 {
                    if self.seen_top_level_group {
                        return Err(Diagnostic::new(
                            ErrorKind::GrammarViolation,
                            "an annotation may only have one top-level angle-bracket group",
                            tok.start(),
                            tok.end(),
                        ));
                    }
                    self.seen_top_level_group = true;
                }
                self.angle_depth += 1;
                self.saw_first_token = true;
                self.prev_was_identifier = false;
                return Ok(tok);
            }
            TokenKind::AngleBracketClose => {
                self.angle_depth = self.angle_depth.saturating_sub(1);
                self.saw_first_token = true;
                self.prev_was_identifier = false;
                return Ok(tok);
            }
            TokenKind::Identifier | TokenKind::True | TokenKind::False | TokenKind::Null => {
                if !self.saw_first_token && tok.kind != TokenKind::Identifier {
                    return Err(Diagnostic::new(
                        ErrorKind::GrammarViolation,
                        "an annotation must begin with an identifier",
                        tok.start(),
                        tok.end(),
                    ));
                }
                if tok.kind != TokenKind::Identifier && self.angle_depth == 0 {
                    return Err(Diagnostic::new(
                        ErrorKind::GrammarViolation,
                        "only an identifier is legal at the top level of an annotation",
                        tok.start(),
                        tok.end(),
                    ));
                }
                self.saw_first_token = true;
                self.prev_was_identifier = tok.kind == TokenKind::Identifier;
                return Ok(tok);
            }
            TokenKind::Period => {
                if !self.prev_was_identifier {
                    return Err(Diagnostic::new(
                        ErrorKind::GrammarViolation,
                        "`.` is only legal between identifiers in an annotation",
                        tok.start(),
                        tok.end(),
                    ));
                }
                self.saw_first_token = true;
                self.prev_was_identifier = false;
                return Ok(tok);
            }
            TokenKind::Comma if self.angle_depth > 0 => {
                self.prev_was_identifier = false;
                return Ok(tok);
            }
            _ if self.angle_depth > 0 => {
                self.saw_first_token = true;
                self.prev_was_identifier = false;
                return Ok(tok);
            }
            _ => Err(Diagnostic::new(
                ErrorKind::GrammarViolation,
                format!("`{}` is not legal at the top level of an annotation", tok.kind),
                tok.start(),
                tok.end(),
            )),
        }
    }
}

/// Lexes the contents of an expression container using the base lexer's
/// expression entry point, so a leading `+`/`-` is standalone punctuation
/// rather than merged into a number.
pub struct ExpressionLexer<'src> {
    inner: Lexer<'src>,
}

impl<'src> ExpressionLexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { inner: Lexer::new(source) }
    }

    pub fn next(&mut self) -> Result<Token<'src>, Diagnostic> {
        self.inner.next(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_accepts_plain_identifier() {
        let mut lexer = AnnotationLexer::new("vec3");
        let tok = lexer.next().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::EndOfStream);
    }

    #[test]
    fn annotation_accepts_dotted_path() {
        let mut lexer = AnnotationLexer::new("a.b.c");
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Period);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Period);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Identifier);
    }

    #[test]
    fn annotation_allows_angle_group_with_nested_literal() {
        let mut lexer = AnnotationLexer::new("map<string, 1>");
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::AngleBracketOpen);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Comma);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Number);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::AngleBracketClose);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::EndOfStream);
    }

    #[test]
    fn annotation_rejects_literal_at_top_level() {
        let mut lexer = AnnotationLexer::new("1");
        assert!(lexer.next().is_err());
    }

    #[test]
    fn annotation_rejects_second_top_level_group() {
        let mut lexer = AnnotationLexer::new("a<b><c>");
        lexer.next().unwrap();
        lexer.next().unwrap();
        lexer.next().unwrap();
        lexer.next().unwrap();
        assert!(lexer.next().is_err());
    }

    #[test]
    fn annotation_rejects_unclosed_angle_group() {
        let mut lexer = AnnotationLexer::new("a<b");
        lexer.next().unwrap();
        lexer.next().unwrap();
        lexer.next().unwrap();
        assert!(lexer.next().is_err());
    }

    #[test]
    fn expression_lexer_keeps_sign_standalone() {
        let mut lexer = ExpressionLexer::new("-1");
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Minus);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Number);
    }
}
