//! The byte-oriented scanner (§4.1). Each call to [`Lexer::next`] consumes
//! the longest legal token starting at the cursor, reports end-of-stream, or
//! returns a [`Diagnostic`] whose span points at the offending bytes without
//! advancing past it.

mod comments;
mod identifiers;
mod numbers;
mod reader;
pub mod specialized;
mod state;
mod strings;

pub use state::{LexerState, MAX_NESTING_DEPTH};

use crate::diagnostics::{Diagnostic, ErrorKind};
use crate::position::ByteSpan;
use crate::token::{Token, TokenKind};
use identifiers::{is_ident_continue, is_ident_start, keyword_kind};
use reader::Cursor;

pub struct Lexer<'src> {
    source: &'src str,
    cur: Cursor<'src>,
    state: LexerState,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cur: Cursor::new(source),
            state: LexerState::new(),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current bracket/brace/paren/angle-bracket nesting depths.
    pub fn depth_state(&self) -> LexerState {
        self.state
    }

    /// Consumes and returns the next token. Pass `expr_mode = true` inside an
    /// expression container (§4.1/§9) so a leading `+`/`-` is delivered as
    /// standalone punctuation rather than merged into a number.
    pub fn next(&mut self, expr_mode: bool) -> Result<Token<'src>, Diagnostic> {
        self.skip_ascii_whitespace_and_comments_boundary();

        let start = self.cur.index();

        let Some(b0) = self.cur.current() else {
            return Ok(Token::symbol(TokenKind::EndOfStream, ByteSpan::new(start, start)));
        };

        if b0 == b'\n' {
            self.cur.bump();
            return Ok(Token::symbol(TokenKind::LineBreak, ByteSpan::new(start, self.cur.index())));
        }

        if b0 == b'#' {
            let end = comments::scan_comment(&mut self.cur);
            let span = ByteSpan::new(start, end);
            return Ok(Token::new(TokenKind::Comment, span, self.cur.slice(start, end), ""));
        }

        if b0.is_ascii_digit() {
            return self.lex_number(start);
        }

        if !expr_mode && matches!(b0, b'+' | b'-') && numbers::starts_number(&self.cur, self.cur.index() + 1) {
            return self.lex_number(start);
        }

        if b0 == b'b' && self.cur.starts_with("b64") && matches!(self.cur.byte_at(start + 3), Some(b'\'') | Some(b'"')) {
            self.cur.bump_n(3);
            strings::scan_byte_string(&mut self.cur, start)?;
            let end = self.cur.index();
            return Ok(Token::new(TokenKind::ByteString, ByteSpan::new(start, end), self.cur.slice(start, end), ""));
        }

        if b0 == b'd' && self.cur.starts_with("dt") && matches!(self.cur.byte_at(start + 2), Some(b'\'') | Some(b'"')) {
            self.cur.bump_n(2);
            strings::scan_datetime(&mut self.cur, start)?;
            let end = self.cur.index();
            return Ok(Token::new(TokenKind::DateTime, ByteSpan::new(start, end), self.cur.slice(start, end), ""));
        }

        if b0 == b'r' && matches!(self.cur.peek(), Some(b'\'') | Some(b'"')) {
            let tag = strings::scan_raw_string(&mut self.cur, start)?;
            let end = self.cur.index();
            let tag_str = self.cur.slice(tag.start, tag.end);
            return Ok(Token::new(TokenKind::String, ByteSpan::new(start, end), self.cur.slice(start, end), tag_str));
        }

        if matches!(b0, b'\'' | b'"') {
            strings::scan_string(&mut self.cur, start)?;
            let end = self.cur.index();
            return Ok(Token::new(TokenKind::String, ByteSpan::new(start, end), self.cur.slice(start, end), ""));
        }

        if is_ident_start(b0) {
            self.cur.bump();
            self.cur.consume_while(is_ident_continue);
            let end = self.cur.index();
            let ident = self.cur.slice(start, end);
            if ident == "nan" || ident == "inf" {
                return Ok(Token::new(TokenKind::Number, ByteSpan::new(start, end), ident, ""));
            }
            return Ok(Token::new(keyword_kind(ident), ByteSpan::new(start, end), ident, ""));
        }

        self.lex_symbol(b0, start)
    }

    fn lex_number(&mut self, start: usize) -> Result<Token<'src>, Diagnostic> {
        let tag = numbers::scan(&mut self.cur, start)?;
        let end = self.cur.index();
        let tag_str = self.cur.slice(tag.start, tag.end);
        Ok(Token::new(TokenKind::Number, ByteSpan::new(start, end), self.cur.slice(start, end), tag_str))
    }

    fn lex_symbol(&mut self, b0: u8, start: usize) -> Result<Token<'src>, Diagnostic> {
        let kind = match b0 {
            b':' => TokenKind::Colon,
            b'=' => TokenKind::Equals,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Period,
            b'{' => {
                self.state.brace_depth += 1;
                self.check_limit(self.state.brace_depth, start)?;
                TokenKind::BraceOpen
            }
            b'}' => {
                self.state.brace_depth -= 1;
                TokenKind::BraceClose
            }
            b'[' => {
                self.state.bracket_depth += 1;
                self.check_limit(self.state.bracket_depth, start)?;
                TokenKind::SquareBracketOpen
            }
            b']' => {
                self.state.bracket_depth -= 1;
                TokenKind::SquareBracketClose
            }
            b'<' => {
                self.state.angle_depth += 1;
                self.check_limit(self.state.angle_depth, start)?;
                TokenKind::AngleBracketOpen
            }
            b'>' => {
                self.state.angle_depth -= 1;
                TokenKind::AngleBracketClose
            }
            b'(' => {
                self.state.paren_depth += 1;
                self.check_limit(self.state.paren_depth, start)?;
                TokenKind::ParenOpen
            }
            b')' => {
                self.state.paren_depth -= 1;
                TokenKind::ParenClose
            }
            b'!' => TokenKind::ExclamationPoint,
            b'*' => TokenKind::Asterisk,
            b'?' => TokenKind::QuestionMark,
            b'@' => TokenKind::AtSymbol,
            b'|' => TokenKind::Pipe,
            b'&' => TokenKind::Ampersand,
            b'%' => TokenKind::Percent,
            b';' => TokenKind::Semicolon,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'/' => TokenKind::Slash,
            b'\\' => TokenKind::Backslash,
            b'^' => TokenKind::Caret,
            b'~' => TokenKind::Tilde,
            b'`' => TokenKind::Backtick,
            _ => {
                self.cur.bump();
                return Err(Diagnostic::new(
                    ErrorKind::LexicalMalformed,
                    format!("unexpected byte `{}`", b0 as char),
                    start,
                    self.cur.index(),
                ));
            }
        };
        self.cur.bump();
        Ok(Token::symbol(kind, ByteSpan::new(start, self.cur.index())))
    }

    fn check_limit(&self, depth: i64, start: usize) -> Result<(), Diagnostic> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Diagnostic::new(
                ErrorKind::LimitExceeded,
                "exceeded maximum nesting depth",
                start,
                self.cur.index() + 1,
            ));
        }
        Ok(())
    }

    fn skip_ascii_whitespace_and_comments_boundary(&mut self) {
        self.cur.skip_ascii_whitespace_no_newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next(false).expect("lex error");
            let done = tok.kind == TokenKind::EndOfStream;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_array_of_scalars() {
        let kinds = lex_all("[1, true, null, 'x']");
        assert_eq!(
            kinds,
            vec![
                TokenKind::SquareBracketOpen,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::True,
                TokenKind::Comma,
                TokenKind::Null,
                TokenKind::Comma,
                TokenKind::String,
                TokenKind::SquareBracketClose,
                TokenKind::EndOfStream,
            ]
        );
    }

    #[test]
    fn lexes_signed_number_outside_expr_mode() {
        let mut lexer = Lexer::new("-5.2");
        let tok = lexer.next(false).unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.value, "-5.2");
    }

    #[test]
    fn expr_mode_keeps_sign_standalone() {
        let mut lexer = Lexer::new("-5");
        let tok = lexer.next(true).unwrap();
        assert_eq!(tok.kind, TokenKind::Minus);
        let tok2 = lexer.next(true).unwrap();
        assert_eq!(tok2.kind, TokenKind::Number);
        assert_eq!(tok2.value, "5");
    }

    #[test]
    fn lexes_number_with_suffix() {
        let mut lexer = Lexer::new("0x1F_u32");
        let tok = lexer.next(false).unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.value, "0x1F_u32");
        assert_eq!(tok.tag, "_u32");
    }

    #[test]
    fn lexes_raw_string_with_heredoc() {
        let mut lexer = Lexer::new(r#"r"heredoc(raw "string" body)heredoc""#);
        let tok = lexer.next(false).unwrap();
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.tag, "heredoc");
    }

    #[test]
    fn line_comment_runs_to_newline() {
        let mut lexer = Lexer::new("# hi\n1");
        let tok = lexer.next(false).unwrap();
        assert_eq!(tok.kind, TokenKind::Comment);
        assert_eq!(tok.value, "# hi");
        let tok = lexer.next(false).unwrap();
        assert_eq!(tok.kind, TokenKind::LineBreak);
    }

    #[test]
    fn rejects_literal_newline_in_string() {
        let mut lexer = Lexer::new("\"line\nbreak\"");
        let err = lexer.next(false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LexicalMalformed);
    }

    #[test]
    fn rejects_bad_escape() {
        let mut lexer = Lexer::new(r"'no \q escape'");
        let err = lexer.next(false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LexicalMalformed);
    }

    #[test]
    fn rejects_heredoc_mismatch() {
        let mut lexer = Lexer::new(r#"r"tag(body)other""#);
        let err = lexer.next(false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LexicalMalformed);
    }

    #[test]
    fn rejects_base64_not_multiple_of_four() {
        let mut lexer = Lexer::new(r#"b64"AB""#);
        let err = lexer.next(false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EncodingError);
    }

    #[test]
    fn decodes_multiline_base64_whitespace() {
        let mut lexer = Lexer::new(r#"b64"( SGVsbG8g V29ybGQ= )""#);
        let tok = lexer.next(false).unwrap();
        assert_eq!(tok.kind, TokenKind::ByteString);
    }

    #[test]
    fn bare_nan_and_inf_lex_as_numbers() {
        let mut lexer = Lexer::new("nan inf -inf");
        let nan = lexer.next(false).unwrap();
        assert_eq!(nan.kind, TokenKind::Number);
        assert_eq!(nan.value, "nan");
        let inf = lexer.next(false).unwrap();
        assert_eq!(inf.kind, TokenKind::Number);
        assert_eq!(inf.value, "inf");
        let neg_inf = lexer.next(false).unwrap();
        assert_eq!(neg_inf.kind, TokenKind::Number);
        assert_eq!(neg_inf.value, "-inf");
    }
}
