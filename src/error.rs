//! Crate-level error type for API boundaries where `?`-composition is
//! expected. Lex/parse failures are reported as a single [`Diagnostic`] per
//! §7 — that shape is preserved here rather than flattened into variants,
//! since a diagnostic already carries everything a caller needs. The
//! remaining variants cover failures that are programming errors at the
//! library boundary rather than "one diagnostic per parse attempt": a
//! serializer contract violation, or a decoder invoked against a token of
//! the wrong kind.

use crate::diagnostics::Diagnostic;
use crate::token::TokenKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(DiagnosticError),

    #[error("parse error: {0}")]
    Parse(DiagnosticError),

    #[error("decode error: {0}")]
    Decode(DiagnosticError),

    #[error("serializer contract violation: {0}")]
    SerializerContract(String),

    #[error("decoder called with token kind {found}, expected {expected}")]
    WrongTokenKind {
        expected: TokenKind,
        found: TokenKind,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Diagnostic`] wrapped so it can implement `std::error::Error` /
/// `Display` without the diagnostics module itself depending on `thiserror`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticError(pub Diagnostic);

impl std::fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.message)
    }
}

impl std::error::Error for DiagnosticError {}

impl From<Diagnostic> for DiagnosticError {
    fn from(d: Diagnostic) -> Self {
        DiagnosticError(d)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
