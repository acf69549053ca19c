//! The parser's unit of output (§3, §6.2).

use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Never emitted by [`super::JumpParser`] itself — grammar violations are
    /// reported as a [`crate::diagnostics::Diagnostic`] instead, per §7. Kept
    /// for parity with the wire enumeration (§6.2) so a consumer has a
    /// sentinel default to construct without an active parser.
    Invalid,
    Number,
    Bool,
    Null,
    Bytes,
    String,
    DateTime,
    ExpressionToken,
    Comment,
    BeginArray,
    EndArray,
    BeginExpression,
    EndExpression,
    BeginObject,
    ObjectKey,
    EndObject,
}

impl ElementKind {
    /// Container-end and expression-content elements never carry an
    /// annotation (§3 Invariants); `ObjectKey` doesn't either.
    pub fn can_carry_annotation(&self) -> bool {
        !matches!(
            self,
            ElementKind::EndArray
                | ElementKind::EndObject
                | ElementKind::EndExpression
                | ElementKind::ObjectKey
                | ElementKind::ExpressionToken
                | ElementKind::Comment
        )
    }
}

/// One element of the parser's flat output stream: a kind, a principal
/// token, and a (possibly empty) annotation token sequence.
///
/// `'p` is the borrow of the parser that owns the annotation buffer; `'src`
/// is the source buffer's lifetime. An `Element` is only valid until the
/// next call to [`super::JumpParser::next`] — the borrow checker enforces
/// this directly, mirroring the "view into a buffer the parser owns, valid
/// only until the next `next()` call" contract from §3 without needing
/// unsafe aliasing.
#[derive(Debug, Clone, Copy)]
pub struct Element<'p, 'src> {
    pub kind: ElementKind,
    pub token: Token<'src>,
    pub annotation: &'p [Token<'src>],
}

impl<'p, 'src> Element<'p, 'src> {
    /// Copies the annotation out so it can outlive the parser — the "copy to
    /// owned" helper called for in §9's memory model notes.
    pub fn annotation_to_owned(&self) -> Vec<Token<'src>> {
        self.annotation.to_vec()
    }
}
