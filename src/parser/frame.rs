//! The jump parser's state stack (§4.3). Each frame tags a container kind
//! plus its own sub-state; dispatch happens on the top-of-stack frame, never
//! through mutual recursion (§9 "State machine over callbacks").

use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SeqPhase {
    /// Ready to read the next entry, or the closing bracket if empty/after a
    /// fully-resolved trailing separator.
    EntryOrClose,
    /// Just finished an entry; accumulating separator tokens (§4.3
    /// "Separator policy").
    SeparatorOrClose { comma_count: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ObjPhase {
    KeyOrClose,
    Colon,
    Value,
    SeparatorOrClose { comma_count: u32 },
}

#[derive(Debug)]
pub(super) enum Frame {
    Document { produced: bool },
    Array { phase: SeqPhase },
    Object { phase: ObjPhase },
    /// `brackets` holds the unmatched `( [ {` opened *inside* the
    /// expression (not counting the expression's own opening paren), so the
    /// parser can tell the expression's matching `)` apart from a nested
    /// balanced group's closer (§4.3 "Expression contents").
    Expression { brackets: Vec<TokenKind> },
}

pub(super) enum FrameTag {
    DocumentBeforeValue,
    DocumentAfterValue,
    Array,
    Object,
    Expression,
}

impl Frame {
    pub(super) fn tag(&self) -> FrameTag {
        match self {
            Frame::Document { produced: false } => FrameTag::DocumentBeforeValue,
            Frame::Document { produced: true } => FrameTag::DocumentAfterValue,
            Frame::Array { .. } => FrameTag::Array,
            Frame::Object { .. } => FrameTag::Object,
            Frame::Expression { .. } => FrameTag::Expression,
        }
    }
}
