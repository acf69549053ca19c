use crate::token::TokenKind;

#[inline]
pub(super) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

#[inline]
pub(super) fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Maps the three reserved identifier strings to their value-token kind;
/// everything else is a plain `Identifier`.
pub(super) fn keyword_kind(ident: &str) -> TokenKind {
    match ident {
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        _ => TokenKind::Identifier,
    }
}
