//! Diagnostics (§6.5, §7). A diagnostic is a byte span plus a message; line
//! and column are resolved lazily, only when rendering against a source
//! buffer.

mod error_kind;

pub use error_kind::ErrorKind;

use crate::position::{resolve_position, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub byte_start: usize,
    pub byte_end: usize,
    pub kind: ErrorKind,
    pub line: Option<usize>,
    pub col: Option<usize>,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, message: impl Into<String>, byte_start: usize, byte_end: usize) -> Self {
        Self {
            message: message.into(),
            byte_start,
            byte_end,
            kind,
            line: None,
            col: None,
        }
    }

    /// Fills `line`/`col` by scanning `source`. Idempotent.
    pub fn resolve(&mut self, source: &str) -> &mut Self {
        let Position { line, col } = resolve_position(source, self.byte_start);
        self.line = Some(line);
        self.col = Some(col);
        self
    }

    pub fn resolved(mut self, source: &str) -> Self {
        self.resolve(source);
        self
    }

    /// `<message> (line <L>, col <C>, \`<excerpt>\`)` once resolved,
    /// otherwise `<message> (index <S>..<E>, \`<excerpt>\`)`.
    pub fn render(&self, source: &str) -> String {
        let excerpt = excerpt_for(source, self.byte_start, self.byte_end);
        match (self.line, self.col) {
            (Some(line), Some(col)) => {
                format!("{} (line {}, col {}, `{}`)", self.message, line, col, excerpt)
            }
            _ => format!(
                "{} (index {}..{}, `{}`)",
                self.message, self.byte_start, self.byte_end, excerpt
            ),
        }
    }
}

fn excerpt_for(source: &str, start: usize, end: usize) -> String {
    let start = start.min(source.len());
    let end = end.max(start).min(source.len());
    let slice = source.get(start..end).unwrap_or("");
    escape_excerpt(slice)
}

/// Escapes non-printable bytes for diagnostic display.
fn escape_excerpt(slice: &str) -> String {
    let mut out = String::with_capacity(slice.len());
    for ch in slice.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '`' => out.push_str("\\`"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_resolved_position() {
        let source = "[1,,2]";
        let d = Diagnostic::new(ErrorKind::GrammarViolation, "two commas with no value", 3, 4)
            .resolved(source);
        assert_eq!(d.render(source), "two commas with no value (line 1, col 3, `,`)");
    }

    #[test]
    fn renders_unresolved_as_byte_index() {
        let d = Diagnostic::new(ErrorKind::LexicalMalformed, "bad escape", 5, 7);
        assert_eq!(d.render("abcdef\\q"), "bad escape (index 5..7, `\\q`)");
    }

    #[test]
    fn escapes_control_bytes_in_excerpt() {
        let source = "\"line\nbreak\"";
        let d = Diagnostic::new(ErrorKind::LexicalMalformed, "disallowed line break", 5, 6)
            .resolved(source);
        assert!(d.render(source).contains("\\n"));
    }
}
