//! Byte offsets are the only coordinates the lexer and parser ever produce.
//! Line/column are derived on demand from a source buffer, never stored on
//! a token or element.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// 1-based line, 0-based column (counted in UTF-8 scalars, not bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Resolves a byte offset into `source` to a line/column by counting line
/// terminators in the prefix `source[..offset]`. Only ever called when
/// formatting a diagnostic.
pub fn resolve_position(source: &str, offset: usize) -> Position {
    let offset = offset.min(source.len());
    let prefix = &source[..offset];
    let mut line = 1usize;
    let mut last_newline = None;
    for (i, b) in prefix.bytes().enumerate() {
        if b == b'\n' {
            line += 1;
            last_newline = Some(i);
        }
    }
    let col = match last_newline {
        Some(nl) => prefix[nl + 1..].chars().count(),
        None => prefix.chars().count(),
    };
    Position::new(line, col)
}
