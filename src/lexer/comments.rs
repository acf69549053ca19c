use super::reader::Cursor;

/// Scans a `#`-to-end-of-line comment. `cur` is positioned at the `#`.
/// Returns the comment's end offset (exclusive of the terminating `\n`).
pub(super) fn scan_comment(cur: &mut Cursor) -> usize {
    debug_assert_eq!(cur.current(), Some(b'#'));
    cur.bump();
    cur.consume_while(|b| b != b'\n');
    cur.index()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_before_line_feed() {
        let mut cur = Cursor::new("# hello\nnext");
        let end = scan_comment(&mut cur);
        assert_eq!(&"# hello\nnext"[0..end], "# hello");
    }

    #[test]
    fn runs_to_end_of_input_without_trailing_newline() {
        let mut cur = Cursor::new("# hello");
        let end = scan_comment(&mut cur);
        assert_eq!(end, 7);
    }
}
