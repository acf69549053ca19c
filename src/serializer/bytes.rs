//! Byte-string emission (§4.5 "Bytes"). Base64-encodes via
//! [`crate::decode::bytes::encode`] and decides between the single-line and
//! multi-line (`b64"( ... )"`) forms based on the configured line length.

use crate::decode::bytes::encode;

/// `prefix_len` is how many columns are already used on the current line
/// before the literal starts (e.g. indentation, a preceding key and `: `),
/// so the line-length check matches what will actually be written.
pub fn value_bytes(data: &[u8], target_line_length: i32, prefix_len: usize, indent_unit: &str, indent_depth: usize) -> String {
    let payload = encode(data);
    let single_line = format!("b64\"{payload}\"");

    if target_line_length <= 0 || prefix_len + single_line.len() <= target_line_length as usize {
        return single_line;
    }

    let inner_indent = indent_unit.repeat(indent_depth + 1);
    let closing_indent = indent_unit.repeat(indent_depth);
    let chunk_width = (target_line_length as usize).saturating_sub(inner_indent.len()).max(4);
    let mut out = String::with_capacity(payload.len() + payload.len() / chunk_width * (inner_indent.len() + 1) + 16);
    out.push_str("b64\"(\n");
    for chunk in payload.as_bytes().chunks(chunk_width) {
        out.push_str(&inner_indent);
        out.push_str(std::str::from_utf8(chunk).expect("base64 alphabet is ASCII"));
        out.push('\n');
    }
    out.push_str(&closing_indent);
    out.push_str(")\"");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_payload_stays_single_line() {
        let out = value_bytes(b"hi", 80, 0, "    ", 0);
        assert_eq!(out, "b64\"aGk=\"");
    }

    #[test]
    fn long_payload_wraps_multiline() {
        let data = vec![b'x'; 200];
        let out = value_bytes(&data, 40, 0, "    ", 1);
        assert!(out.starts_with("b64\"(\n"));
        assert!(out.trim_end().ends_with(")\""));
    }

    #[test]
    fn zero_line_length_disables_wrapping() {
        let data = vec![b'x'; 200];
        let out = value_bytes(&data, 0, 0, "    ", 0);
        assert!(!out.contains('\n'));
    }
}
