//! Byte-string (base64) decoding (§4.2). The lexer has already validated
//! that the body is legal base64 alphabet plus padding and a multiple of
//! four characters long; this only has to strip whitespace (multi-line
//! form) and decode. Decoding itself is delegated to the `base64` crate
//! rather than hand-rolled, same as the corpus does for this kind of thing.

use base64::alphabet;
use base64::engine::GeneralPurposeConfig;
use base64::Engine;

use crate::diagnostics::{Diagnostic, ErrorKind};

fn err(msg: impl Into<String>) -> Diagnostic {
    Diagnostic::new(ErrorKind::EncodingError, msg, 0, 0)
}

/// `base64` engine built for the standard alphabet with strict padding:
/// `=` must appear only where RFC 4648 requires it, matching the lexer's
/// own padding-placement check so the two layers never disagree.
fn engine() -> base64::engine::GeneralPurpose {
    let config = GeneralPurposeConfig::new()
        .with_decode_padding_mode(base64::engine::DecodePaddingMode::RequireCanonical);
    base64::engine::GeneralPurpose::new(&alphabet::STANDARD, config)
}

/// Decodes a byte-string's inner content (whitespace and the outer `( )`
/// wrapper already stripped by the caller, or absent for the single-line
/// form) to raw bytes.
pub fn decode(inner: &str) -> Result<Vec<u8>, Diagnostic> {
    let compact: String = inner.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Ok(Vec::new());
    }
    if compact.len() % 4 != 0 {
        return Err(err("base64 string length is not a multiple of four"));
    }
    engine()
        .decode(&compact)
        .map_err(|e| err(format!("invalid base64 payload: {e}")))
}

/// Encodes `bytes` to a base64 string using the same engine `decode` reads
/// back with (used by the serializer, §4.5 "Bytes").
pub fn encode(bytes: &[u8]) -> String {
    engine().encode(bytes)
}

/// Strips the surrounding whitespace/parens for the multi-line form
/// `b64"( ... )"`, given the token value with the `b64` prefix and quotes
/// already removed.
pub fn strip_multiline_wrapper(body: &str) -> &str {
    let trimmed = body.trim();
    trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')).unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_simple_base64() {
        assert_eq!(decode("SGVsbG8=").unwrap(), b"Hello");
    }

    #[test]
    fn decodes_without_padding_needed() {
        assert_eq!(decode("SGVsbG8h").unwrap(), b"Hello!");
    }

    #[test]
    fn decodes_multiline_form_after_whitespace_strip() {
        let body = strip_multiline_wrapper("( SGVsbG8g V29ybGQ= )");
        assert_eq!(decode(body).unwrap(), b"Hello World");
    }

    #[test]
    fn rejects_non_multiple_of_four() {
        assert!(decode("AB").is_err());
    }

    #[test]
    fn rejects_padding_in_the_middle() {
        assert!(decode("SGV=bG8h").is_err());
    }

    #[test]
    fn empty_input_decodes_to_empty_bytes() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn round_trips_through_encode_decode() {
        let bytes = b"the quick brown fox jumps over the lazy dog";
        assert_eq!(decode(&encode(bytes)).unwrap(), bytes);
    }
}
