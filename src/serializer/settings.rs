//! Serializer configuration (§6.3). A plain value type — the only
//! "configuration layer" this crate has, per the ambient-stack notes: there
//! is no separate config-file format to parse, just this struct and its
//! `compact` preset.

/// Quote character to prefer when emitting a string (§4.5 "Strings").
/// `Auto` picks whichever of `'`/`"` needs fewer escapes, preferring double
/// on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Auto,
    Double,
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerSettings {
    pub pretty_print: bool,
    /// 0 disables line-length-based wrapping (e.g. for base64 payloads).
    pub target_line_length: i32,
    pub indent: String,
    pub linebreak: String,
    pub key_separator: String,
    pub value_separator: String,
    pub default_quote: QuoteStyle,
    pub default_float_precision: i32,
    pub float_fixed_precision: bool,
    /// Whether `value_string` escapes non-ASCII scalars as `\uHHHH`/
    /// `\UHHHHHHHH` rather than passing UTF-8 bytes through verbatim.
    pub decode_unicode: bool,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        Self {
            pretty_print: true,
            target_line_length: 80,
            indent: "    ".to_string(),
            linebreak: "\n".to_string(),
            key_separator: ": ".to_string(),
            value_separator: ",\n".to_string(),
            default_quote: QuoteStyle::Double,
            default_float_precision: 12,
            float_fixed_precision: false,
            decode_unicode: false,
        }
    }
}

impl SerializerSettings {
    /// The "compact" preset (§6.3): pretty-printing off, no indent/linebreak,
    /// terse separators.
    pub fn compact() -> Self {
        Self {
            pretty_print: false,
            indent: String::new(),
            linebreak: String::new(),
            key_separator: ":".to_string(),
            value_separator: ",".to_string(),
            ..Self::default()
        }
    }

    pub(super) fn separator_contains_newline(&self) -> bool {
        self.value_separator.contains('\n')
    }
}
