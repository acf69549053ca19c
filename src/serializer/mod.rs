//! The streaming serializer (§4.5): the parser's mirror image. A state stack
//! tracks container nesting and object key/value alternation; each public
//! method appends bytes, advances state, and returns `&mut Self` so calls
//! chain the way the teacher's builder-style APIs do.

pub mod settings;

mod buffer;
mod bytes;
mod datetime;
mod numbers;
mod strings;

pub use settings::{QuoteStyle, SerializerSettings};

use std::io::Write;

use crate::decode::{DateTimeValue, LiteralKind, Radix};
use crate::error::{Error, Result};
use buffer::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Array,
    Object,
    Expression,
}

struct Frame {
    kind: ContainerKind,
    entries: u32,
    /// Object only: `true` means the next call must be [`Serializer::key`];
    /// `false` means the next call must be a value (§4.5 "Object key/value
    /// alternation").
    expect_key: bool,
}

fn contract_error(msg: impl Into<String>) -> Error {
    Error::SerializerContract(msg.into())
}

pub struct Serializer<W: Write> {
    out: Buffer<W>,
    settings: SerializerSettings,
    stack: Vec<Frame>,
    annotation: Option<String>,
    root_emitted: bool,
    column: usize,
}

impl<W: Write> Serializer<W> {
    pub fn new(sink: W, settings: SerializerSettings) -> Self {
        Self {
            out: Buffer::new(sink),
            settings,
            stack: Vec::new(),
            annotation: None,
            root_emitted: false,
            column: 0,
        }
    }

    pub fn compact(sink: W) -> Self {
        Self::new(sink, SerializerSettings::compact())
    }

    /// Buffers an annotation to prefix the *next* value (§4.5 "Annotation
    /// buffer"). Calling this twice before a value is written overwrites the
    /// previous one — each value gets at most one.
    pub fn annotate(&mut self, text: &str) -> &mut Self {
        self.annotation = Some(text.to_string());
        self
    }

    fn indent_depth(&self) -> usize {
        self.stack.iter().filter(|f| matches!(f.kind, ContainerKind::Array | ContainerKind::Object)).count()
    }

    fn write_raw(&mut self, s: &str) -> Result<()> {
        self.out.write_str(s)?;
        match s.rfind('\n') {
            Some(idx) => self.column = s.len() - idx - 1,
            None => self.column += s.len(),
        }
        Ok(())
    }

    /// Steps 1+2+4 of §4.5 "Pre-value actions", run once per *entry* (an
    /// array element, or an object key) — not run for an object's value,
    /// which shares its key's entry.
    fn begin_entry(&mut self) -> Result<()> {
        let first = match self.stack.last() {
            Some(frame) => frame.entries == 0,
            None => !self.root_emitted,
        };
        if !first {
            let sep = self.settings.value_separator.clone();
            self.write_raw(&sep)?;
            if self.settings.separator_contains_newline() {
                let indent = self.settings.indent.repeat(self.indent_depth());
                self.write_raw(&indent)?;
            }
        }
        if let Some(frame) = self.stack.last_mut() {
            frame.entries += 1;
        }
        Ok(())
    }

    /// Step 3 of §4.5 "Pre-value actions": flush the annotation buffer, then
    /// a single space unless the value about to be written is a container
    /// opener.
    fn before_value_token(&mut self, is_opener: bool) -> Result<()> {
        if let Some(ann) = self.annotation.take() {
            self.write_raw(&ann)?;
            if !is_opener {
                self.write_raw(" ")?;
            }
        }
        Ok(())
    }

    /// Call before writing any scalar/container value that sits in an
    /// *entry* position (array element, top-level document value). Object
    /// values call [`Self::value_slot`] instead since their entry was
    /// already opened by [`Self::key`].
    fn entry_slot(&mut self, is_opener: bool) -> Result<()> {
        match self.stack.last() {
            Some(Frame { kind: ContainerKind::Object, expect_key: true, .. }) => {
                return Err(contract_error("expected an object key, not a value"))
            }
            Some(Frame { kind: ContainerKind::Expression, .. }) => {
                return Err(contract_error("structured values cannot be written directly inside an expression"))
            }
            None if self.root_emitted => {
                return Err(contract_error("a document can only hold one top-level value"))
            }
            _ => {}
        }
        self.begin_entry()?;
        self.before_value_token(is_opener)?;
        if self.stack.is_empty() {
            self.root_emitted = true;
        }
        if let Some(frame) = self.stack.last_mut() {
            if frame.kind == ContainerKind::Object {
                frame.expect_key = false;
            }
        }
        Ok(())
    }

    fn value_slot(&mut self, is_opener: bool) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame { kind: ContainerKind::Object, expect_key, .. }) => {
                if *expect_key {
                    return Err(contract_error("expected an object key, not a value"));
                }
                *expect_key = true;
            }
            _ => return Err(contract_error("value_slot called outside an object's value position")),
        }
        self.before_value_token(is_opener)
    }

    fn open_container(&mut self, kind: ContainerKind, literal: &str, in_value_slot: bool) -> Result<()> {
        if in_value_slot {
            self.value_slot(true)?;
        } else {
            self.entry_slot(true)?;
        }
        self.write_raw(literal)?;
        self.stack.push(Frame { kind, entries: 0, expect_key: kind == ContainerKind::Object });
        Ok(())
    }

    fn close_container(&mut self, expected: ContainerKind, literal: &str) -> Result<&mut Self> {
        match self.stack.pop() {
            Some(frame) if frame.kind == expected => {
                if expected == ContainerKind::Object && !frame.expect_key {
                    return Err(contract_error("closed an object while a value was still expected"));
                }
                self.write_raw(literal)?;
                Ok(self)
            }
            Some(_) => Err(contract_error("closed a container that does not match the open one")),
            None => Err(contract_error("closed a container that was never opened")),
        }
    }

    /// `in_value_slot` selects whether this container is being opened in an
    /// object's value position (after [`Self::sep`]) or as a plain entry
    /// (array element / top-level document value). Use [`Self::begin_array`]
    /// and friends from top level/array context; use the `*_as_value`
    /// variants from inside an object.
    pub fn begin_array(&mut self) -> Result<&mut Self> {
        self.open_container(ContainerKind::Array, "[", false)?;
        Ok(self)
    }

    pub fn begin_array_as_value(&mut self) -> Result<&mut Self> {
        self.open_container(ContainerKind::Array, "[", true)?;
        Ok(self)
    }

    pub fn end_array(&mut self) -> Result<&mut Self> {
        self.close_container(ContainerKind::Array, "]")
    }

    pub fn begin_object(&mut self) -> Result<&mut Self> {
        self.open_container(ContainerKind::Object, "{", false)?;
        Ok(self)
    }

    pub fn begin_object_as_value(&mut self) -> Result<&mut Self> {
        self.open_container(ContainerKind::Object, "{", true)?;
        Ok(self)
    }

    pub fn end_object(&mut self) -> Result<&mut Self> {
        self.close_container(ContainerKind::Object, "}")
    }

    pub fn begin_expression(&mut self) -> Result<&mut Self> {
        self.open_container(ContainerKind::Expression, "(", false)?;
        Ok(self)
    }

    pub fn begin_expression_as_value(&mut self) -> Result<&mut Self> {
        self.open_container(ContainerKind::Expression, "(", true)?;
        Ok(self)
    }

    pub fn end_expression(&mut self) -> Result<&mut Self> {
        self.close_container(ContainerKind::Expression, ")")
    }

    /// Writes an object key (§4.5 "Object key/value alternation"). Must be
    /// followed by [`Self::sep`] and then exactly one value call.
    pub fn key(&mut self, text: &str) -> Result<&mut Self> {
        match self.stack.last() {
            Some(Frame { kind: ContainerKind::Object, expect_key: true, .. }) => {}
            Some(Frame { kind: ContainerKind::Object, expect_key: false, .. }) => {
                return Err(contract_error("emitted a key twice in a row without a value between them"))
            }
            _ => return Err(contract_error("key() called outside an object")),
        }
        self.begin_entry()?;
        let rendered = strings::identifier_or_string(text, true, self.settings.default_quote, false);
        self.write_raw(&rendered)?;
        if let Some(frame) = self.stack.last_mut() {
            frame.expect_key = false;
        }
        Ok(self)
    }

    /// Writes the `:` between a key and its value, with settings-controlled
    /// surrounding space (§4.5 "Object key/value alternation").
    pub fn sep(&mut self) -> Result<&mut Self> {
        match self.stack.last() {
            Some(Frame { kind: ContainerKind::Object, expect_key: false, .. }) => {}
            _ => return Err(contract_error("sep() called without a preceding key()")),
        }
        let text = self.settings.key_separator.clone();
        self.write_raw(&text)?;
        Ok(self)
    }

    fn write_value(&mut self, text: &str, in_value_slot: bool) -> Result<&mut Self> {
        if in_value_slot {
            self.value_slot(false)?;
        } else {
            self.entry_slot(false)?;
        }
        self.write_raw(text)?;
        Ok(self)
    }

    pub fn value_bool(&mut self, value: bool, in_value_slot: bool) -> Result<&mut Self> {
        self.write_value(if value { "true" } else { "false" }, in_value_slot)
    }

    pub fn value_null(&mut self, in_value_slot: bool) -> Result<&mut Self> {
        self.write_value("null", in_value_slot)
    }

    pub fn value_int(&mut self, value: i128, radix: Radix, suffix: &str, in_value_slot: bool) -> Result<&mut Self> {
        let text = numbers::format_integer(value, radix, suffix);
        self.write_value(&text, in_value_slot)
    }

    pub fn value_float(&mut self, value: f64, suffix: &str, in_value_slot: bool) -> Result<&mut Self> {
        let text = numbers::format_float(value, self.settings.default_float_precision, self.settings.float_fixed_precision, suffix);
        self.write_value(&text, in_value_slot)
    }

    pub fn value_non_finite(&mut self, kind: LiteralKind, in_value_slot: bool) -> Result<&mut Self> {
        let text = numbers::format_non_finite(kind);
        self.write_value(text, in_value_slot)
    }

    pub fn value_string(&mut self, s: &str, in_value_slot: bool) -> Result<&mut Self> {
        let text = strings::value_string(s, self.settings.default_quote, self.settings.decode_unicode);
        self.write_value(&text, in_value_slot)
    }

    pub fn value_string_raw(&mut self, body: &str, tag: &str, in_value_slot: bool) -> Result<&mut Self> {
        let text = strings::value_string_raw(body, tag);
        self.write_value(&text, in_value_slot)
    }

    pub fn value_bytes(&mut self, data: &[u8], in_value_slot: bool) -> Result<&mut Self> {
        let depth = self.indent_depth();
        let text = bytes::value_bytes(data, self.settings.target_line_length, self.column, &self.settings.indent, depth);
        self.write_value(&text, in_value_slot)
    }

    pub fn value_datetime(&mut self, value: &DateTimeValue, in_value_slot: bool) -> Result<&mut Self> {
        let text = datetime::value_datetime(value);
        self.write_value(&text, in_value_slot)
    }

    /// Appends raw, uninterpreted text inside an expression container (§4.3
    /// "Expression contents" / §4.5 "Strings" notwithstanding — expression
    /// bodies are never escaped or reformatted).
    pub fn expression_raw(&mut self, text: &str) -> Result<&mut Self> {
        match self.stack.last() {
            Some(Frame { kind: ContainerKind::Expression, .. }) => {}
            _ => return Err(contract_error("expression_raw() called outside an expression")),
        }
        self.write_raw(text)?;
        Ok(self)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
