//! Output buffering (§4.5 "Buffering", §5). Small writes are batched into a
//! stack-allocated array; a write that would overflow it first flushes what's
//! pending, then either copies into the now-empty array or, if it's itself
//! too large to ever fit, goes straight to the sink.

use std::io::{self, Write};

const INLINE_CAP: usize = 512;

pub(super) struct Buffer<W: Write> {
    sink: W,
    inline: [u8; INLINE_CAP],
    len: usize,
}

impl<W: Write> Buffer<W> {
    pub(super) fn new(sink: W) -> Self {
        Self {
            sink,
            inline: [0u8; INLINE_CAP],
            len: 0,
        }
    }

    pub(super) fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if bytes.len() > INLINE_CAP {
            self.flush()?;
            return self.sink.write_all(bytes);
        }
        if self.len + bytes.len() > INLINE_CAP {
            self.flush()?;
        }
        self.inline[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    pub(super) fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    pub(super) fn flush(&mut self) -> io::Result<()> {
        if self.len == 0 {
            return Ok(());
        }
        self.sink.write_all(&self.inline[..self.len])?;
        self.len = 0;
        self.sink.flush()
    }
}

impl<W: Write> Drop for Buffer<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
