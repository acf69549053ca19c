//! ISO-8601 date/datetime decoding (§4.2). A strict recursive descent over
//! the quoted body; the lexer only checked that the body is terminated, so
//! all shape validation happens here.

use crate::diagnostics::{Diagnostic, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    /// No timezone was present in the body.
    Local,
    Utc,
    Offset { negative: bool, hours: u8, minutes: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeValue {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
    pub timezone: Timezone,
    pub date_only: bool,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(body: &'a str) -> Self {
        Self { bytes: body.as_bytes(), pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect_byte(&mut self, b: u8) -> Result<(), Diagnostic> {
        if self.current() == Some(b) {
            self.pos += 1;
            Ok(())
        } else {
            Err(err(format!("expected `{}` in datetime literal", b as char)))
        }
    }

    /// Reads exactly `count` decimal digits.
    fn fixed_digits(&mut self, count: usize) -> Result<u32, Diagnostic> {
        if self.pos + count > self.bytes.len() || !self.bytes[self.pos..self.pos + count].iter().all(u8::is_ascii_digit) {
            return Err(err(format!("expected {count} digits in datetime literal")));
        }
        let text = std::str::from_utf8(&self.bytes[self.pos..self.pos + count]).unwrap();
        let value = text.parse().unwrap();
        self.pos += count;
        Ok(value)
    }

    /// Reads between `min` and `max` decimal digits, greedily.
    fn variable_digits(&mut self, min: usize, max: usize) -> Result<&'a str, Diagnostic> {
        let start = self.pos;
        while self.pos < self.bytes.len() && self.pos - start < max && self.bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let len = self.pos - start;
        if len < min {
            return Err(err(format!("expected at least {min} digits in datetime literal")));
        }
        Ok(std::str::from_utf8(&self.bytes[start..self.pos]).unwrap())
    }
}

fn err(msg: impl Into<String>) -> Diagnostic {
    Diagnostic::new(ErrorKind::LexicalMalformed, msg, 0, 0)
}

/// Parses a datetime literal's body (quotes already stripped). Accepts a
/// date-only prefix (`YYYY-MM-DD`) or a full datetime
/// (`YYYY-MM-DDTHH:MM[:SS[.fff]][Z|+HH:MM|-HH:MM]`).
pub fn parse(body: &str) -> Result<DateTimeValue, Diagnostic> {
    let mut cur = Cursor::new(body);

    let negative = match cur.current() {
        Some(b'+') => {
            cur.pos += 1;
            false
        }
        Some(b'-') => {
            cur.pos += 1;
            true
        }
        _ => false,
    };

    let year_digits = cur.variable_digits(4, 6)?;
    let mut year: i32 = year_digits.parse().map_err(|_| err("year is out of range in datetime literal"))?;
    if negative {
        year = -year;
    }

    cur.expect_byte(b'-')?;
    let month = cur.fixed_digits(2)? as u8;
    cur.expect_byte(b'-')?;
    let day = cur.fixed_digits(2)? as u8;

    if cur.at_end() {
        return Ok(DateTimeValue {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            timezone: Timezone::Utc,
            date_only: true,
        });
    }

    cur.expect_byte(b'T')?;
    let hour = cur.fixed_digits(2)? as u8;
    cur.expect_byte(b':')?;
    let minute = cur.fixed_digits(2)? as u8;

    let second = if cur.current() == Some(b':') {
        cur.pos += 1;
        cur.fixed_digits(2)? as u8
    } else {
        0
    };

    let nanosecond = if cur.current() == Some(b'.') {
        cur.pos += 1;
        let frac = cur.variable_digits(1, 12)?;
        nanos_from_fraction(frac)
    } else {
        0
    };

    let timezone = match cur.current() {
        None => Timezone::Local,
        Some(b'Z') => {
            cur.pos += 1;
            Timezone::Utc
        }
        Some(sign @ (b'+' | b'-')) => {
            cur.pos += 1;
            let offset_negative = sign == b'-';
            let hours = cur.fixed_digits(2)? as u8;
            cur.expect_byte(b':')?;
            let minutes = cur.fixed_digits(2)? as u8;
            Timezone::Offset { negative: offset_negative, hours, minutes }
        }
        Some(other) => return Err(err(format!("unexpected `{}` in datetime timezone", other as char))),
    };

    if !cur.at_end() {
        return Err(err("unexpected trailing characters in datetime literal"));
    }

    Ok(DateTimeValue {
        year,
        month,
        day,
        hour,
        minute,
        second,
        nanosecond,
        timezone,
        date_only: false,
    })
}

/// Left-pads or right-truncates a fractional-seconds digit run to exactly 9
/// digits (nanosecond precision).
fn nanos_from_fraction(digits: &str) -> u32 {
    let mut padded = [b'0'; 9];
    let n = digits.len().min(9);
    padded[..n].copy_from_slice(&digits.as_bytes()[..n]);
    std::str::from_utf8(&padded).unwrap().parse().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_only() {
        let v = parse("2024-01-15").unwrap();
        assert!(v.date_only);
        assert_eq!((v.year, v.month, v.day), (2024, 1, 15));
        assert_eq!(v.timezone, Timezone::Utc);
    }

    #[test]
    fn parses_full_datetime_with_utc() {
        let v = parse("2024-01-15T10:30:00Z").unwrap();
        assert_eq!((v.hour, v.minute, v.second), (10, 30, 0));
        assert_eq!(v.timezone, Timezone::Utc);
    }

    #[test]
    fn parses_fractional_seconds_with_padding() {
        let v = parse("2024-01-15T10:30:00.5").unwrap();
        assert_eq!(v.nanosecond, 500_000_000);
    }

    #[test]
    fn parses_fractional_seconds_with_truncation() {
        let v = parse("2024-01-15T10:30:00.123456789123").unwrap();
        assert_eq!(v.nanosecond, 123_456_789);
    }

    #[test]
    fn parses_offset_timezone() {
        let v = parse("2024-01-15T10:30:00-05:30").unwrap();
        assert_eq!(v.timezone, Timezone::Offset { negative: true, hours: 5, minutes: 30 });
    }

    #[test]
    fn no_timezone_means_local() {
        let v = parse("2024-01-15T10:30:00").unwrap();
        assert_eq!(v.timezone, Timezone::Local);
    }

    #[test]
    fn negative_year_is_supported() {
        let v = parse("-0044-03-15").unwrap();
        assert_eq!(v.year, -44);
    }

    #[test]
    fn rejects_garbage_timezone() {
        assert!(parse("2024-01-15T10:30:00Q").is_err());
    }

    #[test]
    fn rejects_malformed_month() {
        assert!(parse("2024-1-15").is_err());
    }
}
