//! Date/time emission (§4.5, mirroring §4.2's decoder). Formats a
//! [`DateTimeValue`] back into its `dt"..."` literal body.

use crate::decode::{DateTimeValue, Timezone};

pub fn value_datetime(v: &DateTimeValue) -> String {
    let mut out = String::with_capacity(32);
    out.push_str("dt\"");
    out.push_str(&format!("{:04}-{:02}-{:02}", v.year, v.month, v.day));
    if !v.date_only {
        out.push('T');
        out.push_str(&format!("{:02}:{:02}:{:02}", v.hour, v.minute, v.second));
        if v.nanosecond > 0 {
            let frac = format!("{:09}", v.nanosecond);
            out.push('.');
            out.push_str(frac.trim_end_matches('0'));
        }
        match v.timezone {
            Timezone::Local => {}
            Timezone::Utc => out.push('Z'),
            Timezone::Offset { negative, hours, minutes } => {
                out.push(if negative { '-' } else { '+' });
                out.push_str(&format!("{hours:02}:{minutes:02}"));
            }
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_date_only() {
        let v = DateTimeValue {
            year: 1996,
            month: 6,
            day: 7,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            timezone: Timezone::Local,
            date_only: true,
        };
        assert_eq!(value_datetime(&v), "dt\"1996-06-07\"");
    }

    #[test]
    fn formats_utc_datetime_with_fraction() {
        let v = DateTimeValue {
            year: 2024,
            month: 1,
            day: 2,
            hour: 3,
            minute: 4,
            second: 5,
            nanosecond: 500_000_000,
            timezone: Timezone::Utc,
            date_only: false,
        };
        assert_eq!(value_datetime(&v), "dt\"2024-01-02T03:04:05.5Z\"");
    }

    #[test]
    fn formats_offset_timezone() {
        let v = DateTimeValue {
            year: 2024,
            month: 1,
            day: 2,
            hour: 3,
            minute: 4,
            second: 5,
            nanosecond: 0,
            timezone: Timezone::Offset { negative: true, hours: 5, minutes: 30 },
            date_only: false,
        };
        assert_eq!(value_datetime(&v), "dt\"2024-01-02T03:04:05-05:30\"");
    }
}
