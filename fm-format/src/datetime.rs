//! Packed 8-byte timestamps as stored by the fiscal module.
//!
//! Layout: `u16 year (LE), u8 month, u8 day, u8 hour, u8 minute, u8 second,
//! u8 tick` where one tick is 10ms. All values are UTC.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, SecondsFormat, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::ERASED_BYTE;

/// Encoded size of a timestamp.
pub const DATE_TIME_SIZE: usize = 8;

const ABSENT: [u8; DATE_TIME_SIZE] = [ERASED_BYTE; DATE_TIME_SIZE];

/// Raw timestamp fields, passed through verbatim even when out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PackedDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Hundredths of a second.
    pub tick: u8,
}

impl PackedDateTime {
    pub fn read(buf: &[u8]) -> PackedDateTime {
        PackedDateTime {
            year: LittleEndian::read_u16(&buf[0..2]),
            month: buf[2],
            day: buf[3],
            hour: buf[4],
            minute: buf[5],
            second: buf[6],
            tick: buf[7],
        }
    }

    pub fn write(&self, buf: &mut [u8]) {
        LittleEndian::write_u16(&mut buf[0..2], self.year);
        buf[2] = self.month;
        buf[3] = self.day;
        buf[4] = self.hour;
        buf[5] = self.minute;
        buf[6] = self.second;
        buf[7] = self.tick;
    }

    /// Derive packed fields from an instant, truncating to 10ms.
    pub fn from_utc(instant: &DateTime<Utc>) -> PackedDateTime {
        let millis = instant.timestamp_subsec_millis().min(999);
        PackedDateTime {
            year: u16::try_from(instant.year()).unwrap_or(0),
            month: instant.month() as u8,
            day: instant.day() as u8,
            hour: instant.hour() as u8,
            minute: instant.minute() as u8,
            second: instant.second().min(59) as u8,
            tick: (millis / 10) as u8,
        }
    }

    /// Convert to an instant.
    ///
    /// Out-of-range fields carry over into the next unit (day 32 of January is
    /// the 1st of February, hour 24 is midnight of the next day). Month 0 is
    /// read as January. Years 0-99 are taken literally, not as 1900-1999, so
    /// such records order before any modern date.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let month_index = u32::from(self.month.saturating_sub(1));
        let millis = (i64::from(self.tick) * 10).min(999);

        let start = NaiveDate::from_ymd_opt(i32::from(self.year), 1, 1)?
            .checked_add_months(Months::new(month_index))?
            .and_hms_opt(0, 0, 0)?;
        let offset = Duration::days(i64::from(self.day) - 1)
            + Duration::hours(i64::from(self.hour))
            + Duration::minutes(i64::from(self.minute))
            + Duration::seconds(i64::from(self.second))
            + Duration::milliseconds(millis);

        let naive = start.checked_add_signed(offset)?;
        Some(Utc.from_utc_datetime(&naive))
    }
}

/// A stored timestamp: either never written, or a set of packed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<DateTimeRepr>", into = "Option<PackedDateTime>")]
pub enum FiscalDateTime {
    #[default]
    Absent,
    Present(PackedDateTime),
}

impl FiscalDateTime {
    /// Decode 8 bytes. Only the complete sentinel pattern reads as absent.
    pub fn read(buf: &[u8]) -> FiscalDateTime {
        if buf[..DATE_TIME_SIZE] == ABSENT {
            FiscalDateTime::Absent
        } else {
            FiscalDateTime::Present(PackedDateTime::read(buf))
        }
    }

    pub fn write(&self, buf: &mut [u8]) {
        match self {
            FiscalDateTime::Absent => buf[..DATE_TIME_SIZE].copy_from_slice(&ABSENT),
            FiscalDateTime::Present(packed) => packed.write(buf),
        }
    }

    pub fn from_utc(instant: &DateTime<Utc>) -> FiscalDateTime {
        FiscalDateTime::Present(PackedDateTime::from_utc(instant))
    }

    #[inline(always)]
    pub fn is_absent(&self) -> bool {
        matches!(self, FiscalDateTime::Absent)
    }

    #[inline(always)]
    pub fn packed(&self) -> Option<&PackedDateTime> {
        match self {
            FiscalDateTime::Absent => None,
            FiscalDateTime::Present(packed) => Some(packed),
        }
    }

    /// The instant this timestamp denotes, if any.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.packed().and_then(PackedDateTime::to_utc)
    }
}

impl From<DateTime<Utc>> for FiscalDateTime {
    fn from(instant: DateTime<Utc>) -> Self {
        FiscalDateTime::from_utc(&instant)
    }
}

impl From<Option<PackedDateTime>> for FiscalDateTime {
    fn from(value: Option<PackedDateTime>) -> Self {
        match value {
            Some(packed) => FiscalDateTime::Present(packed),
            None => FiscalDateTime::Absent,
        }
    }
}

impl From<FiscalDateTime> for Option<PackedDateTime> {
    fn from(value: FiscalDateTime) -> Self {
        value.packed().copied()
    }
}

impl fmt::Display for FiscalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(instant) => f.write_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None if self.is_absent() => f.write_str("-"),
            None => write!(f, "<invalid:{:?}>", self.packed()),
        }
    }
}

/// Accepted input shapes: packed fields or an RFC 3339 instant.
#[derive(Deserialize)]
#[serde(untagged)]
enum DateTimeRepr {
    Packed(PackedDateTime),
    Instant(DateTime<Utc>),
    Unparsed(String),
}

impl From<Option<DateTimeRepr>> for FiscalDateTime {
    fn from(value: Option<DateTimeRepr>) -> Self {
        match value {
            None => FiscalDateTime::Absent,
            Some(DateTimeRepr::Packed(packed)) => FiscalDateTime::Present(packed),
            Some(DateTimeRepr::Instant(instant)) => FiscalDateTime::from_utc(&instant),
            Some(DateTimeRepr::Unparsed(text)) => {
                tracing::warn!(%text, "unparseable timestamp treated as absent");
                FiscalDateTime::Absent
            }
        }
    }
}
