use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::FiscalDateTime;
use crate::layout::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// The stored checksum byte does not match the record contents.
    ChecksumMismatch,
    /// The record is dated after the reference clock.
    FutureDate,
}

/// A non-fatal anomaly found while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub region: Region,
    /// Slot index within the region.
    pub index: usize,
    /// Byte offset of the record within the image.
    pub offset: usize,
    pub message: String,
}

impl Warning {
    pub fn checksum_mismatch(region: Region, index: usize, offset: usize) -> Warning {
        Warning {
            kind: WarningKind::ChecksumMismatch,
            region,
            index,
            offset,
            message: format!("Checksum mismatch in {}[{}] at {:#x}", region, index, offset),
        }
    }

    pub fn future_date(
        region: Region,
        index: usize,
        offset: usize,
        date_time: &FiscalDateTime,
    ) -> Warning {
        Warning {
            kind: WarningKind::FutureDate,
            region,
            index,
            offset,
            message: format!(
                "Future date in {}[{}] at {:#x}: {}",
                region, index, offset, date_time
            ),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Whether `date_time` denotes an instant strictly after `now`.
pub(crate) fn is_future(date_time: &FiscalDateTime, now: &DateTime<Utc>) -> bool {
    date_time.to_utc().map_or(false, |instant| instant > *now)
}
