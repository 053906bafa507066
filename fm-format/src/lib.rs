//! Herein lies the codec for fiscal memory dumps.
//!
//! A dump is a fixed 2 MiB flash image written by a cash register's fiscal
//! module. Use [decode][decode] to turn an image into a [FiscalDump][FiscalDump],
//! and [encode][encode] to turn one back into bytes.

pub mod checksum;
pub mod codec;
pub mod datetime;
mod de;
mod dump;
mod error;
pub mod fs;
pub mod layout;
mod record;
pub mod resolve;
mod ser;
mod warning;

pub use datetime::{FiscalDateTime, PackedDateTime};
pub use dump::{decode, decode_with, encode, DecodeOptions, FiscalDump, SettlementQuery};
pub use error::{DecodeError, OpenError, SaveError};
pub use layout::{Region, FILE_SIZE};
pub use record::{
    ChangeCounters, FiscalModeStart, FmNumberRecord, JournalClose, JournalOpen, RamResetRecord,
    SerialRecord, SettlementReport, SettlementTotals, TaxIdRecord, Timestamped, VatBucket,
    VatBuckets, VatRateChange,
};
pub use warning::{Warning, WarningKind};
