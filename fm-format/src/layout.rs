//! Fiscal memory image layout: fixed regions and constants.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Exact size of a fiscal memory image (2 MiB).
pub const FILE_SIZE: usize = 0x200000;

/// Initial value of the per-record XOR checksum.
pub const CHECKSUM_SEED: u8 = 0xA5;

/// Byte value of unprogrammed flash.
pub const ERASED_BYTE: u8 = 0xFF;

/// Size of the device's hardware identifier.
pub const HARDWARE_ID_SIZE: usize = 16;

/// One fixed-offset region of the image, in image order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    TestSpace,
    Serial,
    FiscalModeStart,
    FmNumber,
    TaxId,
    VatRateChange,
    RamReset,
    Settlement,
    JournalOpen,
    JournalClose,
    Unused,
    HardwareId,
}

impl Region {
    /// Every region, in the order it appears in the image.
    pub const ALL: [Region; 12] = [
        Region::TestSpace,
        Region::Serial,
        Region::FiscalModeStart,
        Region::FmNumber,
        Region::TaxId,
        Region::VatRateChange,
        Region::RamReset,
        Region::Settlement,
        Region::JournalOpen,
        Region::JournalClose,
        Region::Unused,
        Region::HardwareId,
    ];

    /// Number of record slots. Opaque regions count as a single slot.
    pub const fn count(self) -> usize {
        match self {
            Region::FmNumber | Region::TaxId => 8,
            Region::VatRateChange => 32,
            Region::RamReset => 100,
            Region::Settlement => 4500,
            Region::JournalOpen | Region::JournalClose => 20,
            Region::TestSpace
            | Region::Serial
            | Region::FiscalModeStart
            | Region::Unused
            | Region::HardwareId => 1,
        }
    }

    pub const fn record_size(self) -> usize {
        match self {
            Region::TestSpace => 24 * 16,
            Region::Serial => 24,
            Region::FiscalModeStart => 16,
            Region::FmNumber => 24,
            Region::TaxId => 32,
            Region::VatRateChange => 48,
            Region::RamReset => 16,
            Region::Settlement => 432,
            Region::JournalOpen | Region::JournalClose => 24,
            Region::Unused => 148168,
            Region::HardwareId => HARDWARE_ID_SIZE,
        }
    }

    /// Total bytes occupied by the region.
    pub const fn len(self) -> usize {
        self.count() * self.record_size()
    }

    /// Byte offset of the region from the start of the image.
    pub const fn offset(self) -> usize {
        let mut offset = 0;
        let mut i = 0;
        while i < Region::ALL.len() {
            let region = Region::ALL[i];
            if region as usize == self as usize {
                return offset;
            }
            offset += region.len();
            i += 1;
        }
        offset
    }

    pub const fn range(self) -> Range<usize> {
        self.offset()..self.offset() + self.len()
    }

    /// Byte range of one record slot. `index` must be below [`Region::count`].
    pub fn slot_range(self, index: usize) -> Range<usize> {
        debug_assert!(index < self.count());
        let start = self.offset() + index * self.record_size();
        start..start + self.record_size()
    }

    /// Regions that carry no checksummed records.
    pub const fn is_opaque(self) -> bool {
        matches!(self, Region::TestSpace | Region::Unused | Region::HardwareId)
    }

    /// Record label used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Region::TestSpace => "TestSpace",
            Region::Serial => "SerialRecord",
            Region::FiscalModeStart => "FiscalModeStart",
            Region::FmNumber => "FMNumberRecord",
            Region::TaxId => "TaxIDNum",
            Region::VatRateChange => "VatRateChanges",
            Region::RamReset => "RAMResetRecord",
            Region::Settlement => "ZReport",
            Region::JournalOpen => "EJOpen",
            Region::JournalClose => "EJClose",
            Region::Unused => "NotUsed",
            Region::HardwareId => "CpuId",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const _: () = assert!(Region::HardwareId.offset() + Region::HardwareId.len() == FILE_SIZE);
