use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::datetime::FiscalDateTime;

/// Access to the timestamp every record kind carries.
pub trait Timestamped {
    fn date_time(&self) -> FiscalDateTime;
}

macro_rules! timestamped {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Timestamped for $ty {
                #[inline(always)]
                fn date_time(&self) -> FiscalDateTime {
                    self.date_time
                }
            }
        )*
    };
}

timestamped!(
    SerialRecord,
    FiscalModeStart,
    FmNumberRecord,
    TaxIdRecord,
    VatRateChange,
    RamResetRecord,
    SettlementReport,
    JournalOpen,
    JournalClose,
);

/// Device serial number and the time it was programmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialRecord {
    /// At most 10 bytes once encoded as Windows-1251.
    pub serial_number: String,
    pub date_time: FiscalDateTime,
}

/// When the device entered fiscal mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiscalModeStart {
    pub date_time: FiscalDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FmNumberRecord {
    /// At most 10 bytes once encoded as Windows-1251.
    pub fm_number: String,
    pub date_time: FiscalDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxIdRecord {
    /// Type tag of the tax number.
    pub kind: u8,
    /// At most 12 bytes once encoded as Windows-1251.
    pub tax_number: String,
    pub date_time: FiscalDateTime,
}

/// A change of the VAT rate table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VatRateChange {
    /// Rates for buckets A-H.
    pub rates: [u16; 8],
    /// Cumulative ("zbir") rates for buckets A-H.
    pub cumulative_rates: [u16; 8],
    pub date_time: FiscalDateTime,
    /// Number of the first settlement report the rates apply to.
    pub next_settlement_number: u16,
    pub vat_excluded: u8,
    pub decimal_point: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RamResetRecord {
    pub date_time: FiscalDateTime,
    pub next_settlement_number: u16,
    pub flag: u8,
}

/// The eight tax-rate categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VatBucket {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl VatBucket {
    pub const ALL: [VatBucket; 8] = [
        VatBucket::A,
        VatBucket::B,
        VatBucket::C,
        VatBucket::D,
        VatBucket::E,
        VatBucket::F,
        VatBucket::G,
        VatBucket::H,
    ];

    #[inline(always)]
    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for VatBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One 64-bit accumulator per VAT bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VatBuckets(pub [u64; 8]);

impl VatBuckets {
    pub fn total(&self) -> u128 {
        self.0.iter().map(|&v| u128::from(v)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VatBucket, u64)> + '_ {
        VatBucket::ALL.iter().copied().zip(self.0.iter().copied())
    }
}

impl Index<VatBucket> for VatBuckets {
    type Output = u64;

    fn index(&self, bucket: VatBucket) -> &u64 {
        &self.0[bucket as usize]
    }
}

impl IndexMut<VatBucket> for VatBuckets {
    fn index_mut(&mut self, bucket: VatBucket) -> &mut u64 {
        &mut self.0[bucket as usize]
    }
}

/// The 48 accumulators of a settlement report, in on-disk order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementTotals {
    pub obligation: VatBuckets,
    pub obligation_void: VatBuckets,
    pub sum: VatBuckets,
    pub sum_void: VatBuckets,
    pub cumulative: VatBuckets,
    pub cumulative_void: VatBuckets,
}

impl SettlementTotals {
    pub(crate) fn families(&self) -> [&VatBuckets; 6] {
        [
            &self.obligation,
            &self.obligation_void,
            &self.sum,
            &self.sum_void,
            &self.cumulative,
            &self.cumulative_void,
        ]
    }

    pub(crate) fn families_mut(&mut self) -> [&mut VatBuckets; 6] {
        [
            &mut self.obligation,
            &mut self.obligation_void,
            &mut self.sum,
            &mut self.sum_void,
            &mut self.cumulative,
            &mut self.cumulative_void,
        ]
    }
}

/// How many ancillary records were in effect when a settlement was made.
///
/// These are derived data: the encoder recomputes all four from the dump's
/// FM-number, tax-id, VAT-rate and RAM-reset lists, discarding whatever values
/// they hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeCounters {
    pub fm_number_changes: u8,
    pub tax_id_changes: u8,
    pub vat_rate_changes: u8,
    pub ram_resets: u8,
}

/// An end-of-day ("Z") settlement report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementReport {
    pub number: u16,
    pub date_time: FiscalDateTime,
    /// Overwritten on encode, see [`ChangeCounters`].
    pub change_counters: ChangeCounters,
    pub last_document: u32,
    pub last_fiscal_document: u32,
    pub last_void_document: u32,
    pub fiscal_count: u16,
    pub void_count: u16,
    pub totals: SettlementTotals,
}

/// Marks the opening of an electronic journal period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalOpen {
    pub date_time: FiscalDateTime,
    pub last_record: u32,
    pub last_settlement: u16,
}

/// Marks the closing of an electronic journal period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalClose {
    pub date_time: FiscalDateTime,
    pub last_record: u32,
    pub last_settlement: u16,
    pub lost_or_corrupted: u8,
}
