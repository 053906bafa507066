//! Derivation of the settlement change counters.
//!
//! A settlement report records how many FM-number, tax-id, VAT-rate and
//! RAM-reset records were in effect when it was made. The counters are
//! recomputed from the ancillary lists on every encode.

use chrono::{DateTime, Utc};

use crate::datetime::FiscalDateTime;
use crate::record::{
    ChangeCounters, FmNumberRecord, RamResetRecord, TaxIdRecord, Timestamped, VatRateChange,
};

/// Maps a timestamp to the 1-based position of the last ancillary record
/// dated at or before it.
#[derive(Debug, Clone)]
pub struct DateResolver {
    last_index: usize,
    dated: Vec<(usize, DateTime<Utc>)>,
}

impl DateResolver {
    pub fn new<T: Timestamped>(records: &[T]) -> DateResolver {
        let dated = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| record.date_time().to_utc().map(|time| (index, time)))
            .collect();

        DateResolver {
            last_index: records.len().saturating_sub(1),
            dated,
        }
    }

    /// Resolve the counter for a settlement made at `at`.
    ///
    /// When `at` has no instant or no record qualifies, every record in the
    /// list is assumed to apply. An empty list resolves to 1.
    pub fn resolve(&self, at: FiscalDateTime) -> u8 {
        let position = at
            .to_utc()
            .and_then(|at| {
                self.dated
                    .iter()
                    .filter(|(_, time)| *time <= at)
                    .map(|(index, _)| *index)
                    .last()
            })
            .unwrap_or(self.last_index);

        u8::try_from(position + 1).unwrap_or(u8::MAX)
    }
}

/// The four resolvers a settlement report draws its counters from.
#[derive(Debug, Clone)]
pub struct ChangeResolver {
    fm_numbers: DateResolver,
    tax_ids: DateResolver,
    vat_rate_changes: DateResolver,
    ram_resets: DateResolver,
}

impl ChangeResolver {
    pub fn new(
        fm_numbers: &[FmNumberRecord],
        tax_ids: &[TaxIdRecord],
        vat_rate_changes: &[VatRateChange],
        ram_resets: &[RamResetRecord],
    ) -> ChangeResolver {
        ChangeResolver {
            fm_numbers: DateResolver::new(fm_numbers),
            tax_ids: DateResolver::new(tax_ids),
            vat_rate_changes: DateResolver::new(vat_rate_changes),
            ram_resets: DateResolver::new(ram_resets),
        }
    }

    pub fn counters_at(&self, at: FiscalDateTime) -> ChangeCounters {
        ChangeCounters {
            fm_number_changes: self.fm_numbers.resolve(at),
            tax_id_changes: self.tax_ids.resolve(at),
            vat_rate_changes: self.vat_rate_changes.resolve(at),
            ram_resets: self.ram_resets.resolve(at),
        }
    }
}
