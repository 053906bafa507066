use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checksum;
use crate::codec::{RecordReader, RecordWriter};
use crate::de::DecodeRecord;
use crate::error::DecodeError;
use crate::layout::{Region, ERASED_BYTE, FILE_SIZE, HARDWARE_ID_SIZE};
use crate::record::*;
use crate::resolve::ChangeResolver;
use crate::ser::EncodeRecord;
use crate::warning::{is_future, Warning};

/// Runtime knobs for [`decode_with`].
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Reference clock for future-date checks. Wall clock when `None`.
    pub now: Option<DateTime<Utc>>,
    /// Report records whose checksum byte does not match.
    pub verify_checksums: bool,
    /// Report records dated after `now`.
    pub check_future_dates: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            now: None,
            verify_checksums: true,
            check_future_dates: true,
        }
    }
}

/// Selects settlement reports. Unset bounds accept everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementQuery {
    /// Exact report number.
    pub number: Option<u16>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl SettlementQuery {
    /// Once a date bound is set, reports without a usable timestamp are
    /// rejected.
    pub fn matches(&self, report: &SettlementReport) -> bool {
        if self.number.map_or(false, |n| n != report.number) {
            return false;
        }
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        match report.date_time.to_utc() {
            Some(time) => {
                self.from.map_or(true, |f| time >= f) && self.to.map_or(true, |t| time <= t)
            }
            None => false,
        }
    }
}

/// The whole content of a fiscal memory image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalDump {
    #[serde(default)]
    pub serial: Option<SerialRecord>,
    #[serde(default)]
    pub fiscal_mode_start: Option<FiscalModeStart>,
    #[serde(default)]
    pub fm_numbers: Vec<FmNumberRecord>,
    #[serde(default)]
    pub tax_ids: Vec<TaxIdRecord>,
    #[serde(default)]
    pub vat_rate_changes: Vec<VatRateChange>,
    #[serde(default)]
    pub ram_resets: Vec<RamResetRecord>,
    #[serde(default)]
    pub settlements: Vec<SettlementReport>,
    #[serde(default)]
    pub journal_opens: Vec<JournalOpen>,
    #[serde(default)]
    pub journal_closes: Vec<JournalClose>,

    /// Read-only: [`encode`] never writes the identifier region.
    #[serde(default = "erased_hardware_id")]
    pub hardware_id: [u8; HARDWARE_ID_SIZE],

    /// Anomalies found by the decoder, in image order. Ignored by [`encode`].
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

fn erased_hardware_id() -> [u8; HARDWARE_ID_SIZE] {
    [ERASED_BYTE; HARDWARE_ID_SIZE]
}

impl Default for FiscalDump {
    fn default() -> Self {
        FiscalDump {
            serial: None,
            fiscal_mode_start: None,
            fm_numbers: Vec::new(),
            tax_ids: Vec::new(),
            vat_rate_changes: Vec::new(),
            ram_resets: Vec::new(),
            settlements: Vec::new(),
            journal_opens: Vec::new(),
            journal_closes: Vec::new(),
            hardware_id: erased_hardware_id(),
            warnings: Vec::new(),
        }
    }
}

impl FiscalDump {
    #[inline(always)]
    pub fn decode(bytes: &[u8]) -> Result<FiscalDump, DecodeError> {
        decode(bytes)
    }

    #[inline(always)]
    pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<FiscalDump, DecodeError> {
        decode_with(bytes, options)
    }

    #[inline(always)]
    pub fn encode(&self) -> Vec<u8> {
        encode(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<FiscalDump> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Settlement reports dated within `from..=to`.
    ///
    /// With no bounds every report is returned. Once a bound is given, reports
    /// without a usable timestamp are skipped.
    pub fn settlements_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> impl Iterator<Item = &SettlementReport> + '_ {
        self.settlements_matching(SettlementQuery {
            number: None,
            from,
            to,
        })
    }

    /// Settlement reports accepted by every bound set in `query`.
    pub fn settlements_matching(
        &self,
        query: SettlementQuery,
    ) -> impl Iterator<Item = &SettlementReport> + '_ {
        self.settlements
            .iter()
            .filter(move |report| query.matches(report))
    }

    /// Number the settlement reports 1, 2, 3... in list order.
    pub fn renumber_settlements(&mut self) {
        for (index, report) in self.settlements.iter_mut().enumerate() {
            report.number = u16::try_from(index + 1).unwrap_or(u16::MAX);
        }
    }

    /// Append `reports` after the existing ones and renumber the whole list.
    pub fn append_settlements<I>(&mut self, reports: I)
    where
        I: IntoIterator<Item = SettlementReport>,
    {
        self.settlements.extend(reports);
        self.renumber_settlements();
    }

    /// Drop the reports numbered within `first..=last` (either order) and
    /// renumber the rest. Returns how many reports were removed.
    pub fn remove_settlements(&mut self, first: u16, last: u16) -> usize {
        let (min, max) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };

        let before = self.settlements.len();
        self.settlements
            .retain(|report| report.number < min || report.number > max);
        let removed = before - self.settlements.len();

        self.renumber_settlements();
        tracing::debug!(min, max, removed, "removed settlement reports");
        removed
    }

    /// Number of occupied slots per record region.
    pub fn record_counts(&self) -> [(Region, usize); 9] {
        [
            (Region::Serial, self.serial.iter().count()),
            (Region::FiscalModeStart, self.fiscal_mode_start.iter().count()),
            (Region::FmNumber, self.fm_numbers.len()),
            (Region::TaxId, self.tax_ids.len()),
            (Region::VatRateChange, self.vat_rate_changes.len()),
            (Region::RamReset, self.ram_resets.len()),
            (Region::Settlement, self.settlements.len()),
            (Region::JournalOpen, self.journal_opens.len()),
            (Region::JournalClose, self.journal_closes.len()),
        ]
    }

    pub fn hardware_id_hex(&self) -> String {
        self.hardware_id.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Decode an image, checking it against the wall clock.
pub fn decode(bytes: &[u8]) -> Result<FiscalDump, DecodeError> {
    decode_with(bytes, &DecodeOptions::default())
}

/// Decode an image.
///
/// Fails only when `bytes` is shorter than [`FILE_SIZE`]; trailing bytes past
/// that are ignored. Checksum and date anomalies are collected in
/// [`FiscalDump::warnings`].
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<FiscalDump, DecodeError> {
    if bytes.len() < FILE_SIZE {
        return Err(DecodeError::InputTooSmall { len: bytes.len() });
    }

    let mut decoder = Decoder {
        image: &bytes[..FILE_SIZE],
        now: options.now.unwrap_or_else(Utc::now),
        options,
        warnings: Vec::new(),
    };

    let serial = decoder.records::<SerialRecord>().into_iter().next();
    let fiscal_mode_start = decoder.records::<FiscalModeStart>().into_iter().next();
    let fm_numbers = decoder.records();
    let tax_ids = decoder.records();
    let vat_rate_changes = decoder.records();
    let ram_resets = decoder.records();
    let settlements = decoder.records();
    let journal_opens = decoder.records();
    let journal_closes = decoder.records();

    let mut hardware_id = [0u8; HARDWARE_ID_SIZE];
    hardware_id.copy_from_slice(&decoder.image[Region::HardwareId.range()]);

    tracing::debug!(warnings = decoder.warnings.len(), "decoded fiscal memory image");

    Ok(FiscalDump {
        serial,
        fiscal_mode_start,
        fm_numbers,
        tax_ids,
        vat_rate_changes,
        ram_resets,
        settlements,
        journal_opens,
        journal_closes,
        hardware_id,
        warnings: decoder.warnings,
    })
}

struct Decoder<'a> {
    image: &'a [u8],
    now: DateTime<Utc>,
    options: &'a DecodeOptions,
    warnings: Vec<Warning>,
}

impl Decoder<'_> {
    /// Decode every written slot of `T`'s region, in slot order.
    fn records<T: DecodeRecord>(&mut self) -> Vec<T> {
        let region = T::REGION;
        let image = self.image;
        let mut records = Vec::new();

        for index in 0..region.count() {
            let range = region.slot_range(index);
            let slot = &image[range.clone()];
            if checksum::is_erased(slot) {
                continue;
            }

            let record = T::decode(&mut RecordReader::new(slot));
            self.validate(region, index, range.start, slot, &record);
            records.push(record);
        }

        let range = region.range();
        tracing::debug!(
            start = format_args!("{:#x}", range.start),
            end = format_args!("{:#x}", range.end),
            count = records.len(),
            %region,
            "decoded region"
        );
        records
    }

    fn validate<T: Timestamped>(
        &mut self,
        region: Region,
        index: usize,
        offset: usize,
        slot: &[u8],
        record: &T,
    ) {
        if self.options.verify_checksums && !checksum::verify(slot) {
            self.push(Warning::checksum_mismatch(region, index, offset));
        }

        let date_time = record.date_time();
        if self.options.check_future_dates && is_future(&date_time, &self.now) {
            self.push(Warning::future_date(region, index, offset, &date_time));
        }
    }

    fn push(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }
}

/// Encode a dump into a complete image.
///
/// Unset records stay erased. Settlement change counters are recomputed and
/// the hardware identifier region is left erased.
pub fn encode(dump: &FiscalDump) -> Vec<u8> {
    let mut image = vec![ERASED_BYTE; FILE_SIZE];

    if let Some(serial) = &dump.serial {
        write_slot(&mut image, 0, serial);
    }
    if let Some(fiscal_mode_start) = &dump.fiscal_mode_start {
        write_slot(&mut image, 0, fiscal_mode_start);
    }

    let fm_numbers = capped(&dump.fm_numbers);
    let tax_ids = capped(&dump.tax_ids);
    let vat_rate_changes = capped(&dump.vat_rate_changes);
    let ram_resets = capped(&dump.ram_resets);

    write_records(&mut image, fm_numbers);
    write_records(&mut image, tax_ids);
    write_records(&mut image, vat_rate_changes);
    write_records(&mut image, ram_resets);

    let resolver = ChangeResolver::new(fm_numbers, tax_ids, vat_rate_changes, ram_resets);
    for (index, report) in capped(&dump.settlements).iter().enumerate() {
        let report = SettlementReport {
            change_counters: resolver.counters_at(report.date_time),
            ..report.clone()
        };
        write_slot(&mut image, index, &report);
    }

    write_records(&mut image, capped(&dump.journal_opens));
    write_records(&mut image, capped(&dump.journal_closes));

    image
}

/// The records that fit in `T`'s region.
fn capped<T: EncodeRecord>(records: &[T]) -> &[T] {
    let count = T::REGION.count();
    if records.len() > count {
        tracing::warn!(
            region = %T::REGION,
            records = records.len(),
            capacity = count,
            "dropping records beyond region capacity"
        );
        &records[..count]
    } else {
        records
    }
}

fn write_records<T: EncodeRecord>(image: &mut [u8], records: &[T]) {
    for (index, record) in records.iter().enumerate() {
        write_slot(image, index, record);
    }
}

fn write_slot<T: EncodeRecord>(image: &mut [u8], index: usize, record: &T) {
    let slot = &mut image[T::REGION.slot_range(index)];
    record.encode(&mut RecordWriter::new(slot));
    checksum::apply(slot);
}
