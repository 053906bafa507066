use crate::codec::RecordReader;
use crate::layout::Region;
use crate::record::*;

/// A record kind that can be read from a slot of its region.
pub(crate) trait DecodeRecord: Sized + Timestamped {
    const REGION: Region;

    fn decode(reader: &mut RecordReader<'_>) -> Self;
}

impl DecodeRecord for SerialRecord {
    const REGION: Region = Region::Serial;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        let serial_number = reader.text(10);
        let date_time = reader.date_time();
        SerialRecord {
            serial_number,
            date_time,
        }
    }
}

impl DecodeRecord for FiscalModeStart {
    const REGION: Region = Region::FiscalModeStart;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        FiscalModeStart {
            date_time: reader.date_time(),
        }
    }
}

impl DecodeRecord for FmNumberRecord {
    const REGION: Region = Region::FmNumber;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        let fm_number = reader.text(10);
        let date_time = reader.date_time();
        FmNumberRecord {
            fm_number,
            date_time,
        }
    }
}

impl DecodeRecord for TaxIdRecord {
    const REGION: Region = Region::TaxId;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        let kind = reader.u8();
        let tax_number = reader.text(12);
        reader.skip(1);
        let date_time = reader.date_time();
        TaxIdRecord {
            kind,
            tax_number,
            date_time,
        }
    }
}

impl DecodeRecord for VatRateChange {
    const REGION: Region = Region::VatRateChange;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        let rates = reader.u16_array::<8>();
        let cumulative_rates = reader.u16_array::<8>();
        let date_time = reader.date_time();
        let next_settlement_number = reader.u16();
        let vat_excluded = reader.u8();
        let decimal_point = reader.u8();
        VatRateChange {
            rates,
            cumulative_rates,
            date_time,
            next_settlement_number,
            vat_excluded,
            decimal_point,
        }
    }
}

impl DecodeRecord for RamResetRecord {
    const REGION: Region = Region::RamReset;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        let date_time = reader.date_time();
        let next_settlement_number = reader.u16();
        let flag = reader.u8();
        RamResetRecord {
            date_time,
            next_settlement_number,
            flag,
        }
    }
}

impl DecodeRecord for SettlementReport {
    const REGION: Region = Region::Settlement;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        let number = reader.u16();
        let date_time = reader.date_time();
        let change_counters = ChangeCounters {
            fm_number_changes: reader.u8(),
            tax_id_changes: reader.u8(),
            vat_rate_changes: reader.u8(),
            ram_resets: reader.u8(),
        };
        reader.skip(2);
        let last_document = reader.u32();
        let last_fiscal_document = reader.u32();
        let last_void_document = reader.u32();
        let fiscal_count = reader.u16();
        let void_count = reader.u16();

        let mut totals = SettlementTotals::default();
        for family in totals.families_mut() {
            family.0 = reader.u64_array::<8>();
        }

        SettlementReport {
            number,
            date_time,
            change_counters,
            last_document,
            last_fiscal_document,
            last_void_document,
            fiscal_count,
            void_count,
            totals,
        }
    }
}

impl DecodeRecord for JournalOpen {
    const REGION: Region = Region::JournalOpen;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        let date_time = reader.date_time();
        let last_record = reader.u32();
        let last_settlement = reader.u16();
        JournalOpen {
            date_time,
            last_record,
            last_settlement,
        }
    }
}

impl DecodeRecord for JournalClose {
    const REGION: Region = Region::JournalClose;

    fn decode(reader: &mut RecordReader<'_>) -> Self {
        let date_time = reader.date_time();
        let last_record = reader.u32();
        let last_settlement = reader.u16();
        let lost_or_corrupted = reader.u8();
        JournalClose {
            date_time,
            last_record,
            last_settlement,
            lost_or_corrupted,
        }
    }
}
