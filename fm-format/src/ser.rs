use crate::codec::RecordWriter;
use crate::layout::Region;
use crate::record::*;

/// A record kind that can be written into a slot of its region.
///
/// Implementations write every byte except the trailing checksum, which the
/// caller applies once the record is complete.
pub(crate) trait EncodeRecord {
    const REGION: Region;

    fn encode(&self, writer: &mut RecordWriter<'_>);
}

impl EncodeRecord for SerialRecord {
    const REGION: Region = Region::Serial;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.text(10, &self.serial_number);
        writer.date_time(&self.date_time);
        writer.reserved(5);
    }
}

impl EncodeRecord for FiscalModeStart {
    const REGION: Region = Region::FiscalModeStart;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.date_time(&self.date_time);
        writer.reserved(7);
    }
}

impl EncodeRecord for FmNumberRecord {
    const REGION: Region = Region::FmNumber;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.text(10, &self.fm_number);
        writer.date_time(&self.date_time);
        writer.reserved(5);
    }
}

impl EncodeRecord for TaxIdRecord {
    const REGION: Region = Region::TaxId;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.u8(self.kind);
        writer.text(12, &self.tax_number);
        writer.reserved(1);
        writer.date_time(&self.date_time);
        writer.reserved(9);
    }
}

impl EncodeRecord for VatRateChange {
    const REGION: Region = Region::VatRateChange;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.u16_array(&self.rates);
        writer.u16_array(&self.cumulative_rates);
        writer.date_time(&self.date_time);
        writer.u16(self.next_settlement_number);
        writer.u8(self.vat_excluded);
        writer.u8(self.decimal_point);
        writer.reserved(3);
    }
}

impl EncodeRecord for RamResetRecord {
    const REGION: Region = Region::RamReset;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.date_time(&self.date_time);
        writer.u16(self.next_settlement_number);
        writer.u8(self.flag);
        writer.reserved(4);
    }
}

impl EncodeRecord for SettlementReport {
    const REGION: Region = Region::Settlement;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.u16(self.number);
        writer.date_time(&self.date_time);
        writer.u8(self.change_counters.fm_number_changes);
        writer.u8(self.change_counters.tax_id_changes);
        writer.u8(self.change_counters.vat_rate_changes);
        writer.u8(self.change_counters.ram_resets);
        writer.reserved(2);
        writer.u32(self.last_document);
        writer.u32(self.last_fiscal_document);
        writer.u32(self.last_void_document);
        writer.u16(self.fiscal_count);
        writer.u16(self.void_count);
        for family in self.totals.families() {
            writer.u64_array(&family.0);
        }
        writer.reserved(15);
    }
}

impl EncodeRecord for JournalOpen {
    const REGION: Region = Region::JournalOpen;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.date_time(&self.date_time);
        writer.u32(self.last_record);
        writer.u16(self.last_settlement);
        writer.reserved(9);
    }
}

impl EncodeRecord for JournalClose {
    const REGION: Region = Region::JournalClose;

    fn encode(&self, writer: &mut RecordWriter<'_>) {
        writer.date_time(&self.date_time);
        writer.u32(self.last_record);
        writer.u16(self.last_settlement);
        writer.u8(self.lost_or_corrupted);
        writer.reserved(8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RecordReader;
    use crate::de::DecodeRecord;

    fn encoded_len<T: EncodeRecord + Default>() -> usize {
        let mut slot = vec![0xFFu8; T::REGION.record_size()];
        let mut writer = RecordWriter::new(&mut slot);
        T::default().encode(&mut writer);
        writer.position()
    }

    #[test]
    fn every_record_leaves_one_checksum_byte() {
        assert_eq!(encoded_len::<SerialRecord>(), 23);
        assert_eq!(encoded_len::<FiscalModeStart>(), 15);
        assert_eq!(encoded_len::<FmNumberRecord>(), 23);
        assert_eq!(encoded_len::<TaxIdRecord>(), 31);
        assert_eq!(encoded_len::<VatRateChange>(), 47);
        assert_eq!(encoded_len::<RamResetRecord>(), 15);
        assert_eq!(encoded_len::<SettlementReport>(), 431);
        assert_eq!(encoded_len::<JournalOpen>(), 23);
        assert_eq!(encoded_len::<JournalClose>(), 23);
    }

    #[test]
    fn settlement_field_offsets() {
        let mut report = SettlementReport {
            number: 0x0102,
            last_document: 0x0A0B0C0D,
            void_count: 0x3344,
            ..Default::default()
        };
        report.totals.obligation.0[0] = 0x1111;
        report.totals.cumulative_void.0[7] = u64::MAX;

        let mut slot = vec![0xFFu8; Region::Settlement.record_size()];
        report.encode(&mut RecordWriter::new(&mut slot));

        assert_eq!(&slot[0..2], &[0x02, 0x01]);
        assert_eq!(&slot[2..10], &[0xFF; 8]);
        assert_eq!(&slot[16..20], &[0x0D, 0x0C, 0x0B, 0x0A]);
        assert_eq!(&slot[30..32], &[0x44, 0x33]);
        assert_eq!(&slot[32..40], &0x1111u64.to_le_bytes());
        assert_eq!(&slot[408..416], &[0xFF; 8]);
        assert_eq!(&slot[416..431], &[0u8; 15]);

        let decoded = SettlementReport::decode(&mut RecordReader::new(&slot));
        assert_eq!(decoded, report);
    }

    #[test]
    fn tax_id_field_offsets() {
        let record = TaxIdRecord {
            kind: 3,
            tax_number: "123456789012".into(),
            date_time: crate::FiscalDateTime::Absent,
        };
        let mut slot = vec![0xFFu8; Region::TaxId.record_size()];
        record.encode(&mut RecordWriter::new(&mut slot));

        assert_eq!(slot[0], 3);
        assert_eq!(&slot[1..13], b"123456789012");
        assert_eq!(slot[13], 0);
        assert_eq!(&slot[14..22], &[0xFF; 8]);
        assert_eq!(&slot[22..31], &[0u8; 9]);
        assert_eq!(TaxIdRecord::decode(&mut RecordReader::new(&slot)), record);
    }

    #[test]
    fn vat_rate_field_offsets() {
        let record = VatRateChange {
            rates: [2000, 700, 0, 0, 0, 0, 0, 0],
            cumulative_rates: [0, 0, 0, 0, 0, 0, 0, 500],
            next_settlement_number: 17,
            vat_excluded: 1,
            decimal_point: 2,
            ..Default::default()
        };
        let mut slot = vec![0xFFu8; Region::VatRateChange.record_size()];
        record.encode(&mut RecordWriter::new(&mut slot));

        assert_eq!(&slot[0..2], &2000u16.to_le_bytes());
        assert_eq!(&slot[30..32], &500u16.to_le_bytes());
        assert_eq!(&slot[40..42], &17u16.to_le_bytes());
        assert_eq!(&slot[42..44], &[1, 2]);
        assert_eq!(VatRateChange::decode(&mut RecordReader::new(&slot)), record);
    }
}
