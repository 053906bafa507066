//! End-to-end tests for reading and writing whole dump files.

use chrono::{TimeZone, Utc};
use fm_format::fs::{read_dump, read_dump_with, write_dump};
use fm_format::layout::ERASED_BYTE;
use fm_format::*;
use tempfile::TempDir;

fn options() -> DecodeOptions {
    DecodeOptions {
        now: Some(Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap()),
        ..Default::default()
    }
}

fn date(year: u16, month: u8, day: u8) -> FiscalDateTime {
    FiscalDateTime::Present(PackedDateTime {
        year,
        month,
        day,
        ..Default::default()
    })
}

/// A dump with every region filled to capacity.
fn full_dump() -> FiscalDump {
    let mut dump = FiscalDump {
        serial: Some(SerialRecord {
            serial_number: "ZZ00000001".into(),
            date_time: date(2015, 1, 1),
        }),
        fiscal_mode_start: Some(FiscalModeStart {
            date_time: date(2015, 1, 2),
        }),
        ..Default::default()
    };

    for i in 0..Region::FmNumber.count() {
        dump.fm_numbers.push(FmNumberRecord {
            fm_number: format!("FM{:08}", i),
            date_time: date(2015 + i as u16, 1, 1),
        });
    }
    for i in 0..Region::TaxId.count() {
        dump.tax_ids.push(TaxIdRecord {
            kind: (i % 3) as u8,
            tax_number: format!("{:012}", i),
            date_time: date(2015 + i as u16, 2, 1),
        });
    }
    for i in 0..Region::VatRateChange.count() {
        dump.vat_rate_changes.push(VatRateChange {
            rates: [2000, 700, 0, 0, 0, 0, 0, i as u16],
            cumulative_rates: [0; 8],
            date_time: date(2015 + (i / 4) as u16, 1 + (i % 4) as u8 * 3, 1),
            next_settlement_number: i as u16 * 100,
            vat_excluded: 0,
            decimal_point: 2,
        });
    }
    for i in 0..Region::RamReset.count() {
        dump.ram_resets.push(RamResetRecord {
            date_time: date(2015 + (i / 12) as u16, 1 + (i % 12) as u8, 15),
            next_settlement_number: i as u16 * 40,
            flag: 1,
        });
    }
    for i in 0..Region::Settlement.count() {
        let mut report = SettlementReport {
            number: i as u16 + 1,
            date_time: date(2015 + (i / 365) as u16, 1 + ((i / 28) % 12) as u8, 1 + (i % 28) as u8),
            last_document: i as u32 * 50,
            last_fiscal_document: i as u32 * 45,
            last_void_document: i as u32,
            fiscal_count: 45,
            void_count: 1,
            ..Default::default()
        };
        report.totals.obligation[VatBucket::A] = u64::MAX - i as u64;
        report.totals.cumulative_void[VatBucket::H] = i as u64;
        dump.settlements.push(report);
    }
    for i in 0..Region::JournalOpen.count() {
        dump.journal_opens.push(JournalOpen {
            date_time: date(2015 + i as u16, 1, 1),
            last_record: i as u32 * 1000,
            last_settlement: i as u16 * 200,
        });
        dump.journal_closes.push(JournalClose {
            date_time: date(2015 + i as u16, 12, 31),
            last_record: i as u32 * 1000 + 999,
            last_settlement: i as u16 * 200 + 199,
            lost_or_corrupted: 0,
        });
    }

    dump
}

#[test]
fn full_capacity_round_trip() {
    let image = encode(&full_dump());
    assert_eq!(image.len(), FILE_SIZE);

    let decoded = decode_with(&image, &options()).unwrap();
    assert!(decoded.warnings.is_empty(), "{:?}", &decoded.warnings[..1]);
    for (region, count) in decoded.record_counts().iter() {
        assert_eq!(*count, region.count(), "{}", region);
    }
    assert_eq!(
        decoded.settlements[4499].totals.obligation[VatBucket::A],
        u64::MAX - 4499
    );

    assert_eq!(encode(&decoded), image);
}

#[test]
fn every_record_checksum_verifies() {
    let image = encode(&full_dump());
    for region in Region::ALL.iter().filter(|r| !r.is_opaque()) {
        for index in 0..region.count() {
            let slot = &image[region.slot_range(index)];
            assert!(checksum::verify(slot), "{}[{}]", region, index);
            assert_eq!(slot[slot.len() - 1], checksum::compute(slot));
        }
    }
}

#[test]
fn write_then_read_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fm.bin");

    write_dump(&path, &full_dump()).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), FILE_SIZE as u64);

    let dump = read_dump_with(&path, &options()).unwrap();
    assert_eq!(dump.settlements.len(), Region::Settlement.count());
    assert_eq!(dump.serial.unwrap().serial_number, "ZZ00000001");
}

#[test]
fn short_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("short.bin");
    std::fs::write(&path, vec![ERASED_BYTE; FILE_SIZE - 1]).unwrap();

    match read_dump(&path) {
        Err(OpenError::Decode(DecodeError::InputTooSmall { len }, _)) => {
            assert_eq!(len, FILE_SIZE - 1)
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn directory_is_not_a_dump() {
    let temp_dir = TempDir::new().unwrap();
    match read_dump(temp_dir.path()) {
        Err(OpenError::Decode(DecodeError::InvalidInputType, _)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn missing_file_is_invalid_path() {
    let temp_dir = TempDir::new().unwrap();
    match read_dump(temp_dir.path().join("nope.bin")) {
        Err(OpenError::InvalidPath(..)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn oversized_input_decodes_prefix() {
    let mut image = encode(&full_dump());
    image.extend_from_slice(&[0u8; 64]);
    let dump = decode_with(&image, &options()).unwrap();
    assert_eq!(dump.journal_closes.len(), Region::JournalClose.count());
}
