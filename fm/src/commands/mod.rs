pub mod export;
pub mod import;
pub mod info;
pub mod list;
pub mod rebuild;
pub mod remove;
pub mod validate;

pub use export::run as export;
pub use import::run as import;
pub use info::run as info;
pub use list::run as list;
pub use rebuild::run as rebuild;
pub use remove::run as remove;
pub use validate::run as validate;

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{TimeZone, Utc};
    use fm_format::*;

    use crate::cli::DecodeArgs;

    pub fn date(year: u16, month: u8, day: u8) -> FiscalDateTime {
        FiscalDateTime::Present(PackedDateTime {
            year,
            month,
            day,
            hour: 12,
            ..Default::default()
        })
    }

    pub fn decode_args() -> DecodeArgs {
        DecodeArgs {
            no_checksum: false,
            no_future_check: false,
            now: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    pub fn sample_dump() -> FiscalDump {
        FiscalDump {
            serial: Some(SerialRecord {
                serial_number: "ZZ00000001".into(),
                date_time: date(2019, 12, 1),
            }),
            vat_rate_changes: vec![
                VatRateChange {
                    rates: [2000, 700, 0, 0, 0, 0, 0, 0],
                    date_time: date(2020, 1, 1),
                    ..Default::default()
                },
                VatRateChange {
                    rates: [2000, 1400, 0, 0, 0, 0, 0, 0],
                    date_time: date(2021, 1, 1),
                    ..Default::default()
                },
            ],
            settlements: vec![
                SettlementReport {
                    number: 1,
                    date_time: date(2020, 3, 1),
                    last_document: 10,
                    ..Default::default()
                },
                SettlementReport {
                    number: 2,
                    date_time: date(2021, 3, 1),
                    last_document: 20,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }
}
