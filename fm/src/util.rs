use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use fm_format::{DecodeOptions, FiscalDump};

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct ParseDateError(String);

impl std::error::Error for ParseDateError {}

impl std::fmt::Display for ParseDateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown date format: {}", self.0)
    }
}

#[derive(Debug)]
pub struct ParseRangeError(String);

impl std::error::Error for ParseRangeError {}

impl std::fmt::Display for ParseRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid report number range: {}", self.0)
    }
}

/// Parse `N` or `FIRST..LAST` into an inclusive pair of report numbers.
pub fn parse_number_range(src: &str) -> std::result::Result<(u16, u16), ParseRangeError> {
    let number = |x: &str| {
        x.trim()
            .parse::<u16>()
            .map_err(|_| ParseRangeError(src.to_string()))
    };

    match src.split_once("..") {
        Some((first, last)) => Ok((number(first)?, number(last)?)),
        None => {
            let n = number(src)?;
            Ok((n, n))
        }
    }
}

/// Parse an RFC 3339 instant.
pub fn parse_instant(src: &str) -> std::result::Result<DateTime<Utc>, ParseDateError> {
    DateTime::parse_from_rfc3339(src)
        .map(|x| x.with_timezone(&Utc))
        .map_err(|_| ParseDateError(src.to_string()))
}

/// Parse a range bound; a bare date means the start of that day.
pub fn parse_range_start(src: &str) -> std::result::Result<DateTime<Utc>, ParseDateError> {
    parse_bound(src, |date| date.and_hms_opt(0, 0, 0))
}

/// Parse a range bound; a bare date means the last millisecond of that day.
pub fn parse_range_end(src: &str) -> std::result::Result<DateTime<Utc>, ParseDateError> {
    parse_bound(src, |date| date.and_hms_milli_opt(23, 59, 59, 999))
}

fn parse_bound(
    src: &str,
    time_of_day: impl Fn(NaiveDate) -> Option<NaiveDateTime>,
) -> std::result::Result<DateTime<Utc>, ParseDateError> {
    if let Ok(instant) = parse_instant(src) {
        return Ok(instant);
    }

    NaiveDate::parse_from_str(src, "%Y-%m-%d")
        .ok()
        .and_then(time_of_day)
        .map(|x| Utc.from_utc_datetime(&x))
        .ok_or_else(|| ParseDateError(src.to_string()))
}

/// Format file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    use humansize::{file_size_opts as options, FileSize};
    bytes
        .file_size(options::BINARY)
        .unwrap_or_else(|_| format!("{} B", bytes))
}

pub fn open_dump(path: &Path, options: &DecodeOptions) -> Result<FiscalDump> {
    fm_format::fs::read_dump_with(path, options).map_err(|source| Error::OpenDump {
        path: path.to_path_buf(),
        source,
    })
}

/// Fail unless `path` is free or overwriting was requested.
pub fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        return Err(Error::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_dates_cover_whole_day() {
        let start = parse_range_start("2021-03-01").unwrap();
        let end = parse_range_end("2021-03-01").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(end.to_rfc3339(), "2021-03-01T23:59:59.999+00:00");
    }

    #[test]
    fn instants_keep_their_offset() {
        let instant = parse_range_end("2021-03-01T10:00:00+02:00").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2021, 3, 1, 8, 0, 0).unwrap());
        assert_eq!(parse_instant("2021-03-01T08:00:00Z").unwrap(), instant);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant("2021-03-01").is_err());
        assert!(parse_range_start("yesterday").is_err());
        assert!(parse_range_end("2021-02-30").is_err());
    }

    #[test]
    fn number_ranges() {
        assert_eq!(parse_number_range("12").unwrap(), (12, 12));
        assert_eq!(parse_number_range("3..7").unwrap(), (3, 7));
        assert_eq!(parse_number_range("7..3").unwrap(), (7, 3));
        assert!(parse_number_range("3..").is_err());
        assert!(parse_number_range("a..b").is_err());
        assert!(parse_number_range("70000").is_err());
    }

    #[test]
    fn refuses_existing_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.bin");
        assert!(ensure_writable(&path, false).is_ok());

        std::fs::write(&path, b"x").unwrap();
        assert!(matches!(
            ensure_writable(&path, false),
            Err(Error::OutputExists { .. })
        ));
        assert!(ensure_writable(&path, true).is_ok());
    }
}
