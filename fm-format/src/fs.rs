//! Loading and saving dump files.

use std::path::Path;

use crate::dump::{decode_with, encode, DecodeOptions, FiscalDump};
use crate::error::{DecodeError, OpenError, SaveError};

/// Read and decode a dump file, checking it against the wall clock.
pub fn read_dump<P: AsRef<Path>>(path: P) -> Result<FiscalDump, OpenError> {
    read_dump_with(path, &DecodeOptions::default())
}

pub fn read_dump_with<P: AsRef<Path>>(
    path: P,
    options: &DecodeOptions,
) -> Result<FiscalDump, OpenError> {
    let path = path.as_ref();
    let meta = std::fs::metadata(path).map_err(|e| OpenError::InvalidPath(e, path.to_path_buf()))?;
    if !meta.is_file() {
        return Err(OpenError::Decode(
            DecodeError::InvalidInputType,
            path.to_path_buf(),
        ));
    }

    let bytes = std::fs::read(path).map_err(|e| OpenError::ReadFailed(e, path.to_path_buf()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read dump file");

    decode_with(&bytes, options).map_err(|e| OpenError::Decode(e, path.to_path_buf()))
}

/// Encode `dump` and write the full image to `path`.
pub fn write_dump<P: AsRef<Path>>(path: P, dump: &FiscalDump) -> Result<(), SaveError> {
    let path = path.as_ref();
    let image = encode(dump);
    std::fs::write(path, &image).map_err(|e| SaveError::WriteFailed(e, path.to_path_buf()))?;
    tracing::debug!(path = %path.display(), bytes = image.len(), "wrote dump file");
    Ok(())
}
