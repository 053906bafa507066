use std::path::PathBuf;

use crate::layout::FILE_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("File too small to be a fiscal memory dump ({len} bytes, expected {expected}).", expected = FILE_SIZE)]
    InputTooSmall { len: usize },

    #[error("Input must be a raw byte buffer.")]
    InvalidInputType,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("Invalid path to dump file. Path: '{}'", .1.display())]
    InvalidPath(#[source] std::io::Error, PathBuf),

    #[error("Failed to read dump file. Path: '{}'", .1.display())]
    ReadFailed(#[source] std::io::Error, PathBuf),

    #[error("Could not decode dump file. Path: '{}'", .1.display())]
    Decode(#[source] DecodeError, PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to write dump file. Path: '{}'", .1.display())]
    WriteFailed(#[source] std::io::Error, PathBuf),
}
