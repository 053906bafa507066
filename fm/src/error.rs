use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open dump `{}`", .path.display())]
    OpenDump {
        path: PathBuf,
        #[source]
        source: fm_format::OpenError,
    },

    #[error("Cannot save dump `{}`", .path.display())]
    SaveDump {
        path: PathBuf,
        #[source]
        source: fm_format::SaveError,
    },

    #[error("Cannot read file metadata `{}`", .path.display())]
    ReadMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read JSON file `{}`", .path.display())]
    ReadJson {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse JSON file `{}`", .path.display())]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot serialize dump to JSON")]
    SerializeJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot write JSON file `{}`", .path.display())]
    WriteJson {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output already exists: `{}` (use -f/--force to overwrite)", .path.display())]
    OutputExists { path: PathBuf },
}
