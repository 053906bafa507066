use crate::cli::ExportArgs;
use crate::error::{Error, Result};
use crate::util::{ensure_writable, open_dump};

pub fn run(args: ExportArgs) -> Result<()> {
    let dump = open_dump(&args.dump, &args.decode.options())?;
    let json = dump
        .to_json_pretty()
        .map_err(|source| Error::SerializeJson { source })?;

    match args.output {
        Some(path) => {
            ensure_writable(&path, args.force)?;
            std::fs::write(&path, json).map_err(|source| Error::WriteJson {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "exported dump");
        }
        None => println!("{}", json),
    }

    Ok(())
}
