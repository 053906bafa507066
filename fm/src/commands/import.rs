use fm_format::FiscalDump;

use crate::cli::ImportArgs;
use crate::error::{Error, Result};
use crate::util::{ensure_writable, open_dump};

pub fn run(args: ImportArgs) -> Result<()> {
    let json = std::fs::read_to_string(&args.json).map_err(|source| Error::ReadJson {
        path: args.json.clone(),
        source,
    })?;
    let imported = FiscalDump::from_json(&json).map_err(|source| Error::ParseJson {
        path: args.json.clone(),
        source,
    })?;

    let dump = if args.append {
        let mut dump = open_dump(&args.output, &args.decode.options())?;
        let count = imported.settlements.len();
        dump.append_settlements(imported.settlements);
        tracing::debug!(
            appended = count,
            total = dump.settlements.len(),
            "appended settlement reports"
        );
        dump
    } else {
        ensure_writable(&args.output, args.force)?;
        imported
    };

    fm_format::fs::write_dump(&args.output, &dump).map_err(|source| Error::SaveDump {
        path: args.output.clone(),
        source,
    })?;

    tracing::info!(
        path = %args.output.display(),
        settlements = dump.settlements.len(),
        "imported dump"
    );
    Ok(())
}
