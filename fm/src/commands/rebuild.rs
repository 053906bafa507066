use crate::cli::RebuildArgs;
use crate::error::{Error, Result};
use crate::util::{ensure_writable, open_dump};

pub fn run(args: RebuildArgs) -> Result<()> {
    let dump = open_dump(&args.dump, &args.decode.options())?;

    ensure_writable(&args.output, args.force)?;
    fm_format::fs::write_dump(&args.output, &dump).map_err(|source| Error::SaveDump {
        path: args.output.clone(),
        source,
    })?;

    tracing::info!(
        from = %args.dump.display(),
        to = %args.output.display(),
        warnings = dump.warnings.len(),
        "rebuilt dump"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::commands::testing::{decode_args, sample_dump};

    fn rebuild_args(dir: &TempDir, force: bool) -> RebuildArgs {
        let dump = dir.path().join("fm.bin");
        fm_format::fs::write_dump(&dump, &sample_dump()).unwrap();
        RebuildArgs {
            dump,
            output: dir.path().join("out.bin"),
            force,
            decode: decode_args(),
        }
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let args = rebuild_args(&dir, false);
        std::fs::write(&args.output, b"keep").unwrap();
        let output = args.output.clone();

        assert!(matches!(run(args), Err(Error::OutputExists { .. })));
        assert_eq!(std::fs::read(&output).unwrap(), b"keep");
    }

    #[test]
    fn overwrites_with_force() {
        let dir = TempDir::new().unwrap();
        let args = rebuild_args(&dir, true);
        std::fs::write(&args.output, b"stale").unwrap();
        let (input, output) = (args.dump.clone(), args.output.clone());

        run(args).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), std::fs::read(&input).unwrap());
    }
}
