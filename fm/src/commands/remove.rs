use crate::cli::RemoveArgs;
use crate::error::{Error, Result};
use crate::util::{ensure_writable, open_dump};

pub fn run(args: RemoveArgs) -> Result<()> {
    let mut dump = open_dump(&args.dump, &args.decode.options())?;
    let (first, last) = args.range;
    let removed = dump.remove_settlements(first, last);

    ensure_writable(&args.output, args.force)?;
    fm_format::fs::write_dump(&args.output, &dump).map_err(|source| Error::SaveDump {
        path: args.output.clone(),
        source,
    })?;

    tracing::info!(
        removed,
        remaining = dump.settlements.len(),
        path = %args.output.display(),
        "removed settlement reports"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::commands::testing::{decode_args, sample_dump};

    #[test]
    fn removes_and_renumbers() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("fm.bin");
        let output = dir.path().join("out.bin");
        let mut dump = sample_dump();
        dump.append_settlements(sample_dump().settlements);
        fm_format::fs::write_dump(&input, &dump).unwrap();

        run(RemoveArgs {
            dump: input,
            range: (3, 2),
            output: output.clone(),
            force: false,
            decode: decode_args(),
        })
        .unwrap();

        let written = open_dump(&output, &decode_args().options()).unwrap();
        let pairs: Vec<(u16, u32)> = written
            .settlements
            .iter()
            .map(|r| (r.number, r.last_document))
            .collect();
        assert_eq!(pairs, vec![(1, 10), (2, 20)]);
    }
}
