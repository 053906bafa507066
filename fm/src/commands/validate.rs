use fm_format::WarningKind;

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::util::open_dump;

/// Report every anomaly and return the number of checksum mismatches.
pub fn run(args: ValidateArgs) -> Result<usize> {
    let dump = open_dump(&args.dump, &args.decode.options())?;

    if !args.quiet {
        for warning in dump.warnings.iter() {
            println!("{}", warning);
        }
    }

    let records: usize = dump.record_counts().iter().map(|(_, count)| count).sum();
    let mismatches = dump
        .warnings
        .iter()
        .filter(|x| x.kind == WarningKind::ChecksumMismatch)
        .count();
    let future = dump
        .warnings
        .iter()
        .filter(|x| x.kind == WarningKind::FutureDate)
        .count();

    println!(
        "Validated {} records ({} checksum mismatches, {} future dates)",
        records, mismatches, future
    );

    Ok(mismatches)
}
