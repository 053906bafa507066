use fm_format::{FiscalDateTime, FiscalDump, Region, WarningKind};

use crate::cli::InfoArgs;
use crate::error::{Error, Result};
use crate::util::{format_size, open_dump};

pub fn run(args: InfoArgs) -> Result<()> {
    let dump = open_dump(&args.dump, &args.decode.options())?;
    let file_len = std::fs::metadata(&args.dump)
        .map_err(|source| Error::ReadMetadata {
            path: args.dump.clone(),
            source,
        })?
        .len();

    println!("Dump:        {}", args.dump.display());
    println!("Size:        {}", format_size(file_len));
    println!("Hardware id: {}", dump.hardware_id_hex());
    println!();

    show_device(&dump);
    println!();
    show_regions(&dump);
    println!();
    show_latest_settlement(&dump);

    let mismatches = count(&dump, WarningKind::ChecksumMismatch);
    let future = count(&dump, WarningKind::FutureDate);
    println!();
    println!(
        "Warnings:    {} ({} checksum mismatches, {} future dates)",
        dump.warnings.len(),
        mismatches,
        future
    );

    Ok(())
}

fn show_device(dump: &FiscalDump) {
    match &dump.serial {
        Some(serial) => println!(
            "Serial:      {} (programmed {})",
            serial.serial_number, serial.date_time
        ),
        None => println!("Serial:      -"),
    }

    let fiscal_since = dump
        .fiscal_mode_start
        .map(|x| x.date_time)
        .unwrap_or(FiscalDateTime::Absent);
    println!("Fiscal mode: {}", fiscal_since);

    match dump.fm_numbers.last() {
        Some(fm) => println!("FM number:   {} (since {})", fm.fm_number, fm.date_time),
        None => println!("FM number:   -"),
    }

    match dump.tax_ids.last() {
        Some(tax) => println!(
            "Tax number:  {} (type {}, since {})",
            tax.tax_number, tax.kind, tax.date_time
        ),
        None => println!("Tax number:  -"),
    }
}

fn show_regions(dump: &FiscalDump) {
    println!("Region                   Offset      Used  Capacity");
    println!("-----------------------  --------  ------  --------");
    for (region, used) in dump.record_counts().iter() {
        println!(
            "{:<23}  {:>#8x}  {:>6}  {:>8}",
            region.name(),
            region.offset(),
            used,
            region.count()
        );
    }
    println!(
        "{:<23}  {:>#8x}  {:>6}  {:>8}",
        Region::HardwareId.name(),
        Region::HardwareId.offset(),
        "-",
        "-"
    );
}

fn show_latest_settlement(dump: &FiscalDump) {
    match dump.settlements.last() {
        Some(report) => {
            println!("Last settlement:");
            println!("  Number:        {}", report.number);
            println!("  Made:          {}", report.date_time);
            println!("  Last document: {}", report.last_document);
            println!(
                "  Receipts:      {} fiscal, {} void",
                report.fiscal_count, report.void_count
            );
        }
        None => println!("Last settlement: -"),
    }
}

fn count(dump: &FiscalDump, kind: WarningKind) -> usize {
    dump.warnings.iter().filter(|x| x.kind == kind).count()
}
