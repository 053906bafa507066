use fm_format::{SettlementQuery, SettlementReport};

use crate::cli::ListArgs;
use crate::error::{Error, Result};
use crate::util::open_dump;

pub fn run(args: ListArgs) -> Result<()> {
    let dump = open_dump(&args.dump, &args.decode.options())?;
    let query = SettlementQuery {
        number: args.number,
        from: args.from,
        to: args.to,
    };
    let reports: Vec<&SettlementReport> = dump.settlements_matching(query).collect();

    if args.json {
        let json = serde_json::to_string_pretty(&reports)
            .map_err(|source| Error::SerializeJson { source })?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "Number  Made                      Last doc   Fiscal    Void  Changes       Sales total"
    );
    println!(
        "------  ------------------------  --------  -------  ------  -----------  ------------"
    );
    for report in reports.iter() {
        let counters = &report.change_counters;
        println!(
            "{:>6}  {:<24}  {:>8}  {:>7}  {:>6}  {:<11}  {:>12}",
            report.number,
            report.date_time.to_string(),
            report.last_document,
            report.fiscal_count,
            report.void_count,
            format!(
                "{}/{}/{}/{}",
                counters.fm_number_changes,
                counters.tax_id_changes,
                counters.vat_rate_changes,
                counters.ram_resets
            ),
            report.totals.sum.total(),
        );
    }

    println!();
    println!("{} of {} reports", reports.len(), dump.settlements.len());

    Ok(())
}
