use std::path::PathBuf;

use chrono::{DateTime, Utc};
use fm_format::DecodeOptions;
use structopt::clap::AppSettings::*;
use structopt::StructOpt;

use crate::util::{parse_instant, parse_number_range, parse_range_end, parse_range_start};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fm",
    about = "Inspect, validate and rebuild fiscal memory dumps.",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands],
)]
pub struct Cli {
    #[structopt(short, long, help = "Show verbose output", global = true)]
    pub verbose: bool,

    #[structopt(subcommand)]
    pub command: Commands,
}

#[derive(Debug, StructOpt)]
pub enum Commands {
    #[structopt(name = "info", visible_alias = "i", about = "Show a summary of a dump")]
    Info(InfoArgs),

    #[structopt(
        name = "list",
        visible_aliases = &["l", "ls"],
        about = "List settlement reports of a dump"
    )]
    List(ListArgs),

    #[structopt(
        name = "validate",
        visible_aliases = &["t", "test"],
        about = "Check record checksums and dates"
    )]
    Validate(ValidateArgs),

    #[structopt(name = "export", visible_alias = "x", about = "Export a dump as JSON")]
    Export(ExportArgs),

    #[structopt(name = "import", visible_alias = "c", about = "Build a dump image from JSON")]
    Import(ImportArgs),

    #[structopt(name = "rebuild", about = "Decode and re-encode a dump image")]
    Rebuild(RebuildArgs),

    #[structopt(
        name = "remove",
        visible_alias = "rm",
        about = "Remove a range of settlement reports and renumber the rest"
    )]
    Remove(RemoveArgs),
}

/// Flags shared by every command that decodes an image.
#[derive(Debug, StructOpt)]
pub struct DecodeArgs {
    #[structopt(long, help = "Do not verify record checksums")]
    pub no_checksum: bool,

    #[structopt(long, help = "Do not report records dated in the future")]
    pub no_future_check: bool,

    #[structopt(
        long,
        parse(try_from_str = parse_instant),
        help = "Reference time for the future date check [RFC 3339, default: now]"
    )]
    pub now: Option<DateTime<Utc>>,
}

impl DecodeArgs {
    pub fn options(&self) -> DecodeOptions {
        DecodeOptions {
            now: self.now,
            verify_checksums: !self.no_checksum,
            check_future_dates: !self.no_future_check,
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct InfoArgs {
    #[structopt(name = "dump", parse(from_os_str), help = "Path to the dump file")]
    pub dump: PathBuf,

    #[structopt(flatten)]
    pub decode: DecodeArgs,
}

#[derive(Debug, StructOpt)]
pub struct ListArgs {
    #[structopt(name = "dump", parse(from_os_str), help = "Path to the dump file")]
    pub dump: PathBuf,

    #[structopt(
        long,
        parse(try_from_str = parse_range_start),
        help = "Only reports made at or after this time [YYYY-MM-DD or RFC 3339]"
    )]
    pub from: Option<DateTime<Utc>>,

    #[structopt(
        long,
        parse(try_from_str = parse_range_end),
        help = "Only reports made at or before this time [YYYY-MM-DD or RFC 3339]"
    )]
    pub to: Option<DateTime<Utc>>,

    #[structopt(short, long, help = "Only the report with this number")]
    pub number: Option<u16>,

    #[structopt(long, help = "Print the reports as JSON")]
    pub json: bool,

    #[structopt(flatten)]
    pub decode: DecodeArgs,
}

#[derive(Debug, StructOpt)]
pub struct ValidateArgs {
    #[structopt(name = "dump", parse(from_os_str), help = "Path to the dump file")]
    pub dump: PathBuf,

    #[structopt(short, long, help = "Only print the summary line")]
    pub quiet: bool,

    #[structopt(flatten)]
    pub decode: DecodeArgs,
}

#[derive(Debug, StructOpt)]
pub struct ExportArgs {
    #[structopt(name = "dump", parse(from_os_str), help = "Path to the dump file")]
    pub dump: PathBuf,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "Write JSON to this file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[structopt(short, long, help = "Overwrite the output file if it exists")]
    pub force: bool,

    #[structopt(flatten)]
    pub decode: DecodeArgs,
}

#[derive(Debug, StructOpt)]
pub struct ImportArgs {
    #[structopt(name = "json", parse(from_os_str), help = "Path to the JSON dump")]
    pub json: PathBuf,

    #[structopt(short, long, parse(from_os_str), help = "Path of the image to write")]
    pub output: PathBuf,

    #[structopt(short, long, help = "Overwrite the output file if it exists")]
    pub force: bool,

    #[structopt(
        short,
        long,
        help = "Append the settlement reports to the existing output image and renumber them"
    )]
    pub append: bool,

    #[structopt(flatten)]
    pub decode: DecodeArgs,
}

#[derive(Debug, StructOpt)]
pub struct RebuildArgs {
    #[structopt(name = "dump", parse(from_os_str), help = "Path to the dump file")]
    pub dump: PathBuf,

    #[structopt(short, long, parse(from_os_str), help = "Path of the image to write")]
    pub output: PathBuf,

    #[structopt(short, long, help = "Overwrite the output file if it exists")]
    pub force: bool,

    #[structopt(flatten)]
    pub decode: DecodeArgs,
}

#[derive(Debug, StructOpt)]
pub struct RemoveArgs {
    #[structopt(name = "dump", parse(from_os_str), help = "Path to the dump file")]
    pub dump: PathBuf,

    #[structopt(
        short,
        long,
        parse(try_from_str = parse_number_range),
        help = "Report numbers to remove [N or FIRST..LAST, inclusive]"
    )]
    pub range: (u16, u16),

    #[structopt(short, long, parse(from_os_str), help = "Path of the image to write")]
    pub output: PathBuf,

    #[structopt(short, long, help = "Overwrite the output file if it exists")]
    pub force: bool,

    #[structopt(flatten)]
    pub decode: DecodeArgs,
}
