use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use mediasort_core::Granularity;

#[derive(Parser)]
#[command(name = "mediasort-rs", version, about = "Sort media files into date-based folders")]
struct Cli {
    /// Folder to take files from
    #[arg(short, long, alias = "source", default_value = ".")]
    input: PathBuf,

    /// Move everything into this folder; omit to sort each folder into itself
    #[arg(short, long, alias = "target")]
    output: Option<PathBuf>,

    /// Also sort subfolders, up to LEVEL deep (0 = no limit)
    #[arg(short, long, alias = "recursionlevel", value_name = "LEVEL")]
    recursive: Option<u32>,

    /// Group files by "yearly", "monthly" or "daily" folders
    #[arg(short, long, default_value = "monthly", value_parser = parse_group)]
    groupby: Granularity,

    /// Only log what would be moved, without touching anything
    #[arg(short, long)]
    simulate: bool,

    /// Log verbosity: "error", "warn", "info" or "debug"
    #[arg(short, long, default_value = "info", value_parser = parse_level)]
    loglevel: Level,
}

fn parse_group(name: &str) -> Result<Granularity, String> {
    Granularity::from_name(name)
        .ok_or_else(|| format!("unknown group {:?} (use yearly, monthly or daily)", name))
}

fn parse_level(name: &str) -> Result<Level, String> {
    name.parse()
        .map_err(|_| format!("unknown log level {:?}", name))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.loglevel)
        .with_target(false)
        .init();

    let options = mediasort_core::SortOptions {
        source: cli.input,
        target: cli.output,
        recurse: cli.recursive,
        group: cli.groupby,
        simulate: cli.simulate,
    };
    let report = mediasort_core::run(&options)?;

    let note = if cli.simulate { " (simulation)" } else { "" };
    eprintln!(
        "Done! {} file(s) moved, {} skipped, {} failed{}",
        report.moved, report.skipped, report.failed, note
    );
    Ok(())
}
