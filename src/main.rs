//! Entry point. Wires CLI args -> parse options -> extractor/aggregator -> writer.

mod cli;
mod config;
mod extract;
mod fees;
mod output;
mod types;
mod utils;
mod winrate;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, PositionsArgs, WinrateArgs};
use crate::config::ParseOptions;
use crate::extract::PositionExtractor;
use crate::output::OutputFormat;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the data rows.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Positions(args) => run_positions(args),
        Command::Winrate(args) => run_winrate(args),
    }
}

fn output_format(csv: bool) -> OutputFormat {
    if csv {
        OutputFormat::Csv
    } else {
        OutputFormat::Tsv
    }
}

fn run_positions(args: PositionsArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => ParseOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => ParseOptions::default(),
    };
    if args.include_canceled {
        opts.include_canceled = true;
    }
    if args.lenient {
        opts.lenient = true;
    }
    if args.fee_cents != 0.0 {
        opts.fee_cents = args.fee_cents;
    }

    let html = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let with_fees = opts.fees_enabled();
    let records = PositionExtractor::new(opts).extract(&html)?;
    info!(
        "extracted {} closed positions from {}",
        records.len(),
        args.file.display()
    );

    output::write_positions(
        std::io::stdout().lock(),
        output_format(args.csv),
        with_fees,
        &records,
    )
}

fn run_winrate(args: WinrateArgs) -> anyhow::Result<()> {
    let file = std::fs::File::open(&args.file)
        .with_context(|| format!("opening {}", args.file.display()))?;
    let rows = winrate::read_trades(file)
        .with_context(|| format!("reading trades from {}", args.file.display()))?;
    let stats = winrate::compute_win_rates(&rows);
    info!("aggregated {} trades into {} types", rows.len(), stats.len());

    output::write_win_rates(std::io::stdout().lock(), output_format(args.csv), &stats)
}
