//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// OptionAlpha bot tooling: scrape closed positions from a saved positions
/// page, and compute win-rate stats from a trades CSV
#[derive(Parser, Debug)]
#[command(name = "oa-positions", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse the closed positions found on a saved bot positions page
    Positions(PositionsArgs),
    /// Compute per-type win-rate stats from a trades CSV
    Winrate(WinrateArgs),
}

#[derive(Args, Debug)]
pub struct PositionsArgs {
    /// HTML file saved from the OA bot positions page
    pub file: PathBuf,

    /// Output CSV instead of the default TSV (tab-separated values)
    #[arg(long)]
    pub csv: bool,

    /// Per-contract fee in cents; non-zero adds the fees/netpnl columns
    #[arg(long, default_value_t = 0.0)]
    pub fee_cents: f64,

    /// Emit Canceled rows as zero-PnL records instead of skipping them
    #[arg(long)]
    pub include_canceled: bool,

    /// Coerce empty/unparseable values to zero instead of aborting
    #[arg(long)]
    pub lenient: bool,

    /// YAML file with default parse options (explicit flags override it)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct WinrateArgs {
    /// Trades CSV with at least type,openDate,closeDate,daysInTrade,pnl
    pub file: PathBuf,

    /// Output CSV instead of the default TSV (tab-separated values)
    #[arg(long)]
    pub csv: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positions_defaults() {
        let cli = Cli::parse_from(["oa-positions", "positions", "page.html"]);
        let Command::Positions(args) = cli.command else {
            panic!("expected positions subcommand");
        };
        assert!(!args.csv);
        assert_eq!(args.fee_cents, 0.0);
        assert!(!args.include_canceled);
        assert!(!args.lenient);
        assert!(args.config.is_none());
    }

    #[test]
    fn positions_flags() {
        let cli = Cli::parse_from([
            "oa-positions",
            "positions",
            "--csv",
            "--fee-cents",
            "45",
            "--include-canceled",
            "page.html",
        ]);
        let Command::Positions(args) = cli.command else {
            panic!("expected positions subcommand");
        };
        assert!(args.csv);
        assert_eq!(args.fee_cents, 45.0);
        assert!(args.include_canceled);
    }
}
