//! Delimited output. TSV by default, CSV behind a flag, minimal quoting.

use std::io;

use crate::types::TradeRecord;
use crate::utils::fmt_num;
use crate::winrate::TypeStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Csv,
}

impl OutputFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            OutputFormat::Tsv => b'\t',
            OutputFormat::Csv => b',',
        }
    }
}

const POSITION_HEADER: [&str; 12] = [
    "tradeno", "bot", "sym", "exp", "strat", "postext", "status", "closedate", "qty", "cost",
    "costdesc", "pnl",
];
const FEE_COLUMNS: [&str; 2] = ["fees", "netpnl"];

const WINRATE_HEADER: [&str; 9] = [
    "type",
    "wins",
    "num_trades",
    "avg_daysInTrade",
    "min_trade_date",
    "max_trade_date",
    "avg_PnL",
    "sum_PnL",
    "win_rate",
];

fn writer<W: io::Write>(out: W, format: OutputFormat) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(out)
}

/// Write the closed-position table. `with_fees` appends the fees/netpnl
/// columns; without it the fee-less schema is emitted (columns omitted, not
/// zero-filled).
pub fn write_positions<W: io::Write>(
    out: W,
    format: OutputFormat,
    with_fees: bool,
    records: &[TradeRecord],
) -> anyhow::Result<()> {
    let mut w = writer(out, format);

    let mut header: Vec<&str> = POSITION_HEADER.to_vec();
    if with_fees {
        header.extend(FEE_COLUMNS);
    }
    w.write_record(&header)?;

    for r in records {
        let mut fields = vec![
            r.trade_no.to_string(),
            r.bot.clone(),
            r.symbol.clone(),
            r.expiration.clone(),
            r.strategy.clone(),
            r.position_text.clone(),
            r.status.to_string(),
            r.close_date.clone(),
            fmt_num(r.quantity),
            fmt_num(r.cost),
            r.cost_desc.clone(),
            fmt_num(r.pnl),
        ];
        if with_fees {
            fields.push(format!("{:.2}", r.fees));
            fields.push(format!("{:.2}", r.net_pnl));
        }
        w.write_record(&fields)?;
    }
    w.flush()?;
    Ok(())
}

/// Write the per-type win-rate table.
pub fn write_win_rates<W: io::Write>(
    out: W,
    format: OutputFormat,
    stats: &[TypeStats],
) -> anyhow::Result<()> {
    let mut w = writer(out, format);
    w.write_record(WINRATE_HEADER)?;
    for s in stats {
        w.write_record(&[
            s.kind.clone(),
            s.wins.to_string(),
            s.num_trades.to_string(),
            format!("{:.2}", s.avg_days_in_trade),
            s.min_trade_date.clone(),
            s.max_trade_date.clone(),
            format!("{:.2}", s.avg_pnl),
            format!("{:.2}", s.sum_pnl),
            format!("{:.3}", s.win_rate),
        ])?;
    }
    w.flush()?;
    Ok(())
}
