//! Win-rate / PnL aggregation over an exported trades CSV.

use std::io;

use indexmap::IndexMap;
use serde::Deserialize;

/// One input row. The CSV may carry more columns; these are the ones we use.
#[derive(Debug, Deserialize)]
pub struct TradeRow {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "openDate")]
    pub open_date: String,
    #[serde(rename = "closeDate")]
    pub close_date: String,
    #[serde(rename = "daysInTrade")]
    pub days_in_trade: f64,
    pub pnl: f64,
}

/// Aggregates for one trade type.
#[derive(Debug, Clone)]
pub struct TypeStats {
    pub kind: String,
    pub wins: u32,
    pub num_trades: u32,
    pub avg_days_in_trade: f64,
    /// Earliest openDate, compared as text (dates are already sortable).
    pub min_trade_date: String,
    /// Latest closeDate, compared as text.
    pub max_trade_date: String,
    pub avg_pnl: f64,
    pub sum_pnl: f64,
    /// wins / num_trades.
    pub win_rate: f64,
}

pub fn read_trades(input: impl io::Read) -> anyhow::Result<Vec<TradeRow>> {
    let mut rdr = csv::Reader::from_reader(input);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: TradeRow = result?;
        rows.push(row);
    }
    Ok(rows)
}

/// Group by trade type, preserving first-seen order.
pub fn compute_win_rates(rows: &[TradeRow]) -> Vec<TypeStats> {
    #[derive(Default)]
    struct Acc {
        wins: u32,
        num_trades: u32,
        days_sum: f64,
        min_open: String,
        max_close: String,
        pnl_sum: f64,
    }

    let mut groups: IndexMap<&str, Acc> = IndexMap::new();
    for row in rows {
        let acc = groups.entry(row.kind.as_str()).or_default();
        if row.pnl > 0.0 {
            acc.wins += 1;
        }
        acc.num_trades += 1;
        acc.days_sum += row.days_in_trade;
        acc.pnl_sum += row.pnl;
        if acc.min_open.is_empty() || row.open_date < acc.min_open {
            acc.min_open = row.open_date.clone();
        }
        if acc.max_close.is_empty() || row.close_date > acc.max_close {
            acc.max_close = row.close_date.clone();
        }
    }

    groups
        .into_iter()
        .map(|(kind, acc)| {
            let n = acc.num_trades as f64;
            TypeStats {
                kind: kind.to_string(),
                wins: acc.wins,
                num_trades: acc.num_trades,
                avg_days_in_trade: acc.days_sum / n,
                min_trade_date: acc.min_open,
                max_trade_date: acc.max_close,
                avg_pnl: acc.pnl_sum / n,
                sum_pnl: acc.pnl_sum,
                win_rate: f64::from(acc.wins) / n,
            }
        })
        .collect()
}
