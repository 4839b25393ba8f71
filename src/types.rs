//! Core types for extracted closed positions.

use std::fmt;

/// Position status as shown in the closeDate column.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionStatus {
    Closed,
    Expired,
    Canceled,
    /// Anything the page shows that we do not recognize; raw label kept.
    Other(String),
}

impl PositionStatus {
    /// Classify a raw status label by substring, the way the page words it.
    pub fn classify(label: &str) -> Self {
        let t = label.trim();
        if t.contains("Cancel") {
            PositionStatus::Canceled
        } else if t.contains("Expired") {
            PositionStatus::Expired
        } else if t.contains("Closed") {
            PositionStatus::Closed
        } else {
            PositionStatus::Other(t.to_string())
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, PositionStatus::Closed)
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, PositionStatus::Canceled)
    }
}

impl fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionStatus::Closed => f.write_str("Closed"),
            PositionStatus::Expired => f.write_str("Expired"),
            PositionStatus::Canceled => f.write_str("Canceled"),
            PositionStatus::Other(s) => f.write_str(s),
        }
    }
}

/// One closed/expired/canceled position row, cleaned and numbered.
#[derive(Debug, Clone)]
pub struct TradeRecord {
    /// 1-based, gapless over accepted rows, in document order.
    pub trade_no: u32,
    /// Bot display name; empty when the page heading is missing.
    pub bot: String,
    pub symbol: String,
    pub expiration: String,
    pub strategy: String,
    pub position_text: String,
    pub status: PositionStatus,
    pub close_date: String,
    pub quantity: f64,
    pub cost: f64,
    pub cost_desc: String,
    pub pnl: f64,
    /// Estimated commissions, negative or zero. 0 when the fee model is off.
    pub fees: f64,
    /// pnl + fees.
    pub net_pnl: f64,
}
