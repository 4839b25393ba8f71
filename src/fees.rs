//! Estimated commissions for option positions.
//!
//! The model is deliberately rough: a Closed position pays both an opening
//! and a closing transaction, an Expired one only the opening side, and
//! equity strategies pay nothing. Good enough to net commissions out of the
//! PnL column, not a precise broker statement.

use crate::types::PositionStatus;

/// Number of option legs implied by a strategy label. Precedence matters:
/// "Iron Condor Spread" style labels should still count as a spread first.
pub fn strategy_multiplier(strategy: &str) -> u32 {
    if strategy.contains("Spread") {
        2
    } else if strategy.contains("Iron") {
        4
    } else if strategy.contains("Long Call") || strategy.contains("Long Put") {
        1
    } else {
        // single-leg equity/stock or unrecognized strategy pays no fee
        0
    }
}

/// Estimated fees for one position, negative or zero.
pub fn estimate_fees(
    strategy: &str,
    status: &PositionStatus,
    quantity: f64,
    fee_per_contract: f64,
) -> f64 {
    if quantity == 0.0 || fee_per_contract == 0.0 {
        return 0.0;
    }
    let legs = strategy_multiplier(strategy) as f64;
    let mut fee = -1.0 * quantity * legs * fee_per_contract;
    if status.is_closed() {
        // open + close; expirations only ever paid the opening side
        fee *= 2.0;
    }
    fee
}
