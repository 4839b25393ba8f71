//! Per-run parse policy, optionally loaded from a YAML file.

use serde::Deserialize;
use std::{fs, path::Path};

/// Extraction policy knobs. The historical scripts hard-coded each of these
/// in a separate near-identical variant; here they are one options struct
/// that the CLI (or a YAML file) fills in.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Emit Canceled rows as zero-PnL records instead of skipping them.
    pub include_canceled: bool,
    /// Coerce empty/unparseable values to zero instead of aborting.
    pub lenient: bool,
    /// Per-contract fee in cents; 0 disables the fee/netpnl columns.
    pub fee_cents: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            include_canceled: false,
            lenient: false,
            fee_cents: 0.0,
        }
    }
}

impl ParseOptions {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let s = fs::read_to_string(path)?;
        let opts: Self = serde_yaml::from_str(&s)?;
        Ok(opts)
    }

    /// Fee in currency units per contract.
    pub fn fee_per_contract(&self) -> f64 {
        self.fee_cents / 100.0
    }

    pub fn fees_enabled(&self) -> bool {
        self.fee_cents != 0.0
    }
}
