//! Premium sweep.
//!
//! Re-evaluates a base scenario once per premium percentage so bids can be
//! compared side by side.

use tracing::info;

use super::AuctionCalculator;
use crate::types::{AuctionScenario, SweepRow};

/// Premiums compared when the caller does not supply a list.
pub const DEFAULT_PREMIUMS: &[f64] = &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];

impl AuctionCalculator {
    /// Evaluate `base` once per premium.
    ///
    /// Output order matches `premiums`; duplicates are kept.
    pub fn sweep(&self, base: &AuctionScenario, premiums: &[f64]) -> Vec<SweepRow> {
        let rows: Vec<SweepRow> = premiums
            .iter()
            .map(|&premium_percent| SweepRow {
                premium_percent,
                result: self.evaluate(&base.with_premium(premium_percent)),
            })
            .collect();

        let best = rows
            .iter()
            .max_by(|a, b| {
                a.result
                    .return_percent
                    .partial_cmp(&b.result.return_percent)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|row| row.premium_percent);

        info!(
            premiums = rows.len(),
            best_premium = ?best,
            "Premium sweep complete"
        );

        rows
    }
}

/// Sweep with the standard rates. A missing list uses [`DEFAULT_PREMIUMS`];
/// a supplied list is used as given, even when empty.
pub fn sweep(base: &AuctionScenario, premiums: Option<&[f64]>) -> Vec<SweepRow> {
    let premiums = premiums.unwrap_or(DEFAULT_PREMIUMS);
    AuctionCalculator::default().sweep(base, premiums)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
