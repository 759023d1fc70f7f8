use core_types::Trade;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One equal-width bin of the closed-trade PnL histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnBucket {
    /// Display label: the bin's lower bound as whole currency units.
    pub range: String,
    pub count: usize,
    pub percentage: f64,
    pub midpoint: f64,
}

/// Buckets closed-trade PnL into 8-20 equal-width bins.
///
/// The bin count grows with the square root of the sample size, clamped to
/// [8, 20]. Every bin is half-open on its upper bound except the last, which
/// is inclusive on both ends so the maximum lands inside the histogram.
pub fn return_distribution(trades: &[Trade]) -> Vec<ReturnBucket> {
    let pnls: Vec<f64> = trades
        .iter()
        .filter(|t| t.is_closed())
        .map(|t| t.pnl.to_f64().unwrap_or(0.0))
        .collect();
    if pnls.is_empty() {
        return Vec::new();
    }

    let min = pnls.iter().copied().fold(f64::INFINITY, f64::min);
    let max = pnls.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bucket_count = ((pnls.len() as f64).sqrt().ceil() as usize).clamp(8, 20);
    let bucket_size = (max - min) / bucket_count as f64;

    (0..bucket_count)
        .map(|i| {
            let low = min + i as f64 * bucket_size;
            let high = min + (i + 1) as f64 * bucket_size;
            let last = i == bucket_count - 1;
            let count = pnls
                .iter()
                .filter(|p| **p >= low && if last { **p <= high } else { **p < high })
                .count();
            ReturnBucket {
                range: format!("${low:.0}"),
                count,
                percentage: count as f64 / pnls.len() as f64 * 100.0,
                midpoint: (low + high) / 2.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::closed_trade;
    use rust_decimal::Decimal;

    fn ledger(pnls: &[i64]) -> Vec<Trade> {
        pnls.iter()
            .enumerate()
            .map(|(i, p)| closed_trade(i, Decimal::from(*p)))
            .collect()
    }

    #[test]
    fn empty_ledger_has_no_buckets() {
        assert!(return_distribution(&[]).is_empty());
    }

    #[test]
    fn bucket_counts_cover_every_trade() {
        let trades = ledger(&[-100, -50, -10, 0, 5, 10, 20, 40, 80, 160]);
        let buckets = return_distribution(&trades);

        assert_eq!(buckets.len(), 8); // ceil(sqrt(10)) = 4, clamped up to 8
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, trades.len());

        let pct: f64 = buckets.iter().map(|b| b.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn maximum_lands_in_the_last_bucket() {
        let trades = ledger(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let buckets = return_distribution(&trades);
        assert_eq!(buckets.last().map(|b| b.count), Some(1));
    }

    #[test]
    fn identical_pnls_collapse_into_the_last_bucket() {
        let trades = ledger(&[42; 9]);
        let buckets = return_distribution(&trades);

        // Zero range means zero-width bins; only the double-inclusive last
        // bucket can match.
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 9);
        assert_eq!(buckets.last().map(|b| b.count), Some(9));
    }

    #[test]
    fn bucket_count_clamps_at_twenty() {
        let pnls: Vec<i64> = (0..500).collect();
        let trades = ledger(&pnls);
        assert_eq!(return_distribution(&trades).len(), 20);
    }

    #[test]
    fn range_label_is_the_rounded_lower_bound() {
        let trades = ledger(&[-100, 60]);
        let buckets = return_distribution(&trades);
        assert_eq!(buckets[0].range, "$-100");
        assert!((buckets[0].midpoint - (-90.0)).abs() < 1e-9);
    }
}
