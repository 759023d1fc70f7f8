use chrono::NaiveDate;
use core_types::Trade;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Pearson correlation between the daily PnL series of two symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPair {
    pub symbol_a: String,
    pub symbol_b: String,
    pub correlation: f64,
}

/// Minimum number of overlapping trading dates before a correlation is
/// considered meaningful; sparser pairs report exactly zero.
const MIN_COMMON_DATES: usize = 3;

/// Computes the upper triangle (including the diagonal) of the symbol
/// correlation matrix.
///
/// Each symbol's closed trades are summed into a per-entry-date PnL series;
/// Pearson correlation is taken over the dates both symbols traded. Pairs
/// with fewer than three common dates default to zero rather than a noisy
/// estimate; a symbol's correlation with itself is always exactly 1.
pub fn correlations(trades: &[Trade]) -> Vec<CorrelationPair> {
    let closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();

    // Symbols in first-appearance order, so the output is deterministic.
    let mut symbols: Vec<&str> = Vec::new();
    let mut daily_pnl: HashMap<&str, BTreeMap<NaiveDate, f64>> = HashMap::new();
    for trade in &closed {
        let symbol = trade.symbol.as_str();
        if !daily_pnl.contains_key(symbol) {
            symbols.push(symbol);
        }
        *daily_pnl
            .entry(symbol)
            .or_default()
            .entry(trade.entry_time.date_naive())
            .or_insert(0.0) += trade.pnl.to_f64().unwrap_or(0.0);
    }

    let mut pairs = Vec::with_capacity(symbols.len() * (symbols.len() + 1) / 2);
    for (i, symbol_a) in symbols.iter().enumerate() {
        for symbol_b in symbols.iter().skip(i) {
            let correlation = if symbol_a == symbol_b {
                1.0
            } else {
                pearson(&daily_pnl[symbol_a], &daily_pnl[symbol_b])
            };
            pairs.push(CorrelationPair {
                symbol_a: symbol_a.to_string(),
                symbol_b: symbol_b.to_string(),
                correlation,
            });
        }
    }
    pairs
}

fn pearson(a: &BTreeMap<NaiveDate, f64>, b: &BTreeMap<NaiveDate, f64>) -> f64 {
    let common: Vec<(f64, f64)> = a
        .iter()
        .filter_map(|(date, pnl_a)| b.get(date).map(|pnl_b| (*pnl_a, *pnl_b)))
        .collect();
    if common.len() < MIN_COMMON_DATES {
        return 0.0;
    }

    let n = common.len() as f64;
    let mean_a = common.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = common.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &common {
        let dx = x - mean_a;
        let dy = y - mean_b;
        numerator += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denominator = (var_a * var_b).sqrt();
    if denominator > 0.0 { numerator / denominator } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{base_time, closed_trade};
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn symbol_trade(id: usize, symbol: &str, day: i64, pnl: i64) -> Trade {
        let mut t = closed_trade(id, Decimal::from(pnl));
        t.symbol = symbol.to_string();
        t.entry_time = base_time() + Duration::days(day);
        t.exit_time = Some(t.entry_time + Duration::hours(1));
        t
    }

    fn find(pairs: &[CorrelationPair], a: &str, b: &str) -> f64 {
        pairs
            .iter()
            .find(|p| p.symbol_a == a && p.symbol_b == b)
            .map(|p| p.correlation)
            .unwrap_or(f64::NAN)
    }

    #[test]
    fn self_correlation_is_exactly_one() {
        let trades = vec![symbol_trade(0, "SOL/USDC", 0, 10)];
        let pairs = correlations(&trades);
        assert_eq!(pairs.len(), 1);
        assert_eq!(find(&pairs, "SOL/USDC", "SOL/USDC"), 1.0);
    }

    #[test]
    fn sparse_overlap_defaults_to_zero() {
        let trades = vec![
            symbol_trade(0, "A", 0, 10),
            symbol_trade(1, "A", 1, 20),
            symbol_trade(2, "B", 0, 5),
            symbol_trade(3, "B", 1, -5),
        ];
        // Only two common dates: below the threshold.
        let pairs = correlations(&trades);
        assert_eq!(find(&pairs, "A", "B"), 0.0);
    }

    #[test]
    fn perfectly_aligned_series_correlate_fully() {
        let mut trades = Vec::new();
        for (day, pnl) in [(0, 10), (1, 20), (2, 30)] {
            trades.push(symbol_trade(trades.len(), "A", day, pnl));
            trades.push(symbol_trade(trades.len(), "B", day, pnl * 2));
        }
        let pairs = correlations(&trades);
        assert!((find(&pairs, "A", "B") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_series_correlate_negatively() {
        let mut trades = Vec::new();
        for (day, pnl) in [(0, 10), (1, 20), (2, 30)] {
            trades.push(symbol_trade(trades.len(), "A", day, pnl));
            trades.push(symbol_trade(trades.len(), "B", day, -pnl));
        }
        let pairs = correlations(&trades);
        assert!((find(&pairs, "A", "B") + 1.0).abs() < 1e-9);
    }

    #[test]
    fn matrix_is_upper_triangular_and_in_range() {
        let mut trades = Vec::new();
        for day in 0..5 {
            trades.push(symbol_trade(trades.len(), "A", day, day * 3 - 5));
            trades.push(symbol_trade(trades.len(), "B", day, 7 - day * 2));
            trades.push(symbol_trade(trades.len(), "C", day, (day % 2) * 10 - 4));
        }
        let pairs = correlations(&trades);

        // Three symbols: 3 self-pairs + 3 cross-pairs.
        assert_eq!(pairs.len(), 6);
        for pair in &pairs {
            assert!(pair.correlation >= -1.0 - 1e-9 && pair.correlation <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn same_day_trades_sum_before_correlating() {
        let mut trades = Vec::new();
        for day in 0..3 {
            // Two half-size trades for A should equal one full-size trade.
            trades.push(symbol_trade(trades.len(), "A", day, day * 5));
            trades.push(symbol_trade(trades.len(), "A", day, day * 5));
            trades.push(symbol_trade(trades.len(), "B", day, day * 10));
        }
        let pairs = correlations(&trades);
        assert!((find(&pairs, "A", "B") - 1.0).abs() < 1e-9);
    }
}
