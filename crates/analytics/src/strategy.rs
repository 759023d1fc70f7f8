use crate::equity::INITIAL_CAPITAL;
use crate::overview::ratio_with_sentinel;
use chrono::NaiveDate;
use core_types::Trade;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The default strategy universe used when trades carry no better label.
pub const DEFAULT_STRATEGIES: [&str; 4] =
    ["Momentum", "Mean Reversion", "Breakout", "Scalping"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    Active,
    Paused,
    Inactive,
}

/// Aggregated performance of one trading strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPerformance {
    pub name: String,
    pub trades: usize,
    pub win_rate: f64,
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub sharpe_ratio: f64,
    /// Worst single day's PnL (capped at zero), not a peak-to-trough figure.
    pub max_drawdown: f64,
    pub profit_factor: f64,
    pub avg_duration: f64,
    pub return_pct: f64,
    pub current_nav: Decimal,
    pub status: StrategyStatus,
}

/// Assigns closed trades to strategies.
///
/// `index` is the trade's position within the closed-trade list, which lets
/// stateless classifiers distribute trades without inspecting them.
pub trait StrategyClassifier {
    /// The full strategy universe, in display order.
    fn strategies(&self) -> Vec<String>;

    /// Names the strategy a closed trade belongs to.
    fn classify(&self, index: usize, trade: &Trade) -> String;
}

/// Distributes trades across the default universe by position. This is a
/// placeholder attribution for ledgers without strategy labels, not a
/// genuine classification.
#[derive(Debug, Default)]
pub struct RoundRobinClassifier;

impl StrategyClassifier for RoundRobinClassifier {
    fn strategies(&self) -> Vec<String> {
        DEFAULT_STRATEGIES.iter().map(|s| s.to_string()).collect()
    }

    fn classify(&self, index: usize, _trade: &Trade) -> String {
        DEFAULT_STRATEGIES[index % DEFAULT_STRATEGIES.len()].to_string()
    }
}

/// Uses the trade's own strategy label, falling back to round-robin for
/// unlabeled trades.
#[derive(Debug, Default)]
pub struct LabelClassifier;

impl StrategyClassifier for LabelClassifier {
    fn strategies(&self) -> Vec<String> {
        DEFAULT_STRATEGIES.iter().map(|s| s.to_string()).collect()
    }

    fn classify(&self, index: usize, trade: &Trade) -> String {
        trade
            .strategy
            .clone()
            .unwrap_or_else(|| RoundRobinClassifier.classify(index, trade))
    }
}

/// Breaks the ledger down per strategy as assigned by the classifier.
///
/// Every strategy in the universe is reported, zeroed when it has no trades.
/// Return and NAV figures are quoted against the shared 10,000 base.
pub fn strategy_performance(
    trades: &[Trade],
    classifier: &dyn StrategyClassifier,
) -> Vec<StrategyPerformance> {
    let closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();

    classifier
        .strategies()
        .into_iter()
        .map(|name| {
            let group: Vec<&Trade> = closed
                .iter()
                .enumerate()
                .filter(|(i, t)| classifier.classify(*i, t) == name)
                .map(|(_, t)| *t)
                .collect();
            if group.is_empty() {
                return StrategyPerformance {
                    name,
                    trades: 0,
                    win_rate: 0.0,
                    total_pnl: Decimal::ZERO,
                    avg_pnl: Decimal::ZERO,
                    sharpe_ratio: 0.0,
                    max_drawdown: 0.0,
                    profit_factor: 0.0,
                    avg_duration: 0.0,
                    return_pct: 0.0,
                    current_nav: INITIAL_CAPITAL,
                    status: StrategyStatus::Active,
                };
            }

            let wins = group.iter().filter(|t| t.is_win()).count();
            let total_pnl: Decimal = group.iter().map(|t| t.pnl).sum();
            let gross_profit: Decimal =
                group.iter().filter(|t| t.is_win()).map(|t| t.pnl).sum();
            let gross_loss: Decimal = group
                .iter()
                .filter(|t| !t.is_win())
                .map(|t| t.pnl)
                .sum::<Decimal>()
                .abs();

            let durations: Vec<f64> =
                group.iter().filter_map(|t| t.duration_minutes()).collect();

            // Per-entry-date PnL drives the per-strategy Sharpe.
            let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
            for trade in &group {
                *daily.entry(trade.entry_time.date_naive()).or_insert(0.0) +=
                    trade.pnl.to_f64().unwrap_or(0.0);
            }
            let daily_pnls: Vec<f64> = daily.into_values().collect();
            let mean = daily_pnls.iter().sum::<f64>() / daily_pnls.len() as f64;
            let std = if daily_pnls.len() > 1 {
                (daily_pnls
                    .iter()
                    .map(|v| (v - mean).powi(2))
                    .sum::<f64>()
                    / (daily_pnls.len() - 1) as f64)
                    .sqrt()
            } else {
                0.0
            };

            StrategyPerformance {
                name,
                trades: group.len(),
                win_rate: wins as f64 / group.len() as f64 * 100.0,
                total_pnl,
                avg_pnl: total_pnl / Decimal::from(group.len()),
                sharpe_ratio: if std > 0.0 {
                    mean / std * 252.0_f64.sqrt()
                } else {
                    0.0
                },
                max_drawdown: daily_pnls.iter().copied().fold(0.0, f64::min),
                profit_factor: ratio_with_sentinel(
                    gross_profit.to_f64().unwrap_or(0.0),
                    gross_loss.to_f64().unwrap_or(0.0),
                ),
                avg_duration: if durations.is_empty() {
                    0.0
                } else {
                    durations.iter().sum::<f64>() / durations.len() as f64
                },
                return_pct: (total_pnl / INITIAL_CAPITAL).to_f64().unwrap_or(0.0)
                    * 100.0,
                current_nav: INITIAL_CAPITAL + total_pnl,
                status: StrategyStatus::Active,
            }
        })
        .collect()
}
