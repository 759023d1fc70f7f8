use crate::daily::DailyPerformance;
use crate::overview::{StreakType, current_streak, ratio_with_sentinel};
use core_types::Trade;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Trading days per year used to annualize daily statistics.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Risk-adjusted statistics over a trade ledger and its daily series.
///
/// Everything here is a dimensionless statistic or a currency magnitude fed
/// straight into further ratios, so the whole struct is `f64` (plus the two
/// extreme trade records). Unlike `OverviewMetrics`, `avg_loss` is reported
/// as a non-negative magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub max_drawdown: f64,
    pub max_drawdown_percent: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
    pub current_streak: usize,
    pub current_streak_type: StreakType,
    pub largest_win: Option<Trade>,
    pub largest_loss: Option<Trade>,
    pub avg_win: f64,
    /// Mean loss magnitude (non-negative).
    pub avg_loss: f64,
    /// Average win over average loss, with the infinity sentinel.
    pub risk_reward_ratio: f64,
    /// Expected PnL per trade: winRate x avgWin - (1 - winRate) x avgLoss.
    pub expectancy: f64,
    /// Kelly criterion as a percentage, clamped to [0, 100].
    pub kelly_percent: f64,
    /// Annualized standard deviation of daily PnL.
    pub volatility: f64,
    /// Historical daily-PnL percentile at 95% confidence (0 for short series).
    pub var95: f64,
    pub var99: f64,
}

impl Default for RiskMetrics {
    fn default() -> Self {
        Self {
            max_drawdown: 0.0,
            max_drawdown_percent: 0.0,
            sharpe_ratio: 0.0,
            sortino_ratio: 0.0,
            calmar_ratio: 0.0,
            max_consecutive_wins: 0,
            max_consecutive_losses: 0,
            current_streak: 0,
            current_streak_type: StreakType::None,
            largest_win: None,
            largest_loss: None,
            avg_win: 0.0,
            avg_loss: 0.0,
            risk_reward_ratio: 0.0,
            expectancy: 0.0,
            kelly_percent: 0.0,
            volatility: 0.0,
            var95: 0.0,
            var99: 0.0,
        }
    }
}

/// Derives the full risk profile from the ledger and its daily series.
///
/// The drawdown replay is deliberately independent of the per-day drawdown
/// the aggregator already computed; the two must agree for any shared input.
pub fn risk_metrics(trades: &[Trade], daily: &[DailyPerformance]) -> RiskMetrics {
    let closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();

    // Drawdown replay: a running peak over cumulative PnL, starting at zero.
    let mut peak = 0.0_f64;
    let mut max_drawdown = 0.0_f64;
    let mut max_drawdown_percent = 0.0_f64;
    for day in daily {
        let cumulative = day.cumulative_pnl.to_f64().unwrap_or(0.0);
        peak = peak.max(cumulative);
        let drawdown = peak - cumulative;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
            max_drawdown_percent = if peak > 0.0 { drawdown / peak * 100.0 } else { 0.0 };
        }
    }

    // Single ascending scan for the longest win and loss runs.
    let mut ascending: Vec<&Trade> = closed.clone();
    ascending.sort_by_key(|t| t.exit_epoch_millis());

    let mut max_consecutive_wins = 0_usize;
    let mut max_consecutive_losses = 0_usize;
    let mut win_run = 0_usize;
    let mut loss_run = 0_usize;
    for trade in &ascending {
        if trade.is_win() {
            win_run += 1;
            loss_run = 0;
            max_consecutive_wins = max_consecutive_wins.max(win_run);
        } else {
            loss_run += 1;
            win_run = 0;
            max_consecutive_losses = max_consecutive_losses.max(loss_run);
        }
    }

    let (streak, streak_type) = current_streak(&closed);

    let wins: Vec<f64> = closed
        .iter()
        .filter(|t| t.is_win())
        .map(|t| t.pnl.to_f64().unwrap_or(0.0))
        .collect();
    let losses: Vec<f64> = closed
        .iter()
        .filter(|t| !t.is_win())
        .map(|t| t.pnl.to_f64().unwrap_or(0.0))
        .collect();

    let avg_win = mean(&wins);
    let avg_loss = mean(&losses).abs();
    let risk_reward_ratio = ratio_with_sentinel(avg_win, avg_loss);

    let win_rate = if closed.is_empty() {
        0.0
    } else {
        wins.len() as f64 / closed.len() as f64
    };
    let expectancy = win_rate * avg_win - (1.0 - win_rate) * avg_loss;

    let kelly_percent = if avg_loss > 0.0 {
        let payoff = avg_win / avg_loss;
        ((win_rate * payoff - (1.0 - win_rate)) / payoff * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    // Daily PnL statistics with sample (n-1) variance, floored at one.
    let returns: Vec<f64> = daily
        .iter()
        .map(|d| d.pnl.to_f64().unwrap_or(0.0))
        .collect();
    let avg_return = mean(&returns);
    let std_dev = (returns
        .iter()
        .map(|r| (r - avg_return).powi(2))
        .sum::<f64>()
        / (returns.len().saturating_sub(1).max(1)) as f64)
        .sqrt();
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    // Downside deviation is measured against a zero target, not the mean.
    let down_dev = (downside.iter().map(|r| r.powi(2)).sum::<f64>()
        / (downside.len().saturating_sub(1).max(1)) as f64)
        .sqrt();

    let annualized_return = avg_return * TRADING_DAYS_PER_YEAR;
    let annualized_std_dev = std_dev * TRADING_DAYS_PER_YEAR.sqrt();
    let annualized_down_dev = down_dev * TRADING_DAYS_PER_YEAR.sqrt();

    let sharpe_ratio = safe_div(annualized_return, annualized_std_dev);
    let sortino_ratio = safe_div(annualized_return, annualized_down_dev);
    let calmar_ratio = safe_div(annualized_return, max_drawdown);

    // Historical VaR: floor-index percentile of the sorted daily PnL series.
    // Out-of-range indices on short series degrade to zero rather than panic.
    let mut sorted_returns = returns.clone();
    sorted_returns.sort_by(|a, b| a.total_cmp(b));
    let var_at = |fraction: f64| -> f64 {
        let index = (sorted_returns.len() as f64 * fraction).floor() as usize;
        sorted_returns.get(index).copied().unwrap_or(0.0)
    };

    let largest_win = closed
        .iter()
        .max_by(|a, b| a.pnl.cmp(&b.pnl))
        .filter(|t| t.is_win())
        .map(|t| (*t).clone());
    let largest_loss = closed
        .iter()
        .min_by(|a, b| a.pnl.cmp(&b.pnl))
        .filter(|t| t.pnl < rust_decimal::Decimal::ZERO)
        .map(|t| (*t).clone());

    RiskMetrics {
        max_drawdown,
        max_drawdown_percent,
        sharpe_ratio,
        sortino_ratio,
        calmar_ratio,
        max_consecutive_wins,
        max_consecutive_losses,
        current_streak: streak,
        current_streak_type: streak_type,
        largest_win,
        largest_loss,
        avg_win,
        avg_loss,
        risk_reward_ratio,
        expectancy,
        kelly_percent,
        volatility: annualized_std_dev,
        var95: var_at(0.05),
        var99: var_at(0.01),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 { numerator / denominator } else { 0.0 }
}
