use chrono::{DateTime, Datelike, Duration, Utc};
use core_types::{Trade, TradeSide};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// The direction of a run of consecutive same-outcome trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    Win,
    Loss,
    None,
}

/// Headline summary of a trade ledger.
///
/// Monetary fields stay in `Decimal`; rates and ratios are `f64`. `avg_loss`
/// keeps its sign here (it is a mean over loss PnL), whereas `RiskMetrics`
/// reports the loss magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    pub total_pnl: Decimal,
    /// Total PnL over total entry notional, in percent.
    pub total_pnl_percent: f64,
    pub total_trades: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub total_volume: Decimal,
    pub total_fees: Decimal,
    /// Mean holding period in minutes over trades with an exit timestamp.
    pub avg_trade_duration: f64,
    pub avg_win: Decimal,
    pub avg_loss: Decimal,
    /// Gross profit over gross loss; `f64::INFINITY` when there are profits
    /// but no losses, 0 when there is nothing on either side.
    pub profit_factor: f64,
    pub long_short_ratio: f64,
    pub long_count: usize,
    pub short_count: usize,
    pub current_streak: usize,
    pub current_streak_type: StreakType,
    pub today_pnl: Decimal,
    pub week_pnl: Decimal,
    pub month_pnl: Decimal,
}

impl OverviewMetrics {
    fn zeroed() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            total_pnl_percent: 0.0,
            total_trades: 0,
            win_rate: 0.0,
            loss_rate: 0.0,
            total_volume: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            avg_trade_duration: 0.0,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            profit_factor: 0.0,
            long_short_ratio: 0.0,
            long_count: 0,
            short_count: 0,
            current_streak: 0,
            current_streak_type: StreakType::None,
            today_pnl: Decimal::ZERO,
            week_pnl: Decimal::ZERO,
            month_pnl: Decimal::ZERO,
        }
    }
}

/// Gross profit / gross loss with the documented sentinel: infinity when the
/// loss side is empty but profits exist, zero when both sides are empty.
pub(crate) fn ratio_with_sentinel(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else if numerator > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Computes the current streak over closed trades sorted descending by exit
/// time (missing exits sort as the epoch, i.e. last). The streak type is the
/// outcome of the most recent trade; the length counts consecutive matches.
pub(crate) fn current_streak(closed: &[&Trade]) -> (usize, StreakType) {
    let mut sorted: Vec<&Trade> = closed.to_vec();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.exit_epoch_millis()));

    let Some(first) = sorted.first() else {
        return (0, StreakType::None);
    };

    let streak_type = if first.is_win() {
        StreakType::Win
    } else {
        StreakType::Loss
    };
    let streak = sorted
        .iter()
        .take_while(|t| {
            (streak_type == StreakType::Win) == t.is_win()
        })
        .count();
    (streak, streak_type)
}

/// Calculates the overview metrics against the current wall clock.
pub fn overview(trades: &[Trade]) -> OverviewMetrics {
    overview_at(trades, Utc::now())
}

/// Calculates the overview metrics with an explicit `now`, so the calendar
/// period sums (today/week/month) are reproducible in tests.
pub fn overview_at(trades: &[Trade], now: DateTime<Utc>) -> OverviewMetrics {
    let closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();
    if closed.is_empty() {
        return OverviewMetrics::zeroed();
    }

    let winning: Vec<&&Trade> = closed.iter().filter(|t| t.is_win()).collect();
    let losing: Vec<&&Trade> = closed.iter().filter(|t| !t.is_win()).collect();

    let total_pnl: Decimal = closed.iter().map(|t| t.pnl).sum();
    let total_volume: Decimal = closed.iter().map(|t| t.notional()).sum();
    let total_fees: Decimal = closed.iter().map(|t| t.fees.total).sum();

    let gross_profit: Decimal = winning.iter().map(|t| t.pnl).sum();
    let gross_loss: Decimal = losing.iter().map(|t| t.pnl).sum::<Decimal>().abs();

    let avg_win = if winning.is_empty() {
        Decimal::ZERO
    } else {
        gross_profit / Decimal::from(winning.len())
    };
    let avg_loss = if losing.is_empty() {
        Decimal::ZERO
    } else {
        losing.iter().map(|t| t.pnl).sum::<Decimal>() / Decimal::from(losing.len())
    };

    let durations: Vec<f64> = closed.iter().filter_map(|t| t.duration_minutes()).collect();
    let avg_trade_duration = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    };

    let long_count = closed.iter().filter(|t| t.side == TradeSide::Long).count();
    let short_count = closed.len() - long_count;

    let (streak, streak_type) = current_streak(&closed);

    // Calendar period boundaries on the UTC calendar; the week starts Sunday.
    let today_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc();
    let week_start =
        today_start - Duration::days(now.weekday().num_days_from_sunday() as i64);
    let month_start = now
        .date_naive()
        .with_day(1)
        .unwrap_or(now.date_naive())
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc();

    let pnl_since = |start: DateTime<Utc>| -> Decimal {
        closed
            .iter()
            .filter(|t| t.exit_time.is_some_and(|exit| exit >= start))
            .map(|t| t.pnl)
            .sum()
    };

    OverviewMetrics {
        total_pnl,
        total_pnl_percent: if total_volume > Decimal::ZERO {
            (total_pnl / total_volume).to_f64().unwrap_or(0.0) * 100.0
        } else {
            0.0
        },
        total_trades: closed.len(),
        win_rate: winning.len() as f64 / closed.len() as f64 * 100.0,
        loss_rate: losing.len() as f64 / closed.len() as f64 * 100.0,
        total_volume,
        total_fees,
        avg_trade_duration,
        avg_win,
        avg_loss,
        profit_factor: ratio_with_sentinel(
            gross_profit.to_f64().unwrap_or(0.0),
            gross_loss.to_f64().unwrap_or(0.0),
        ),
        long_short_ratio: if short_count > 0 {
            long_count as f64 / short_count as f64
        } else {
            long_count as f64
        },
        long_count,
        short_count,
        current_streak: streak,
        current_streak_type: streak_type,
        today_pnl: pnl_since(today_start),
        week_pnl: pnl_since(week_start),
        month_pnl: pnl_since(month_start),
    }
}
