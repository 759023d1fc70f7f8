use crate::correlation::{CorrelationPair, correlations};
use crate::daily::{DailyPerformance, aggregate_daily};
use crate::distribution::{ReturnBucket, return_distribution};
use crate::equity::{CapitalFlow, EquityCurvePoint, INITIAL_CAPITAL, capital_flows, equity_curve};
use crate::fees::{FeeBreakdown, fee_breakdown};
use crate::kpi::{KpiDefinition, kpi_dashboard};
use crate::overview::{OverviewMetrics, overview_at};
use crate::risk::{RiskMetrics, risk_metrics};
use crate::score::{RiskHealthScore, risk_health_score};
use crate::segments::{
    OrderTypeStats, SessionStats, SymbolStats, TimeOfDayStats, WeekdayStats, order_type_stats,
    session_stats, symbol_stats, time_of_day_stats, weekday_stats,
};
use crate::strategy::{RoundRobinClassifier, StrategyPerformance, strategy_performance};
use chrono::{DateTime, Utc};
use core_types::Trade;
use serde::{Deserialize, Serialize};

/// Seed for the simulated capital-flow schedule, fixed so repeated runs over
/// the same ledger produce identical reports.
const FLOW_SEED: u64 = 42;

/// Every analytics view computed over one trade ledger.
///
/// This is the single entry point callers should reach for; it wires the
/// calculators together in dependency order and shares intermediate results
/// (the daily series feeds risk, KPI, equity and flow views) instead of
/// recomputing them per view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsBundle {
    pub overview: OverviewMetrics,
    pub daily: Vec<DailyPerformance>,
    pub risk: RiskMetrics,
    pub health: RiskHealthScore,
    pub kpis: Vec<KpiDefinition>,
    pub distribution: Vec<ReturnBucket>,
    pub correlations: Vec<CorrelationPair>,
    pub symbols: Vec<SymbolStats>,
    pub time_of_day: Vec<TimeOfDayStats>,
    pub sessions: Vec<SessionStats>,
    pub order_types: Vec<OrderTypeStats>,
    pub weekdays: Vec<WeekdayStats>,
    pub fees: Vec<FeeBreakdown>,
    pub equity: Vec<EquityCurvePoint>,
    pub capital_flows: Vec<CapitalFlow>,
    pub strategies: Vec<StrategyPerformance>,
}

impl AnalyticsBundle {
    /// Computes the full bundle with today/week/month windows anchored at the
    /// current wall clock.
    pub fn compute(trades: &[Trade]) -> Self {
        Self::compute_at(trades, Utc::now())
    }

    /// Like [`compute`](Self::compute) but with an explicit anchor, which
    /// makes the period windows reproducible.
    pub fn compute_at(trades: &[Trade], now: DateTime<Utc>) -> Self {
        let daily = aggregate_daily(trades);
        let overview = overview_at(trades, now);
        let risk = risk_metrics(trades, &daily);
        let health = risk_health_score(&risk, &overview);
        let kpis = kpi_dashboard(&overview, &risk, &daily);
        let equity = equity_curve(&daily, INITIAL_CAPITAL);
        let flows = capital_flows(&daily, INITIAL_CAPITAL, FLOW_SEED);

        let bundle = Self {
            overview,
            risk,
            health,
            kpis,
            distribution: return_distribution(trades),
            correlations: correlations(trades),
            symbols: symbol_stats(trades),
            time_of_day: time_of_day_stats(trades),
            sessions: session_stats(trades),
            order_types: order_type_stats(trades),
            weekdays: weekday_stats(trades),
            fees: fee_breakdown(trades),
            equity,
            capital_flows: flows,
            strategies: strategy_performance(trades, &RoundRobinClassifier),
            daily,
        };

        tracing::info!(
            trades = trades.len(),
            days = bundle.daily.len(),
            total_pnl = %bundle.overview.total_pnl,
            win_rate = bundle.overview.win_rate,
            grade = %bundle.health.grade,
            "analytics bundle computed"
        );

        bundle
    }
}
