//! # Analytics Engine
//!
//! Pure calculators that turn a trade ledger into every reporting view the
//! dashboard needs: overview counters, a daily performance series, risk and
//! health scoring, KPI tiles, distribution and correlation studies, segment
//! breakdowns, fee composition, equity curves and strategy attribution.
//!
//! ## Architectural Principles
//!
//! 1. **Pure Functions**: every calculator is a deterministic function of the
//!    ledger (plus an explicit time anchor where calendar windows apply).
//!    Nothing here touches a database, a clock it was not handed, or a network.
//! 2. **Total over partial**: calculators never fail. Degenerate inputs fall
//!    back to documented sentinels (zeroes, or infinity for ratios whose
//!    denominator vanished) instead of surfacing errors.
//! 3. **Money in `Decimal`, statistics in `f64`**: currency amounts stay
//!    exact; dimensionless ratios are formed by converting at the division.
//!
//! [`AnalyticsBundle::compute`] is the front door; the individual modules are
//! public for callers that only need one view.

pub mod bundle;
pub mod correlation;
pub mod daily;
pub mod distribution;
pub mod equity;
pub mod fees;
pub mod kpi;
pub mod overview;
pub mod risk;
pub mod score;
pub mod segments;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testutil;

pub use bundle::AnalyticsBundle;
pub use correlation::{CorrelationPair, correlations};
pub use daily::{DailyPerformance, aggregate_daily};
pub use distribution::{ReturnBucket, return_distribution};
pub use equity::{
    CapitalFlow, EquityCurvePoint, INITIAL_CAPITAL, capital_flows, equity_curve,
};
pub use fees::{FeeBreakdown, fee_breakdown};
pub use kpi::{KpiDefinition, KpiStatus, KpiType, KpiUnit, kpi_dashboard};
pub use overview::{OverviewMetrics, StreakType, overview, overview_at};
pub use risk::{RiskMetrics, risk_metrics};
pub use score::{Grade, RiskHealthScore, risk_health_score};
pub use segments::{
    OrderTypeStats, SessionStats, SymbolStats, TimeOfDayStats, WeekdayStats, order_type_stats,
    session_stats, symbol_stats, time_of_day_stats, weekday_stats,
};
pub use strategy::{
    DEFAULT_STRATEGIES, LabelClassifier, RoundRobinClassifier, StrategyClassifier,
    StrategyPerformance, StrategyStatus, strategy_performance,
};
