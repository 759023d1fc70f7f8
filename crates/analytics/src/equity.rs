use crate::daily::DailyPerformance;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default starting capital for equity and NAV style views.
pub const INITIAL_CAPITAL: Decimal = dec!(10000);

/// Annualized return of the synthetic buy-and-hold benchmark.
const ANNUAL_BENCHMARK_RETURN: f64 = 0.08;

/// One point of the account equity curve with a compounding benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityCurvePoint {
    pub date: NaiveDate,
    pub equity: Decimal,
    /// Synthetic benchmark equity, compounded daily toward 8% a year.
    pub benchmark: f64,
    pub drawdown: Decimal,
    pub drawdown_percent: f64,
}

/// A simulated external capital movement layered onto the daily series.
///
/// Stands in for a real deposit/withdrawal ledger; only the output shape is
/// contractual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalFlow {
    pub date: NaiveDate,
    pub deposits: Decimal,
    pub withdrawals: Decimal,
    pub net_flow: Decimal,
    pub cumulative_net: Decimal,
    pub balance: Decimal,
}

/// Walks the daily series into an equity curve against a fixed-rate benchmark.
///
/// Equity starts at `initial_capital` and accrues each day's PnL; the
/// benchmark compounds at a deterministic daily factor derived from the 8%
/// annual target over 365 days. Peak-based drawdown is tracked in parallel.
pub fn equity_curve(
    daily: &[DailyPerformance],
    initial_capital: Decimal,
) -> Vec<EquityCurvePoint> {
    let daily_benchmark_return =
        (1.0 + ANNUAL_BENCHMARK_RETURN).powf(1.0 / 365.0) - 1.0;

    let mut equity = initial_capital;
    let mut benchmark = initial_capital.to_f64().unwrap_or(0.0);
    let mut peak = initial_capital;

    daily
        .iter()
        .map(|day| {
            equity += day.pnl;
            benchmark *= 1.0 + daily_benchmark_return;
            peak = peak.max(equity);
            let drawdown = peak - equity;
            EquityCurvePoint {
                date: day.date,
                equity,
                benchmark,
                drawdown,
                drawdown_percent: if peak > Decimal::ZERO {
                    (drawdown / peak).to_f64().unwrap_or(0.0) * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// A linear congruential generator driving the simulated flow schedule.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = (self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)) % (1 << 32);
        self.0 as f64 / (1u64 << 32) as f64
    }
}

/// Simulates periodic deposits and withdrawals over the daily series.
///
/// Deposits land every 14th day after the first, withdrawals every 30th day
/// past day 30. Deterministic for a given seed.
pub fn capital_flows(
    daily: &[DailyPerformance],
    initial_deposit: Decimal,
    seed: u64,
) -> Vec<CapitalFlow> {
    let mut rng = Lcg(seed);
    let mut cumulative_net = initial_deposit;
    let mut balance = initial_deposit;

    daily
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let deposits = if i > 0 && i % 14 == 0 {
                money(500.0 + rng.next_f64() * 1000.0)
            } else {
                Decimal::ZERO
            };
            let withdrawals = if i > 30 && i % 30 == 0 {
                money(200.0 + rng.next_f64() * 500.0)
            } else {
                Decimal::ZERO
            };

            let net_flow = deposits - withdrawals;
            cumulative_net += net_flow;
            balance += day.pnl + net_flow;

            CapitalFlow {
                date: day.date,
                deposits,
                withdrawals,
                net_flow,
                cumulative_net,
                balance,
            }
        })
        .collect()
}

fn money(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::aggregate_daily;
    use crate::testutil::{base_time, closed_trade};
    use chrono::Duration;

    fn daily_series(pnls: &[i64]) -> Vec<DailyPerformance> {
        let trades: Vec<_> = pnls
            .iter()
            .enumerate()
            .map(|(i, pnl)| {
                let mut t = closed_trade(i, Decimal::from(*pnl));
                t.exit_time = Some(base_time() + Duration::days(i as i64));
                t
            })
            .collect();
        aggregate_daily(&trades)
    }

    #[test]
    fn equity_accrues_daily_pnl() {
        let daily = daily_series(&[100, -50, 25]);
        let curve = equity_curve(&daily, INITIAL_CAPITAL);

        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0].equity, dec!(10100));
        assert_eq!(curve[1].equity, dec!(10050));
        assert_eq!(curve[2].equity, dec!(10075));
        assert_eq!(curve[1].drawdown, dec!(50));
        assert!(curve[1].drawdown_percent > 0.0);
    }

    #[test]
    fn benchmark_compounds_toward_eight_percent() {
        let daily = daily_series(&[0; 365]);
        // 365 zero-PnL days of activity is unrealistic but exercises the rate.
        let curve = equity_curve(&daily, INITIAL_CAPITAL);
        let last = curve.last().map(|p| p.benchmark).unwrap_or_default();
        assert!((last - 10_800.0).abs() < 1.0);
    }

    #[test]
    fn flows_follow_the_fixed_schedule() {
        let daily = daily_series(&[10; 40]);
        let flows = capital_flows(&daily, INITIAL_CAPITAL, 42);

        assert_eq!(flows.len(), 40);
        assert_eq!(flows[0].deposits, Decimal::ZERO);
        assert!(flows[14].deposits > Decimal::ZERO);
        assert!(flows[28].deposits > Decimal::ZERO);
        assert!(flows.iter().all(|f| f.withdrawals == Decimal::ZERO));

        // Balance reconciles deposits plus PnL.
        let total_deposits: Decimal = flows.iter().map(|f| f.deposits).sum();
        let expected = INITIAL_CAPITAL + total_deposits + Decimal::from(400);
        assert_eq!(flows.last().map(|f| f.balance), Some(expected));
    }

    #[test]
    fn flows_are_deterministic_per_seed() {
        let daily = daily_series(&[10; 20]);
        let a = capital_flows(&daily, INITIAL_CAPITAL, 7);
        let b = capital_flows(&daily, INITIAL_CAPITAL, 7);
        let c = capital_flows(&daily, INITIAL_CAPITAL, 8);
        assert_eq!(a, b);
        assert_ne!(a[14].deposits, c[14].deposits);
    }
}
