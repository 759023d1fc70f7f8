use chrono::NaiveDate;
use core_types::Trade;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row per calendar day on which at least one trade was closed.
///
/// The series is sparse: days without activity are never emitted, so
/// consumers that annualize must not assume a contiguous calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub cumulative_pnl: Decimal,
    pub trades: usize,
    pub win_rate: f64,
    pub volume: Decimal,
    pub fees: Decimal,
    /// Distance from the running cumulative-PnL peak at the end of this day.
    pub max_drawdown: Decimal,
}

#[derive(Default)]
struct DayAccumulator {
    pnl: Decimal,
    trades: usize,
    wins: usize,
    volume: Decimal,
    fees: Decimal,
}

/// Collapses a trade ledger into an ascending daily performance series.
///
/// Only closed and liquidated trades contribute. The grouping key is the UTC
/// calendar date of the exit, falling back to the entry date for trades that
/// never recorded one. The result is a pure function of the input ledger.
pub fn aggregate_daily(trades: &[Trade]) -> Vec<DailyPerformance> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for trade in trades.iter().filter(|t| t.is_closed()) {
        let day = days.entry(trade.ledger_date()).or_default();
        day.pnl += trade.pnl;
        day.trades += 1;
        if trade.is_win() {
            day.wins += 1;
        }
        day.volume += trade.notional();
        day.fees += trade.fees.total;
    }

    let mut cumulative = Decimal::ZERO;
    let mut peak = Decimal::ZERO;

    days.into_iter()
        .map(|(date, day)| {
            cumulative += day.pnl;
            peak = peak.max(cumulative);
            DailyPerformance {
                date,
                pnl: day.pnl,
                cumulative_pnl: cumulative,
                trades: day.trades,
                win_rate: if day.trades > 0 {
                    day.wins as f64 / day.trades as f64 * 100.0
                } else {
                    0.0
                },
                volume: day.volume,
                fees: day.fees,
                max_drawdown: peak - cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{closed_trade, open_trade};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_ledger_yields_empty_series() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn same_day_trades_collapse_into_one_row() {
        let trades = vec![closed_trade(0, dec!(50)), closed_trade(1, dec!(-20))];
        let daily = aggregate_daily(&trades);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].pnl, dec!(30));
        assert_eq!(daily[0].trades, 2);
        assert_eq!(daily[0].win_rate, 50.0);
        assert_eq!(daily[0].cumulative_pnl, dec!(30));
    }

    #[test]
    fn open_trades_are_excluded() {
        let trades = vec![closed_trade(0, dec!(10)), open_trade(1)];
        let daily = aggregate_daily(&trades);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].trades, 1);
    }

    #[test]
    fn drawdown_tracks_running_peak() {
        let mut winner = closed_trade(0, dec!(100));
        let mut loser = closed_trade(1, dec!(-40));
        let mut recovery = closed_trade(2, dec!(10));
        loser.exit_time = winner.exit_time.map(|t| t + Duration::days(1));
        recovery.exit_time = winner.exit_time.map(|t| t + Duration::days(2));

        let daily = aggregate_daily(&[winner, loser, recovery]);

        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].max_drawdown, dec!(0));
        assert_eq!(daily[1].max_drawdown, dec!(40));
        // Peak never decreases, so a partial recovery still shows drawdown.
        assert_eq!(daily[2].max_drawdown, dec!(30));
    }

    #[test]
    fn missing_exit_falls_back_to_entry_date() {
        let mut trade = closed_trade(0, dec!(5));
        let entry_date = trade.entry_time.date_naive();
        trade.exit_time = None;

        let daily = aggregate_daily(&[trade]);
        assert_eq!(daily[0].date, entry_date);
    }

    #[test]
    fn daily_pnl_sums_to_closed_trade_pnl() {
        let trades: Vec<_> = (0..10)
            .map(|i| {
                let mut t = closed_trade(i, dec!(7) - Decimal::from(i as i64 * 2));
                t.exit_time = t.exit_time.map(|e| e + Duration::days(i as i64 % 4));
                t
            })
            .collect();

        let daily = aggregate_daily(&trades);
        let daily_sum: Decimal = daily.iter().map(|d| d.pnl).sum();
        let trade_sum: Decimal = trades.iter().map(|t| t.pnl).sum();
        assert_eq!(daily_sum, trade_sum);
    }
}
