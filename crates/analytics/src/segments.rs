use chrono::{Datelike, Timelike};
use core_types::{OrderType, Trade, TradeSide, TradingSession};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::overview::ratio_with_sentinel;

/// Performance attribution for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolStats {
    pub symbol: String,
    pub total_trades: usize,
    pub win_rate: f64,
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub avg_duration: f64,
    pub volume: Decimal,
    pub long_count: usize,
    pub short_count: usize,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub profit_factor: f64,
}

/// Performance within one UTC hour of day. All 24 rows are always emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayStats {
    pub hour: u32,
    pub trades: usize,
    pub pnl: Decimal,
    pub win_rate: f64,
    pub avg_pnl: Decimal,
}

/// Performance within one fixed UTC trading session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub session: TradingSession,
    pub trades: usize,
    pub pnl: Decimal,
    pub win_rate: f64,
    pub volume: Decimal,
    pub avg_pnl: Decimal,
}

/// Performance per order type, sorted by total PnL descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTypeStats {
    pub order_type: OrderType,
    pub trades: usize,
    pub win_rate: f64,
    pub avg_pnl: Decimal,
    pub total_pnl: Decimal,
    pub avg_duration: f64,
}

/// Performance per weekday (UTC), Sunday first. All 7 rows are emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayStats {
    pub day: String,
    pub pnl: Decimal,
    pub trades: usize,
    pub win_rate: f64,
}

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

fn win_rate(wins: usize, trades: usize) -> f64 {
    if trades > 0 {
        wins as f64 / trades as f64 * 100.0
    } else {
        0.0
    }
}

fn avg_pnl(total: Decimal, trades: usize) -> Decimal {
    if trades > 0 {
        total / Decimal::from(trades)
    } else {
        Decimal::ZERO
    }
}

fn avg_duration(trades: &[&Trade]) -> f64 {
    let durations: Vec<f64> = trades.iter().filter_map(|t| t.duration_minutes()).collect();
    if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    }
}

/// Groups closed trades by instrument, sorted by total PnL descending.
pub fn symbol_stats(trades: &[Trade]) -> Vec<SymbolStats> {
    let mut by_symbol: HashMap<&str, Vec<&Trade>> = HashMap::new();
    for trade in trades.iter().filter(|t| t.is_closed()) {
        by_symbol.entry(trade.symbol.as_str()).or_default().push(trade);
    }

    let mut stats: Vec<SymbolStats> = by_symbol
        .into_iter()
        .map(|(symbol, group)| {
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
            let long_count = group.iter().filter(|t| t.side == TradeSide::Long).count();

            SymbolStats {
                symbol: symbol.to_string(),
                total_trades: group.len(),
                win_rate: win_rate(wins, group.len()),
                total_pnl,
                avg_pnl: avg_pnl(total_pnl, group.len()),
                avg_duration: avg_duration(&group),
                volume: group.iter().map(|t| t.notional()).sum(),
                long_count,
                short_count: group.len() - long_count,
                best_trade: group.iter().map(|t| t.pnl).max().unwrap_or(Decimal::ZERO),
                worst_trade: group.iter().map(|t| t.pnl).min().unwrap_or(Decimal::ZERO),
                profit_factor: ratio_with_sentinel(
                    gross_profit.to_f64().unwrap_or(0.0),
                    gross_loss.to_f64().unwrap_or(0.0),
                ),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
    stats
}

/// Buckets closed trades by UTC entry hour; quiet hours still appear.
pub fn time_of_day_stats(trades: &[Trade]) -> Vec<TimeOfDayStats> {
    let mut hours: Vec<(usize, Decimal, usize)> = vec![(0, Decimal::ZERO, 0); 24];
    for trade in trades.iter().filter(|t| t.is_closed()) {
        let slot = &mut hours[trade.entry_time.hour() as usize];
        slot.0 += 1;
        slot.1 += trade.pnl;
        if trade.is_win() {
            slot.2 += 1;
        }
    }

    hours
        .into_iter()
        .enumerate()
        .map(|(hour, (trades, pnl, wins))| TimeOfDayStats {
            hour: hour as u32,
            trades,
            pnl,
            win_rate: win_rate(wins, trades),
            avg_pnl: avg_pnl(pnl, trades),
        })
        .collect()
}

/// Buckets closed trades into the three fixed UTC sessions.
pub fn session_stats(trades: &[Trade]) -> Vec<SessionStats> {
    TradingSession::ALL
        .iter()
        .map(|session| {
            let group: Vec<&Trade> = trades
                .iter()
                .filter(|t| {
                    t.is_closed() && TradingSession::from_hour(t.entry_time.hour()) == *session
                })
                .collect();
            let wins = group.iter().filter(|t| t.is_win()).count();
            let pnl: Decimal = group.iter().map(|t| t.pnl).sum();

            SessionStats {
                session: *session,
                trades: group.len(),
                pnl,
                win_rate: win_rate(wins, group.len()),
                volume: group.iter().map(|t| t.notional()).sum(),
                avg_pnl: avg_pnl(pnl, group.len()),
            }
        })
        .collect()
}

/// Groups closed trades by order type, sorted by total PnL descending.
pub fn order_type_stats(trades: &[Trade]) -> Vec<OrderTypeStats> {
    let mut by_type: HashMap<OrderType, Vec<&Trade>> = HashMap::new();
    for trade in trades.iter().filter(|t| t.is_closed()) {
        by_type.entry(trade.order_type).or_default().push(trade);
    }

    let mut stats: Vec<OrderTypeStats> = by_type
        .into_iter()
        .map(|(order_type, group)| {
            let wins = group.iter().filter(|t| t.is_win()).count();
            let total_pnl: Decimal = group.iter().map(|t| t.pnl).sum();
            OrderTypeStats {
                order_type,
                trades: group.len(),
                win_rate: win_rate(wins, group.len()),
                avg_pnl: avg_pnl(total_pnl, group.len()),
                total_pnl,
                avg_duration: avg_duration(&group),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
    stats
}

/// Buckets closed trades by UTC entry weekday, Sunday through Saturday.
pub fn weekday_stats(trades: &[Trade]) -> Vec<WeekdayStats> {
    let mut days: Vec<(Decimal, usize, usize)> = vec![(Decimal::ZERO, 0, 0); 7];
    for trade in trades.iter().filter(|t| t.is_closed()) {
        let slot = &mut days[trade.entry_time.weekday().num_days_from_sunday() as usize];
        slot.0 += trade.pnl;
        slot.1 += 1;
        if trade.is_win() {
            slot.2 += 1;
        }
    }

    days.into_iter()
        .enumerate()
        .map(|(day, (pnl, trades, wins))| WeekdayStats {
            day: WEEKDAYS[day].to_string(),
            pnl,
            trades,
            win_rate: win_rate(wins, trades),
        })
        .collect()
}
