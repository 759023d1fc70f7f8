//! # Mock Ledger Generator
//!
//! Produces realistic, fully deterministic trade ledgers for demos and tests.
//! The same `(count, seed, now)` triple always yields the same trades, so
//! reports built on top of it are reproducible run to run.

use chrono::{DateTime, Duration, Utc};
use core_types::{MarketType, OrderType, Trade, TradeFees, TradeSide, TradeStatus};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

mod rng;

pub use rng::SeededRng;

const SYMBOLS: [(&str, f64, f64); 10] = [
    ("SOL/USDC", 185.0, 0.08),
    ("WBTC/USDC", 97_500.0, 0.05),
    ("WETH/USDC", 3_350.0, 0.06),
    ("BONK/USDC", 0.000_032, 0.15),
    ("JTO/USDC", 3.8, 0.12),
    ("PYTH/USDC", 0.45, 0.10),
    ("JUP/USDC", 1.2, 0.11),
    ("RNDR/USDC", 8.5, 0.09),
    ("HNT/USDC", 6.2, 0.08),
    ("RAY/USDC", 5.8, 0.10),
];

const STRATEGIES: [&str; 4] = ["Momentum", "Mean Reversion", "Breakout", "Scalping"];

const TAGS: [&str; 10] = [
    "breakout",
    "trend-following",
    "mean-reversion",
    "scalp",
    "swing",
    "news",
    "technical",
    "momentum",
    "support-bounce",
    "resistance-rejection",
];

const ANNOTATIONS: [&str; 10] = [
    "Entry based on breakout above resistance at key level",
    "Followed momentum after news catalyst",
    "Mean reversion play at support zone",
    "Took profit early due to increasing volatility",
    "Stopped out, should have used wider stop",
    "Perfect entry, could have held longer",
    "Funding rate was favorable for this direction",
    "Scaled into position over 3 entries",
    "Hedging against spot exposure",
    "Breakout trade with volume confirmation",
];

// Weighted toward limit orders.
const ORDER_TYPES: [OrderType; 7] = [
    OrderType::Market,
    OrderType::Limit,
    OrderType::Limit,
    OrderType::Limit,
    OrderType::Stop,
    OrderType::StopLimit,
    OrderType::Ioc,
];

const TAKER_FEE_RATE: f64 = 0.0005;
const MAKER_REBATE_RATE: f64 = 0.000_062_5;

/// Generates `count` trades over the 90 days before the current wall clock.
pub fn generate_trades(count: usize, seed: u64) -> Vec<Trade> {
    generate_trades_at(count, seed, Utc::now())
}

/// Like [`generate_trades`] but anchored at an explicit `now`, which makes
/// the output fully reproducible.
///
/// Entry times skew toward the recent end of the 90-day window. Roughly 30%
/// of trades are short scalps, the rest multi-hour to multi-day swings; a
/// swing whose exit lands past `now` is emitted as an open position.
pub fn generate_trades_at(count: usize, seed: u64, now: DateTime<Utc>) -> Vec<Trade> {
    let mut rng = SeededRng::new(seed);
    let mut trades = Vec::with_capacity(count);

    for i in 0..count {
        let (symbol, base_price, volatility) = SYMBOLS[rng.index(SYMBOLS.len())];
        let market_type = if rng.next_f64() > 0.4 {
            MarketType::Perpetual
        } else {
            MarketType::Spot
        };
        let side = if rng.next_f64() > 0.45 {
            TradeSide::Long
        } else {
            TradeSide::Short
        };
        let order_type = ORDER_TYPES[rng.index(ORDER_TYPES.len())];
        let leverage = if market_type == MarketType::Perpetual {
            rng.int_between(1, 11) as u32
        } else {
            1
        };

        // Recency skew: the 1.5 exponent pulls entries toward the present.
        let days_ago = rng.next_f64().powf(1.5) * 90.0;
        let entry_time = now
            - Duration::milliseconds((days_ago * 86_400_000.0) as i64)
            - Duration::seconds(rng.int_between(0, 86_400));

        let is_scalp = rng.next_f64() > 0.7;
        let duration_minutes = if is_scalp {
            rng.between(2.0, 120.0)
        } else {
            rng.between(120.0, 7_200.0)
        };
        let exit_time = entry_time + Duration::milliseconds((duration_minutes * 60_000.0) as i64);
        let is_closed = exit_time < now;

        let entry_price = base_price * (1.0 + rng.between(-volatility, volatility));
        let price_move =
            rng.between(-volatility * 0.5, volatility * 0.5) * if is_scalp { 0.3 } else { 1.0 };

        // Slight edge: 53% directional accuracy.
        let is_win = rng.next_f64() < 0.53;
        let move_direction = match (is_win, side) {
            (true, TradeSide::Long) | (false, TradeSide::Short) => 1.0,
            (true, TradeSide::Short) | (false, TradeSide::Long) => -1.0,
        };
        let exit_price = is_closed.then(|| entry_price * (1.0 + price_move * move_direction));

        let notional = rng.between(500.0, 25_000.0);
        let quantity = notional / entry_price;
        let volume = quantity * entry_price;

        let fees = generate_fees(volume, market_type, &mut rng);

        let (pnl, pnl_percent) = match exit_price {
            Some(exit) => {
                let price_diff = match side {
                    TradeSide::Long => exit - entry_price,
                    TradeSide::Short => entry_price - exit,
                };
                let gross = price_diff * quantity * leverage as f64;
                let net = gross - fee_total(&fees);
                (net, price_diff / entry_price * 100.0 * leverage as f64)
            }
            // Open positions carry no realized PnL.
            None => (0.0, 0.0),
        };

        let funding_payments = if market_type == MarketType::Perpetual {
            volume * rng.between(-0.002, 0.002) * (duration_minutes / 1_440.0)
        } else {
            0.0
        };

        let status = if !is_closed {
            TradeStatus::Open
        } else if rng.next_f64() < 0.03 {
            TradeStatus::Liquidated
        } else {
            TradeStatus::Closed
        };

        let has_annotation = rng.next_f64() < 0.25;
        let annotation = has_annotation
            .then(|| ANNOTATIONS[rng.index(ANNOTATIONS.len())].to_string());

        let mut tags = Vec::new();
        for _ in 0..rng.int_between(0, 4) {
            let tag = TAGS[rng.index(TAGS.len())].to_string();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let liquidation_price = (market_type == MarketType::Perpetual).then(|| {
            let offset = 1.0 / leverage as f64 * 0.9;
            match side {
                TradeSide::Long => entry_price * (1.0 - offset),
                TradeSide::Short => entry_price * (1.0 + offset),
            }
        });

        trades.push(Trade {
            id: format!("trade-{i:04}"),
            symbol: symbol.to_string(),
            market_type,
            side,
            order_type,
            status,
            entry_price: to_decimal(entry_price),
            exit_price: exit_price.map(to_decimal),
            quantity: to_decimal(quantity),
            leverage,
            entry_time,
            exit_time: is_closed.then_some(exit_time),
            pnl: to_decimal(pnl),
            pnl_percent,
            fees,
            funding_payments: to_decimal(funding_payments),
            liquidation_price: liquidation_price.map(to_decimal),
            annotation,
            tags,
            tx_signature: rng.tx_signature(),
            strategy: Some(STRATEGIES[rng.index(STRATEGIES.len())].to_string()),
            risk_reward_ratio: None,
            max_adverse_excursion: None,
            max_favorable_excursion: None,
        });
    }

    trades.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));
    trades
}

/// About 40% of fills are makers, earning a rebate instead of paying taker
/// fees. Funding only applies to perpetuals.
fn generate_fees(volume: f64, market_type: MarketType, rng: &mut SeededRng) -> TradeFees {
    let is_maker = rng.next_f64() > 0.6;
    let maker = if is_maker { volume * MAKER_REBATE_RATE } else { 0.0 };
    let taker = if is_maker { 0.0 } else { volume * TAKER_FEE_RATE };
    let funding = if market_type == MarketType::Perpetual {
        volume * rng.between(-0.001, 0.001)
    } else {
        0.0
    };

    TradeFees::new(
        to_decimal(maker),
        to_decimal(taker),
        to_decimal(funding),
        Decimal::ZERO,
    )
}

fn fee_total(fees: &TradeFees) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    fees.total.to_f64().unwrap_or(0.0)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn same_seed_same_ledger() {
        let a = generate_trades_at(50, 42, anchor());
        let b = generate_trades_at(50, 42, anchor());
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = generate_trades_at(50, 42, anchor());
        let b = generate_trades_at(50, 43, anchor());
        assert_ne!(a, b);
    }

    #[test]
    fn all_generated_trades_validate() {
        for trade in generate_trades_at(250, 42, anchor()) {
            assert!(trade.validate().is_ok(), "invalid trade {}", trade.id);
        }
    }

    #[test]
    fn spot_trades_are_unleveraged() {
        let trades = generate_trades_at(250, 42, anchor());
        assert!(
            trades
                .iter()
                .filter(|t| t.market_type == MarketType::Spot)
                .all(|t| t.leverage == 1 && t.fees.funding == Decimal::ZERO)
        );
    }

    #[test]
    fn open_trades_carry_no_exit_state() {
        let trades = generate_trades_at(250, 42, anchor());
        for trade in trades.iter().filter(|t| t.status == TradeStatus::Open) {
            assert!(trade.exit_time.is_none());
            assert!(trade.exit_price.is_none());
            assert_eq!(trade.pnl, Decimal::ZERO);
        }
    }

    #[test]
    fn ledger_is_sorted_by_entry_descending() {
        let trades = generate_trades_at(100, 42, anchor());
        assert!(trades.windows(2).all(|w| w[0].entry_time >= w[1].entry_time));
    }

    #[test]
    fn entries_stay_within_the_ninety_day_window() {
        let trades = generate_trades_at(250, 42, anchor());
        let horizon = anchor() - Duration::days(91);
        assert!(trades.iter().all(|t| t.entry_time > horizon && t.entry_time < anchor()));
    }

    #[test]
    fn tx_signatures_are_base58_length() {
        let trades = generate_trades_at(20, 42, anchor());
        assert!(trades.iter().all(|t| t.tx_signature.len() == 88));
    }
}
