//! Shared trade fixtures for the calculator unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::{MarketType, OrderType, Trade, TradeFees, TradeSide, TradeStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A fixed Monday noon, so period-window tests are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap()
}

/// A closed perpetual long with the given PnL, exiting two hours after entry.
pub fn closed_trade(id: usize, pnl: Decimal) -> Trade {
    Trade {
        id: format!("trade-{id:04}"),
        symbol: "SOL/USDC".to_string(),
        market_type: MarketType::Perpetual,
        side: TradeSide::Long,
        order_type: OrderType::Limit,
        status: TradeStatus::Closed,
        entry_price: dec!(100),
        exit_price: Some(dec!(110)),
        quantity: dec!(1),
        leverage: 2,
        entry_time: base_time(),
        exit_time: Some(base_time() + Duration::hours(2)),
        pnl,
        pnl_percent: 0.0,
        fees: TradeFees::zero(),
        funding_payments: Decimal::ZERO,
        liquidation_price: None,
        annotation: None,
        tags: vec![],
        tx_signature: format!("sig-{id:04}"),
        strategy: None,
        risk_reward_ratio: None,
        max_adverse_excursion: None,
        max_favorable_excursion: None,
    }
}

/// A still-open position; aggregation must skip it.
pub fn open_trade(id: usize) -> Trade {
    Trade {
        status: TradeStatus::Open,
        exit_price: None,
        exit_time: None,
        pnl: Decimal::ZERO,
        ..closed_trade(id, Decimal::ZERO)
    }
}
