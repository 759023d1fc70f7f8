use crate::enums::{MarketType, OrderType, TradeSide, TradeStatus};
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The cost components of a single trade.
///
/// By convention `total = taker - maker + |funding|`: maker fees are rebates
/// (a credit), funding is signed, and liquidation penalties are tracked
/// separately because they only occur on forced closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeFees {
    pub maker: Decimal,
    pub taker: Decimal,
    pub funding: Decimal,
    pub liquidation: Decimal,
    pub total: Decimal,
}

impl TradeFees {
    pub fn zero() -> Self {
        Self {
            maker: Decimal::ZERO,
            taker: Decimal::ZERO,
            funding: Decimal::ZERO,
            liquidation: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Builds a fee record from its components, deriving `total`.
    pub fn new(maker: Decimal, taker: Decimal, funding: Decimal, liquidation: Decimal) -> Self {
        Self {
            maker,
            taker,
            funding,
            liquidation,
            total: taker - maker + funding.abs(),
        }
    }
}

/// An immutable record of one completed or open position.
///
/// This is the canonical input of every analytics calculator. For closed and
/// liquidated trades `pnl` is the realized result with fees already netted;
/// open trades carry `pnl == 0` by convention and are skipped by aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub market_type: MarketType,
    pub side: TradeSide,
    pub order_type: OrderType,
    pub status: TradeStatus,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub quantity: Decimal,
    pub leverage: u32,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    /// Realized profit/loss in quote currency, fees netted.
    pub pnl: Decimal,
    /// Leverage-adjusted return on entry notional, in percent.
    pub pnl_percent: f64,
    pub fees: TradeFees,
    pub funding_payments: Decimal,
    pub liquidation_price: Option<Decimal>,
    pub annotation: Option<String>,
    pub tags: Vec<String>,
    pub tx_signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_reward_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_adverse_excursion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_favorable_excursion: Option<f64>,
}

impl Trade {
    /// Whether the position has been exited (closed or liquidated).
    pub fn is_closed(&self) -> bool {
        self.status != TradeStatus::Open
    }

    /// Whether the trade is counted as a win. A PnL of exactly zero is a
    /// loss, not a draw; every calculator relies on this convention.
    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    /// Notional value at entry (quantity x entry price).
    pub fn notional(&self) -> Decimal {
        self.quantity * self.entry_price
    }

    /// Holding period in minutes, when the trade has an exit timestamp.
    pub fn duration_minutes(&self) -> Option<f64> {
        self.exit_time
            .map(|exit| (exit - self.entry_time).num_seconds() as f64 / 60.0)
    }

    /// UTC calendar date used for daily grouping: the exit date when present,
    /// otherwise the entry date.
    pub fn ledger_date(&self) -> NaiveDate {
        self.exit_time.unwrap_or(self.entry_time).date_naive()
    }

    /// Millisecond timestamp used for exit-order sorting. Trades without an
    /// exit sort as the epoch, i.e. before everything else.
    pub fn exit_epoch_millis(&self) -> i64 {
        self.exit_time.map(|t| t.timestamp_millis()).unwrap_or(0)
    }

    /// Validates the structural invariants of the trade record.
    ///
    /// Calculators assume these hold; ingestion code is expected to call this
    /// once per trade before handing a ledger to the analytics layer.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.quantity <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "quantity".to_string(),
                format!("must be positive, got {}", self.quantity),
            ));
        }
        if self.leverage < 1 {
            return Err(CoreError::InvalidInput(
                "leverage".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        if self.market_type == MarketType::Spot && self.leverage != 1 {
            return Err(CoreError::InvalidInput(
                "leverage".to_string(),
                format!("spot trades must be unleveraged, got {}x", self.leverage),
            ));
        }
        if let Some(exit_time) = self.exit_time {
            if exit_time < self.entry_time {
                return Err(CoreError::InvalidInput(
                    "exit_time".to_string(),
                    "must not precede entry_time".to_string(),
                ));
            }
        }
        if self.status == TradeStatus::Open && (self.exit_time.is_some() || self.exit_price.is_some()) {
            return Err(CoreError::InvalidInput(
                "status".to_string(),
                "open trades must not carry an exit price or exit time".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_trade() -> Trade {
        let entry = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        Trade {
            id: "trade-0001".to_string(),
            symbol: "SOL/USDC".to_string(),
            market_type: MarketType::Spot,
            side: TradeSide::Long,
            order_type: OrderType::Limit,
            status: TradeStatus::Closed,
            entry_price: dec!(100),
            exit_price: Some(dec!(110)),
            quantity: dec!(10),
            leverage: 1,
            entry_time: entry,
            exit_time: Some(entry + chrono::Duration::minutes(90)),
            pnl: dec!(99),
            pnl_percent: 10.0,
            fees: TradeFees::new(dec!(0), dec!(1), dec!(0), dec!(0)),
            funding_payments: dec!(0),
            liquidation_price: None,
            annotation: None,
            tags: vec![],
            tx_signature: "sig".to_string(),
            strategy: None,
            risk_reward_ratio: None,
            max_adverse_excursion: None,
            max_favorable_excursion: None,
        }
    }

    #[test]
    fn fee_total_follows_convention() {
        let fees = TradeFees::new(dec!(0.5), dec!(2), dec!(-1), dec!(0));
        assert_eq!(fees.total, dec!(2.5)); // 2 - 0.5 + |-1|
    }

    #[test]
    fn helpers_report_duration_and_notional() {
        let trade = sample_trade();
        assert_eq!(trade.notional(), dec!(1000));
        assert_eq!(trade.duration_minutes(), Some(90.0));
        assert!(trade.is_closed());
        assert!(trade.is_win());
    }

    #[test]
    fn zero_pnl_counts_as_loss() {
        let mut trade = sample_trade();
        trade.pnl = Decimal::ZERO;
        assert!(!trade.is_win());
    }

    #[test]
    fn validate_rejects_leveraged_spot() {
        let mut trade = sample_trade();
        trade.leverage = 5;
        assert!(trade.validate().is_err());
    }

    #[test]
    fn validate_rejects_exit_before_entry() {
        let mut trade = sample_trade();
        trade.exit_time = Some(trade.entry_time - chrono::Duration::minutes(1));
        assert!(trade.validate().is_err());
    }

    #[test]
    fn open_trade_sorts_as_epoch() {
        let mut trade = sample_trade();
        trade.status = TradeStatus::Open;
        trade.exit_time = None;
        trade.exit_price = None;
        assert_eq!(trade.exit_epoch_millis(), 0);
        assert!(trade.validate().is_ok());
    }
}
