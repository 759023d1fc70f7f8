use serde::{Deserialize, Serialize};

/// The venue category a trade was executed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Spot,
    Perpetual,
    Options,
}

impl MarketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Spot => "spot",
            MarketType::Perpetual => "perpetual",
            MarketType::Options => "options",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Long,
    Short,
}

impl TradeSide {
    /// Returns the opposite side of the trade
    pub fn opposite(&self) -> Self {
        match self {
            TradeSide::Long => TradeSide::Short,
            TradeSide::Short => TradeSide::Long,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Long => "long",
            TradeSide::Short => "short",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
    Ioc,
}

impl OrderType {
    /// A stable display label, matching the wire format used by the exporter.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
            OrderType::StopLimit => "stop-limit",
            OrderType::Ioc => "ioc",
        }
    }
}

/// Lifecycle state of a position.
///
/// `Open` trades carry no realized PnL and are excluded from every aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
    Liquidated,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
            TradeStatus::Liquidated => "liquidated",
        }
    }
}

/// Fixed UTC time-of-day buckets used for session attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingSession {
    Asian,
    European,
    American,
}

impl TradingSession {
    pub const ALL: [TradingSession; 3] = [
        TradingSession::Asian,
        TradingSession::European,
        TradingSession::American,
    ];

    /// Maps a UTC hour to its session: [0,8) asian, [8,16) european, [16,24) american.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=7 => TradingSession::Asian,
            8..=15 => TradingSession::European,
            _ => TradingSession::American,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradingSession::Asian => "asian",
            TradingSession::European => "european",
            TradingSession::American => "american",
        }
    }
}
