//! # Deriverse Core Types
//!
//! The foundational data model shared by every crate in the workspace: the
//! trade ledger entity (`Trade`), its value objects (`TradeFees`) and the
//! classification enums.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate has no knowledge of any other part of the
//!   system. It defines pure data with no behavior beyond invariant
//!   validation and small derived accessors.
//! - **Single Source of Truth:** The trade ledger is the canonical input of
//!   the analytics layer; every derived statistic is a view over it.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{MarketType, OrderType, TradeSide, TradeStatus, TradingSession};
pub use error::CoreError;
pub use structs::{Trade, TradeFees};
