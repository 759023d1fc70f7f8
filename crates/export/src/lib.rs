//! # Ledger Export
//!
//! Serializes trade ledgers to CSV and JSON with a stable, documented schema.
//! The CSV column order and number formatting are part of the contract;
//! downstream spreadsheets key on them.

pub mod csv;
pub mod error;
pub mod json;

pub use self::csv::{CSV_HEADER, export_trades_csv, trades_to_csv, write_trades_csv};
pub use error::ExportError;
pub use json::{export_trades_json, to_json_pretty, trades_to_json};
