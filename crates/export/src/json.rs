use crate::error::ExportError;
use core_types::Trade;
use serde::Serialize;
use std::path::Path;

/// Renders the ledger as pretty-printed JSON.
///
/// Field names are camelCase and timestamps serialize as RFC 3339 UTC, so the
/// output round-trips through the same `Trade` definition.
pub fn trades_to_json(trades: &[Trade]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(trades)?)
}

/// Pretty-prints any serializable report value.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes the ledger to a JSON file at `path`.
pub fn export_trades_json(path: &Path, trades: &[Trade]) -> Result<(), ExportError> {
    std::fs::write(path, trades_to_json(trades)?)?;
    tracing::info!(path = %path.display(), trades = trades.len(), "exported JSON");
    Ok(())
}
