use crate::error::ExportError;
use ::csv::Writer;
use chrono::{DateTime, SecondsFormat, Utc};
use core_types::Trade;
use std::io::Write;
use std::path::Path;

/// Fixed column order of the trade export.
pub const CSV_HEADER: [&str; 23] = [
    "ID",
    "Symbol",
    "MarketType",
    "Side",
    "OrderType",
    "Status",
    "EntryPrice",
    "ExitPrice",
    "Quantity",
    "Leverage",
    "EntryTime",
    "ExitTime",
    "PnL",
    "PnLPercent",
    "TotalFees",
    "MakerFees",
    "TakerFees",
    "FundingFees",
    "FundingPayments",
    "Strategy",
    "Tags",
    "Annotation",
    "TxSignature",
];

/// Streams the ledger as CSV into `writer`.
///
/// Prices and quantities carry 6 decimal places, monetary results 4.
/// Timestamps are RFC 3339 UTC with millisecond precision; optional fields
/// render as empty cells and tags join on `;` within their single column.
pub fn write_trades_csv<W: Write>(writer: W, trades: &[Trade]) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for trade in trades {
        let record: [String; 23] = [
            trade.id.clone(),
            trade.symbol.clone(),
            trade.market_type.as_str().to_string(),
            trade.side.as_str().to_string(),
            trade.order_type.as_str().to_string(),
            trade.status.as_str().to_string(),
            format!("{:.6}", trade.entry_price),
            trade
                .exit_price
                .map(|p| format!("{p:.6}"))
                .unwrap_or_default(),
            format!("{:.6}", trade.quantity),
            trade.leverage.to_string(),
            iso(trade.entry_time),
            trade.exit_time.map(iso).unwrap_or_default(),
            format!("{:.4}", trade.pnl),
            format!("{:.4}", trade.pnl_percent),
            format!("{:.4}", trade.fees.total),
            format!("{:.4}", trade.fees.maker),
            format!("{:.4}", trade.fees.taker),
            format!("{:.4}", trade.fees.funding),
            format!("{:.4}", trade.funding_payments),
            trade.strategy.clone().unwrap_or_default(),
            trade.tags.join(";"),
            trade.annotation.clone().unwrap_or_default(),
            trade.tx_signature.clone(),
        ];
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Renders the ledger as a CSV string.
pub fn trades_to_csv(trades: &[Trade]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_trades_csv(&mut buffer, trades)?;
    String::from_utf8(buffer).map_err(|_| ExportError::InvalidUtf8)
}

/// Writes the ledger to a CSV file at `path`.
pub fn export_trades_csv(path: &Path, trades: &[Trade]) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_trades_csv(file, trades)?;
    tracing::info!(path = %path.display(), trades = trades.len(), "exported CSV");
    Ok(())
}

fn iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mock_data::generate_trades_at;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn header_row_matches_the_contract() {
        let out = trades_to_csv(&[]).unwrap();
        assert_eq!(
            out.trim_end(),
            "ID,Symbol,MarketType,Side,OrderType,Status,EntryPrice,ExitPrice,Quantity,\
             Leverage,EntryTime,ExitTime,PnL,PnLPercent,TotalFees,MakerFees,TakerFees,\
             FundingFees,FundingPayments,Strategy,Tags,Annotation,TxSignature"
        );
    }

    #[test]
    fn every_row_has_all_columns() {
        let trades = generate_trades_at(25, 42, anchor());
        let out = trades_to_csv(&trades).unwrap();
        let mut reader = ::csv::Reader::from_reader(out.as_bytes());
        let mut rows = 0;
        for record in reader.records() {
            assert_eq!(record.unwrap().len(), CSV_HEADER.len());
            rows += 1;
        }
        assert_eq!(rows, 25);
    }

    #[test]
    fn open_trades_leave_exit_cells_empty() {
        let trades = generate_trades_at(250, 42, anchor());
        let open_position = trades
            .iter()
            .position(|t| !t.is_closed())
            .expect("seeded ledger contains open trades");
        let out = trades_to_csv(&trades).unwrap();
        let record = ::csv::Reader::from_reader(out.as_bytes())
            .into_records()
            .nth(open_position)
            .unwrap()
            .unwrap();
        assert_eq!(&record[7], ""); // ExitPrice
        assert_eq!(&record[11], ""); // ExitTime
    }

    #[test]
    fn annotations_with_commas_survive_a_round_trip() {
        let mut trade = generate_trades_at(1, 42, anchor()).remove(0);
        trade.annotation = Some("stopped out, \"twice\"".to_string());
        let out = trades_to_csv(&[trade]).unwrap();
        let record = ::csv::Reader::from_reader(out.as_bytes())
            .into_records()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(&record[21], "stopped out, \"twice\"");
    }

    #[test]
    fn export_writes_a_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        let trades = generate_trades_at(10, 42, anchor());
        export_trades_csv(&path, &trades).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 11);
    }
}
