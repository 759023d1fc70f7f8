use core_types::Trade;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One row of the fee-composition breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub category: String,
    /// Signed amount; maker rebates are a credit and reported negative.
    pub amount: Decimal,
    pub percentage: f64,
    /// Chart color hint carried through to presentation.
    pub color: String,
}

/// Splits closed-trade costs into the four fixed categories.
///
/// The percentage denominator is taker + funding + liquidation: maker rebates
/// are excluded because they offset costs rather than contribute to them.
pub fn fee_breakdown(trades: &[Trade]) -> Vec<FeeBreakdown> {
    let closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();

    let maker: Decimal = closed.iter().map(|t| t.fees.maker).sum();
    let taker: Decimal = closed.iter().map(|t| t.fees.taker).sum();
    let funding: Decimal = closed.iter().map(|t| t.fees.funding.abs()).sum();
    let liquidation: Decimal = closed.iter().map(|t| t.fees.liquidation).sum();
    let grand_total = taker + funding + liquidation;

    let percentage = |amount: Decimal| -> f64 {
        if grand_total > Decimal::ZERO {
            (amount / grand_total).to_f64().unwrap_or(0.0) * 100.0
        } else {
            0.0
        }
    };

    vec![
        FeeBreakdown {
            category: "Taker Fees".to_string(),
            amount: taker,
            percentage: percentage(taker),
            color: "#ef4444".to_string(),
        },
        FeeBreakdown {
            category: "Maker Rebates".to_string(),
            amount: -maker,
            percentage: percentage(maker),
            color: "#22c55e".to_string(),
        },
        FeeBreakdown {
            category: "Funding Fees".to_string(),
            amount: funding,
            percentage: percentage(funding),
            color: "#f59e0b".to_string(),
        },
        FeeBreakdown {
            category: "Liquidation Fees".to_string(),
            amount: liquidation,
            percentage: percentage(liquidation),
            color: "#8b5cf6".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::closed_trade;
    use core_types::TradeFees;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_ledger_reports_four_zero_categories() {
        let rows = fee_breakdown(&[]);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.amount == dec!(0) && r.percentage == 0.0));
    }

    #[test]
    fn maker_rebates_are_negative_and_excluded_from_denominator() {
        let mut trade = closed_trade(0, dec!(10));
        trade.fees = TradeFees::new(dec!(2), dec!(6), dec!(-3), dec!(1));
        let rows = fee_breakdown(&[trade]);

        let taker = &rows[0];
        let maker = &rows[1];
        let funding = &rows[2];
        let liquidation = &rows[3];

        assert_eq!(maker.amount, dec!(-2));
        assert_eq!(funding.amount, dec!(3)); // absolute funding
        // Denominator is 6 + 3 + 1 = 10; maker is excluded.
        assert!((taker.percentage - 60.0).abs() < 1e-9);
        assert!((maker.percentage - 20.0).abs() < 1e-9);
        assert!((funding.percentage - 30.0).abs() < 1e-9);
        assert!((liquidation.percentage - 10.0).abs() < 1e-9);
    }
}
