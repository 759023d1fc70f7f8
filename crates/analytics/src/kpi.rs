use crate::daily::DailyPerformance;
use crate::overview::OverviewMetrics;
use crate::risk::RiskMetrics;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiUnit {
    Currency,
    Percentage,
    Ratio,
    Number,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiType {
    Performance,
    Risk,
    Attribution,
}

/// Traffic-light classification of a KPI against its fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Good,
    Warning,
    Danger,
    Neutral,
}

/// One display-ready dashboard tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDefinition {
    pub key: String,
    pub name: String,
    pub value: f64,
    pub formatted_value: String,
    pub unit: KpiUnit,
    #[serde(rename = "type")]
    pub kind: KpiType,
    pub status: KpiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_period: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparkline_data: Option<Vec<f64>>,
}

/// Number of trailing daily points on the total-PnL sparkline.
const SPARKLINE_DAYS: usize = 30;

/// Assembles the eight fixed dashboard tiles.
///
/// Threshold bands are part of the contract; each tile classifies its value
/// into good/warning/danger exactly as documented per metric.
pub fn kpi_dashboard(
    overview: &OverviewMetrics,
    risk: &RiskMetrics,
    daily: &[DailyPerformance],
) -> Vec<KpiDefinition> {
    let total_pnl = overview.total_pnl.to_f64().unwrap_or(0.0);
    let today_pnl = overview.today_pnl.to_f64().unwrap_or(0.0);

    let sparkline: Vec<f64> = daily
        .iter()
        .rev()
        .take(SPARKLINE_DAYS)
        .rev()
        .map(|d| d.cumulative_pnl.to_f64().unwrap_or(0.0))
        .collect();

    vec![
        KpiDefinition {
            key: "total_pnl".to_string(),
            name: "Total P&L".to_string(),
            value: total_pnl,
            formatted_value: format!(
                "{}{}",
                if total_pnl >= 0.0 { "+" } else { "-" },
                format_currency(total_pnl)
            ),
            unit: KpiUnit::Currency,
            kind: KpiType::Performance,
            status: if total_pnl > 0.0 {
                KpiStatus::Good
            } else if total_pnl < -1000.0 {
                KpiStatus::Danger
            } else {
                KpiStatus::Warning
            },
            change: Some(today_pnl),
            change_period: Some("today".to_string()),
            description: "Net realized profit/loss across all closed trades".to_string(),
            sparkline_data: Some(sparkline),
        },
        KpiDefinition {
            key: "sharpe_ratio".to_string(),
            name: "Sharpe Ratio".to_string(),
            value: risk.sharpe_ratio,
            formatted_value: format!("{:.2}", risk.sharpe_ratio),
            unit: KpiUnit::Ratio,
            kind: KpiType::Risk,
            status: if risk.sharpe_ratio > 1.5 {
                KpiStatus::Good
            } else if risk.sharpe_ratio > 0.5 {
                KpiStatus::Warning
            } else {
                KpiStatus::Danger
            },
            change: None,
            change_period: None,
            description: "Risk-adjusted return (annualized)".to_string(),
            sparkline_data: None,
        },
        KpiDefinition {
            key: "max_drawdown".to_string(),
            name: "Max Drawdown".to_string(),
            value: risk.max_drawdown_percent,
            formatted_value: format!("{:.1}%", risk.max_drawdown_percent.abs()),
            unit: KpiUnit::Percentage,
            kind: KpiType::Risk,
            status: if risk.max_drawdown_percent.abs() < 10.0 {
                KpiStatus::Good
            } else if risk.max_drawdown_percent.abs() < 20.0 {
                KpiStatus::Warning
            } else {
                KpiStatus::Danger
            },
            change: None,
            change_period: None,
            description: "Largest peak-to-trough decline".to_string(),
            sparkline_data: None,
        },
        KpiDefinition {
            key: "win_rate".to_string(),
            name: "Win Rate".to_string(),
            value: overview.win_rate,
            formatted_value: format!("{:.1}%", overview.win_rate),
            unit: KpiUnit::Percentage,
            kind: KpiType::Performance,
            status: if overview.win_rate > 55.0 {
                KpiStatus::Good
            } else if overview.win_rate > 45.0 {
                KpiStatus::Warning
            } else {
                KpiStatus::Danger
            },
            change: None,
            change_period: None,
            description: "Percentage of profitable trades".to_string(),
            sparkline_data: None,
        },
        KpiDefinition {
            key: "profit_factor".to_string(),
            name: "Profit Factor".to_string(),
            value: overview.profit_factor,
            formatted_value: if overview.profit_factor.is_infinite() {
                "∞".to_string()
            } else {
                format!("{:.2}", overview.profit_factor)
            },
            unit: KpiUnit::Ratio,
            kind: KpiType::Performance,
            status: if overview.profit_factor > 1.5 {
                KpiStatus::Good
            } else if overview.profit_factor > 1.0 {
                KpiStatus::Warning
            } else {
                KpiStatus::Danger
            },
            change: None,
            change_period: None,
            description: "Gross profit / gross loss ratio".to_string(),
            sparkline_data: None,
        },
        KpiDefinition {
            key: "sortino_ratio".to_string(),
            name: "Sortino Ratio".to_string(),
            value: risk.sortino_ratio,
            formatted_value: format!("{:.2}", risk.sortino_ratio),
            unit: KpiUnit::Ratio,
            kind: KpiType::Risk,
            status: if risk.sortino_ratio > 2.0 {
                KpiStatus::Good
            } else if risk.sortino_ratio > 1.0 {
                KpiStatus::Warning
            } else {
                KpiStatus::Danger
            },
            change: None,
            change_period: None,
            description: "Return adjusted for downside risk only".to_string(),
            sparkline_data: None,
        },
        KpiDefinition {
            key: "expectancy".to_string(),
            name: "Expectancy".to_string(),
            value: risk.expectancy,
            formatted_value: format_currency(risk.expectancy),
            unit: KpiUnit::Currency,
            kind: KpiType::Performance,
            status: if risk.expectancy > 0.0 {
                KpiStatus::Good
            } else {
                KpiStatus::Danger
            },
            change: None,
            change_period: None,
            description: "Expected profit per trade".to_string(),
            sparkline_data: None,
        },
        KpiDefinition {
            key: "var_95".to_string(),
            name: "VaR (95%)".to_string(),
            value: risk.var95,
            formatted_value: format_currency(risk.var95.abs()),
            unit: KpiUnit::Currency,
            kind: KpiType::Risk,
            status: if risk.var95.abs() < 500.0 {
                KpiStatus::Good
            } else if risk.var95.abs() < 1000.0 {
                KpiStatus::Warning
            } else {
                KpiStatus::Danger
            },
            change: None,
            change_period: None,
            description: "Maximum expected daily loss at 95% confidence".to_string(),
            sparkline_data: None,
        },
    ]
}

/// `$1,234,567.89` style absolute currency formatting.
fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{frac_part}")
}
