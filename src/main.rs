use analytics::{AnalyticsBundle, KpiStatus};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::Trade;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Deriverse analytics application.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args),
        Commands::Export(args) => handle_export(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Trading performance analytics for the Deriverse ledger.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the full performance report.
    Report(ReportArgs),

    /// Export the trade ledger to CSV or JSON.
    Export(ExportArgs),
}

#[derive(Parser)]
struct LedgerArgs {
    /// Path to a JSON trade ledger; omit to use a generated demo ledger.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of trades in the generated demo ledger.
    #[arg(long, default_value_t = 250)]
    trades: usize,

    /// Seed for the generated demo ledger.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Also write the full report as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Output format.
    #[arg(long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Destination file.
    #[arg(long)]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

// ==============================================================================
// Ledger Loading
// ==============================================================================

/// Loads the ledger from disk when a path was given, otherwise generates the
/// seeded demo ledger. Every loaded trade is validated before it reaches the
/// calculators.
fn load_ledger(args: &LedgerArgs) -> anyhow::Result<Vec<Trade>> {
    let trades = match &args.input {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read ledger from {}", path.display()))?;
            let trades: Vec<Trade> = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse ledger from {}", path.display()))?;
            for trade in &trades {
                trade
                    .validate()
                    .with_context(|| format!("invalid trade {}", trade.id))?;
            }
            tracing::info!(path = %path.display(), trades = trades.len(), "loaded ledger");
            trades
        }
        None => {
            tracing::info!(count = args.trades, seed = args.seed, "generating demo ledger");
            mock_data::generate_trades(args.trades, args.seed)
        }
    };
    Ok(trades)
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let trades = load_ledger(&args.ledger)?;
    let bundle = AnalyticsBundle::compute(&trades);

    println!("{}", overview_table(&bundle));
    println!("{}", kpi_table(&bundle));
    println!("{}", strategy_table(&bundle));
    println!("{}", health_summary(&bundle));

    if let Some(path) = args.json {
        std::fs::write(&path, export::to_json_pretty(&bundle)?)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("Full report written to {}", path.display());
    }

    Ok(())
}

fn overview_table(bundle: &AnalyticsBundle) -> Table {
    let o = &bundle.overview;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Overview", "Value"]);
    table.add_row(vec!["Total PnL".to_string(), format!("{:.2}", o.total_pnl)]);
    table.add_row(vec!["Total Trades".to_string(), o.total_trades.to_string()]);
    table.add_row(vec!["Win Rate".to_string(), format!("{:.1}%", o.win_rate)]);
    table.add_row(vec![
        "Profit Factor".to_string(),
        if o.profit_factor.is_infinite() {
            "∞".to_string()
        } else {
            format!("{:.2}", o.profit_factor)
        },
    ]);
    table.add_row(vec!["Avg Win".to_string(), format!("{:.2}", o.avg_win)]);
    table.add_row(vec!["Avg Loss".to_string(), format!("{:.2}", o.avg_loss)]);
    table.add_row(vec!["Total Volume".to_string(), format!("{:.2}", o.total_volume)]);
    table.add_row(vec!["Total Fees".to_string(), format!("{:.2}", o.total_fees)]);
    table.add_row(vec!["Today PnL".to_string(), format!("{:.2}", o.today_pnl)]);
    table.add_row(vec!["Week PnL".to_string(), format!("{:.2}", o.week_pnl)]);
    table.add_row(vec!["Month PnL".to_string(), format!("{:.2}", o.month_pnl)]);
    table
}

fn kpi_table(bundle: &AnalyticsBundle) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["KPI", "Value", "Status"]);
    for kpi in &bundle.kpis {
        table.add_row(vec![
            kpi.name.clone(),
            kpi.formatted_value.clone(),
            status_label(kpi.status).to_string(),
        ]);
    }
    table
}

fn strategy_table(bundle: &AnalyticsBundle) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Strategy", "Trades", "Win Rate", "Total PnL", "Sharpe"]);
    for s in &bundle.strategies {
        table.add_row(vec![
            s.name.clone(),
            s.trades.to_string(),
            format!("{:.1}%", s.win_rate),
            format!("{:.2}", s.total_pnl),
            format!("{:.2}", s.sharpe_ratio),
        ]);
    }
    table
}

fn health_summary(bundle: &AnalyticsBundle) -> String {
    let health = &bundle.health;
    let mut out = format!(
        "Risk Health: {} ({}/100)\n",
        health.grade, health.overall
    );
    for warning in &health.warnings {
        out.push_str(&format!("  warning: {warning}\n"));
    }
    for recommendation in &health.recommendations {
        out.push_str(&format!("  recommendation: {recommendation}\n"));
    }
    out
}

fn status_label(status: KpiStatus) -> &'static str {
    match status {
        KpiStatus::Good => "good",
        KpiStatus::Warning => "warning",
        KpiStatus::Danger => "danger",
        KpiStatus::Neutral => "neutral",
    }
}

// ==============================================================================
// Export Command Logic
// ==============================================================================

fn handle_export(args: ExportArgs) -> anyhow::Result<()> {
    let trades = load_ledger(&args.ledger)?;

    match args.format {
        ExportFormat::Csv => export::export_trades_csv(&args.output, &trades)
            .with_context(|| format!("CSV export to {} failed", args.output.display()))?,
        ExportFormat::Json => export::export_trades_json(&args.output, &trades)
            .with_context(|| format!("JSON export to {} failed", args.output.display()))?,
    }

    println!("Exported {} trades to {}", trades.len(), args.output.display());
    Ok(())
}
