use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use finance_tracker::{EntryStore, FinancialReport, ReportConfig};
use rust_decimal::Decimal;
use std::fmt::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "finance-tracker", version, about = "Personal finance reports from CSV entries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct Inputs {
    /// Transactions CSV (type,category,amount,date,description)
    #[arg(long)]
    transactions: Option<PathBuf>,

    /// Investments CSV (platform,type,symbol,shares,price,date,notes)
    #[arg(long)]
    investments: Option<PathBuf>,

    /// Report configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the full report as JSON
    Report {
        #[command(flatten)]
        inputs: Inputs,

        #[arg(long)]
        pretty: bool,
    },

    /// Print a plain-text dashboard
    Summary {
        #[command(flatten)]
        inputs: Inputs,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Report { inputs, pretty } => {
            let report = build_report(&inputs)?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", json);
        }
        Command::Summary { inputs } => {
            let report = build_report(&inputs)?;
            let mut out = String::new();
            write_summary(&mut out, &report)?;
            print!("{}", out);
        }
    }

    Ok(())
}

fn init_tracing() {
    let log_format = std::env::var("FINANCE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so the JSON report on stdout stays clean
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn build_report(inputs: &Inputs) -> Result<FinancialReport> {
    let config = match &inputs.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };

    let mut store = EntryStore::new();

    if let Some(path) = &inputs.transactions {
        let records = finance_tracker::load_transactions_csv(path)
            .with_context(|| format!("Failed to import transactions from {}", path.display()))?;
        let added = store.import_transactions(records);
        tracing::info!("Imported {} transactions", added);
    }

    if let Some(path) = &inputs.investments {
        let records = finance_tracker::load_investments_csv(path)
            .with_context(|| format!("Failed to import investments from {}", path.display()))?;
        let added = store.import_investments(records);
        tracing::info!("Imported {} investments", added);
    }

    Ok(store.report(&config))
}

fn money(value: Decimal) -> String {
    format!("${:.2}", value)
}

fn write_summary(out: &mut impl Write, report: &FinancialReport) -> fmt::Result {
    writeln!(out, "💰 Personal Finance Summary")?;
    writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(out, "Current Balance:  {}", money(report.totals.balance))?;
    writeln!(out, "Total Income:     {}", money(report.totals.income))?;
    writeln!(out, "Total Expenses:   {}", money(report.totals.expense))?;
    writeln!(out, "Portfolio Value:  {}", money(report.investment_total))?;

    if !report.category_distribution.is_empty() {
        writeln!(out, "\n🏷️  By category")?;
        for entry in report.category_distribution.iter() {
            writeln!(out, "  {:<20} {:>14}", entry.name, money(entry.value))?;
        }
    }

    if !report.monthly_series.is_empty() {
        writeln!(out, "\n📅 By month")?;
        for bucket in &report.monthly_series {
            writeln!(
                out,
                "  {:<10} income {:>14}  expense {:>14}",
                bucket.month.to_string(),
                money(bucket.income),
                money(bucket.expense)
            )?;
        }
    }

    if !report.investment_distribution.is_empty() {
        writeln!(out, "\n📈 Investments by type")?;
        for entry in report.investment_distribution.iter() {
            writeln!(out, "  {:<20} {:>14}", entry.name.label(), money(entry.value))?;
        }
    }

    for budget in &report.budgets {
        let marker = if budget.is_over_limit() { "⚠️ " } else { "✓" };
        writeln!(
            out,
            "{} Budget {}: spent {} of {} ({} left)",
            marker,
            budget.category,
            money(budget.spent),
            money(budget.limit),
            money(budget.remaining())
        )?;
    }

    Ok(())
}
