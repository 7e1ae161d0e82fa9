// Personal Finance Tracker - Core Library
// Entry models, the aggregation engine and the boundaries around it

pub mod models;
pub mod aggregation;    // Pure derived views (totals, distributions, series)
pub mod report;
pub mod store;          // Append-only entry collections
pub mod validation;     // Form input → records
pub mod config;
pub mod import;
pub mod error;

// Re-export commonly used types
pub use models::{
    Transaction, TransactionType, NewTransaction,
    Investment, InvestmentType, NewInvestment,
    BudgetLimit, BudgetStatus,
};
pub use aggregation::{
    compute_totals, compute_category_distribution,
    compute_monthly_series, compute_monthly_series_with,
    compute_investment_total, compute_investment_distribution,
    compute_portfolio_series, compute_budget_status,
    Totals, Distribution, DistributionEntry,
    MonthGrouping, MonthKey, MonthlyBucket, PortfolioPoint,
};
pub use report::FinancialReport;
pub use store::EntryStore;
pub use validation::{TransactionForm, InvestmentForm, ValidationError, FieldIssue};
pub use config::{ReportConfig, ConfigError};
pub use import::{
    ImportError,
    load_transactions_csv, load_investments_csv,
    read_transactions, read_investments,
};
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
