// 📈 Financial Report - Every derived view in one serializable value
//
// What a dashboard/reports screen needs, computed in one go from a
// collection snapshot. The rendering side decides currency symbols,
// rounding and percentages.

use crate::aggregation::{
    compute_budget_status, compute_category_distribution, compute_investment_distribution,
    compute_investment_total, compute_monthly_series_with, compute_portfolio_series, compute_totals,
    Distribution, MonthlyBucket, PortfolioPoint, Totals,
};
use crate::config::ReportConfig;
use crate::models::{BudgetStatus, Investment, InvestmentType, Transaction};
use chrono::{DateTime, Utc};
use log::info;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub transaction_count: usize,
    pub investment_count: usize,
    pub totals: Totals,
    pub category_distribution: Distribution<String>,
    pub monthly_series: Vec<MonthlyBucket>,
    pub investment_total: Decimal,
    pub investment_distribution: Distribution<InvestmentType>,
    pub portfolio_series: Vec<PortfolioPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub budgets: Vec<BudgetStatus>,
    pub generated_at: DateTime<Utc>,
}

impl FinancialReport {
    pub fn build(
        transactions: &[Transaction],
        investments: &[Investment],
        config: &ReportConfig,
    ) -> Self {
        info!(
            "Building report over {} transactions and {} investments",
            transactions.len(),
            investments.len()
        );

        FinancialReport {
            transaction_count: transactions.len(),
            investment_count: investments.len(),
            totals: compute_totals(transactions),
            category_distribution: compute_category_distribution(transactions),
            monthly_series: compute_monthly_series_with(transactions, config.month_grouping),
            investment_total: compute_investment_total(investments),
            investment_distribution: compute_investment_distribution(investments),
            portfolio_series: compute_portfolio_series(investments),
            budgets: compute_budget_status(transactions, &config.budgets),
            generated_at: Utc::now(),
        }
    }

    /// Budgets whose spending exceeds the limit
    pub fn over_budget(&self) -> Vec<&BudgetStatus> {
        self.budgets.iter().filter(|b| b.is_over_limit()).collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Report: {} transactions (balance {}, income {}, expenses {}), {} investments (value {})",
            self.transaction_count,
            self.totals.balance,
            self.totals.income,
            self.totals.expense,
            self.investment_count,
            self.investment_total
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
