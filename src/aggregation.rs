// 📊 Aggregation Engine - Derived views over entry collections
//
// Every function here is pure and total:
// - Input collections are borrowed snapshots, never mutated
// - An empty collection yields the zero/identity result, never an error
// - Results are full-precision decimals; formatting belongs to the caller
//
// One linear pass per view, plus one stable sort for the portfolio series.
// Arithmetic saturates at Decimal::MAX/MIN instead of panicking on overflow.

use crate::models::{BudgetLimit, BudgetStatus, Investment, InvestmentType, Transaction, TransactionType};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ============================================================================
// TOTALS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    /// Always `income - expense` (saturating)
    pub balance: Decimal,
}

/// Sum income and expense amounts and derive the balance
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for tx in transactions {
        match tx.kind {
            TransactionType::Income => income = income.saturating_add(tx.amount),
            TransactionType::Expense => expense = expense.saturating_add(tx.amount),
        }
    }

    Totals {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

// ============================================================================
// DISTRIBUTION (insertion-ordered key → total)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry<K> {
    pub name: K,
    pub value: Decimal,
}

/// Grouped totals, keys in order of first occurrence
///
/// Serializes as a list of `{name, value}` pairs, the shape pie charts consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution<K> {
    entries: Vec<DistributionEntry<K>>,
}

impl<K> Default for Distribution<K> {
    fn default() -> Self {
        Distribution { entries: Vec::new() }
    }
}

impl<K: Eq + Hash + Clone> Distribution<K> {
    /// Fold (key, amount) pairs into per-key sums, keeping encounter order
    pub fn accumulate<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<DistributionEntry<K>> = Vec::new();

        for (key, amount) in items {
            match index.get(&key) {
                Some(&slot) => entries[slot].value = entries[slot].value.saturating_add(amount),
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push(DistributionEntry { name: key, value: amount });
                }
            }
        }

        Distribution { entries }
    }
}

impl<K: PartialEq> Distribution<K> {
    pub fn get(&self, key: &K) -> Option<Decimal> {
        self.entries.iter().find(|e| &e.name == key).map(|e| e.value)
    }
}

impl<K> Distribution<K> {
    pub fn iter(&self) -> impl Iterator<Item = &DistributionEntry<K>> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every group
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.value))
    }

    /// Each group's value as a fraction of the total (0.25 = 25%)
    ///
    /// Empty when the total is zero or a ratio is not representable.
    pub fn shares(&self) -> Vec<(&K, Decimal)> {
        let total = self.total();
        if total.is_zero() {
            return Vec::new();
        }

        self.entries
            .iter()
            .map(|e| e.value.checked_div(total).map(|share| (&e.name, share)))
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default()
    }
}

/// Total amount per category, income and expense summed together
pub fn compute_category_distribution(transactions: &[Transaction]) -> Distribution<String> {
    Distribution::accumulate(
        transactions
            .iter()
            .map(|tx| (tx.category.clone(), tx.amount)),
    )
}

// ============================================================================
// MONTHLY SERIES
// ============================================================================

/// How transaction dates are bucketed into months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthGrouping {
    /// One bucket per (year, month)
    #[default]
    Calendar,

    /// One bucket per month name; January 2023 and January 2024 merge
    MonthOfYear,
}

/// Month bucket key; `year` is None under `MonthGrouping::MonthOfYear`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: Option<i32>,
    /// 1-12
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate, grouping: MonthGrouping) -> Self {
        let year = match grouping {
            MonthGrouping::Calendar => Some(date.year()),
            MonthGrouping::MonthOfYear => None,
        };

        MonthKey {
            year,
            month: date.month(),
        }
    }

    /// Locale-independent short month name ("Jan")
    pub fn short_name(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12]
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} {}", self.short_name(), year),
            None => f.write_str(self.short_name()),
        }
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense per (year, month), oldest month first
pub fn compute_monthly_series(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    compute_monthly_series_with(transactions, MonthGrouping::Calendar)
}

/// Monthly series with an explicit bucketing rule
pub fn compute_monthly_series_with(
    transactions: &[Transaction],
    grouping: MonthGrouping,
) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<MonthKey, (Decimal, Decimal)> = BTreeMap::new();

    for tx in transactions {
        let (income, expense) = buckets
            .entry(MonthKey::from_date(tx.date, grouping))
            .or_insert((Decimal::ZERO, Decimal::ZERO));

        match tx.kind {
            TransactionType::Income => *income = income.saturating_add(tx.amount),
            TransactionType::Expense => *expense = expense.saturating_add(tx.amount),
        }
    }

    buckets
        .into_iter()
        .map(|(month, (income, expense))| MonthlyBucket { month, income, expense })
        .collect()
}

// ============================================================================
// INVESTMENTS
// ============================================================================

/// Sum of shares * price over every entry
pub fn compute_investment_total(investments: &[Investment]) -> Decimal {
    investments
        .iter()
        .fold(Decimal::ZERO, |acc, inv| acc.saturating_add(inv.position_value()))
}

/// Position value per investment type, types in order of first occurrence
pub fn compute_investment_distribution(investments: &[Investment]) -> Distribution<InvestmentType> {
    Distribution::accumulate(
        investments
            .iter()
            .map(|inv| (inv.kind, inv.position_value())),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// One point per entry, ascending by date; ties keep input order
pub fn compute_portfolio_series(investments: &[Investment]) -> Vec<PortfolioPoint> {
    let mut points: Vec<PortfolioPoint> = investments
        .iter()
        .map(|inv| PortfolioPoint {
            date: inv.date,
            value: inv.position_value(),
        })
        .collect();

    // sort_by_key is stable
    points.sort_by_key(|p| p.date);
    points
}

// ============================================================================
// BUDGETS
// ============================================================================

/// Expense spending against each limit, limits kept in the given order
///
/// Only expense transactions count; category match is exact.
pub fn compute_budget_status(transactions: &[Transaction], limits: &[BudgetLimit]) -> Vec<BudgetStatus> {
    let mut spent: HashMap<&str, Decimal> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let total = spent.entry(tx.category.as_str()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(tx.amount);
    }

    limits
        .iter()
        .map(|limit| BudgetStatus {
            category: limit.category.clone(),
            limit: limit.limit,
            spent: spent
                .get(limit.category.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
