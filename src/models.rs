// 💵 Entry Models - Transactions and investment entries
//
// Both records are immutable values once created:
// - Identity (UUID) is assigned by the entry store, never reused
// - Edits are modelled as replace-the-record, never in-place mutation
// - Direction of money lives in the type tag, never in a negative amount

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money coming in (salary, refunds, ...)
    Income,

    /// Money going out
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type: '{}'", other)),
        }
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identity (UUID) - assigned on add, never reused
    pub id: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Free-text label, compared case-sensitively by the engine
    pub category: String,

    /// Non-negative; sign comes from `kind`
    pub amount: Decimal,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Build a stored transaction from a record without identity
    pub fn from_new(id: String, new: NewTransaction) -> Self {
        Transaction {
            id,
            kind: new.kind,
            category: new.category,
            amount: new.amount,
            date: new.date,
            description: new.description,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with direction applied: +amount for income, -amount for expense
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Transaction as submitted, before the store assigns an identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

// ============================================================================
// INVESTMENT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    Stock,
    Crypto,
    MutualFund,
    RealEstate,
    Other,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 5] = [
        InvestmentType::Stock,
        InvestmentType::Crypto,
        InvestmentType::MutualFund,
        InvestmentType::RealEstate,
        InvestmentType::Other,
    ];

    /// Wire tag (e.g., "mutual_fund")
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentType::Stock => "stock",
            InvestmentType::Crypto => "crypto",
            InvestmentType::MutualFund => "mutual_fund",
            InvestmentType::RealEstate => "real_estate",
            InvestmentType::Other => "other",
        }
    }

    /// Human-readable label for entry forms
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentType::Stock => "Stock",
            InvestmentType::Crypto => "Cryptocurrency",
            InvestmentType::MutualFund => "Mutual Fund",
            InvestmentType::RealEstate => "Real Estate",
            InvestmentType::Other => "Other",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        InvestmentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| format!("unknown investment type: '{}'", tag))
    }
}

// ============================================================================
// INVESTMENT
// ============================================================================

/// A snapshot of a holding at a recorded date (not a live price)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: String,

    /// Brokerage or exchange (e.g., "Fidelity", "Coinbase")
    pub platform: String,

    #[serde(rename = "type")]
    pub kind: InvestmentType,

    pub symbol: String,

    /// Units held; fractional allowed
    pub shares: Decimal,

    /// Price per unit at `date`
    pub price: Decimal,

    pub date: NaiveDate,

    #[serde(default)]
    pub notes: String,
}

impl Investment {
    pub fn from_new(id: String, new: NewInvestment) -> Self {
        Investment {
            id,
            platform: new.platform,
            kind: new.kind,
            symbol: new.symbol,
            shares: new.shares,
            price: new.price,
            date: new.date,
            notes: new.notes,
        }
    }

    /// shares * price, recomputed on every call; saturates on overflow
    pub fn position_value(&self) -> Decimal {
        self.shares.saturating_mul(self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvestment {
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    pub symbol: String,
    pub shares: Decimal,
    pub price: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

// ============================================================================
// BUDGETS
// ============================================================================

/// Spending cap for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub limit: Decimal,
}

/// A budget limit together with what has been spent against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
}

impl BudgetStatus {
    /// Negative when the budget is exceeded
    pub fn remaining(&self) -> Decimal {
        self.limit.saturating_sub(self.spent)
    }

    pub fn is_over_limit(&self) -> bool {
        self.spent > self.limit
    }
}

// ============================================================================
// TESTS
// ============================================================================
