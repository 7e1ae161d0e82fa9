// 🛡️ Input Validation - Raw form input → well-typed entry records
//
// The aggregation engine assumes well-formed, non-negative numbers.
// This is the boundary that makes that true: every record added to the
// store comes through here (forms, CSV rows).

use crate::models::{InvestmentType, NewInvestment, NewTransaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Date format accepted from forms and CSV files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount, share count or price accepted at the boundary
///
/// 10^12 * 10^12 per position leaves four orders of magnitude of headroom
/// below `Decimal::MAX` for sums over many entries.
pub const MAX_INPUT_VALUE: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Significant digits a `Decimal` holds without rounding
const MAX_DIGITS: usize = 28;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every problem found in one submitted record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(FieldIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

/// Collects field issues while a record is being checked
#[derive(Default)]
struct Checker {
    issues: Vec<FieldIssue>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: String) {
        self.issues.push(FieldIssue {
            field: field.to_string(),
            message,
        });
    }

    fn required(&mut self, field: &str, raw: &str) -> String {
        let value = raw.trim();
        if value.is_empty() {
            self.fail(field, "is required".to_string());
        }
        value.to_string()
    }

    fn tag<T: FromStr<Err = String>>(&mut self, field: &str, raw: &str) -> Option<T> {
        match raw.parse::<T>() {
            Ok(tag) => Some(tag),
            Err(message) => {
                self.fail(field, message);
                None
            }
        }
    }

    fn non_negative(&mut self, field: &str, raw: &str) -> Option<Decimal> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.fail(field, "is required".to_string());
            return None;
        }

        if !is_plain_number(raw) {
            self.fail(field, format!("'{}' is not a number", raw));
            return None;
        }
        if digit_count(raw) > MAX_DIGITS {
            self.fail(field, format!("'{}' has more than {} significant digits", raw, MAX_DIGITS));
            return None;
        }

        // from_str_exact errors where from_str would silently round
        match Decimal::from_str_exact(raw) {
            Ok(value) if value.is_zero() => Some(Decimal::ZERO),
            Ok(value) if value.is_sign_negative() => {
                self.fail(field, format!("must not be negative (got {})", raw));
                None
            }
            Ok(value) if value > MAX_INPUT_VALUE => {
                self.fail(field, format!("must not exceed {} (got {})", MAX_INPUT_VALUE, raw));
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                self.fail(field, format!("'{}' is not a number", raw));
                None
            }
        }
    }

    fn date(&mut self, field: &str, raw: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                self.fail(field, format!("'{}' is not a YYYY-MM-DD date", raw.trim()));
                None
            }
        }
    }

    fn finish<T>(self, record: Option<T>) -> Result<T, ValidationError> {
        match record {
            Some(record) if self.issues.is_empty() => Ok(record),
            _ => Err(ValidationError { issues: self.issues }),
        }
    }
}

/// Optional sign, digits, at most one decimal point; no separators or exponents
fn is_plain_number(raw: &str) -> bool {
    let body = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    let mut digits = 0;
    let mut points = 0;

    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }

    digits > 0 && points <= 1
}

/// Digits left once leading zeros are dropped
fn digit_count(raw: &str) -> usize {
    raw.chars()
        .filter(char::is_ascii_digit)
        .skip_while(|&c| c == '0')
        .count()
}

// ============================================================================
// TRANSACTION FORM
// ============================================================================

/// Transaction fields exactly as typed by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl TransactionForm {
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let mut check = Checker::default();

        let kind = check.tag::<TransactionType>("type", &self.kind);
        let category = check.required("category", &self.category);
        let amount = check.non_negative("amount", &self.amount);
        let date = check.date("date", &self.date);

        let record = match (kind, amount, date) {
            (Some(kind), Some(amount), Some(date)) => Some(NewTransaction {
                kind,
                category,
                amount,
                date,
                description: self.description.trim().to_string(),
            }),
            _ => None,
        };

        check.finish(record)
    }
}

// ============================================================================
// INVESTMENT FORM
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestmentForm {
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub symbol: String,
    pub shares: String,
    pub price: String,
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl InvestmentForm {
    pub fn validate(&self) -> Result<NewInvestment, ValidationError> {
        let mut check = Checker::default();

        let platform = check.required("platform", &self.platform);
        let kind = check.tag::<InvestmentType>("type", &self.kind);
        let symbol = check.required("symbol", &self.symbol);
        let shares = check.non_negative("shares", &self.shares);
        let price = check.non_negative("price", &self.price);
        let date = check.date("date", &self.date);

        let record = match (kind, shares, price, date) {
            (Some(kind), Some(shares), Some(price), Some(date)) => Some(NewInvestment {
                platform,
                kind,
                symbol,
                shares,
                price,
                date,
                notes: self.notes.trim().to_string(),
            }),
            _ => None,
        };

        check.finish(record)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_transaction_form() -> TransactionForm {
        TransactionForm {
            kind: "expense".to_string(),
            category: "Groceries".to_string(),
            amount: "45.99".to_string(),
            date: "2024-01-15".to_string(),
            description: "  weekly shop ".to_string(),
        }
    }

    fn valid_investment_form() -> InvestmentForm {
        InvestmentForm {
            platform: "Coinbase".to_string(),
            kind: "crypto".to_string(),
            symbol: "ETH".to_string(),
            shares: "0.000001".to_string(),
            price: "2500.00".to_string(),
            date: "2024-03-01".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_valid_transaction_form() {
        let tx = valid_transaction_form().validate().unwrap();

        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.amount, dec!(45.99));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(tx.description, "weekly shop");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut form = valid_transaction_form();
        form.amount = "-10".to_string();

        let err = form.validate().unwrap_err();
        assert!(err.has_issue("amount"));
        assert_eq!(err.issues.len(), 1);
    }

    #[test]
    fn test_negative_zero_is_accepted_as_zero() {
        let mut form = valid_transaction_form();
        form.amount = "-0".to_string();

        let tx = form.validate().unwrap();
        assert!(tx.amount.is_zero());
    }

    #[test]
    fn test_all_issues_collected() {
        let form = TransactionForm {
            kind: "transfer".to_string(),
            category: "   ".to_string(),
            amount: "abc".to_string(),
            date: "01/15/2024".to_string(),
            description: String::new(),
        };

        let err = form.validate().unwrap_err();

        assert!(err.has_issue("type"));
        assert!(err.has_issue("category"));
        assert!(err.has_issue("amount"));
        assert!(err.has_issue("date"));
        assert!(err.to_string().starts_with("invalid input: "));
    }

    #[test]
    fn test_blank_category_alone_fails() {
        let mut form = valid_transaction_form();
        form.category = String::new();

        let err = form.validate().unwrap_err();
        assert_eq!(err.issues, vec![FieldIssue {
            field: "category".to_string(),
            message: "is required".to_string(),
        }]);
    }

    #[test]
    fn test_valid_investment_form() {
        let inv = valid_investment_form().validate().unwrap();

        assert_eq!(inv.kind, InvestmentType::Crypto);
        assert_eq!(inv.shares, dec!(0.000001));
        assert_eq!(inv.price, dec!(2500));
    }

    #[test]
    fn test_investment_form_rejects_bad_fields() {
        let mut form = valid_investment_form();
        form.kind = "bond".to_string();
        form.symbol = String::new();
        form.price = "-1".to_string();
        form.shares = String::new();

        let err = form.validate().unwrap_err();

        assert!(err.has_issue("type"));
        assert!(err.has_issue("symbol"));
        assert!(err.has_issue("price"));
        assert!(err.has_issue("shares"));
        assert!(!err.has_issue("platform"));
    }

    #[test]
    fn test_values_above_maximum_rejected() {
        let mut form = valid_investment_form();
        form.shares = "100000000000000000".to_string();
        form.price = "1000000000000000".to_string();

        let err = form.validate().unwrap_err();
        assert!(err.has_issue("shares"));
        assert!(err.has_issue("price"));

        let mut tx = valid_transaction_form();
        tx.amount = "79228162514264337593543950335".to_string();
        assert!(tx.validate().unwrap_err().has_issue("amount"));
    }

    #[test]
    fn test_maximum_itself_accepted() {
        assert_eq!(MAX_INPUT_VALUE, dec!(1000000000000));

        let mut form = valid_transaction_form();
        form.amount = "1000000000000".to_string();
        assert_eq!(form.validate().unwrap().amount, MAX_INPUT_VALUE);

        form.amount = "1000000000000.01".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_digit_separators_and_exponents_rejected() {
        for raw in ["1_000", "1,000", "1e3", "1.2.3", ".", "+", "0x10", "1 000"] {
            let mut form = valid_transaction_form();
            form.amount = raw.to_string();

            let err = form.validate().unwrap_err();
            assert!(err.has_issue("amount"), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_excess_precision_rejected_instead_of_rounded() {
        let mut form = valid_investment_form();
        form.shares = "0.123456789012345678901234567891".to_string();

        let err = form.validate().unwrap_err();
        assert!(err.has_issue("shares"));
        assert!(err.to_string().contains("significant digits"));

        // 28 digits fit exactly
        form.shares = "0.1234567890123456789012345678".to_string();
        assert_eq!(form.validate().unwrap().shares, dec!(0.1234567890123456789012345678));
    }

    #[test]
    fn test_plain_number_forms_accepted() {
        for (raw, expected) in [("+12.5", dec!(12.5)), ("007", dec!(7)), ("0.50", dec!(0.50))] {
            let mut form = valid_transaction_form();
            form.amount = raw.to_string();
            assert_eq!(form.validate().unwrap().amount, expected, "{}", raw);
        }
    }
}
