// 🗂️ Entry Store - Append-only holder of the two entry collections
//
// - add_* assigns a fresh UUID and prepends (newest-first)
// - No update/delete: records are values, the collections only grow
// - Reports are recomputed from the current snapshot on every call

use crate::config::ReportConfig;
use crate::models::{Investment, NewInvestment, NewTransaction, Transaction};
use crate::report::FinancialReport;
use log::debug;

#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    /// Newest first
    transactions: Vec<Transaction>,

    /// Newest first
    investments: Vec<Investment>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an identity and put the transaction at the front
    pub fn add_transaction(&mut self, new: NewTransaction) -> Transaction {
        let transaction = Transaction::from_new(new_id(), new);
        debug!(
            "Added {} transaction {} ({} {})",
            transaction.kind, transaction.id, transaction.category, transaction.amount
        );

        self.transactions.insert(0, transaction.clone());
        transaction
    }

    /// Assign an identity and put the investment at the front
    pub fn add_investment(&mut self, new: NewInvestment) -> Investment {
        let investment = Investment::from_new(new_id(), new);
        debug!(
            "Added {} investment {} ({} x {} @ {})",
            investment.kind, investment.id, investment.symbol, investment.shares, investment.price
        );

        self.investments.insert(0, investment.clone());
        investment
    }

    /// Add records in the given order; the last one ends up newest
    ///
    /// Same result as calling `add_transaction` per record, but the
    /// existing entries are shifted once for the whole batch.
    pub fn import_transactions<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = NewTransaction>,
    {
        let batch: Vec<Transaction> = records
            .into_iter()
            .map(|new| Transaction::from_new(new_id(), new))
            .collect();

        let added = batch.len();
        debug!("Importing {} transactions", added);
        self.transactions.splice(0..0, batch.into_iter().rev());
        added
    }

    pub fn import_investments<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = NewInvestment>,
    {
        let batch: Vec<Investment> = records
            .into_iter()
            .map(|new| Investment::from_new(new_id(), new))
            .collect();

        let added = batch.len();
        debug!("Importing {} investments", added);
        self.investments.splice(0..0, batch.into_iter().rev());
        added
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn investment_count(&self) -> usize {
        self.investments.len()
    }

    /// Every derived view over the current collections
    pub fn report(&self, config: &ReportConfig) -> FinancialReport {
        FinancialReport::build(&self.transactions, &self.investments, config)
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// TESTS
// ============================================================================
