// 📥 CSV Import - Load entry collections from files
//
// Each row goes through the same validation boundary as a form
// submission, so nothing malformed reaches the store.
//
// Transactions: type,category,amount,date,description
// Investments:  platform,type,symbol,shares,price,date,notes

use crate::models::{NewInvestment, NewTransaction};
use crate::validation::{InvestmentForm, TransactionForm, ValidationError};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    InvalidRow {
        /// File line, header being line 1
        line: u64,
        #[source]
        source: ValidationError,
    },
}

pub fn load_transactions_csv<P: AsRef<Path>>(path: P) -> Result<Vec<NewTransaction>, ImportError> {
    let records = read_transactions(open(path.as_ref())?)?;
    debug!("Loaded {} transactions from {}", records.len(), path.as_ref().display());
    Ok(records)
}

pub fn load_investments_csv<P: AsRef<Path>>(path: P) -> Result<Vec<NewInvestment>, ImportError> {
    let records = read_investments(open(path.as_ref())?)?;
    debug!("Loaded {} investments from {}", records.len(), path.as_ref().display());
    Ok(records)
}

pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<NewTransaction>, ImportError> {
    read_rows(reader, |form: TransactionForm| form.validate())
}

pub fn read_investments<R: Read>(reader: R) -> Result<Vec<NewInvestment>, ImportError> {
    read_rows(reader, |form: InvestmentForm| form.validate())
}

fn open(path: &Path) -> Result<File, ImportError> {
    File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize each row into a form, then validate it; stop at the first bad row
fn read_rows<R, F, T, V>(reader: R, validate: V) -> Result<Vec<T>, ImportError>
where
    R: Read,
    F: DeserializeOwned,
    V: Fn(F) -> Result<T, ValidationError>,
{
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers: StringRecord = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let form: F = row.deserialize(Some(&headers))?;
        match validate(form) {
            Ok(record) => records.push(record),
            Err(source) => {
                warn!("Rejected CSV line {}: {}", line, source);
                return Err(ImportError::InvalidRow { line, source });
            }
        }
    }

    Ok(records)
}

// ============================================================================
// TESTS
// ============================================================================
