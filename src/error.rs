// ❌ Crate-level error - one type for callers that touch several boundaries
//
// The aggregation engine itself never fails; these come from validation,
// configuration and import.

use crate::config::ConfigError;
use crate::import::ImportError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::TransactionForm;

    fn submit(form: &TransactionForm) -> Result<()> {
        form.validate()?;
        Ok(())
    }

    #[test]
    fn test_validation_error_converts() {
        let err = submit(&TransactionForm::default()).unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("amount"));
    }
}
