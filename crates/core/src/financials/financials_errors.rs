use thiserror::Error;

/// Custom error type for financial-period operations
#[derive(Debug, Error)]
pub enum FinancialsError {
    #[error("Fiscal year {0} already has a financial period")]
    DuplicatePeriod(i32),

    #[error("Financial period for fiscal year {0} not found")]
    NotFound(i32),

    #[error("Financial period for fiscal year {0} is allocated and can no longer be modified")]
    ImmutableState(i32),

    #[error("Fiscal year {fiscal_year} is not reconciled (difference {difference}); supply an override with a reason to allocate anyway")]
    ReconciliationVariance {
        fiscal_year: i32,
        difference: String,
    },

    #[error("Concurrent allocation detected for fiscal year {fiscal_year}: expected version {expected}, store has {actual}")]
    Conflict {
        fiscal_year: i32,
        expected: i64,
        actual: i64,
    },
}

impl From<FinancialsError> for String {
    fn from(error: FinancialsError) -> Self {
        error.to_string()
    }
}
