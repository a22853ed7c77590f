use thiserror::Error;

/// Custom error type for allocation-engine operations
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("Fiscal year {0} is already allocated; reverse the prior allocation before recomputing")]
    PeriodLocked(i32),

    #[error("Member {0} has neither a final nor an estimated equity percentage")]
    MissingEquityPercentage(String),

    #[error("No active members found for fiscal year {0}")]
    EmptyRoster(i32),

    #[error("Fiscal year {0} has no allocation to reverse")]
    NothingToReverse(i32),
}

impl From<AllocationError> for String {
    fn from(error: AllocationError) -> Self {
        error.to_string()
    }
}
