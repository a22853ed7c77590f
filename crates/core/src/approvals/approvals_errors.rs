use thiserror::Error;

use super::approvals_model::ApprovalStatus;

/// Custom error type for board-approval operations
#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("Invalid board-approval transition from {current} to {attempted}")]
    InvalidTransition {
        current: ApprovalStatus,
        attempted: ApprovalStatus,
    },

    #[error("Caller '{0}' does not hold the board-approval capability")]
    Unauthorized(String),

    #[error("Board approval {0} not found")]
    NotFound(String),

    #[error("Board approval {0} has no equity updates")]
    EmptyUpdates(String),
}

impl From<ApprovalError> for String {
    fn from(error: ApprovalError) -> Self {
        error.to_string()
    }
}
