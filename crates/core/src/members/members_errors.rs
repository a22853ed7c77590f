use thiserror::Error;

/// Custom error type for member and equity-snapshot operations
#[derive(Debug, Error)]
pub enum MembersError {
    #[error("Equity snapshot for member {member_id} in fiscal year {fiscal_year} is finalized and can no longer be modified")]
    SnapshotFinalized {
        member_id: String,
        fiscal_year: i32,
    },
}

impl From<MembersError> for String {
    fn from(error: MembersError) -> Self {
        error.to_string()
    }
}
