//! Board-approval domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{errors::ValidationError, Error, Result};

/// Kind of change a board approval governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalType {
    /// The regular year-end equity-percentage update
    AnnualEquityUpdate,
    /// An off-cycle adjustment (e.g. a mid-year admission or retirement)
    SpecialEquityAdjustment,
}

/// Lifecycle state of a board approval.
///
/// Forward-only: `Draft -> PendingApproval -> Approved -> Applied`, with
/// `Rejected` reachable only from `PendingApproval`. `Applied` and `Rejected`
/// are terminal; a rejected approval is never revived, a fresh draft is
/// created instead so the audit history stays intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Draft,
    PendingApproval,
    Approved,
    Applied,
    Rejected,
}

impl ApprovalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApprovalStatus::Applied | ApprovalStatus::Rejected)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApprovalStatus::Draft => "DRAFT",
            ApprovalStatus::PendingApproval => "PENDING_APPROVAL",
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::Applied => "APPLIED",
            ApprovalStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", name)
    }
}

/// One member's percentage change inside a board approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityUpdate {
    pub member_id: String,
    pub current_percentage: Decimal,
    pub new_percentage: Decimal,
}

impl EquityUpdate {
    /// Validates the update in isolation.
    pub fn validate(&self) -> Result<()> {
        if self.member_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "memberId".to_string(),
            )));
        }
        if self.new_percentage < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "New percentage for member {} cannot be negative",
                self.member_id
            ))));
        }
        Ok(())
    }
}

/// A board approval governing changes to member equity percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardApproval {
    pub id: String,
    pub approval_type: ApprovalType,
    pub status: ApprovalStatus,
    pub fiscal_year: i32,
    pub total_equity_before: Decimal,
    pub total_equity_after: Decimal,
    pub updates: Vec<EquityUpdate>,
    pub submitted_by: Option<String>,
    pub approved_by: Option<String>,
    pub rejected_by: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl BoardApproval {
    /// Errors unless this approval sits in `expected`, naming both states.
    pub fn ensure_status(
        &self,
        expected: ApprovalStatus,
        attempted: ApprovalStatus,
    ) -> std::result::Result<(), super::ApprovalError> {
        if self.status != expected {
            return Err(super::ApprovalError::InvalidTransition {
                current: self.status,
                attempted,
            });
        }
        Ok(())
    }
}

/// Input model for creating a new draft approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoardApproval {
    pub approval_type: ApprovalType,
    pub fiscal_year: i32,
    pub updates: Vec<EquityUpdate>,
    pub effective_date: Option<NaiveDate>,
}

impl NewBoardApproval {
    /// Validates the draft data member by member.
    pub fn validate(&self) -> Result<()> {
        for update in &self.updates {
            update.validate()?;
        }
        Ok(())
    }
}

/// Result of submitting a draft: the pending approval plus any advisory
/// warnings (e.g. equity totals drifting from 100%).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub approval: BoardApproval,
    pub warnings: Vec<String>,
}
