//! Member domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Standing of a member in the firm - determines participation in allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    /// Participates in allocations and equity updates
    #[default]
    Active,
    /// Temporarily not participating (e.g. leave of absence)
    Inactive,
    /// Left the firm; capital account may still be winding down
    Retired,
}

/// Domain model representing a member of the firm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub status: MemberStatus,
    pub joined_on: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// Input model for creating a new member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub status: MemberStatus,
    pub joined_on: NaiveDate,
    /// Initial equity percentage for the member's first fiscal year
    pub initial_equity_percentage: Decimal,
}

impl NewMember {
    /// Validates the new member data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Member name cannot be empty".to_string(),
            )));
        }
        if self.initial_equity_percentage < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Initial equity percentage cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Per-member, per-fiscal-year equity snapshot.
///
/// Created at period start from the prior year's snapshot (or from initial
/// equity on hire), mutated by equity-update workflows, and read-only once
/// the period's allocation is processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEquitySnapshot {
    pub member_id: String,
    pub fiscal_year: i32,
    pub estimated_percentage: Decimal,
    /// Set once the year's percentages are finalized; until then the
    /// estimated percentage drives calculations.
    pub final_percentage: Option<Decimal>,
    pub capital_balance: Decimal,
    pub is_finalized: bool,
}

impl MemberEquitySnapshot {
    /// The percentage the allocation engine should use: final when finalized,
    /// estimated otherwise.
    pub fn effective_percentage(&self) -> Decimal {
        if self.is_finalized {
            self.final_percentage.unwrap_or(self.estimated_percentage)
        } else {
            self.estimated_percentage
        }
    }

    /// Validates the snapshot data.
    pub fn validate(&self) -> Result<()> {
        if self.member_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "memberId".to_string(),
            )));
        }
        if self.estimated_percentage < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Estimated percentage for member {} cannot be negative",
                self.member_id
            ))));
        }
        if let Some(final_pct) = self.final_percentage {
            if final_pct < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Final percentage for member {} cannot be negative",
                    self.member_id
                ))));
            }
        }
        Ok(())
    }
}
