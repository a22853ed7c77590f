use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::members_model::{Member, MemberEquitySnapshot, NewMember};
use super::members_traits::{MemberRepositoryTrait, MemberServiceTrait};
use crate::constants::{EQUITY_TOTAL_TARGET, RECONCILIATION_PERCENT_TOLERANCE};
use crate::errors::Result;

/// Service for managing members and their per-year equity snapshots.
pub struct MemberService {
    repository: Arc<dyn MemberRepositoryTrait>,
}

impl MemberService {
    /// Creates a new MemberService instance
    pub fn new(repository: Arc<dyn MemberRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl MemberServiceTrait for MemberService {
    async fn create_member(&self, new_member: NewMember, fiscal_year: i32) -> Result<Member> {
        new_member.validate()?;
        debug!(
            "Creating member '{}' with initial equity {}% for fiscal year {}",
            new_member.name, new_member.initial_equity_percentage, fiscal_year
        );
        self.repository.create(new_member, fiscal_year).await
    }

    fn get_member(&self, member_id: &str) -> Result<Member> {
        self.repository.get_by_id(member_id)
    }

    fn get_active_members(&self, fiscal_year: i32) -> Result<Vec<Member>> {
        self.repository.get_active_members(fiscal_year)
    }

    fn get_equity_snapshots(&self, fiscal_year: i32) -> Result<Vec<MemberEquitySnapshot>> {
        self.repository.get_equity_snapshots(fiscal_year)
    }

    fn total_equity_percentage(&self, fiscal_year: i32) -> Result<Decimal> {
        let snapshots = self.repository.get_equity_snapshots(fiscal_year)?;
        Ok(snapshots
            .iter()
            .map(|s| s.effective_percentage())
            .sum::<Decimal>())
    }

    fn check_equity_total(&self, fiscal_year: i32) -> Result<Vec<String>> {
        let total = self.total_equity_percentage(fiscal_year)?;
        let drift = (total - EQUITY_TOTAL_TARGET).abs();

        let mut warnings = Vec::new();
        if drift >= RECONCILIATION_PERCENT_TOLERANCE {
            let message = format!(
                "Equity percentages for fiscal year {} total {}%, expected {}%",
                fiscal_year, total, EQUITY_TOTAL_TARGET
            );
            warn!("{}", message);
            warnings.push(message);
        }
        Ok(warnings)
    }
}
