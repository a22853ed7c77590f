use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::approvals_errors::ApprovalError;
use super::approvals_model::{
    ApprovalStatus, BoardApproval, NewBoardApproval, SubmitOutcome,
};
use super::approvals_traits::{
    ApprovalAuthorizerTrait, ApprovalRepositoryTrait, BoardApprovalServiceTrait,
};
use crate::constants::{EQUITY_TOTAL_TARGET, RECONCILIATION_PERCENT_TOLERANCE};
use crate::errors::{Error, Result};
use crate::members::MemberRepositoryTrait;

/// Drives the board-approval state machine for equity-percentage changes.
pub struct BoardApprovalService {
    repository: Arc<dyn ApprovalRepositoryTrait>,
    member_repository: Arc<dyn MemberRepositoryTrait>,
    authorizer: Arc<dyn ApprovalAuthorizerTrait>,
}

impl BoardApprovalService {
    /// Creates a new BoardApprovalService instance
    pub fn new(
        repository: Arc<dyn ApprovalRepositoryTrait>,
        member_repository: Arc<dyn MemberRepositoryTrait>,
        authorizer: Arc<dyn ApprovalAuthorizerTrait>,
    ) -> Self {
        Self {
            repository,
            member_repository,
            authorizer,
        }
    }
}

#[async_trait::async_trait]
impl BoardApprovalServiceTrait for BoardApprovalService {
    async fn create_draft(&self, new_approval: NewBoardApproval) -> Result<BoardApproval> {
        new_approval.validate()?;

        let snapshots = self
            .member_repository
            .get_equity_snapshots(new_approval.fiscal_year)?;
        let total_before: Decimal = snapshots
            .iter()
            .map(|snapshot| snapshot.effective_percentage())
            .sum();
        let delta: Decimal = new_approval
            .updates
            .iter()
            .map(|update| update.new_percentage - update.current_percentage)
            .sum();

        let now = Utc::now().naive_utc();
        let approval = BoardApproval {
            id: Uuid::new_v4().to_string(),
            approval_type: new_approval.approval_type,
            status: ApprovalStatus::Draft,
            fiscal_year: new_approval.fiscal_year,
            total_equity_before: total_before,
            total_equity_after: total_before + delta,
            updates: new_approval.updates,
            submitted_by: None,
            approved_by: None,
            rejected_by: None,
            effective_date: new_approval.effective_date,
            created_at: now,
            updated_at: now,
        };

        debug!(
            "Created draft approval {} for fiscal year {} ({} updates, equity {} -> {})",
            approval.id,
            approval.fiscal_year,
            approval.updates.len(),
            approval.total_equity_before,
            approval.total_equity_after
        );
        self.repository.save(approval).await
    }

    async fn submit(&self, approval_id: &str, submitted_by: &str) -> Result<SubmitOutcome> {
        let mut approval = self.repository.get_by_id(approval_id)?;
        approval.ensure_status(ApprovalStatus::Draft, ApprovalStatus::PendingApproval)?;

        if approval.updates.is_empty() {
            return Err(Error::Approval(ApprovalError::EmptyUpdates(
                approval.id.clone(),
            )));
        }

        let mut warnings = Vec::new();
        let drift = (approval.total_equity_after - EQUITY_TOTAL_TARGET).abs();
        if drift >= RECONCILIATION_PERCENT_TOLERANCE {
            let message = format!(
                "Equity total after applying approval {} would be {}%, expected {}%",
                approval.id, approval.total_equity_after, EQUITY_TOTAL_TARGET
            );
            warn!("{}", message);
            warnings.push(message);
        }

        approval.status = ApprovalStatus::PendingApproval;
        approval.submitted_by = Some(submitted_by.to_string());
        approval.updated_at = Utc::now().naive_utc();
        let approval = self.repository.save(approval).await?;

        Ok(SubmitOutcome { approval, warnings })
    }

    async fn approve(&self, approval_id: &str, approved_by: &str) -> Result<BoardApproval> {
        let mut approval = self.repository.get_by_id(approval_id)?;
        approval.ensure_status(ApprovalStatus::PendingApproval, ApprovalStatus::Approved)?;

        if !self.authorizer.can_approve(approved_by) {
            return Err(Error::Approval(ApprovalError::Unauthorized(
                approved_by.to_string(),
            )));
        }

        approval.status = ApprovalStatus::Approved;
        approval.approved_by = Some(approved_by.to_string());
        approval.updated_at = Utc::now().naive_utc();
        self.repository.save(approval).await
    }

    async fn reject(&self, approval_id: &str, rejected_by: &str) -> Result<BoardApproval> {
        let mut approval = self.repository.get_by_id(approval_id)?;
        approval.ensure_status(ApprovalStatus::PendingApproval, ApprovalStatus::Rejected)?;

        approval.status = ApprovalStatus::Rejected;
        approval.rejected_by = Some(rejected_by.to_string());
        approval.updated_at = Utc::now().naive_utc();
        self.repository.save(approval).await
    }

    async fn apply(&self, approval_id: &str) -> Result<BoardApproval> {
        let mut approval = self.repository.get_by_id(approval_id)?;
        approval.ensure_status(ApprovalStatus::Approved, ApprovalStatus::Applied)?;

        // All snapshots mutate together or not at all; any invalid update
        // aborts before the first write.
        self.member_repository
            .apply_equity_updates(approval.fiscal_year, &approval.updates)
            .await?;

        approval.status = ApprovalStatus::Applied;
        approval.updated_at = Utc::now().naive_utc();
        debug!(
            "Applied approval {}: {} snapshot(s) updated for fiscal year {}",
            approval.id,
            approval.updates.len(),
            approval.fiscal_year
        );
        self.repository.save(approval).await
    }

    fn get_approval(&self, approval_id: &str) -> Result<BoardApproval> {
        self.repository.get_by_id(approval_id)
    }

    fn list_approvals(&self, fiscal_year: i32) -> Result<Vec<BoardApproval>> {
        self.repository.list_by_year(fiscal_year)
    }
}
