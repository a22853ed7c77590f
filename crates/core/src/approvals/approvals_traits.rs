//! Board-approval repository and service traits.

use async_trait::async_trait;

use super::approvals_model::{BoardApproval, NewBoardApproval, SubmitOutcome};
use crate::errors::Result;

/// Trait defining the contract for BoardApproval persistence.
#[async_trait]
pub trait ApprovalRepositoryTrait: Send + Sync {
    /// Inserts or replaces an approval by its ID.
    async fn save(&self, approval: BoardApproval) -> Result<BoardApproval>;

    /// Retrieves an approval by ID.
    fn get_by_id(&self, approval_id: &str) -> Result<BoardApproval>;

    /// Lists approvals for a fiscal year, newest first.
    fn list_by_year(&self, fiscal_year: i32) -> Result<Vec<BoardApproval>>;
}

/// External capability check for the approve transition.
///
/// Backed by whatever auth collaborator the host application uses; the
/// engine only asks whether an actor may approve.
pub trait ApprovalAuthorizerTrait: Send + Sync {
    fn can_approve(&self, actor: &str) -> bool;
}

/// Trait defining the contract for the board-approval workflow.
///
/// Every transition re-validates the current state regardless of any
/// caller-side gating.
#[async_trait]
pub trait BoardApprovalServiceTrait: Send + Sync {
    /// Creates a draft approval, capturing the fiscal year's equity totals
    /// before and after the proposed updates.
    async fn create_draft(&self, new_approval: NewBoardApproval) -> Result<BoardApproval>;

    /// `Draft -> PendingApproval`. Requires non-empty updates; an equity
    /// total drifting from 100% is returned as a warning, never a block.
    async fn submit(&self, approval_id: &str, submitted_by: &str) -> Result<SubmitOutcome>;

    /// `PendingApproval -> Approved`, gated by the authorizer capability.
    async fn approve(&self, approval_id: &str, approved_by: &str) -> Result<BoardApproval>;

    /// `PendingApproval -> Rejected`. Terminal; mutates no snapshot.
    async fn reject(&self, approval_id: &str, rejected_by: &str) -> Result<BoardApproval>;

    /// `Approved -> Applied`. Mutates every referenced equity snapshot in a
    /// single all-or-nothing operation, then becomes terminal.
    async fn apply(&self, approval_id: &str) -> Result<BoardApproval>;

    /// Retrieves an approval by ID.
    fn get_approval(&self, approval_id: &str) -> Result<BoardApproval>;

    /// Lists approvals for a fiscal year.
    fn list_approvals(&self, fiscal_year: i32) -> Result<Vec<BoardApproval>>;
}
