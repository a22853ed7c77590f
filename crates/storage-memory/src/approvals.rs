//! In-memory board-approval store and a simple allow-list authorizer.

use async_trait::async_trait;
use dashmap::DashMap;

use equityledger_core::approvals::{
    ApprovalAuthorizerTrait, ApprovalRepositoryTrait, BoardApproval,
};
use equityledger_core::errors::{Error, Result};

/// Stores board approvals keyed by ID.
#[derive(Default)]
pub struct InMemoryApprovalRepository {
    approvals: DashMap<String, BoardApproval>,
}

impl InMemoryApprovalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApprovalRepositoryTrait for InMemoryApprovalRepository {
    async fn save(&self, approval: BoardApproval) -> Result<BoardApproval> {
        self.approvals.insert(approval.id.clone(), approval.clone());
        Ok(approval)
    }

    fn get_by_id(&self, approval_id: &str) -> Result<BoardApproval> {
        self.approvals
            .get(approval_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound(format!("Board approval {}", approval_id)))
    }

    fn list_by_year(&self, fiscal_year: i32) -> Result<Vec<BoardApproval>> {
        let mut approvals: Vec<BoardApproval> = self
            .approvals
            .iter()
            .filter(|entry| entry.value().fiscal_year == fiscal_year)
            .map(|entry| entry.value().clone())
            .collect();
        approvals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(approvals)
    }
}

/// Grants the approval capability to a fixed set of actors.
pub struct AllowListAuthorizer {
    approvers: Vec<String>,
}

impl AllowListAuthorizer {
    pub fn new(approvers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            approvers: approvers.into_iter().map(Into::into).collect(),
        }
    }
}

impl ApprovalAuthorizerTrait for AllowListAuthorizer {
    fn can_approve(&self, actor: &str) -> bool {
        self.approvers.iter().any(|approver| approver == actor)
    }
}
