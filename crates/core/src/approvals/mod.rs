//! Approvals module - the board-approval workflow gating equity changes.

mod approvals_errors;
mod approvals_model;
mod approvals_service;
mod approvals_traits;

#[cfg(test)]
mod approvals_service_tests;

pub use approvals_errors::ApprovalError;
pub use approvals_model::{
    ApprovalStatus, ApprovalType, BoardApproval, EquityUpdate, NewBoardApproval, SubmitOutcome,
};
pub use approvals_service::BoardApprovalService;
pub use approvals_traits::{
    ApprovalAuthorizerTrait, ApprovalRepositoryTrait, BoardApprovalServiceTrait,
};
