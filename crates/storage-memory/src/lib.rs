//! EquityLedger in-memory storage.
//!
//! Reference implementations of the core repository traits, suitable for
//! tests, demos, and single-process deployments. The period/allocation pair
//! commits as one unit under an optimistic version check, and equity-update
//! application is all-or-nothing, matching the contracts the core traits
//! document.

mod allocations;
mod approvals;
mod financials;
mod members;
mod sofr;

pub use allocations::InMemoryAllocationRepository;
pub use approvals::{AllowListAuthorizer, InMemoryApprovalRepository};
pub use financials::InMemoryFinancialPeriodRepository;
pub use members::InMemoryMemberRepository;
pub use sofr::StaticSofrRateSource;
