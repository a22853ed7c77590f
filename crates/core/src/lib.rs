//! EquityLedger Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for EquityLedger: the year-end
//! profit allocation engine, reconciliation checks, and the board-approval
//! workflow that gates equity-percentage changes. It is storage-agnostic and
//! defines traits that are implemented by the `storage-memory` crate.

pub mod allocation;
pub mod approvals;
pub mod constants;
pub mod errors;
pub mod financials;
pub mod members;
pub mod reconciliation;

// Re-export common types from the allocation and reconciliation modules
pub use allocation::*;
pub use reconciliation::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
