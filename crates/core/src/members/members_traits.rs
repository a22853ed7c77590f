//! Member repository and service traits.
//!
//! These traits define the contract for member and equity-snapshot operations
//! without any storage-specific types, allowing for different storage
//! implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::members_model::{Member, MemberEquitySnapshot, NewMember};
use crate::approvals::EquityUpdate;
use crate::errors::Result;

/// Trait defining the contract for Member repository operations.
#[async_trait]
pub trait MemberRepositoryTrait: Send + Sync {
    /// Creates a new member together with their first-year equity snapshot.
    async fn create(&self, new_member: NewMember, fiscal_year: i32) -> Result<Member>;

    /// Retrieves a member by ID.
    fn get_by_id(&self, member_id: &str) -> Result<Member>;

    /// Lists members active in the given fiscal year.
    fn get_active_members(&self, fiscal_year: i32) -> Result<Vec<Member>>;

    /// Retrieves all equity snapshots for a fiscal year.
    fn get_equity_snapshots(&self, fiscal_year: i32) -> Result<Vec<MemberEquitySnapshot>>;

    /// Retrieves one member's equity snapshot for a fiscal year.
    fn get_equity_snapshot(
        &self,
        member_id: &str,
        fiscal_year: i32,
    ) -> Result<MemberEquitySnapshot>;

    /// Retrieves a member's capital balance for a fiscal year.
    fn get_capital_balance(&self, member_id: &str, fiscal_year: i32) -> Result<Decimal>;

    /// Total distributions paid out to a member during a fiscal year.
    fn get_total_distributions(&self, member_id: &str, fiscal_year: i32) -> Result<Decimal>;

    /// Applies a set of equity-percentage updates to the snapshots of a fiscal
    /// year as a single all-or-nothing operation.
    ///
    /// If any update would leave a snapshot invalid (e.g. a negative resulting
    /// percentage), or targets a finalized snapshot, no snapshot is mutated
    /// and the error is returned. Finalized snapshots fail with
    /// `MembersError::SnapshotFinalized`; reversing the year's allocation
    /// reopens them.
    async fn apply_equity_updates(
        &self,
        fiscal_year: i32,
        updates: &[EquityUpdate],
    ) -> Result<Vec<MemberEquitySnapshot>>;

    /// Marks all of a fiscal year's snapshots finalized, locking in their
    /// final percentages.
    async fn finalize_snapshots(&self, fiscal_year: i32) -> Result<()>;

    /// Clears the finalized flag (and the backfilled final percentages) on a
    /// fiscal year's snapshots, restoring their pre-allocation state when the
    /// year's allocation is reversed.
    async fn unfinalize_snapshots(&self, fiscal_year: i32) -> Result<()>;
}

/// Trait defining the contract for Member service operations.
#[async_trait]
pub trait MemberServiceTrait: Send + Sync {
    /// Creates a new member with business validation.
    async fn create_member(&self, new_member: NewMember, fiscal_year: i32) -> Result<Member>;

    /// Retrieves a member by ID.
    fn get_member(&self, member_id: &str) -> Result<Member>;

    /// Lists members active in the given fiscal year.
    fn get_active_members(&self, fiscal_year: i32) -> Result<Vec<Member>>;

    /// Retrieves all equity snapshots for a fiscal year.
    fn get_equity_snapshots(&self, fiscal_year: i32) -> Result<Vec<MemberEquitySnapshot>>;

    /// Sums the effective equity percentages across a fiscal year's snapshots.
    fn total_equity_percentage(&self, fiscal_year: i32) -> Result<Decimal>;

    /// Checks the fiscal year's equity total against the 100% target.
    ///
    /// Returns the warnings to surface; deviation is advisory, never an error.
    fn check_equity_total(&self, fiscal_year: i32) -> Result<Vec<String>>;
}
