//! Allocation repository and service traits.

use async_trait::async_trait;

use super::allocation_model::{AllocationRun, MemberAllocation};
use crate::errors::Result;
use crate::financials::FinancialPeriod;
use crate::reconciliation::{ReconciliationOverride, ReconciliationReport};

/// Trait defining the contract for allocation persistence.
///
/// A period and its allocation set form one transactional unit: commits and
/// reversals replace the year's allocation rows and write the period's
/// allocated flag together, or not at all.
#[async_trait]
pub trait AllocationRepositoryTrait: Send + Sync {
    /// Atomically replaces the fiscal year's allocations and saves the period
    /// (already carrying `is_allocated = true`) in one unit.
    ///
    /// Fails with `FinancialsError::Conflict` when the stored period version
    /// no longer matches the one the run was computed against; the concurrent
    /// committer wins and this run must be recomputed.
    async fn commit_allocation_run(
        &self,
        period: FinancialPeriod,
        allocations: Vec<MemberAllocation>,
    ) -> Result<FinancialPeriod>;

    /// Atomically deletes the fiscal year's allocations and saves the period
    /// with its allocated flag cleared.
    async fn reverse_allocation_run(&self, period: FinancialPeriod) -> Result<FinancialPeriod>;

    /// Retrieves the stored allocations for a fiscal year.
    fn get_for_year(&self, fiscal_year: i32) -> Result<Vec<MemberAllocation>>;
}

/// Trait defining the contract for the allocation engine's service surface.
#[async_trait]
pub trait AllocationServiceTrait: Send + Sync {
    /// Runs the two-tier calculation without committing anything.
    fn preview_allocation(&self, fiscal_year: i32) -> Result<AllocationRun>;

    /// Runs the calculation and commits it: allocations written, period marked
    /// allocated, all as one unit.
    ///
    /// An unreconciled period blocks the commit unless an override (with its
    /// reason) is supplied; the override reason is recorded on the period.
    async fn run_allocation(
        &self,
        fiscal_year: i32,
        allocated_by: &str,
        override_reconciliation: Option<ReconciliationOverride>,
    ) -> Result<AllocationRun>;

    /// Reverses a committed allocation, reopening the period.
    async fn reverse_allocation(&self, fiscal_year: i32) -> Result<FinancialPeriod>;

    /// Reverses then re-runs the allocation - the only path to recompute an
    /// allocated period.
    async fn recompute_allocation(
        &self,
        fiscal_year: i32,
        allocated_by: &str,
        override_reconciliation: Option<ReconciliationOverride>,
    ) -> Result<AllocationRun>;

    /// Recomputes the period's reconciliation state against its balance-sheet
    /// figures. Advisory only; the result is stored on the period while it is
    /// unallocated, otherwise the commit-time fields stand and only the
    /// report is returned.
    async fn reconcile_period(&self, fiscal_year: i32) -> Result<ReconciliationReport>;

    /// Retrieves the stored allocations for a fiscal year.
    fn get_allocations(&self, fiscal_year: i32) -> Result<Vec<MemberAllocation>>;
}
