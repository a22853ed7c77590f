use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::allocation_calculator::calculate_allocations;
use super::allocation_errors::AllocationError;
use super::allocation_model::{AllocationInput, AllocationRun, MemberAllocation};
use super::allocation_traits::{AllocationRepositoryTrait, AllocationServiceTrait};
use crate::errors::{Error, Result};
use crate::financials::{FinancialPeriod, FinancialPeriodRepositoryTrait, FinancialsError};
use crate::members::MemberRepositoryTrait;
use crate::reconciliation::{
    reconcile, BalanceSheetTotals, ReconciliationOverride, ReconciliationReport,
    ReconciliationStatus, SystemTotals,
};

/// Orchestrates the year-end allocation: roster assembly, the two-tier
/// calculation, the reconciliation gate, and the atomic commit.
pub struct AllocationService {
    period_repository: Arc<dyn FinancialPeriodRepositoryTrait>,
    member_repository: Arc<dyn MemberRepositoryTrait>,
    allocation_repository: Arc<dyn AllocationRepositoryTrait>,
}

impl AllocationService {
    /// Creates a new AllocationService instance
    pub fn new(
        period_repository: Arc<dyn FinancialPeriodRepositoryTrait>,
        member_repository: Arc<dyn MemberRepositoryTrait>,
        allocation_repository: Arc<dyn AllocationRepositoryTrait>,
    ) -> Self {
        Self {
            period_repository,
            member_repository,
            allocation_repository,
        }
    }

    /// Assembles the calculator's per-member inputs from the active roster.
    fn build_roster(&self, fiscal_year: i32) -> Result<Vec<AllocationInput>> {
        let members = self.member_repository.get_active_members(fiscal_year)?;

        members
            .iter()
            .map(|member| {
                let snapshot = self
                    .member_repository
                    .get_equity_snapshot(&member.id, fiscal_year)?;
                let distributions = self
                    .member_repository
                    .get_total_distributions(&member.id, fiscal_year)?;
                Ok(AllocationInput {
                    member_id: member.id.clone(),
                    capital_balance: snapshot.capital_balance,
                    equity_percentage: Some(snapshot.effective_percentage()),
                    distributions,
                })
            })
            .collect()
    }

    /// Builds the reconciliation report for a period from a freshly computed
    /// run, and stamps the advisory fields onto the period.
    fn reconcile_run(
        period: &mut FinancialPeriod,
        run: &AllocationRun,
        total_equity_percentage: Decimal,
    ) -> ReconciliationReport {
        let ending_capital_total: Decimal = run
            .allocations
            .iter()
            .map(|a| a.ending_capital_balance)
            .sum();

        let system = SystemTotals {
            total_allocated: Some(run.total_allocated),
            total_member_capital_accounts: Some(ending_capital_total),
            total_equity_percentage: Some(total_equity_percentage),
        };
        let balance_sheet = BalanceSheetTotals {
            total_equity: period.total_equity_balance_sheet,
            final_allocable_amount: Some(period.final_allocable_amount),
        };
        let report = reconcile(period.fiscal_year, &system, &balance_sheet);

        period.total_member_capital_accounts = Some(ending_capital_total);
        period.reconciliation_difference = report.capital_accounts_variance();
        period.is_reconciled = report.is_reconciled;
        report
    }

    fn variance_summary(report: &ReconciliationReport) -> String {
        report
            .items
            .iter()
            .filter(|item| item.status != ReconciliationStatus::Matched)
            .map(|item| match item.variance {
                Some(variance) => format!("{}: {}", item.description, variance),
                None => format!("{}: missing", item.description),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[async_trait::async_trait]
impl AllocationServiceTrait for AllocationService {
    fn preview_allocation(&self, fiscal_year: i32) -> Result<AllocationRun> {
        let period = self.period_repository.get_by_year(fiscal_year)?;
        let roster = self.build_roster(fiscal_year)?;
        calculate_allocations(&period, &roster)
    }

    async fn run_allocation(
        &self,
        fiscal_year: i32,
        allocated_by: &str,
        override_reconciliation: Option<ReconciliationOverride>,
    ) -> Result<AllocationRun> {
        let mut period = self.period_repository.get_by_year(fiscal_year)?;
        if period.is_allocated {
            return Err(Error::Allocation(AllocationError::PeriodLocked(fiscal_year)));
        }

        let roster = self.build_roster(fiscal_year)?;
        let run = calculate_allocations(&period, &roster)?;
        debug!(
            "Calculated allocation for fiscal year {}: {} members, total {}, remainder {}",
            fiscal_year,
            run.allocations.len(),
            run.total_allocated,
            run.rounding_remainder
        );

        let total_equity_percentage: Decimal = roster
            .iter()
            .filter_map(|input| input.equity_percentage)
            .sum();
        let report = Self::reconcile_run(&mut period, &run, total_equity_percentage);

        if !report.is_reconciled {
            match override_reconciliation {
                None => {
                    return Err(Error::Financials(FinancialsError::ReconciliationVariance {
                        fiscal_year,
                        difference: Self::variance_summary(&report),
                    }));
                }
                Some(override_) => {
                    warn!(
                        "Committing unreconciled allocation for fiscal year {} on override by {}: {}",
                        fiscal_year,
                        override_.authorized_by,
                        override_.reason
                    );
                    period.reconciliation_override_reason = Some(format!(
                        "{} (authorized by {})",
                        override_.reason, override_.authorized_by
                    ));
                }
            }
        }

        period.is_allocated = true;
        period.allocation_date = Some(Utc::now());
        period.allocated_by = Some(allocated_by.to_string());
        period.updated_at = Utc::now().naive_utc();

        // The commit is the point of no return; a finalize failure after it
        // surfaces with the period already allocated, and reversing the
        // allocation is the recovery path.
        self.allocation_repository
            .commit_allocation_run(period, run.allocations.clone())
            .await?;
        self.member_repository.finalize_snapshots(fiscal_year).await?;

        Ok(run)
    }

    async fn reverse_allocation(&self, fiscal_year: i32) -> Result<FinancialPeriod> {
        let mut period = self.period_repository.get_by_year(fiscal_year)?;
        if !period.is_allocated {
            return Err(Error::Allocation(AllocationError::NothingToReverse(
                fiscal_year,
            )));
        }

        warn!("Reversing committed allocation for fiscal year {}", fiscal_year);
        period.is_allocated = false;
        period.allocation_date = None;
        period.allocated_by = None;
        period.reconciliation_override_reason = None;
        period.updated_at = Utc::now().naive_utc();

        let period = self
            .allocation_repository
            .reverse_allocation_run(period)
            .await?;

        // Reopen the year's snapshots so corrective equity updates can land
        // before a recompute.
        self.member_repository
            .unfinalize_snapshots(fiscal_year)
            .await?;

        Ok(period)
    }

    async fn recompute_allocation(
        &self,
        fiscal_year: i32,
        allocated_by: &str,
        override_reconciliation: Option<ReconciliationOverride>,
    ) -> Result<AllocationRun> {
        self.reverse_allocation(fiscal_year).await?;
        self.run_allocation(fiscal_year, allocated_by, override_reconciliation)
            .await
    }

    async fn reconcile_period(&self, fiscal_year: i32) -> Result<ReconciliationReport> {
        let mut period = self.period_repository.get_by_year(fiscal_year)?;
        let snapshots = self.member_repository.get_equity_snapshots(fiscal_year)?;
        let stored = self.allocation_repository.get_for_year(fiscal_year)?;

        let (total_allocated, capital_total) = if stored.is_empty() {
            (
                None,
                snapshots.iter().map(|s| s.capital_balance).sum::<Decimal>(),
            )
        } else {
            (
                Some(stored.iter().map(|a| a.allocation_amount).sum()),
                stored
                    .iter()
                    .map(|a| a.ending_capital_balance)
                    .sum::<Decimal>(),
            )
        };

        let system = SystemTotals {
            total_allocated,
            total_member_capital_accounts: Some(capital_total),
            total_equity_percentage: Some(
                snapshots.iter().map(|s| s.effective_percentage()).sum(),
            ),
        };
        let balance_sheet = BalanceSheetTotals {
            total_equity: period.total_equity_balance_sheet,
            final_allocable_amount: Some(period.final_allocable_amount),
        };
        let report = reconcile(fiscal_year, &system, &balance_sheet);

        // An allocated period keeps the reconciliation fields stamped at
        // commit time; the fresh report is returned without saving.
        if !period.is_allocated {
            period.total_member_capital_accounts = Some(capital_total);
            period.reconciliation_difference = report.capital_accounts_variance();
            period.is_reconciled = report.is_reconciled;
            period.updated_at = Utc::now().naive_utc();
            self.period_repository.save(period).await?;
        }

        Ok(report)
    }

    fn get_allocations(&self, fiscal_year: i32) -> Result<Vec<MemberAllocation>> {
        self.allocation_repository.get_for_year(fiscal_year)
    }
}
