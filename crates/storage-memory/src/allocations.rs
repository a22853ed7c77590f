//! In-memory allocation store.
//!
//! Allocation rows and the owning period commit as one unit: the period's
//! version check runs under the allocation map's write lock, so a conflicting
//! writer can never leave the pair half-updated.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use equityledger_core::allocation::{AllocationRepositoryTrait, MemberAllocation};
use equityledger_core::errors::{Error, Result};
use equityledger_core::financials::FinancialPeriod;

use crate::financials::InMemoryFinancialPeriodRepository;

/// Stores member allocations keyed by fiscal year, transactionally paired
/// with the period store.
pub struct InMemoryAllocationRepository {
    period_repository: Arc<InMemoryFinancialPeriodRepository>,
    allocations: RwLock<HashMap<i32, Vec<MemberAllocation>>>,
}

impl InMemoryAllocationRepository {
    pub fn new(period_repository: Arc<InMemoryFinancialPeriodRepository>) -> Self {
        Self {
            period_repository,
            allocations: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AllocationRepositoryTrait for InMemoryAllocationRepository {
    async fn commit_allocation_run(
        &self,
        period: FinancialPeriod,
        allocations: Vec<MemberAllocation>,
    ) -> Result<FinancialPeriod> {
        let mut stored = self
            .allocations
            .write()
            .map_err(|e| Error::Repository(format!("Allocation store lock poisoned: {}", e)))?;

        // Version check first; on conflict nothing is written.
        let saved = self.period_repository.save_checked(period)?;
        stored.insert(saved.fiscal_year, allocations);
        Ok(saved)
    }

    async fn reverse_allocation_run(&self, period: FinancialPeriod) -> Result<FinancialPeriod> {
        let mut stored = self
            .allocations
            .write()
            .map_err(|e| Error::Repository(format!("Allocation store lock poisoned: {}", e)))?;

        let saved = self.period_repository.save_checked(period)?;
        stored.remove(&saved.fiscal_year);
        Ok(saved)
    }

    fn get_for_year(&self, fiscal_year: i32) -> Result<Vec<MemberAllocation>> {
        Ok(self
            .allocations
            .read()
            .map_err(|e| Error::Repository(format!("Allocation store lock poisoned: {}", e)))?
            .get(&fiscal_year)
            .cloned()
            .unwrap_or_default())
    }
}
