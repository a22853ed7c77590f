//! In-memory financial period store with optimistic versioning.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use equityledger_core::errors::{Error, Result};
use equityledger_core::financials::{
    FinancialPeriod, FinancialPeriodRepositoryTrait, FinancialsError,
};

/// Stores financial periods keyed by fiscal year.
///
/// Every successful save bumps the period's version; a save carrying a stale
/// version fails with `FinancialsError::Conflict`, which is how concurrent
/// allocation commits for the same year are serialized.
#[derive(Default)]
pub struct InMemoryFinancialPeriodRepository {
    periods: RwLock<HashMap<i32, FinancialPeriod>>,
}

impl InMemoryFinancialPeriodRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version-checked save shared by the trait impl and the allocation
    /// store's transactional commit.
    pub(crate) fn save_checked(&self, mut period: FinancialPeriod) -> Result<FinancialPeriod> {
        let mut periods = self
            .periods
            .write()
            .map_err(|e| Error::Repository(format!("Period store lock poisoned: {}", e)))?;

        if let Some(stored) = periods.get(&period.fiscal_year) {
            if stored.version != period.version {
                log::warn!(
                    "Rejecting stale write for fiscal year {}: version {} behind stored {}",
                    period.fiscal_year,
                    period.version,
                    stored.version
                );
                return Err(Error::Financials(FinancialsError::Conflict {
                    fiscal_year: period.fiscal_year,
                    expected: period.version,
                    actual: stored.version,
                }));
            }
        }

        period.version += 1;
        periods.insert(period.fiscal_year, period.clone());
        Ok(period)
    }
}

#[async_trait]
impl FinancialPeriodRepositoryTrait for InMemoryFinancialPeriodRepository {
    async fn create(&self, period: FinancialPeriod) -> Result<FinancialPeriod> {
        let mut periods = self
            .periods
            .write()
            .map_err(|e| Error::Repository(format!("Period store lock poisoned: {}", e)))?;

        if periods.contains_key(&period.fiscal_year) {
            return Err(Error::Financials(FinancialsError::DuplicatePeriod(
                period.fiscal_year,
            )));
        }
        periods.insert(period.fiscal_year, period.clone());
        Ok(period)
    }

    async fn save(&self, period: FinancialPeriod) -> Result<FinancialPeriod> {
        self.save_checked(period)
    }

    fn get_by_year(&self, fiscal_year: i32) -> Result<FinancialPeriod> {
        self.periods
            .read()
            .map_err(|e| Error::Repository(format!("Period store lock poisoned: {}", e)))?
            .get(&fiscal_year)
            .cloned()
            .ok_or(Error::Financials(FinancialsError::NotFound(fiscal_year)))
    }

    fn exists(&self, fiscal_year: i32) -> Result<bool> {
        Ok(self
            .periods
            .read()
            .map_err(|e| Error::Repository(format!("Period store lock poisoned: {}", e)))?
            .contains_key(&fiscal_year))
    }

    fn list(&self) -> Result<Vec<FinancialPeriod>> {
        let mut periods: Vec<FinancialPeriod> = self
            .periods
            .read()
            .map_err(|e| Error::Repository(format!("Period store lock poisoned: {}", e)))?
            .values()
            .cloned()
            .collect();
        periods.sort_by(|a, b| b.fiscal_year.cmp(&a.fiscal_year));
        Ok(periods)
    }
}
