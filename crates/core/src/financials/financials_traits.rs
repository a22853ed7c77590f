//! Financial period repository and service traits.
//!
//! These traits define the contract for financial-period operations without
//! any storage-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::financials_model::{
    FinancialPeriod, FinancialPeriodUpdate, NewFinancialPeriod, SofrRate,
};
use crate::errors::Result;

/// Trait defining the contract for FinancialPeriod repository operations.
#[async_trait]
pub trait FinancialPeriodRepositoryTrait: Send + Sync {
    /// Creates a new financial period.
    async fn create(&self, period: FinancialPeriod) -> Result<FinancialPeriod>;

    /// Saves an updated financial period, bumping its version.
    ///
    /// Fails with `FinancialsError::Conflict` if the stored version no longer
    /// matches `period.version`.
    async fn save(&self, period: FinancialPeriod) -> Result<FinancialPeriod>;

    /// Retrieves the period for a fiscal year.
    fn get_by_year(&self, fiscal_year: i32) -> Result<FinancialPeriod>;

    /// Returns whether a period exists for the fiscal year.
    fn exists(&self, fiscal_year: i32) -> Result<bool>;

    /// Lists all periods, most recent fiscal year first.
    fn list(&self) -> Result<Vec<FinancialPeriod>>;
}

/// External source of SOFR reference rates, keyed by fiscal year.
///
/// May be a market-data feed or a manually maintained table; rates can always
/// be overridden through a period update.
#[async_trait]
pub trait SofrRateSourceTrait: Send + Sync {
    async fn get_rate(&self, fiscal_year: i32) -> Result<SofrRate>;
}

/// Trait defining the contract for FinancialPeriod service operations.
#[async_trait]
pub trait FinancialPeriodServiceTrait: Send + Sync {
    /// Creates a fiscal year's period with business validation.
    async fn create_period(&self, new_period: NewFinancialPeriod) -> Result<FinancialPeriod>;

    /// Applies a partial update to an unallocated period.
    async fn update_period(
        &self,
        fiscal_year: i32,
        update: FinancialPeriodUpdate,
    ) -> Result<FinancialPeriod>;

    /// Refreshes the period's SOFR fields from the configured rate source.
    async fn refresh_sofr_rate(&self, fiscal_year: i32) -> Result<FinancialPeriod>;

    /// Retrieves the period for a fiscal year.
    fn get_period(&self, fiscal_year: i32) -> Result<FinancialPeriod>;

    /// Lists all periods.
    fn list_periods(&self) -> Result<Vec<FinancialPeriod>>;
}
