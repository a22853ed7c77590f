use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::financials_errors::FinancialsError;
use super::financials_model::{FinancialPeriod, FinancialPeriodUpdate, NewFinancialPeriod};
use super::financials_traits::{
    FinancialPeriodRepositoryTrait, FinancialPeriodServiceTrait, SofrRateSourceTrait,
};
use crate::errors::{Error, Result, ValidationError};

/// Service for managing per-fiscal-year financial periods.
pub struct FinancialPeriodService {
    repository: Arc<dyn FinancialPeriodRepositoryTrait>,
    sofr_source: Arc<dyn SofrRateSourceTrait>,
}

impl FinancialPeriodService {
    /// Creates a new FinancialPeriodService instance
    pub fn new(
        repository: Arc<dyn FinancialPeriodRepositoryTrait>,
        sofr_source: Arc<dyn SofrRateSourceTrait>,
    ) -> Self {
        Self {
            repository,
            sofr_source,
        }
    }

    fn require_unallocated(period: &FinancialPeriod) -> Result<()> {
        if period.is_allocated {
            return Err(Error::Financials(FinancialsError::ImmutableState(
                period.fiscal_year,
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl FinancialPeriodServiceTrait for FinancialPeriodService {
    async fn create_period(&self, new_period: NewFinancialPeriod) -> Result<FinancialPeriod> {
        new_period.validate()?;

        if self.repository.exists(new_period.fiscal_year)? {
            return Err(Error::Validation(ValidationError::InvalidInput(
                FinancialsError::DuplicatePeriod(new_period.fiscal_year).to_string(),
            )));
        }

        debug!(
            "Creating financial period for fiscal year {} (net income {})",
            new_period.fiscal_year, new_period.net_income
        );

        let now = Utc::now().naive_utc();
        let mut period = FinancialPeriod {
            fiscal_year: new_period.fiscal_year,
            net_income: new_period.net_income,
            accruals: new_period.accruals,
            adjustments: new_period.adjustments,
            final_allocable_amount: Decimal::ZERO,
            sofr_rate: new_period.sofr_rate,
            sofr_source: new_period.sofr_source,
            sofr_period: new_period.sofr_period,
            total_equity_balance_sheet: new_period.total_equity_balance_sheet,
            total_member_capital_accounts: None,
            reconciliation_difference: None,
            is_reconciled: false,
            is_allocated: false,
            allocation_date: None,
            allocated_by: None,
            reconciliation_override_reason: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        period.recompute_final_allocable_amount();

        self.repository.create(period).await
    }

    async fn update_period(
        &self,
        fiscal_year: i32,
        update: FinancialPeriodUpdate,
    ) -> Result<FinancialPeriod> {
        update.validate()?;

        let mut period = self.repository.get_by_year(fiscal_year)?;
        Self::require_unallocated(&period)?;

        update.apply_to(&mut period);
        period.updated_at = Utc::now().naive_utc();

        self.repository.save(period).await
    }

    async fn refresh_sofr_rate(&self, fiscal_year: i32) -> Result<FinancialPeriod> {
        let rate = self.sofr_source.get_rate(fiscal_year).await?;
        debug!(
            "Refreshed SOFR for fiscal year {}: {}% from {} ({})",
            fiscal_year, rate.rate, rate.source, rate.period
        );

        self.update_period(
            fiscal_year,
            FinancialPeriodUpdate {
                sofr_rate: Some(rate.rate),
                sofr_source: Some(rate.source),
                sofr_period: Some(rate.period),
                ..Default::default()
            },
        )
        .await
    }

    fn get_period(&self, fiscal_year: i32) -> Result<FinancialPeriod> {
        self.repository.get_by_year(fiscal_year)
    }

    fn list_periods(&self) -> Result<Vec<FinancialPeriod>> {
        self.repository.list()
    }
}
