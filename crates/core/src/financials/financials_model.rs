//! Financial period domain models.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// One fiscal year's top-level financial inputs for the firm.
///
/// Mutable while `is_allocated == false`; immutable once the year's allocation
/// has been committed and `allocation_date` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPeriod {
    pub fiscal_year: i32,
    pub net_income: Decimal,
    pub accruals: Decimal,
    pub adjustments: Decimal,
    /// Always recomputed as `net_income + accruals + adjustments`, never
    /// stored independently of its components.
    pub final_allocable_amount: Decimal,
    /// SOFR benchmark rate in percent (e.g. 2.35)
    pub sofr_rate: Decimal,
    pub sofr_source: String,
    pub sofr_period: String,
    pub total_equity_balance_sheet: Option<Decimal>,
    pub total_member_capital_accounts: Option<Decimal>,
    pub reconciliation_difference: Option<Decimal>,
    pub is_reconciled: bool,
    pub is_allocated: bool,
    pub allocation_date: Option<DateTime<Utc>>,
    pub allocated_by: Option<String>,
    /// Reason recorded when an allocation was committed despite an
    /// unreconciled balance sheet.
    pub reconciliation_override_reason: Option<String>,
    /// Optimistic-lock version, bumped on every store write.
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FinancialPeriod {
    /// Recomputes the allocable pool from its three components.
    pub fn recompute_final_allocable_amount(&mut self) {
        self.final_allocable_amount = self.net_income + self.accruals + self.adjustments;
    }
}

/// External SOFR reference-rate observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SofrRate {
    pub rate: Decimal,
    pub source: String,
    pub period: String,
}

/// Input model for creating a new financial period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFinancialPeriod {
    pub fiscal_year: i32,
    pub net_income: Decimal,
    pub accruals: Decimal,
    pub adjustments: Decimal,
    pub sofr_rate: Decimal,
    pub sofr_source: String,
    pub sofr_period: String,
    pub total_equity_balance_sheet: Option<Decimal>,
}

impl NewFinancialPeriod {
    /// Validates the new period data.
    pub fn validate(&self) -> Result<()> {
        if self.sofr_rate < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "SOFR rate cannot be negative, got {}",
                self.sofr_rate
            ))));
        }
        if self.sofr_source.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "sofrSource".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing financial period.
///
/// Only the fields present are changed; the allocable pool is recomputed
/// after every update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPeriodUpdate {
    pub net_income: Option<Decimal>,
    pub accruals: Option<Decimal>,
    pub adjustments: Option<Decimal>,
    pub sofr_rate: Option<Decimal>,
    pub sofr_source: Option<String>,
    pub sofr_period: Option<String>,
    pub total_equity_balance_sheet: Option<Decimal>,
    pub total_member_capital_accounts: Option<Decimal>,
}

impl FinancialPeriodUpdate {
    /// Validates the update data.
    pub fn validate(&self) -> Result<()> {
        if let Some(rate) = self.sofr_rate {
            if rate < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "SOFR rate cannot be negative, got {}",
                    rate
                ))));
            }
        }
        Ok(())
    }

    /// Applies the present fields onto a period, leaving the rest untouched.
    pub fn apply_to(&self, period: &mut FinancialPeriod) {
        if let Some(net_income) = self.net_income {
            period.net_income = net_income;
        }
        if let Some(accruals) = self.accruals {
            period.accruals = accruals;
        }
        if let Some(adjustments) = self.adjustments {
            period.adjustments = adjustments;
        }
        if let Some(sofr_rate) = self.sofr_rate {
            period.sofr_rate = sofr_rate;
        }
        if let Some(ref sofr_source) = self.sofr_source {
            period.sofr_source = sofr_source.clone();
        }
        if let Some(ref sofr_period) = self.sofr_period {
            period.sofr_period = sofr_period.clone();
        }
        if let Some(total_equity) = self.total_equity_balance_sheet {
            period.total_equity_balance_sheet = Some(total_equity);
        }
        if let Some(total_capital) = self.total_member_capital_accounts {
            period.total_member_capital_accounts = Some(total_capital);
        }
        period.recompute_final_allocable_amount();
    }
}
