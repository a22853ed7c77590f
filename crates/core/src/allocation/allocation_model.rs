//! Allocation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One member's year-end allocation, produced by the allocation calculator.
///
/// Owned by the financial period that produced it; never mutated after
/// creation except by an explicit reversal of the whole period's allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAllocation {
    pub member_id: String,
    pub fiscal_year: i32,
    /// Equity percentage snapshot at calculation time
    pub equity_percentage: Decimal,
    pub beginning_capital_balance: Decimal,
    /// Pass-1 amount: capital balance times the effective return rate
    pub balance_incentive_return: Decimal,
    /// Pass-2 amount: equity share of the remaining income pool
    pub equity_based_allocation: Decimal,
    /// `balance_incentive_return + equity_based_allocation`
    pub allocation_amount: Decimal,
    /// Amount paid out to the member during the year
    pub distributions: Decimal,
    /// `beginning_capital_balance + allocation_amount - distributions`
    pub ending_capital_balance: Decimal,
    pub effective_return_rate: Decimal,
}

/// Per-member input to the allocation calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInput {
    pub member_id: String,
    pub capital_balance: Decimal,
    /// Effective equity percentage; `None` when the member has neither a
    /// final nor an estimated percentage, which fails the calculation.
    pub equity_percentage: Option<Decimal>,
    pub distributions: Decimal,
}

/// The complete output of one allocation calculation for a fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRun {
    pub fiscal_year: i32,
    /// `min(sofr_rate + 5, 10)` in percent
    pub effective_return_rate: Decimal,
    /// Materialized pass-1 sum; pass 2 depends on it completing first
    pub total_balance_incentive_returns: Decimal,
    /// `final_allocable_amount - total_balance_incentive_returns`; may be
    /// negative in a loss-making year and is never clamped
    pub remaining_net_income: Decimal,
    /// Sum of all member allocation amounts
    pub total_allocated: Decimal,
    /// `final_allocable_amount - total_allocated`, the floor-truncation
    /// remainder; reported, never silently absorbed
    pub rounding_remainder: Decimal,
    pub allocations: Vec<MemberAllocation>,
}
